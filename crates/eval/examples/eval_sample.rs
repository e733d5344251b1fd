// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_sample -- --hands 1000000
// ...
// Total hands      1000000
// Elapsed:         2.114s
// Hands/sec:       473036
//
// High Card:       174070
// Pair:            438285
// ...
// ```
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Instant;

use holdem_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of random 7 cards hands to evaluate.
    #[clap(long, default_value_t = 100_000)]
    hands: usize,
    /// Random generator seed.
    #[clap(long, default_value_t = 1)]
    seed: u64,
}

fn main() {
    let cli = Cli::parse();
    let mut rng = StdRng::seed_from_u64(cli.seed);

    let now = Instant::now();
    let mut counts = [0usize; HandRank::COUNT];

    for _ in 0..cli.hands {
        let mut deck = Deck::new_and_shuffled(&mut rng);
        let hand = deck.deal_n(7);
        match HandValue::eval(&hand) {
            Ok(hv) => counts[hv.rank() as usize] += 1,
            Err(e) => {
                eprintln!("Evaluation failed: {e}");
                return;
            }
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();

    println!("Total hands      {total}");
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    let ranks = [
        HandRank::HighCard,
        HandRank::Pair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
        HandRank::RoyalFlush,
    ];

    for rank in ranks {
        let label = format!("{}:", rank.name());
        println!("{label:<17}{}", counts[rank as usize]);
    }
}
