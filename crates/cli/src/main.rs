// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

use holdem_bot::PersonalityBot;
use holdem_core::Chips;
use holdem_table::{Config, Table};

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of seats at the table.
    #[clap(long, short, default_value_t = 8)]
    seats: usize,
    /// Chips each seat starts with.
    #[clap(long, short, default_value_t = 1_000)]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Seed for a reproducible game.
    #[clap(long)]
    seed: Option<u64>,
    /// Only AI seats play.
    #[clap(long)]
    no_human: bool,
    /// Print events as JSON lines.
    #[clap(long)]
    json: bool,
    /// No pauses for AI seats and between hands.
    #[clap(long)]
    fast: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut config = Config {
        seats: cli.seats,
        chips: Chips::new(cli.chips),
        small_blind: Chips::new(cli.small_blind),
        big_blind: Chips::new(cli.big_blind),
        human: !cli.no_human,
        seed: cli.seed,
        ..Config::default()
    };

    if cli.fast {
        config.think_delay = Duration::ZERO..Duration::ZERO;
        config.hand_delay = Duration::ZERO;
    }

    // Each AI seat gets its own generator derived from the game seed.
    let mut seeds = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let table = Table::spawn(config, |_, personality| {
        PersonalityBot::new(personality, StdRng::seed_from_u64(seeds.random()))
    })?;

    let output = if cli.json {
        terminal::Output::Json
    } else {
        terminal::Output::Text
    };

    terminal::run(table, output).await
}
