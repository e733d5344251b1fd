// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! It provides a [HandValue::eval_five] method that classifies a single five
//! cards hand, and a [HandValue::eval] method that finds the best five cards
//! hand out of 5 to 7 cards by checking all the five cards subsets.
//!
//! Hands compare by rank first and then by their tie break values, two hands
//! with the same rank always have the same number of tie break values.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use holdem_cards::{Card, Rank};

mod winners;
pub use winners::determine_winners;

/// Evaluation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The hand has fewer than 5 cards.
    #[error("Insufficient cards: a poker hand needs 5 cards, got {0}")]
    InsufficientCards(usize),
    /// The hand has more than 7 cards.
    #[error("Too many cards: a hand can have at most 7 cards, got {0}")]
    TooManyCards(usize),
    /// The same card appears twice.
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
}

/// The hand category from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight with all cards of the same suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The number of hand categories.
    pub const COUNT: usize = 10;

    /// The hand rank name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }

    /// The rank ordinal from 0 (high card) to 9 (royal flush).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The value of a five cards poker hand.
///
/// Equality and ordering only look at the rank and the tie break values, two
/// hands made of different cards compare equal if they split a pot.
#[derive(Debug, Clone)]
pub struct HandValue {
    rank: HandRank,
    values: Vec<u8>,
    cards: [Card; 5],
}

impl HandValue {
    /// Evaluates the best five cards hand out of 5 to 7 cards.
    pub fn eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        let n = cards.len();
        if n < 5 {
            return Err(EvalError::InsufficientCards(n));
        }

        if n > 7 {
            return Err(EvalError::TooManyCards(n));
        }

        for (idx, card) in cards.iter().enumerate() {
            if cards[idx + 1..].contains(card) {
                return Err(EvalError::DuplicateCard(*card));
            }
        }

        let mut best: Option<HandValue> = None;
        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let hv = Self::eval_five(&hand);
                            if best.as_ref().is_none_or(|b| hv > *b) {
                                best = Some(hv);
                            }
                        }
                    }
                }
            }
        }

        best.ok_or(EvalError::InsufficientCards(n))
    }

    /// Classifies a five cards hand.
    pub fn eval_five(cards: &[Card; 5]) -> HandValue {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()));

        let mut counts = [0u8; 13];
        for c in &sorted {
            counts[c.value() as usize] += 1;
        }

        // Group ranks by multiplicity, larger groups first then higher ranks, so
        // that the group values are the tie break values for every category
        // that is not a straight or a flush.
        let mut groups = (0..13u8)
            .rev()
            .filter(|&v| counts[v as usize] > 0)
            .map(|v| (counts[v as usize], v))
            .collect::<Vec<_>>();
        groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let values = groups.iter().map(|g| g.1).collect::<Vec<_>>();
        let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
        let straight_high = straight_high(&values);

        let (rank, values) = match (straight_high, is_flush) {
            (Some(high), true) if high == Rank::Ace.value() => (HandRank::RoyalFlush, vec![high]),
            (Some(high), true) => (HandRank::StraightFlush, vec![high]),
            _ if groups[0].0 == 4 => (HandRank::FourOfAKind, values),
            _ if groups[0].0 == 3 && groups[1].0 == 2 => (HandRank::FullHouse, values),
            (_, true) => (HandRank::Flush, values),
            (Some(high), false) => (HandRank::Straight, vec![high]),
            _ if groups[0].0 == 3 => (HandRank::ThreeOfAKind, values),
            _ if groups[0].0 == 2 && groups[1].0 == 2 => (HandRank::TwoPair, values),
            _ if groups[0].0 == 2 => (HandRank::Pair, values),
            _ => (HandRank::HighCard, values),
        };

        HandValue {
            rank,
            values,
            cards: sorted,
        }
    }

    /// The hand rank.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tie break values from the most to the least significant.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// The five cards that make this hand sorted by rank.
    pub fn hand(&self) -> &[Card; 5] {
        &self.cards
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for c in &self.cards {
            write!(f, " {c}")?;
        }
        Ok(())
    }
}

/// Compares two hands by rank and then by tie break values.
pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

/// Returns the straight high card value given five distinct values sorted from
/// high to low, the wheel A-2-3-4-5 is a five high straight.
fn straight_high(values: &[u8]) -> Option<u8> {
    const WHEEL: [u8; 5] = [12, 3, 2, 1, 0];

    if values.len() != 5 {
        None
    } else if values[0] - values[4] == 4 {
        Some(values[0])
    } else if values == WHEEL {
        Some(Rank::Five.value())
    } else {
        None
    }
}
