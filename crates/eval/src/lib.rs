// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator classifies
//! every 5 cards subset of a hand and keeps the best one, with at most 7 cards
//! there are only 21 subsets to check.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use holdem_eval::*;
//! let cards = ["AS", "AD", "KC", "KH", "2S", "7D", "9C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//!
//! let hv = HandValue::eval(&cards).unwrap();
//! assert_eq!(hv.rank(), HandRank::TwoPair);
//!
//! // Not enough cards for a poker hand.
//! assert!(HandValue::eval(&cards[..4]).is_err());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue, compare_hands, determine_winners};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
