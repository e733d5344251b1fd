// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah.value() > kd.value());
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards, a new deck is shuffled
//! with a user provided random generator so that games can be replayed:
//!
//! ```
//! # use holdem_cards::Deck;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let mut rng = StdRng::seed_from_u64(101);
//! let mut deck = Deck::new_and_shuffled(&mut rng);
//! let hole = deck.deal_n(2);
//! assert_eq!(hole.len(), 2);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
