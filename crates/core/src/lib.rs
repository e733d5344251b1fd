// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem core types shared by the table and its players.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod game_state;
pub mod message;
pub mod poker;

pub use game_state::{ActionRequest, SeatSnapshot, TableSnapshot};
pub use message::{Action, HandPayoff, HandResult, PlayerAction, TableEvent};
pub use poker::{Card, Chips, Deck, HandRank, HandValue, Rank, Round, SeatCards, SeatId, Suit};
