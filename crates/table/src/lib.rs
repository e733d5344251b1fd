// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table.
//!
//! The [State](table::State) type runs the betting rounds of a single table,
//! it is a synchronous state machine that stops every time a seat must act.
//! The [Table] type drives a state from a tokio task, asks AI seats for their
//! actions and forwards requests for the human seat as [TableEvent]s.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use std::{ops::Range, time::Duration};

use holdem_core::Chips;

mod error;
pub use error::TableError;

pub mod table;
pub use table::{Table, TableCommand};

pub use holdem_core::TableEvent;

/// Table configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The number of seats.
    pub seats: usize,
    /// Chips each seat starts with.
    pub chips: Chips,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// Seat 0 is played by a human.
    pub human: bool,
    /// Random generator seed, random if none.
    pub seed: Option<u64>,
    /// AI seats wait a random time in this range before acting.
    pub think_delay: Range<Duration>,
    /// Pause between hands.
    pub hand_delay: Duration,
}

impl Config {
    /// The minimum number of seats.
    pub const MIN_SEATS: usize = 2;
    /// The maximum number of seats.
    pub const MAX_SEATS: usize = 8;

    /// Checks this configuration.
    pub fn validate(&self) -> Result<(), TableError> {
        if !(Self::MIN_SEATS..=Self::MAX_SEATS).contains(&self.seats) {
            return Err(TableError::InvalidConfig(format!(
                "seats must be between {} and {}",
                Self::MIN_SEATS,
                Self::MAX_SEATS
            )));
        }

        if self.small_blind.is_zero() || self.big_blind < self.small_blind {
            return Err(TableError::InvalidConfig(
                "blinds must be positive with small blind <= big blind".to_string(),
            ));
        }

        if self.chips.is_zero() {
            return Err(TableError::InvalidConfig(
                "starting chips must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seats: 8,
            chips: Chips::new(1_000),
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            human: true,
            seed: None,
            think_delay: Duration::from_millis(500)..Duration::from_millis(2_000),
            hand_delay: Duration::from_secs(3),
        }
    }
}
