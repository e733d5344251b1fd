// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem AI players.
//!
//! An AI seat estimates the strength of its hand, then picks an action with a
//! probability mix that depends on its [Personality]:
//!
//! ```
//! # use holdem_bot::*;
//! # use holdem_core::Chips;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let ctx = DecisionContext {
//!     strength: 0.1,
//!     pot: Chips::new(30),
//!     to_call: Chips::ZERO,
//!     chips: Chips::new(1000),
//! };
//!
//! // A weak hand always checks when it is free.
//! assert_eq!(decide(&ctx, &Personality::TIGHT, &mut rng), Decision::Check);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod decision;
mod personality;
mod strategy;
mod strength;

pub use decision::{Decision, DecisionContext, decide};
pub use personality::Personality;
pub use strategy::{PassiveBot, PersonalityBot, Strategy, think_time};
pub use strength::{hand_strength, starting_hand_strength};

/// Reexport core types.
pub use holdem_core as core;
