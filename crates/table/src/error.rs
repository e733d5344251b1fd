// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table errors.
use thiserror::Error;

use holdem_core::{Chips, SeatId};
use holdem_eval::EvalError;

/// Errors returned by the table state machine and driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The configuration is not valid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// An action was sent while no seat is acting.
    #[error("No hand in progress")]
    NoHand,
    /// A hand was started while another one is running.
    #[error("Hand in progress")]
    HandInProgress,
    /// An action was sent by a seat that should not act.
    #[error("Seat {0} is not the acting seat")]
    NotYourTurn(SeatId),
    /// Check with chips owed.
    #[error("Cannot check, {0} chips to call")]
    CannotCheck(Chips),
    /// Call with nothing owed.
    #[error("Nothing to call")]
    NothingToCall,
    /// Raise not above the current bet or below the minimum.
    #[error("Raise to {total} is below the minimum raise to {min}")]
    RaiseTooSmall {
        /// The requested total bet.
        total: Chips,
        /// The minimum total bet.
        min: Chips,
    },
    /// The chips at the table do not add up to the chips supply.
    #[error("Chips drift, expected {expected} chips found {actual}")]
    ChipDrift {
        /// The chips supply.
        expected: Chips,
        /// The chips counted in stacks and pot.
        actual: Chips,
    },
    /// Hand evaluation failed.
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
    /// The table task has stopped.
    #[error("Table closed")]
    Closed,
}

impl TableError {
    /// The error rejects an action and leaves the table state unchanged.
    pub fn is_rejected_action(&self) -> bool {
        matches!(
            self,
            TableError::NoHand
                | TableError::NotYourTurn(_)
                | TableError::CannotCheck(_)
                | TableError::NothingToCall
                | TableError::RaiseTooSmall { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_actions() {
        assert!(TableError::NothingToCall.is_rejected_action());
        assert!(TableError::CannotCheck(Chips::new(20)).is_rejected_action());
        assert!(!TableError::Closed.is_rejected_action());
        assert!(
            !TableError::ChipDrift {
                expected: Chips::new(100),
                actual: Chips::new(90),
            }
            .is_rejected_action()
        );
    }

    #[test]
    fn error_messages() {
        let err = TableError::RaiseTooSmall {
            total: Chips::new(30),
            min: Chips::new(40),
        };
        assert_eq!(err.to_string(), "Raise to 30 is below the minimum raise to 40");
        assert_eq!(
            TableError::NotYourTurn(SeatId::new(2)).to_string(),
            "Seat 3 is not the acting seat"
        );
    }
}
