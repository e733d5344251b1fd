// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for the events a table sends to its players.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    game_state::{ActionRequest, TableSnapshot},
    poker::{Card, Chips, HandRank, SeatId},
};

/// Event sent by a running table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TableEvent {
    /// A new hand is starting.
    StartHand {
        /// The hand number starting from 1.
        hand: u32,
        /// The dealer seat for this hand.
        dealer: SeatId,
    },
    /// A table state update.
    GameUpdate(TableSnapshot),
    /// A seat has acted.
    Acted {
        /// The seat that acted.
        seat: SeatId,
        /// The seat name.
        name: String,
        /// The applied action.
        action: Action,
    },
    /// Request action from the human seat.
    ActionRequest(ActionRequest),
    /// The hand is over and the pots have been paid.
    EndHand {
        /// The board cards at the end of the hand.
        board: Vec<Card>,
        /// The seats that won chips.
        payoffs: Vec<HandPayoff>,
    },
    /// Only one seat has chips left.
    EndGame {
        /// The winning seat.
        winner: SeatId,
        /// The winner name.
        name: String,
        /// The winner chips.
        chips: Chips,
    },
    /// An error message.
    Error(String),
}

/// An action intent from a seat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass with nothing owed.
    Check,
    /// Match the current bet.
    Call,
    /// Raise the seat bet to the given total.
    Raise(Chips),
    /// Put all the remaining chips in.
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "folds"),
            Action::Check => write!(f, "checks"),
            Action::Call => write!(f, "calls"),
            Action::Raise(total) => write!(f, "raises to {total}"),
            Action::AllIn => write!(f, "goes all-in"),
        }
    }
}

/// The last action label of a seat.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    #[default]
    None,
    /// Seat paid the small blind.
    SmallBlind,
    /// Seat paid the big blind.
    BigBlind,
    /// Seat folded.
    Fold,
    /// Seat checked.
    Check,
    /// Seat called.
    Call,
    /// Seat raised.
    Raise,
    /// Seat is all-in.
    AllIn,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Fold => "FOLD",
            PlayerAction::Check => "CHECK",
            PlayerAction::Call => "CALL",
            PlayerAction::Raise => "RAISE",
            PlayerAction::AllIn => "ALL-IN",
            PlayerAction::None => "",
        }
    }
}

impl From<Action> for PlayerAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Fold => PlayerAction::Fold,
            Action::Check => PlayerAction::Check,
            Action::Call => PlayerAction::Call,
            Action::Raise(_) => PlayerAction::Raise,
            Action::AllIn => PlayerAction::AllIn,
        }
    }
}

/// Chips won by a seat at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPayoff {
    /// The winning seat.
    pub seat: SeatId,
    /// The seat name.
    pub name: String,
    /// The chips won from all pots.
    pub chips: Chips,
    /// The winning hand category, none when everybody else folded.
    pub rank: Option<HandRank>,
    /// The best five cards, empty when everybody else folded.
    pub cards: Vec<Card>,
}

/// The outcome of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand number.
    pub hand: u32,
    /// The board at the end of the hand.
    pub board: Vec<Card>,
    /// Payoffs, one entry per winning seat.
    pub payoffs: Vec<HandPayoff>,
    /// True if hands were compared at showdown.
    pub showdown: bool,
}

impl HandResult {
    /// Total chips paid.
    pub fn total(&self) -> Chips {
        self.payoffs.iter().map(|p| p.chips).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_labels() {
        assert_eq!(PlayerAction::from(Action::Raise(Chips::new(40))), PlayerAction::Raise);
        assert_eq!(PlayerAction::from(Action::AllIn).label(), "ALL-IN");
        assert_eq!(PlayerAction::None.label(), "");
        assert_eq!(Action::Raise(Chips::new(1_200)).to_string(), "raises to 1,200");
    }

    #[test]
    fn event_serializes_to_json() {
        let event = TableEvent::Acted {
            seat: SeatId::new(2),
            name: "Player 2".to_string(),
            action: Action::Raise(Chips::new(60)),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"Acted":"#));

        let back: TableEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            back,
            TableEvent::Acted { action: Action::Raise(c), .. } if c == Chips::new(60)
        ));
    }

    #[test]
    fn hand_result_total() {
        let payoff = |seat, chips| HandPayoff {
            seat: SeatId::new(seat),
            name: format!("Player {seat}"),
            chips: Chips::new(chips),
            rank: None,
            cards: vec![],
        };

        let result = HandResult {
            hand: 1,
            board: vec![],
            payoffs: vec![payoff(1, 150), payoff(3, 151)],
            showdown: false,
        };
        assert_eq!(result.total(), Chips::new(301));
    }
}
