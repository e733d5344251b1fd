// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Read-only table views given to players and presentation layers.
use serde::{Deserialize, Serialize};

use crate::{
    message::{Action, PlayerAction},
    poker::{Card, Chips, Round, SeatCards, SeatId},
};

/// A seat as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// The seat id.
    pub seat: SeatId,
    /// The seat name.
    pub name: String,
    /// The seat is played by a human.
    pub is_human: bool,
    /// The seat chips.
    pub chips: Chips,
    /// The seat bet in this betting round.
    pub bet: Chips,
    /// The seat contribution to the pot in previous rounds of this hand.
    pub total_bet: Chips,
    /// The last seat action.
    pub action: PlayerAction,
    /// The seat has folded.
    pub folded: bool,
    /// The seat is all-in.
    pub all_in: bool,
    /// The seat was dealt cards this hand.
    pub dealt_in: bool,
    /// The seat cards.
    pub cards: SeatCards,
    /// The seat has the button.
    pub has_button: bool,
}

impl SeatSnapshot {
    /// The hole cards if visible.
    pub fn hole_cards(&self) -> Option<(Card, Card)> {
        match self.cards {
            SeatCards::Cards(c1, c2) => Some((c1, c2)),
            _ => None,
        }
    }

    /// The seat is still contesting the hand.
    pub fn in_hand(&self) -> bool {
        self.dealt_in && !self.folded
    }
}

/// The table as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// The hand number.
    pub hand: u32,
    /// The current round.
    pub round: Round,
    /// The board cards.
    pub board: Vec<Card>,
    /// All chips bet in this hand.
    pub pot: Chips,
    /// The highest bet in this round.
    pub current_bet: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The dealer seat.
    pub dealer: SeatId,
    /// The seat that should act, if any.
    pub active: Option<SeatId>,
    /// The seat this snapshot was taken for.
    pub viewer: Option<SeatId>,
    /// All the seats in seat order.
    pub seats: Vec<SeatSnapshot>,
}

impl TableSnapshot {
    /// Returns the given seat.
    pub fn seat(&self, seat: SeatId) -> Option<&SeatSnapshot> {
        self.seats.get(seat.index())
    }

    /// Returns the viewer seat.
    pub fn viewer_seat(&self) -> Option<&SeatSnapshot> {
        self.viewer.and_then(|s| self.seat(s))
    }

    /// Seats still contesting the hand.
    pub fn seats_in_hand(&self) -> impl Iterator<Item = &SeatSnapshot> {
        self.seats.iter().filter(|s| s.in_hand())
    }
}

/// A request for action sent to the seat that should act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The seat that should act.
    pub seat: SeatId,
    /// The legal actions.
    pub actions: Vec<PlayerAction>,
    /// Chips needed to call.
    pub to_call: Chips,
    /// The highest bet in this round.
    pub current_bet: Chips,
    /// The minimum total bet for a raise.
    pub min_raise: Chips,
    /// The maximum total bet, the seat bet plus its chips.
    pub max_bet: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// The chips in the pot.
    pub pot: Chips,
}

impl ActionRequest {
    /// Check if a call action is in the request.
    pub fn can_call(&self) -> bool {
        self.check_action(PlayerAction::Call)
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.check_action(PlayerAction::Check)
    }

    /// Check if a raise action is in the request.
    pub fn can_raise(&self) -> bool {
        self.check_action(PlayerAction::Raise)
    }

    /// Check if an all-in action is in the request.
    pub fn can_all_in(&self) -> bool {
        self.check_action(PlayerAction::AllIn)
    }

    /// Clamps a raise total into the legal range.
    ///
    /// When the seat cannot afford the minimum raise the result is its whole
    /// stack.
    pub fn clamp_raise(&self, total: Chips) -> Chips {
        if self.max_bet <= self.min_raise {
            self.max_bet
        } else {
            total.clamp(self.min_raise, self.max_bet)
        }
    }

    /// Clamps the amount of a raise and turns a call with nothing owed into
    /// a check, other actions are unchanged.
    pub fn clamp(&self, action: Action) -> Action {
        match action {
            Action::Raise(total) => Action::Raise(self.clamp_raise(total)),
            Action::Call if self.can_check() => Action::Check,
            action => action,
        }
    }

    fn check_action(&self, action: PlayerAction) -> bool {
        self.actions.iter().any(|a| a == &action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(min_raise: u32, max_bet: u32) -> ActionRequest {
        ActionRequest {
            seat: SeatId::new(0),
            actions: vec![
                PlayerAction::Fold,
                PlayerAction::Call,
                PlayerAction::Raise,
                PlayerAction::AllIn,
            ],
            to_call: Chips::new(20),
            current_bet: Chips::new(20),
            min_raise: Chips::new(min_raise),
            max_bet: Chips::new(max_bet),
            big_blind: Chips::new(20),
            pot: Chips::new(30),
        }
    }

    #[test]
    fn legal_actions() {
        let req = request(40, 1000);
        assert!(req.can_call());
        assert!(req.can_raise());
        assert!(req.can_all_in());
        assert!(!req.can_check());
    }

    #[test]
    fn raise_is_clamped() {
        let req = request(40, 1000);
        assert_eq!(req.clamp_raise(Chips::new(5)), Chips::new(40));
        assert_eq!(req.clamp_raise(Chips::new(300)), Chips::new(300));
        assert_eq!(req.clamp_raise(Chips::new(5000)), Chips::new(1000));
        assert_eq!(req.clamp(Action::Raise(Chips::ZERO)), Action::Raise(Chips::new(40)));
        assert_eq!(req.clamp(Action::Fold), Action::Fold);

        // Short stack can only raise all-in.
        let req = request(40, 30);
        assert_eq!(req.clamp_raise(Chips::new(100)), Chips::new(30));
    }

    #[test]
    fn free_call_is_a_check() {
        let req = ActionRequest {
            actions: vec![
                PlayerAction::Fold,
                PlayerAction::Check,
                PlayerAction::Raise,
                PlayerAction::AllIn,
            ],
            to_call: Chips::ZERO,
            ..request(40, 1000)
        };
        assert_eq!(req.clamp(Action::Call), Action::Check);
        assert_eq!(req.clamp(Action::Check), Action::Check);

        // With chips owed a call stays a call.
        assert_eq!(request(40, 1000).clamp(Action::Call), Action::Call);
    }

    #[test]
    fn snapshot_lookup() {
        let seat = |idx: usize, folded| SeatSnapshot {
            seat: SeatId::new(idx),
            name: format!("Player {idx}"),
            is_human: idx == 0,
            chips: Chips::new(1000),
            bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            action: PlayerAction::None,
            folded,
            all_in: false,
            dealt_in: true,
            cards: SeatCards::Covered,
            has_button: idx == 0,
        };

        let snapshot = TableSnapshot {
            hand: 1,
            round: Round::PreFlop,
            board: vec![],
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            big_blind: Chips::new(20),
            dealer: SeatId::new(0),
            active: None,
            viewer: Some(SeatId::new(1)),
            seats: vec![seat(0, false), seat(1, true), seat(2, false)],
        };

        assert_eq!(snapshot.viewer_seat().unwrap().name, "Player 1");
        assert!(snapshot.seat(SeatId::new(3)).is_none());
        assert_eq!(snapshot.seats_in_hand().count(), 2);
        assert!(snapshot.seat(SeatId::new(0)).unwrap().hole_cards().is_none());
    }
}
