// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table seat types.
use std::ops;

use holdem_bot::Personality;
use holdem_core::{Card, Chips, PlayerAction, SeatId};

/// A table seat state.
#[derive(Debug, Clone)]
pub struct Seat {
    /// The seat id.
    pub id: SeatId,
    /// The seat name.
    pub name: String,
    /// The seat is played by a human.
    pub is_human: bool,
    /// The AI personality, none for the human seat.
    pub personality: Option<Personality>,
    /// This seat chips.
    pub chips: Chips,
    /// The seat bet in this betting round.
    pub bet: Chips,
    /// Chips bet in the previous rounds of this hand.
    pub total_bet: Chips,
    /// The last seat action.
    pub action: PlayerAction,
    /// The seat hole cards.
    pub hole_cards: Option<(Card, Card)>,
    /// The seat had chips when the hand started.
    pub dealt_in: bool,
    /// The seat has folded.
    pub folded: bool,
    /// The seat has no chips left to bet.
    pub all_in: bool,
    /// The seat has acted since the last raise.
    pub has_acted: bool,
}

impl Seat {
    /// Creates a new seat.
    pub fn new(
        id: SeatId,
        name: String,
        is_human: bool,
        personality: Option<Personality>,
        chips: Chips,
    ) -> Self {
        Self {
            id,
            name,
            is_human,
            personality,
            chips,
            bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            action: PlayerAction::None,
            hole_cards: None,
            dealt_in: false,
            folded: false,
            all_in: false,
            has_acted: false,
        }
    }

    /// Raises this seat bet to the given total, capped at the seat chips.
    ///
    /// Returns the chips moved from the stack.
    pub fn bet(&mut self, action: PlayerAction, total: Chips) -> Chips {
        // How much to bet considering previous bets.
        let remainder = total - self.bet;

        // Seat run out of chips goes all in.
        let moved = if self.chips <= remainder {
            self.chips
        } else {
            remainder
        };

        self.bet += moved;
        self.chips -= moved;

        if self.chips.is_zero() {
            self.all_in = true;
            self.action = match action {
                PlayerAction::SmallBlind | PlayerAction::BigBlind => action,
                _ => PlayerAction::AllIn,
            };
        } else {
            self.action = action;
        }

        moved
    }

    /// Sets this seat in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
        self.action = PlayerAction::Fold;
    }

    /// The seat is still in the hand.
    pub fn in_hand(&self) -> bool {
        self.dealt_in && !self.folded
    }

    /// The seat is in the hand and can still bet.
    pub fn is_contesting(&self) -> bool {
        self.in_hand() && !self.all_in
    }

    /// The seat total contribution to the pot in this hand.
    pub fn contribution(&self) -> Chips {
        self.total_bet + self.bet
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.dealt_in = !self.chips.is_zero();
        self.folded = !self.dealt_in;
        self.all_in = false;
        self.has_acted = false;
        self.bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.hole_cards = None;
    }

    /// Moves the round bet into the hand total.
    fn end_round(&mut self) {
        self.total_bet += self.bet;
        self.bet = Chips::ZERO;
        self.has_acted = false;

        if self.is_contesting() {
            self.action = PlayerAction::None;
        }
    }
}

/// The table seats state.
#[derive(Debug, Default)]
pub struct SeatsState {
    seats: Vec<Seat>,
    dealer: usize,
    active: Option<usize>,
}

impl SeatsState {
    /// Creates the seats state, the first dealer is seat 0.
    pub fn new(seats: Vec<Seat>) -> Self {
        Self {
            seats,
            dealer: 0,
            active: None,
        }
    }

    /// Returns total number of seats.
    pub fn count(&self) -> usize {
        self.seats.len()
    }

    /// Returns the number of seats still in the hand.
    pub fn count_in_hand(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand()).count()
    }

    /// Returns the number of seats who have chips.
    pub fn count_with_chips(&self) -> usize {
        self.seats.iter().filter(|s| !s.chips.is_zero()).count()
    }

    /// The dealer seat index.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// The acting seat index.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Sets the acting seat.
    pub fn set_active(&mut self, active: Option<usize>) {
        self.active = active;
    }

    /// Returns a seat by index.
    pub fn get(&self, idx: usize) -> Option<&Seat> {
        self.seats.get(idx)
    }

    /// Returns an iterator to all seats.
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Finds the first seat after `idx` that matches the predicate.
    ///
    /// The search wraps around and checks `idx` last.
    pub fn next_after<P>(&self, idx: usize, pred: P) -> Option<usize>
    where
        P: Fn(&Seat) -> bool,
    {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (idx + offset) % n)
            .find(|&i| pred(&self.seats[i]))
    }

    /// Moves the button to the next seat with chips.
    pub fn rotate_dealer(&mut self) {
        if let Some(dealer) = self.next_after(self.dealer, |s| !s.chips.is_zero()) {
            self.dealer = dealer;
        }
    }

    /// Set state for a new hand.
    pub fn start_hand(&mut self) {
        self.active = None;
        self.seats.iter_mut().for_each(Seat::start_hand);
    }

    /// Ends a betting round.
    pub fn end_round(&mut self) {
        self.active = None;
        self.seats.iter_mut().for_each(Seat::end_round);
    }

    /// Clears the has acted flag of the contesting seats other than `idx`.
    pub fn reset_acted(&mut self, idx: usize) {
        for (i, seat) in self.seats.iter_mut().enumerate() {
            if i != idx && seat.is_contesting() {
                seat.has_acted = false;
            }
        }
    }

    /// Distance of a seat from the left of the dealer, used to order ties.
    pub fn position(&self, idx: usize) -> usize {
        let n = self.seats.len();
        (idx + n - self.dealer - 1) % n
    }
}

impl ops::Index<usize> for SeatsState {
    type Output = Seat;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.seats[idx]
    }
}

impl ops::IndexMut<usize> for SeatsState {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.seats[idx]
    }
}
