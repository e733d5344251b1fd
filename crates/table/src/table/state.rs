// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state types.
use ahash::AHashMap;
use log::{debug, error, info};
use rand::{SeedableRng, rngs::StdRng};

use holdem_bot::Personality;
use holdem_core::{
    Action, ActionRequest, Card, Chips, Deck, HandPayoff, HandResult, PlayerAction, Round,
    SeatCards, SeatId, SeatSnapshot, TableSnapshot,
};
use holdem_eval::determine_winners;

use crate::{Config, TableError};

use super::{
    player::{Seat, SeatsState},
    pots::{self, Contribution},
};

/// The hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandState {
    /// No hand has been played yet.
    StartGame,
    /// Handle preflop betting.
    PreflopBetting,
    /// Handle flop betting.
    FlopBetting,
    /// Handle turn betting.
    TurnBetting,
    /// Handle river betting.
    RiverBetting,
    /// Showdown.
    Showdown,
    /// The hand has ended.
    EndHand,
    /// The game has ended with a winner.
    EndGame,
}

impl HandState {
    fn is_betting(&self) -> bool {
        matches!(
            self,
            HandState::PreflopBetting
                | HandState::FlopBetting
                | HandState::TurnBetting
                | HandState::RiverBetting
        )
    }
}

/// What the table needs next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A seat must act.
    AwaitingAction {
        /// The acting seat.
        seat: SeatId,
        /// The legal actions for the seat.
        request: ActionRequest,
    },
    /// The hand is over, the pots have been paid.
    HandEnded(HandResult),
    /// Only one seat has chips left.
    GameOver {
        /// The winning seat.
        winner: SeatId,
    },
}

/// Internal table state.
#[derive(Debug)]
pub struct State {
    hand_state: HandState,
    small_blind: Chips,
    big_blind: Chips,
    seats: SeatsState,
    deck: Deck,
    board: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    hand: u32,
    showdown: bool,
    total_chips: Chips,
    rng: StdRng,
}

impl State {
    /// Creates a new table state.
    ///
    /// When the config has a human seat it is seat 0, all other seats get a
    /// random AI personality.
    pub fn new(config: &Config, mut rng: StdRng) -> Result<Self, TableError> {
        config.validate()?;

        let seats = (0..config.seats)
            .map(|idx| {
                let id = SeatId::new(idx);
                if config.human && idx == 0 {
                    Seat::new(id, "You".to_string(), true, None, config.chips)
                } else {
                    let personality = Personality::random(&mut rng);
                    Seat::new(id, format!("Player {id}"), false, Some(personality), config.chips)
                }
            })
            .collect();

        Ok(Self {
            hand_state: HandState::StartGame,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            seats: SeatsState::new(seats),
            deck: Deck::new_and_shuffled(&mut rng),
            board: Vec::with_capacity(5),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            hand: 0,
            showdown: false,
            total_chips: config.chips * config.seats as u32,
            rng,
        })
    }

    /// Creates a new table state with a seeded or random generator.
    pub fn from_config(config: &Config) -> Result<Self, TableError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::new(config, rng)
    }

    /// Starts a new hand.
    ///
    /// Rotates the button, deals the hole cards and posts the blinds, returns
    /// [Step::GameOver] if fewer than two seats have chips.
    pub fn start_hand(&mut self) -> Result<Step, TableError> {
        if self.hand_state.is_betting() || self.hand_state == HandState::Showdown {
            return Err(TableError::HandInProgress);
        }

        if self.seats.count_with_chips() < 2 {
            return self.enter_end_game();
        }

        self.hand += 1;
        self.hand_state = HandState::PreflopBetting;
        self.showdown = false;
        self.board.clear();
        self.pot = Chips::ZERO;
        self.current_bet = Chips::ZERO;

        self.seats.start_hand();
        self.seats.rotate_dealer();
        self.deck = Deck::new_and_shuffled(&mut self.rng);

        let dealer = self.seats.dealer();
        info!(
            "Starting hand {} dealer {}",
            self.hand,
            self.seat(dealer).name
        );

        // Deal two cards to each seat starting left of the dealer.
        let n = self.seats.count();
        let dealt = (1..=n)
            .map(|offset| (dealer + offset) % n)
            .filter(|&idx| self.seat(idx).dealt_in)
            .collect::<Vec<_>>();
        let first = self.deck.deal_n(dealt.len());
        let second = self.deck.deal_n(dealt.len());
        for (pos, &idx) in dealt.iter().enumerate() {
            self.seat_mut(idx).hole_cards = Some((first[pos], second[pos]));
        }

        // Small blind is left of the dealer and big blind is next.
        let sb = self.next_dealt_in(dealer);
        let bb = self.next_dealt_in(sb);
        self.post_blind(sb, PlayerAction::SmallBlind, self.small_blind);
        self.post_blind(bb, PlayerAction::BigBlind, self.big_blind);

        self.check_chips()?;
        self.advance(bb)
    }

    /// Applies an action for the acting seat.
    ///
    /// Illegal actions are rejected before any state change.
    pub fn act(&mut self, seat: SeatId, action: Action) -> Result<Step, TableError> {
        let idx = self.validate(seat, action)?;
        let action = self.normalize(idx, action);

        let current_bet = self.current_bet;
        let player = self.seat_mut(idx);
        let moved = match action {
            Action::Fold => {
                player.fold();
                Chips::ZERO
            }
            Action::Check => {
                player.action = PlayerAction::Check;
                Chips::ZERO
            }
            Action::Call => player.bet(PlayerAction::Call, current_bet),
            Action::Raise(total) => player.bet(PlayerAction::Raise, total),
            Action::AllIn => {
                let total = player.bet + player.chips;
                player.bet(PlayerAction::AllIn, total)
            }
        };
        player.has_acted = true;

        let bet = player.bet;
        debug!("{} {action} ({moved} chips)", player.name);

        self.pot += moved;

        // Any bet above the current bet is a raise, the other seats must act again.
        if bet > self.current_bet {
            self.current_bet = bet;
            self.seats.reset_acted(idx);
        }

        self.check_chips()?;
        self.advance(idx)
    }

    /// Returns the action request for a seat.
    pub fn action_request(&self, seat: SeatId) -> Option<ActionRequest> {
        let player = self.seats.get(seat.index())?;

        let to_call = self.current_bet - player.bet;
        let max_bet = player.bet + player.chips;

        let mut actions = vec![PlayerAction::Fold];
        if to_call.is_zero() {
            actions.push(PlayerAction::Check);
        } else {
            actions.push(PlayerAction::Call);
        }

        if max_bet > self.current_bet {
            actions.push(PlayerAction::Raise);
        }

        if !player.chips.is_zero() {
            actions.push(PlayerAction::AllIn);
        }

        Some(ActionRequest {
            seat,
            actions,
            to_call,
            current_bet: self.current_bet,
            min_raise: self.min_raise(),
            max_bet,
            big_blind: self.big_blind,
            pot: self.pot,
        })
    }

    /// The minimum total bet for a raise.
    pub fn min_raise(&self) -> Chips {
        if self.current_bet.is_zero() {
            self.big_blind
        } else {
            self.current_bet + self.big_blind
        }
    }

    /// Returns the table as seen by the viewer seat.
    ///
    /// Hole cards are visible to their own seat and for the seats that went
    /// to showdown.
    pub fn snapshot(&self, viewer: Option<SeatId>) -> TableSnapshot {
        let dealer = self.seats.dealer();
        let seats = self
            .seats
            .iter()
            .map(|s| {
                let visible = viewer == Some(s.id) || (self.showdown && s.in_hand());
                let cards = match s.hole_cards {
                    Some((c1, c2)) if visible => SeatCards::Cards(c1, c2),
                    Some(_) if s.in_hand() => SeatCards::Covered,
                    _ => SeatCards::None,
                };

                SeatSnapshot {
                    seat: s.id,
                    name: s.name.clone(),
                    is_human: s.is_human,
                    chips: s.chips,
                    bet: s.bet,
                    total_bet: s.total_bet,
                    action: s.action,
                    folded: s.folded,
                    all_in: s.all_in,
                    dealt_in: s.dealt_in,
                    cards,
                    has_button: s.id.index() == dealer,
                }
            })
            .collect();

        TableSnapshot {
            hand: self.hand,
            round: self.round(),
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            big_blind: self.big_blind,
            dealer: SeatId::new(dealer),
            active: self.seats.active().map(SeatId::new),
            viewer,
            seats,
        }
    }

    /// The current round.
    pub fn round(&self) -> Round {
        match self.hand_state {
            HandState::PreflopBetting | HandState::StartGame => Round::PreFlop,
            HandState::FlopBetting => Round::Flop,
            HandState::TurnBetting => Round::Turn,
            HandState::RiverBetting => Round::River,
            HandState::Showdown => Round::Showdown,
            HandState::EndHand | HandState::EndGame if self.showdown => Round::Showdown,
            HandState::EndHand | HandState::EndGame => match self.board.len() {
                0 => Round::PreFlop,
                3 => Round::Flop,
                4 => Round::Turn,
                _ => Round::River,
            },
        }
    }

    /// The seat that must act.
    pub fn active_seat(&self) -> Option<SeatId> {
        self.seats.active().map(SeatId::new)
    }

    /// Returns a seat.
    pub fn seat_info(&self, seat: SeatId) -> Option<&Seat> {
        self.seats.get(seat.index())
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The highest bet in this round.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The hand number.
    pub fn hand(&self) -> u32 {
        self.hand
    }

    /// The dealer seat.
    pub fn dealer(&self) -> SeatId {
        SeatId::new(self.seats.dealer())
    }

    /// Checks that stacks and pot add up to the chips supply.
    pub fn check_chips(&self) -> Result<(), TableError> {
        let actual = self.seats.iter().map(|s| s.chips).sum::<Chips>() + self.pot;
        if actual != self.total_chips {
            error!(
                "Chips drift at hand {}: expected {} found {actual}",
                self.hand, self.total_chips
            );
            return Err(TableError::ChipDrift {
                expected: self.total_chips,
                actual,
            });
        }

        Ok(())
    }

    fn validate(&self, seat: SeatId, action: Action) -> Result<usize, TableError> {
        if !self.hand_state.is_betting() {
            return Err(TableError::NoHand);
        }

        let idx = seat.index();
        if self.seats.active() != Some(idx) {
            return Err(TableError::NotYourTurn(seat));
        }

        let player = self.seat(idx);
        let to_call = self.current_bet - player.bet;
        match action {
            Action::Check if !to_call.is_zero() => Err(TableError::CannotCheck(to_call)),
            Action::Call if to_call.is_zero() => Err(TableError::NothingToCall),
            Action::Raise(total) if total < player.bet + player.chips => {
                let min = self.min_raise();
                if total < min {
                    Err(TableError::RaiseTooSmall { total, min })
                } else {
                    Ok(idx)
                }
            }
            _ => Ok(idx),
        }
    }

    /// A raise of all the seat chips is an all-in.
    fn normalize(&self, idx: usize, action: Action) -> Action {
        match action {
            Action::Raise(total) => {
                let player = self.seat(idx);
                if total >= player.bet + player.chips {
                    Action::AllIn
                } else {
                    action
                }
            }
            action => action,
        }
    }

    /// Runs the after action checks and finds the next step.
    ///
    /// `cursor` is the last seat that acted, the next seat to act is searched
    /// after it.
    fn advance(&mut self, mut cursor: usize) -> Result<Step, TableError> {
        loop {
            if self.seats.count_in_hand() < 2 {
                return self.enter_end_hand();
            }

            if self.is_runout() {
                self.seats.end_round();
                self.current_bet = Chips::ZERO;
                while self.board.len() < 5 {
                    self.deal_street();
                }

                return self.enter_showdown();
            }

            if !self.is_round_complete() {
                let current_bet = self.current_bet;
                let next = self
                    .seats
                    .next_after(cursor, |s| {
                        s.is_contesting() && (!s.has_acted || s.bet < current_bet)
                    });

                if let Some(idx) = next {
                    self.seats.set_active(Some(idx));
                    let seat = SeatId::new(idx);
                    let request = self
                        .action_request(seat)
                        .ok_or(TableError::NotYourTurn(seat))?;
                    return Ok(Step::AwaitingAction { seat, request });
                }
            }

            // The round is complete.
            self.seats.end_round();
            self.current_bet = Chips::ZERO;

            if self.hand_state == HandState::RiverBetting {
                return self.enter_showdown();
            }

            self.deal_street();
            cursor = self.seats.dealer();
        }
    }

    /// Every contester is all-in but at most one that has nothing to call.
    fn is_runout(&self) -> bool {
        let mut contesting = self.seats.iter().filter(|s| s.is_contesting());
        match (contesting.next(), contesting.next()) {
            (None, _) => true,
            (Some(seat), None) => seat.bet >= self.current_bet,
            _ => false,
        }
    }

    fn is_round_complete(&self) -> bool {
        self.seats
            .iter()
            .filter(|s| s.is_contesting())
            .all(|s| s.has_acted && s.bet == self.current_bet)
    }

    /// Burns a card and deals the next community cards.
    fn deal_street(&mut self) {
        self.deck.burn();

        match self.board.len() {
            0 => {
                self.board.extend(self.deck.deal_n(3));
                self.hand_state = HandState::FlopBetting;
            }
            3 => {
                self.board.push(self.deck.deal());
                self.hand_state = HandState::TurnBetting;
            }
            _ => {
                self.board.push(self.deck.deal());
                self.hand_state = HandState::RiverBetting;
            }
        }

        debug!("{} {:?}", self.round(), self.board);
    }

    fn post_blind(&mut self, idx: usize, action: PlayerAction, blind: Chips) {
        let seat = self.seat_mut(idx);
        let moved = seat.bet(action, blind);
        let bet = seat.bet;

        self.pot += moved;
        self.current_bet = self.current_bet.max(bet);
    }

    fn enter_showdown(&mut self) -> Result<Step, TableError> {
        self.hand_state = HandState::Showdown;
        self.showdown = true;
        self.seats.set_active(None);

        let contributions = self
            .seats
            .iter()
            .filter(|s| s.dealt_in)
            .map(|s| Contribution {
                seat: s.id,
                chips: s.contribution(),
                folded: s.folded,
            })
            .collect::<Vec<_>>();

        let mut payoffs = AHashMap::<SeatId, HandPayoff>::default();
        for pot in pots::side_pots(&contributions) {
            let hands = self
                .seats
                .iter()
                .filter(|s| pot.players.contains(&s.id))
                .filter_map(|s| s.hole_cards.map(|(c1, c2)| (s.id, [c1, c2])));

            let mut winners = determine_winners(hands, &self.board)?;
            if winners.is_empty() {
                continue;
            }

            // Odd chips go to the winners closer to the left of the dealer.
            winners.sort_by_key(|(seat, _)| self.seats.position(seat.index()));

            let seats = winners.iter().map(|(seat, _)| *seat).collect::<Vec<_>>();
            for ((seat, chips), (_, hv)) in pots::split(pot.chips, &seats).into_iter().zip(&winners) {
                let player = self.seat_mut(seat.index());
                player.chips += chips;
                self.pot -= chips;

                // Sort by rank for the UI.
                let mut cards = hv.hand().to_vec();
                cards.sort_by_key(|c| std::cmp::Reverse(c.rank()));

                let name = self.seat(seat.index()).name.clone();
                payoffs
                    .entry(seat)
                    .or_insert_with(|| HandPayoff {
                        seat,
                        name,
                        chips: Chips::ZERO,
                        rank: Some(hv.rank()),
                        cards,
                    })
                    .chips += chips;
            }
        }

        let mut payoffs = payoffs.into_values().collect::<Vec<_>>();
        payoffs.sort_by_key(|p| p.seat);

        self.finish_hand(payoffs)
    }

    fn enter_end_hand(&mut self) -> Result<Step, TableError> {
        self.seats.end_round();
        self.current_bet = Chips::ZERO;

        let mut payoffs = Vec::new();
        let winner = self.seats.iter().position(|s| s.in_hand());
        if let Some(idx) = winner {
            let chips = self.pot;
            let player = self.seat_mut(idx);
            player.chips += chips;

            payoffs.push(HandPayoff {
                seat: player.id,
                name: player.name.clone(),
                chips,
                rank: None,
                cards: Vec::new(),
            });

            self.pot = Chips::ZERO;
        }

        self.finish_hand(payoffs)
    }

    fn finish_hand(&mut self, payoffs: Vec<HandPayoff>) -> Result<Step, TableError> {
        self.hand_state = HandState::EndHand;
        self.seats.set_active(None);

        for payoff in &payoffs {
            match payoff.rank {
                Some(rank) => info!("{} wins {} with {}", payoff.name, payoff.chips, rank),
                None => info!("{} wins {}", payoff.name, payoff.chips),
            }
        }

        self.check_chips()?;

        Ok(Step::HandEnded(HandResult {
            hand: self.hand,
            board: self.board.clone(),
            payoffs,
            showdown: self.showdown,
        }))
    }

    fn enter_end_game(&mut self) -> Result<Step, TableError> {
        self.hand_state = HandState::EndGame;
        self.seats.set_active(None);

        let winner = self
            .seats
            .iter()
            .filter(|s| !s.chips.is_zero())
            .max_by_key(|s| s.chips)
            .map(|s| s.id)
            .unwrap_or(SeatId::new(0));

        info!("Game over, {} wins", self.seat(winner.index()).name);

        Ok(Step::GameOver { winner })
    }

    fn next_dealt_in(&self, idx: usize) -> usize {
        self.seats.next_after(idx, |s| s.dealt_in).unwrap_or(idx)
    }

    fn seat(&self, idx: usize) -> &Seat {
        &self.seats[idx]
    }

    fn seat_mut(&mut self, idx: usize) -> &mut Seat {
        &mut self.seats[idx]
    }
}
