// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Strategies that play a seat.
use log::debug;
use rand::Rng;
use std::{ops::Range, time::Duration};

use holdem_core::{Action, ActionRequest, TableSnapshot};

use crate::{Decision, DecisionContext, Personality, decide, hand_strength};

/// A Poker bot strategy.
pub trait Strategy: Send + Sync + 'static {
    /// Execute an action given a request and the table as seen by the seat.
    fn execute(&mut self, req: &ActionRequest, view: &TableSnapshot) -> Action;
}

/// Returns a random delay in the given range, used to pace AI actions.
pub fn think_time<R: Rng + ?Sized>(rng: &mut R, range: Range<Duration>) -> Duration {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range)
    }
}

/// A strategy that plays with a [Personality].
#[derive(Debug)]
pub struct PersonalityBot<R> {
    personality: Personality,
    rng: R,
}

impl<R: Rng> PersonalityBot<R> {
    /// Creates a new bot.
    pub fn new(personality: Personality, rng: R) -> Self {
        Self { personality, rng }
    }

    /// The bot personality.
    pub fn personality(&self) -> &Personality {
        &self.personality
    }
}

impl<R: Rng + Send + Sync + 'static> Strategy for PersonalityBot<R> {
    fn execute(&mut self, req: &ActionRequest, view: &TableSnapshot) -> Action {
        let Some(seat) = view.seat(req.seat) else {
            return passive_action(req);
        };

        let Some(hole) = seat.hole_cards() else {
            return passive_action(req);
        };

        let ctx = DecisionContext {
            strength: hand_strength(hole, &view.board),
            pot: req.pot,
            to_call: req.to_call,
            chips: seat.chips,
        };

        let decision = decide(&ctx, &self.personality, &mut self.rng);
        let action = to_action(req, decision);

        debug!(
            "{} ({}) strength {:.2} decision {decision:?} action {action:?}",
            seat.name, self.personality, ctx.strength
        );

        action
    }
}

/// A strategy that always checks or calls.
#[derive(Debug, Default, Clone)]
pub struct PassiveBot;

impl Strategy for PassiveBot {
    fn execute(&mut self, req: &ActionRequest, _view: &TableSnapshot) -> Action {
        passive_action(req)
    }
}

fn passive_action(req: &ActionRequest) -> Action {
    if req.can_check() {
        Action::Check
    } else if req.can_call() {
        Action::Call
    } else {
        Action::Fold
    }
}

/// Maps a decision to a legal action.
fn to_action(req: &ActionRequest, decision: Decision) -> Action {
    match decision {
        Decision::Fold if req.can_check() => Action::Check,
        Decision::Fold => Action::Fold,
        Decision::Check | Decision::Call => passive_action(req),
        Decision::Raise(_) if !req.can_raise() => {
            if req.can_check() || req.can_call() {
                passive_action(req)
            } else {
                Action::AllIn
            }
        }
        Decision::Raise(amount) => {
            let total = req.clamp_raise(req.current_bet + amount);
            if total >= req.max_bet {
                Action::AllIn
            } else {
                Action::Raise(total)
            }
        }
    }
}
