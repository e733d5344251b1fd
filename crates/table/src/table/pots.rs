// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Side pots.
use ahash::AHashSet;

use holdem_core::{Chips, SeatId};

/// A pot that contains seats bets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pot {
    /// Seats that can win this pot.
    pub players: AHashSet<SeatId>,
    /// The pot chips.
    pub chips: Chips,
}

/// A seat total contribution to the pot in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    /// The contributing seat.
    pub seat: SeatId,
    /// Chips the seat put in the pot.
    pub chips: Chips,
    /// The seat has folded.
    pub folded: bool,
}

/// Splits the hand contributions into layered pots.
///
/// Each distinct contribution level of a non folded seat starts a new layer
/// that can be won by the non folded seats that reached it. Folded seats add
/// their chips to the layers they reached.
pub fn side_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels = contributions
        .iter()
        .filter(|c| !c.folded && !c.chips.is_zero())
        .map(|c| c.chips)
        .collect::<Vec<_>>();
    levels.sort();
    levels.dedup();

    let total = contributions.iter().map(|c| c.chips).sum::<Chips>();
    let Some(&top) = levels.last() else {
        // Everybody folded, nobody can win the chips.
        return if total.is_zero() {
            Vec::new()
        } else {
            vec![Pot {
                players: AHashSet::default(),
                chips: total,
            }]
        };
    };

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev = Chips::ZERO;
    for level in levels {
        let chips = contributions
            .iter()
            .map(|c| c.chips.min(level) - c.chips.min(prev))
            .sum::<Chips>();

        let players = contributions
            .iter()
            .filter(|c| !c.folded && c.chips >= level)
            .map(|c| c.seat)
            .collect();

        pots.push(Pot { players, chips });
        prev = level;
    }

    // Folded chips above the highest live contribution go to the last pot.
    let excess = contributions
        .iter()
        .filter(|c| c.chips > top)
        .map(|c| c.chips - top)
        .sum::<Chips>();
    if let Some(pot) = pots.last_mut() {
        pot.chips += excess;
    }

    pots
}

/// Splits chips evenly between winners.
///
/// The winners must be sorted in the order that receives the odd chips, one
/// each starting from the first winner.
pub fn split(chips: Chips, winners: &[SeatId]) -> Vec<(SeatId, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }

    let n = winners.len() as u32;
    let share = chips / n;
    let remainder = (chips % n).amount() as usize;

    winners
        .iter()
        .enumerate()
        .map(|(idx, seat)| {
            let odd = if idx < remainder { Chips::new(1) } else { Chips::ZERO };
            (*seat, share + odd)
        })
        .collect()
}
