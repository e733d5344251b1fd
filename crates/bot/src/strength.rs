// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand strength estimates in the range 0 to 1.
use holdem_core::{Card, HandValue};

/// Pre-flop heuristic from pairing, suits, gap and high cards.
pub fn starting_hand_strength(c1: Card, c2: Card) -> f64 {
    let (v1, v2) = (c1.value(), c2.value());

    let strength = if v1 == v2 {
        0.5 + f64::from(v1) / 12.0 * 0.4
    } else {
        let high = v1.max(v2);
        let gap = v1.abs_diff(v2);

        let mut s = f64::from(high) / 12.0 * 0.5;
        if c1.suit() == c2.suit() {
            s += 0.1;
        }

        if gap <= 1 {
            s += 0.1;
        } else if gap <= 3 {
            s += 0.05;
        }

        // Jack or better.
        if v1 >= 9 && v2 >= 9 {
            s += 0.2;
        }

        s
    };

    strength.min(1.0)
}

/// Hand strength given the hole cards and the board.
///
/// With an empty board this is the starting hand heuristic, otherwise the
/// best hand category scaled to 0..1 plus a small bonus for its top value.
pub fn hand_strength(hole: (Card, Card), board: &[Card]) -> f64 {
    if board.is_empty() {
        return starting_hand_strength(hole.0, hole.1);
    }

    let mut cards = Vec::with_capacity(2 + board.len());
    cards.push(hole.0);
    cards.push(hole.1);
    cards.extend_from_slice(board);

    let Ok(hv) = HandValue::eval(&cards) else {
        return 0.0;
    };

    let top = hv.values().first().copied().unwrap_or_default();
    let strength = f64::from(hv.rank().ordinal()) / 9.0 + f64::from(top) / 12.0 * 0.2;
    strength.min(1.0)
}
