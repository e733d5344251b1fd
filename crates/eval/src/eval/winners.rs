// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown winners.
use holdem_cards::Card;

use super::{EvalError, HandValue};

/// Evaluates each player hole cards with the board and returns all the players
/// tied for the best hand.
///
/// The key identifies a player and is returned with its hand value, more than
/// one winner means the pot is split.
///
/// ```
/// # use holdem_eval::*;
/// let c = |s: &str| s.parse::<Card>().unwrap();
/// let board = [c("2C"), c("7D"), c("9H"), c("JS"), c("KD")];
/// let hands = [
///     ("alice", [c("AS"), c("AD")]),
///     ("bob", [c("KS"), c("3D")]),
///     ("carol", [c("AH"), c("AC")]),
/// ];
///
/// let winners = determine_winners(hands, &board).unwrap();
/// let keys = winners.iter().map(|(k, _)| *k).collect::<Vec<_>>();
/// assert_eq!(keys, ["alice", "carol"]);
/// ```
pub fn determine_winners<K, I>(hands: I, board: &[Card]) -> Result<Vec<(K, HandValue)>, EvalError>
where
    I: IntoIterator<Item = (K, [Card; 2])>,
{
    let mut evals = Vec::new();
    for (key, hole) in hands {
        let mut cards = Vec::with_capacity(hole.len() + board.len());
        cards.extend_from_slice(&hole);
        cards.extend_from_slice(board);

        let hv = HandValue::eval(&cards)?;
        evals.push((key, hv));
    }

    let Some(best) = evals.iter().map(|(_, hv)| hv).max().cloned() else {
        return Ok(Vec::new());
    };

    Ok(evals.into_iter().filter(|(_, hv)| *hv == best).collect())
}
