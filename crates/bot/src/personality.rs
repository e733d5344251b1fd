// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AI personality profiles.
use rand::Rng;
use std::fmt;

/// Tunes how an AI seat plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    /// Profile name.
    pub name: &'static str,
    /// Probability of betting or raising with playable hands.
    pub aggression: f64,
    /// Probability of raising with a very weak hand.
    pub bluff_freq: f64,
    /// Probability of calling a cheap bet with a weak hand.
    pub call_threshold: f64,
}

impl Personality {
    /// Plays few hands and rarely bluffs.
    pub const TIGHT: Personality = Personality {
        name: "Tight",
        aggression: 0.3,
        bluff_freq: 0.1,
        call_threshold: 0.6,
    };

    /// Raises often and bluffs.
    pub const AGGRESSIVE: Personality = Personality {
        name: "Aggressive",
        aggression: 0.7,
        bluff_freq: 0.3,
        call_threshold: 0.4,
    };

    /// Bluffs the most.
    pub const LOOSE: Personality = Personality {
        name: "Loose",
        aggression: 0.5,
        bluff_freq: 0.4,
        call_threshold: 0.3,
    };

    /// Almost never bluffs.
    pub const CONSERVATIVE: Personality = Personality {
        name: "Conservative",
        aggression: 0.2,
        bluff_freq: 0.05,
        call_threshold: 0.7,
    };

    /// All the preset profiles.
    pub const PRESETS: [Personality; 4] = [
        Self::TIGHT,
        Self::AGGRESSIVE,
        Self::LOOSE,
        Self::CONSERVATIVE,
    ];

    /// Picks one of the presets uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PRESETS[rng.random_range(0..Self::PRESETS.len())]
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn random_covers_presets() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let p = Personality::random(&mut rng);
            let idx = Personality::PRESETS.iter().position(|q| *q == p).unwrap();
            seen[idx] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn preset_values() {
        assert_eq!(Personality::AGGRESSIVE.aggression, 0.7);
        assert_eq!(Personality::LOOSE.bluff_freq, 0.4);
        assert_eq!(Personality::CONSERVATIVE.call_threshold, 0.7);
        assert_eq!(Personality::TIGHT.to_string(), "Tight");
    }
}
