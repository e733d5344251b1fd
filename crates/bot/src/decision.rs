// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AI action selection.
use rand::Rng;

use holdem_core::Chips;

use crate::Personality;

/// The inputs of a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    /// Hand strength in 0..=1.
    pub strength: f64,
    /// Chips in the pot.
    pub pot: Chips,
    /// Chips owed to call.
    pub to_call: Chips,
    /// The seat remaining chips.
    pub chips: Chips,
}

impl DecisionContext {
    fn can_check(&self) -> bool {
        self.to_call.is_zero()
    }

    /// A pot fraction capped at the seat chips.
    fn raise(&self, fraction: f64) -> Decision {
        Decision::Raise(self.pot.mul_f64(fraction).min(self.chips))
    }
}

/// An AI decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Fold the hand.
    Fold,
    /// Check.
    Check,
    /// Call the current bet.
    Call,
    /// Raise by the given amount over the current bet.
    Raise(Chips),
}

/// Picks an action for a hand strength band.
///
/// All randomness comes from `rng` so that a seeded generator reproduces the
/// same decisions.
pub fn decide<R: Rng + ?Sized>(
    ctx: &DecisionContext,
    personality: &Personality,
    rng: &mut R,
) -> Decision {
    let can_check = ctx.can_check();

    if ctx.strength < 0.2 {
        if can_check {
            return Decision::Check;
        }

        // Bluff.
        if rng.random::<f64>() < personality.bluff_freq {
            return ctx.raise(0.3);
        }

        return Decision::Fold;
    }

    if ctx.strength < 0.4 {
        if can_check {
            return Decision::Check;
        }

        if ctx.to_call <= ctx.chips.mul_f64(0.1) && rng.random::<f64>() < personality.call_threshold
        {
            return Decision::Call;
        }

        return Decision::Fold;
    }

    if ctx.strength < 0.65 {
        if can_check {
            if rng.random::<f64>() < personality.aggression {
                return ctx.raise(0.4);
            }

            return Decision::Check;
        }

        if ctx.to_call <= ctx.chips.mul_f64(0.2) {
            return Decision::Call;
        }

        if rng.random::<f64>() > personality.aggression {
            return Decision::Fold;
        }

        return Decision::Call;
    }

    if ctx.strength < 0.85 {
        if rng.random::<f64>() < personality.aggression + 0.2 {
            let fraction = 0.5 + rng.random::<f64>() * 0.5;
            return ctx.raise(fraction);
        }

        if can_check {
            // Slow play.
            if rng.random::<f64>() < 0.3 {
                return Decision::Check;
            }

            return ctx.raise(0.5);
        }

        return Decision::Call;
    }

    if rng.random::<f64>() < 0.8 {
        let fraction = 0.7 + rng.random::<f64>() * 0.8;
        return ctx.raise(fraction);
    }

    if can_check && rng.random::<f64>() < 0.2 {
        return Decision::Check;
    }

    Decision::Call
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng, rngs::StdRng};

    /// Generator that always returns the same value.
    struct FixedRng(u64);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    // Draws close to 0 make every probability check succeed.
    fn low() -> FixedRng {
        FixedRng(0)
    }

    // Draws close to 1 make every probability check fail.
    fn high() -> FixedRng {
        FixedRng(u64::MAX)
    }

    fn ctx(strength: f64, to_call: u32) -> DecisionContext {
        DecisionContext {
            strength,
            pot: Chips::new(100),
            to_call: Chips::new(to_call),
            chips: Chips::new(1000),
        }
    }

    const P: Personality = Personality::AGGRESSIVE;

    #[test]
    fn very_weak_hand() {
        assert_eq!(decide(&ctx(0.1, 0), &P, &mut low()), Decision::Check);
        assert_eq!(
            decide(&ctx(0.1, 20), &P, &mut low()),
            Decision::Raise(Chips::new(30))
        );
        assert_eq!(decide(&ctx(0.1, 20), &P, &mut high()), Decision::Fold);
    }

    #[test]
    fn weak_hand() {
        assert_eq!(decide(&ctx(0.3, 0), &P, &mut high()), Decision::Check);
        assert_eq!(decide(&ctx(0.3, 100), &P, &mut low()), Decision::Call);
        assert_eq!(decide(&ctx(0.3, 100), &P, &mut high()), Decision::Fold);

        // Too expensive to call.
        assert_eq!(decide(&ctx(0.3, 101), &P, &mut low()), Decision::Fold);
    }

    #[test]
    fn medium_hand() {
        assert_eq!(
            decide(&ctx(0.5, 0), &P, &mut low()),
            Decision::Raise(Chips::new(40))
        );
        assert_eq!(decide(&ctx(0.5, 0), &P, &mut high()), Decision::Check);
        assert_eq!(decide(&ctx(0.5, 200), &P, &mut high()), Decision::Call);
        assert_eq!(decide(&ctx(0.5, 500), &P, &mut high()), Decision::Fold);
        assert_eq!(decide(&ctx(0.5, 500), &P, &mut low()), Decision::Call);
    }

    #[test]
    fn strong_hand() {
        assert_eq!(
            decide(&ctx(0.7, 20), &P, &mut low()),
            Decision::Raise(Chips::new(50))
        );
        assert_eq!(decide(&ctx(0.7, 20), &P, &mut high()), Decision::Call);
        assert_eq!(
            decide(&ctx(0.7, 0), &P, &mut high()),
            Decision::Raise(Chips::new(50))
        );
    }

    #[test]
    fn very_strong_hand() {
        assert_eq!(
            decide(&ctx(0.9, 20), &P, &mut low()),
            Decision::Raise(Chips::new(70))
        );
        assert_eq!(decide(&ctx(0.9, 20), &P, &mut high()), Decision::Call);
        assert_eq!(decide(&ctx(0.9, 0), &P, &mut high()), Decision::Call);
    }

    #[test]
    fn raise_capped_at_chips() {
        let ctx = DecisionContext {
            strength: 0.95,
            pot: Chips::new(1000),
            to_call: Chips::new(100),
            chips: Chips::new(250),
        };
        assert_eq!(decide(&ctx, &P, &mut low()), Decision::Raise(Chips::new(250)));
    }

    #[test]
    fn seeded_decisions_repeat() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..100)
                .map(|i| {
                    let ctx = ctx(f64::from(i) / 100.0, (i % 3) * 20);
                    decide(&ctx, &Personality::LOOSE, &mut rng)
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn no_bluff_never_raises_weak_hands() {
        let p = Personality {
            bluff_freq: 0.0,
            ..Personality::TIGHT
        };

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let d = decide(&ctx(0.1, 40), &p, &mut rng);
            assert_eq!(d, Decision::Fold);
        }
    }
}
