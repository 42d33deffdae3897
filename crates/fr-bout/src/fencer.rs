//! Per-fencer score and card state.
//!
//! # Invariants
//!
//! - **Score never goes below zero**: a negative delta larger than the
//!   current score clamps to 0 instead of wrapping.
//! - **Second yellow is red**: a yellow on a fencer already holding a yellow
//!   becomes red, and red awards the opponent one touch.
//! - **Black never awards a touch**.
//!
//! The fencer has no reference to its opponent; the point award is returned
//! in [`CardOutcome`] for the controller to apply.

use crate::{Card, CardOutcome, CardPolicy};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FencerState {
    score: u32,
    card: Card,
}

impl FencerState {
    /// Fresh state: score 0, no card.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn card(&self) -> Card {
        self.card
    }

    /// Adjust the score by `delta`, clamping to `0..=u32::MAX`.
    pub fn apply_touch(&mut self, delta: i32) -> u32 {
        self.score = if delta >= 0 {
            self.score.saturating_add(delta.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
        self.score
    }

    /// Assign a card and report whether the opponent earns a touch.
    ///
    /// | Current   | Applied | Strict result          | Overwrite result       |
    /// |-----------|---------|------------------------|------------------------|
    /// | Yellow    | Yellow  | Red (+opponent point)  | Red (+opponent point)  |
    /// | None/Yel. | Red     | Red (+opponent point)  | Red (+opponent point)  |
    /// | Red       | Red     | Red (+opponent point)  | Red (+opponent point)  |
    /// | any       | Black   | Black (no point)       | Black (no point)       |
    /// | Yellow    | None    | None                   | None                   |
    /// | Red       | < Red   | rejected, stays Red    | overwritten            |
    /// | Black     | non-B.  | rejected, stays Black  | overwritten            |
    pub fn apply_card(&mut self, new_card: Card, policy: CardPolicy) -> CardOutcome {
        if new_card == Card::Yellow && self.card == Card::Yellow {
            self.card = Card::Red;
            return CardOutcome {
                card: Card::Red,
                award_opponent_point: true,
                accepted: true,
            };
        }

        // Only Red and Black are sticky under Strict.
        if policy == CardPolicy::Strict && self.card >= Card::Red && new_card < self.card {
            return CardOutcome::rejected(self.card);
        }

        self.card = new_card;
        CardOutcome {
            card: new_card,
            award_opponent_point: new_card == Card::Red,
            accepted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_clamps_at_zero() {
        let mut f = FencerState::new();
        assert_eq!(f.apply_touch(-1), 0);
        assert_eq!(f.apply_touch(2), 2);
        assert_eq!(f.apply_touch(-5), 0);
        assert_eq!(f.apply_touch(i32::MIN), 0);
    }

    #[test]
    fn touch_saturates_at_max() {
        let mut f = FencerState::new();
        f.apply_touch(i32::MAX);
        f.apply_touch(i32::MAX);
        f.apply_touch(i32::MAX);
        assert_eq!(f.score(), u32::MAX);
    }

    #[test]
    fn first_yellow_awards_nothing() {
        let mut f = FencerState::new();
        let out = f.apply_card(Card::Yellow, CardPolicy::Strict);
        assert_eq!(out.card, Card::Yellow);
        assert!(!out.award_opponent_point);
        assert!(out.accepted);
    }

    #[test]
    fn second_yellow_escalates_to_red() {
        let mut f = FencerState::new();
        f.apply_card(Card::Yellow, CardPolicy::Strict);
        let out = f.apply_card(Card::Yellow, CardPolicy::Strict);
        assert_eq!(out.card, Card::Red);
        assert!(out.award_opponent_point);
        assert_eq!(f.card(), Card::Red);
    }

    #[test]
    fn black_never_awards() {
        for start in [Card::None, Card::Yellow, Card::Red, Card::Black] {
            let mut f = FencerState::new();
            f.apply_card(start, CardPolicy::Overwrite);
            let out = f.apply_card(Card::Black, CardPolicy::Strict);
            assert_eq!(out.card, Card::Black);
            assert!(!out.award_opponent_point, "from {start:?}");
        }
    }

    #[test]
    fn strict_rejects_downgrade_from_red() {
        let mut f = FencerState::new();
        f.apply_card(Card::Red, CardPolicy::Strict);
        let out = f.apply_card(Card::Yellow, CardPolicy::Strict);
        assert!(!out.accepted);
        assert_eq!(f.card(), Card::Red);
        assert!(!out.award_opponent_point);
    }

    #[test]
    fn strict_allows_clearing_a_yellow() {
        let mut f = FencerState::new();
        f.apply_card(Card::Yellow, CardPolicy::Strict);
        let out = f.apply_card(Card::None, CardPolicy::Strict);
        assert!(out.accepted);
        assert!(!out.award_opponent_point);
        assert_eq!(f.card(), Card::None);
    }

    #[test]
    fn strict_keeps_black_terminal() {
        let mut f = FencerState::new();
        f.apply_card(Card::Black, CardPolicy::Strict);
        for c in [Card::None, Card::Yellow, Card::Red] {
            let out = f.apply_card(c, CardPolicy::Strict);
            assert!(!out.accepted);
            assert_eq!(f.card(), Card::Black);
        }
    }

    #[test]
    fn overwrite_allows_downgrade() {
        let mut f = FencerState::new();
        f.apply_card(Card::Black, CardPolicy::Overwrite);
        let out = f.apply_card(Card::Red, CardPolicy::Overwrite);
        assert!(out.accepted);
        assert!(out.award_opponent_point);
        assert_eq!(f.card(), Card::Red);
    }
}
