//! Seam for plugging a hand evaluator into showdown.

use serde::{Deserialize, Serialize};

use super::entities::{Card, Combo};

/// Strength of a made hand, as reported by an evaluator.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct HandEvaluation {
    /// Lower is stronger.
    pub hand_score: u32,
    pub rank_class: u8,
    /// Human readable class, e.g. "Two Pair".
    pub class_str: String,
}

impl HandEvaluation {
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.hand_score < other.hand_score
    }

    #[must_use]
    pub fn ties(&self, other: &Self) -> bool {
        self.hand_score == other.hand_score
    }
}

/// Scores hole cards against the community cards.
pub trait HandEvaluator {
    fn evaluate(&self, hole: Combo, board: &[Card]) -> HandEvaluation;
}

impl<F> HandEvaluator for F
where
    F: Fn(Combo, &[Card]) -> HandEvaluation,
{
    fn evaluate(&self, hole: Combo, board: &[Card]) -> HandEvaluation {
        self(hole, board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high_card(hole: Combo, _board: &[Card]) -> HandEvaluation {
        HandEvaluation {
            hand_score: 15 - u32::from(hole.high().rank.value()),
            rank_class: 9,
            class_str: "High Card".to_string(),
        }
    }

    #[test]
    fn test_closure_evaluator() {
        let aces = high_card.evaluate("AsKd".parse().unwrap(), &[]);
        let kings = high_card.evaluate("Kc2d".parse().unwrap(), &[]);
        assert!(aces.beats(&kings));
        assert!(!kings.beats(&aces));
        assert!(kings.ties(&high_card.evaluate("Kh3d".parse().unwrap(), &[])));
    }
}
