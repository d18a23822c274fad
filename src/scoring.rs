//! Reference symbol scorer.

use crate::traits::{Score, Symbol, SymbolScorer, SENTINEL};

/// Flat match/mismatch scorer that refuses to align across [`SENTINEL`].
///
/// `mismatch_penalty` is a magnitude: a mismatch scores `-mismatch_penalty`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchScorer {
    pub match_bonus: Score,
    pub mismatch_penalty: Score,
}

impl MatchScorer {
    pub fn new(match_bonus: Score, mismatch_penalty: Score) -> Self {
        Self {
            match_bonus,
            mismatch_penalty,
        }
    }
}

impl Default for MatchScorer {
    /// +3 for a match, -1 for a mismatch.
    fn default() -> Self {
        Self::new(3, 1)
    }
}

impl SymbolScorer for MatchScorer {
    #[inline]
    fn score(&self, a: Symbol, b: Symbol) -> Score {
        if a == SENTINEL || b == SENTINEL {
            Score::MIN
        } else if a == b {
            self.match_bonus
        } else {
            -self.mismatch_penalty
        }
    }
}
