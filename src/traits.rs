//! Core trait definitions for symbol scoring.
//!
//! Every aligner in this crate is generic over a [`SymbolScorer`]: the
//! comparator that maps a pair of symbols to an integer score. Callers plug
//! in their own alphabet semantics by implementing the trait (or by passing a
//! closure), while the aligners own the recurrences.
//!
//! The symbol alphabet is a bounded signed byte. One value, [`SENTINEL`], is
//! reserved: it marks the boundary between concatenated sub-sequences and
//! must never take part in a valid alignment.

/// A single encoded symbol (one pitch-interval delta).
pub type Symbol = i8;

/// Score of a grid cell or of a symbol pair.
pub type Score = i32;

/// Reserved boundary symbol written after every track in a corpus sequence.
pub const SENTINEL: Symbol = i8::MIN;

/// Pairwise symbol comparator.
///
/// Contract:
/// - Pure and total over the alphabet plus [`SENTINEL`].
/// - Must return `Score::MIN` whenever either argument is [`SENTINEL`]. The
///   aligners rely on this to keep diagonal steps from matching a track
///   boundary; they do not compare symbols against the sentinel themselves.
/// - Otherwise returns a positive bonus for a match and a negative penalty
///   for a mismatch.
///
/// The local aligners additionally refuse to charge a gap against a symbol
/// for which [`is_boundary`](SymbolScorer::is_boundary) holds, so no local
/// path consumes a boundary at all.
///
/// The `Sync` bound lets the wavefront aligner share one scorer across
/// worker threads.
pub trait SymbolScorer: Sync {
    /// Score aligning `a` (from the query) against `b` (from the target).
    fn score(&self, a: Symbol, b: Symbol) -> Score;

    /// Whether `s` marks a boundary between concatenated sub-sequences.
    #[inline]
    fn is_boundary(&self, s: Symbol) -> bool {
        s == SENTINEL
    }
}

impl<F> SymbolScorer for F
where
    F: Fn(Symbol, Symbol) -> Score + Sync,
{
    #[inline]
    fn score(&self, a: Symbol, b: Symbol) -> Score {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(a: Symbol, b: Symbol) -> Score {
        if a == SENTINEL || b == SENTINEL {
            return Score::MIN;
        }
        if a == b {
            3
        } else {
            -1
        }
    }

    #[test]
    fn closures_are_scorers() {
        let s = |a: Symbol, b: Symbol| if a == b { 2 } else { -2 };
        assert_eq!(s.score(4, 4), 2);
        assert_eq!(s.score(4, -4), -2);
    }

    #[test]
    fn default_boundary_is_the_sentinel() {
        assert!(reference.is_boundary(SENTINEL));
        assert!(!reference.is_boundary(0));
        assert!(!reference.is_boundary(i8::MAX));
    }

    #[test]
    fn fn_items_are_scorers() {
        assert_eq!(SymbolScorer::score(&reference, 1, 1), 3);
        assert_eq!(SymbolScorer::score(&reference, SENTINEL, 1), Score::MIN);
        assert_eq!(SymbolScorer::score(&reference, 1, SENTINEL), Score::MIN);
    }
}
