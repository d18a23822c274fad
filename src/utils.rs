//! Assorted utilities and helpers.
//!
//! Saturating score arithmetic shared by every recurrence, boundary-aware
//! gap steps, and the index bounds of an anti-diagonal.

use crate::traits::Score;

/// Add a pair score to a cell value without wrapping.
///
/// Scorers return `Score::MIN` for the sentinel; on a negative global cell a
/// plain `+` would overflow.
#[inline]
pub fn add_score(cell: Score, delta: Score) -> Score {
    cell.saturating_add(delta)
}

/// Charge a linear gap against a cell value without wrapping.
#[inline]
pub fn sub_gap(cell: Score, gap: Score) -> Score {
    cell.saturating_sub(gap)
}

/// Gap step from a neighbouring cell that consumes one symbol.
///
/// A step that would consume a boundary symbol is unreachable and scores
/// `Score::MIN`.
#[inline]
pub fn gap_step(cell: Score, gap: Score, consumes_boundary: bool) -> Score {
    if consumes_boundary {
        Score::MIN
    } else {
        sub_gap(cell, gap)
    }
}

/// Inclusive range of row indices `i` on anti-diagonal `k = i + j` of a
/// grid with rows `0..=m` and columns `0..=n`.
///
/// Returns `None` when `k > m + n`.
#[inline]
pub fn diagonal_rows(k: usize, m: usize, n: usize) -> Option<(usize, usize)> {
    if k > m + n {
        return None;
    }
    Some((k.saturating_sub(n), k.min(m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_at_sentinel_scores() {
        assert_eq!(add_score(-10, Score::MIN), Score::MIN);
        assert_eq!(add_score(10, Score::MIN), Score::MIN + 10);
        assert_eq!(sub_gap(Score::MIN + 1, 5), Score::MIN);
        assert_eq!(sub_gap(7, 5), 2);
        assert_eq!(gap_step(7, 5, false), 2);
        assert_eq!(gap_step(7, 5, true), Score::MIN);
    }

    #[test]
    fn diagonal_bounds_behavior() {
        // 2 x 3 grid (m = 2, n = 3).
        assert_eq!(diagonal_rows(0, 2, 3), Some((0, 0)));
        assert_eq!(diagonal_rows(2, 2, 3), Some((0, 2)));
        assert_eq!(diagonal_rows(4, 2, 3), Some((1, 2)));
        assert_eq!(diagonal_rows(5, 2, 3), Some((2, 2)));
        assert_eq!(diagonal_rows(6, 2, 3), None);
    }

    #[test]
    fn diagonals_cover_every_cell_once() {
        let (m, n) = (4, 7);
        let mut seen = vec![0u8; (m + 1) * (n + 1)];
        for k in 0..=m + n {
            let (lo, hi) = diagonal_rows(k, m, n).unwrap();
            for i in lo..=hi {
                let j = k - i;
                assert!(j <= n, "column out of range at k={k}, i={i}");
                seen[i * (n + 1) + j] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }
}
