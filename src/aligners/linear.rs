//! Smith–Waterman best score in O(|T|) memory.
//!
//! Only two rows are live: the previous row `i-1` and the row `i` being
//! filled. Each row is `|T|+1` wide so that column 0 reproduces the zero
//! border of the full matrix. After a row is finished the two buffers swap
//! roles and the buffer about to be refilled is reset to zeros.
//!
//! No path is reconstructed. [`best_cell`] also reports where the best value
//! sits, which is enough to resolve a corpus identity without the full grid.

use super::local::cell;
use crate::grid::{BestCell, BestCellPolicy, Coord};
use crate::traits::{Score, Symbol, SymbolScorer};

/// Best local alignment score of `query` within `target`.
pub fn score<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> Score {
    best_cell(query, target, gap, scorer).value
}

/// Best local value and the coordinate of its first occurrence in row-major order.
///
/// Identical to the best cell of [`super::local::fill`].
pub fn best_cell<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> BestCell {
    let span = tracing::trace_span!("linear_score", rows = query.len() + 1, cols = target.len() + 1);
    let _enter = span.enter();

    let n = target.len();
    let mut prev = vec![0 as Score; n + 1];
    let mut curr = vec![0 as Score; n + 1];
    let mut best = BestCell::origin();

    for i in 1..=query.len() {
        let q = query[i - 1];
        for j in 1..=n {
            let v = cell(scorer, q, target[j - 1], prev[j], curr[j - 1], prev[j - 1], gap);
            curr[j] = v;
            best.offer(v, Coord::new(i, j), BestCellPolicy::FirstCome);
        }
        std::mem::swap(&mut prev, &mut curr);
        curr.fill(0);
    }

    tracing::debug!(score = best.value, x = best.coord.x, y = best.coord.y, "linear best cell");
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligners::local;
    use crate::scoring::MatchScorer;
    use crate::traits::SENTINEL;

    #[test]
    fn matches_full_matrix_on_small_cases() {
        let scorer = MatchScorer::default();
        let cases: &[(&[Symbol], &[Symbol])] = &[
            (&[1, 1, 1], &[1, 1, 1]),
            (&[1, SENTINEL, 1], &[1, 1]),
            (&[], &[1, 2, 3]),
            (&[1, 2, 3], &[]),
            (&[5, 1, 1], &[7, 1, 1]),
            (&[1, 2, 3], &[1, 2, 9, 3]),
            (&[2, -1, 4, 4, 0, 2], &[4, 4, 2, -1, 4, 4, 0]),
        ];
        for &(q, t) in cases {
            for gap in [0, 1, 5] {
                let (_, full) = local::fill(q, t, gap, &scorer);
                let lin = best_cell(q, t, gap, &scorer);
                assert_eq!(lin, full, "q={q:?} t={t:?} gap={gap}");
                assert_eq!(score(q, t, gap, &scorer), full.value);
            }
        }
    }

    #[test]
    fn last_row_and_column_are_reachable() {
        // The only match is in the final cell.
        assert_eq!(score(&[9, 9, 4], &[8, 8, 4], 5, &MatchScorer::default()), 3);
        let best = best_cell(&[9, 9, 4], &[8, 8, 4], 5, &MatchScorer::default());
        assert_eq!(best.coord, Coord::new(3, 3));
    }
}
