//! Needleman–Wunsch global alignment.
//!
//! Every symbol of both sequences takes part: row 0 and column 0 carry the
//! linear gap cost `-i*g` / `-j*g`, the fill keeps the best of the three
//! predecessors, and the score is the bottom-right corner.

use super::traceback::{trace, TraceMode};
use super::Alignment;
use crate::grid::{Coord, Grid};
use crate::traits::{Score, Symbol, SymbolScorer};
use crate::utils::{add_score, sub_gap};

/// Fill the full `(|Q|+1) x (|T|+1)` grid.
pub fn fill<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> Grid {
    let m = query.len();
    let n = target.len();
    let mut grid = Grid::for_lengths(m, n, 0);

    for j in 1..=n {
        let v = sub_gap(grid.get(0, j - 1), gap);
        grid.set(0, j, v);
    }

    for i in 1..=m {
        let border = sub_gap(grid.get(i - 1, 0), gap);
        grid.set(i, 0, border);

        let q = query[i - 1];
        for j in 1..=n {
            let top = sub_gap(grid.get(i - 1, j), gap);
            let left = sub_gap(grid.get(i, j - 1), gap);
            let diag = add_score(grid.get(i - 1, j - 1), scorer.score(q, target[j - 1]));
            grid.set(i, j, top.max(left).max(diag));
        }
    }

    grid
}

/// Align `query` against `target` end to end.
pub fn align<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> Alignment {
    let span = tracing::trace_span!("global_align", rows = query.len() + 1, cols = target.len() + 1);
    let _enter = span.enter();

    let grid = fill(query, target, gap, scorer);
    let corner = Coord::new(query.len(), target.len());
    let score = grid.at(corner);
    let path = trace(&grid, query, target, gap, scorer, corner, TraceMode::Global);
    Alignment { score, path }
}
