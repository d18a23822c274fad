//! Smith–Waterman local alignment over a full matrix.
//!
//! All cells start at 0 and every fill step is floored at 0, so the grid is
//! non-negative and an alignment may start and end anywhere. The best cell is
//! tracked during the fill; the traceback starts there and stops at the local
//! cutoff. No step, diagonal or gap, may consume a boundary symbol, so a
//! local alignment never spans two concatenated sub-sequences.

use super::traceback::{trace, TraceMode};
use super::Alignment;
use crate::grid::{BestCell, BestCellPolicy, Coord, Grid};
use crate::traits::{Score, Symbol, SymbolScorer};
use crate::utils::{add_score, gap_step};

/// One local fill step for cell `(i, j)`:
/// `max(top - g, left - g, diag + sigma(q, t), 0)`.
///
/// `top`, `left` and `diag` are the values of cells `(i-1, j)`, `(i, j-1)`
/// and `(i-1, j-1)`; `q = Q[i-1]` and `t = T[j-1]`. A gap step that would
/// consume a boundary symbol is unreachable.
#[inline]
pub fn cell<S: SymbolScorer + ?Sized>(
    scorer: &S,
    q: Symbol,
    t: Symbol,
    top: Score,
    left: Score,
    diag: Score,
    gap: Score,
) -> Score {
    gap_step(top, gap, scorer.is_boundary(q))
        .max(gap_step(left, gap, scorer.is_boundary(t)))
        .max(add_score(diag, scorer.score(q, t)))
        .max(0)
}

/// Fill the full grid and return it with the best cell.
///
/// The fill is row-major and the best only moves on a strictly greater
/// value, so among equal maxima the lexicographically lowest `(i, j)` wins.
pub fn fill<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> (Grid, BestCell) {
    let m = query.len();
    let n = target.len();
    let mut grid = Grid::for_lengths(m, n, 0);
    let mut best = BestCell::origin();

    for i in 1..=m {
        let q = query[i - 1];
        for j in 1..=n {
            let v = cell(
                scorer,
                q,
                target[j - 1],
                grid.get(i - 1, j),
                grid.get(i, j - 1),
                grid.get(i - 1, j - 1),
                gap,
            );
            grid.set(i, j, v);
            best.offer(v, Coord::new(i, j), BestCellPolicy::FirstCome);
        }
    }

    (grid, best)
}

/// Best local alignment of `query` within `target`.
pub fn align<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
) -> Alignment {
    let span = tracing::trace_span!("local_align", rows = query.len() + 1, cols = target.len() + 1);
    let _enter = span.enter();

    let (grid, best) = fill(query, target, gap, scorer);
    tracing::debug!(score = best.value, x = best.coord.x, y = best.coord.y, "local best cell");
    let path = trace(&grid, query, target, gap, scorer, best.coord, TraceMode::Local);
    Alignment {
        score: best.value,
        path,
    }
}
