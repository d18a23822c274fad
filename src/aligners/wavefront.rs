//! Smith–Waterman evaluated by anti-diagonal.
//!
//! Cell `(i, j)` depends on `(i-1, j)` and `(i, j-1)`, both on diagonal
//! `k-1` where `k = i + j`, and on `(i-1, j-1)` on diagonal `k-2`. Cells of a
//! single diagonal are therefore independent of each other. The fill walks
//! `k = 2..=|Q|+|T|` in order; each diagonal is computed as one fork-join
//! region (with the `parallel` feature) against a grid that already holds
//! every earlier diagonal, and is written back before the next one starts.
//! The join at the end of each region is the barrier between diagonals.
//!
//! Grid values are identical to [`super::local::fill`]. The best cell lives
//! in a single mutex-guarded [`BestCell`] separate from the grid; how equal
//! values are settled depends on the [`BestCellPolicy`].

use std::sync::{Mutex, PoisonError};

use super::local::cell;
use super::traceback::{trace, TraceMode};
use super::Alignment;
use crate::grid::{BestCell, BestCellPolicy, Coord, Grid};
use crate::traits::{Score, Symbol, SymbolScorer};
use crate::utils::diagonal_rows;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fill the full grid diagonal by diagonal and return it with the best cell.
pub fn fill<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    policy: BestCellPolicy,
) -> (Grid, BestCell) {
    let m = query.len();
    let n = target.len();
    let mut grid = Grid::for_lengths(m, n, 0);
    let best = Mutex::new(BestCell::origin());

    // Diagonals 0 and 1 hold border cells only.
    for k in 2..=m + n {
        let Some((lo, hi)) = diagonal_rows(k, m, n) else {
            break;
        };
        // Skip row 0 and column 0 (j = k - i >= 1).
        let lo = lo.max(1);
        let hi = hi.min(k - 1);
        if lo > hi {
            continue;
        }

        let values = evaluate_diagonal(&grid, query, target, gap, scorer, k, lo, hi, &best, policy);
        for (offset, v) in values.into_iter().enumerate() {
            let i = lo + offset;
            grid.set(i, k - i, v);
        }
    }

    let best = best.into_inner().unwrap_or_else(PoisonError::into_inner);
    (grid, best)
}

/// Best local alignment, filled by anti-diagonal and traced back like
/// [`super::local::align`].
pub fn align<S: SymbolScorer + ?Sized>(
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    policy: BestCellPolicy,
) -> Alignment {
    let span = tracing::trace_span!(
        "wavefront_align",
        rows = query.len() + 1,
        cols = target.len() + 1,
        parallel = cfg!(feature = "parallel")
    );
    let _enter = span.enter();

    let (grid, best) = fill(query, target, gap, scorer, policy);
    tracing::debug!(score = best.value, x = best.coord.x, y = best.coord.y, "wavefront best cell");
    let path = trace(&grid, query, target, gap, scorer, best.coord, TraceMode::Local);
    Alignment {
        score: best.value,
        path,
    }
}

/// Compute one cell of diagonal `k` and offer it to the shared best.
#[allow(clippy::too_many_arguments)]
#[inline]
fn evaluate_cell<S: SymbolScorer + ?Sized>(
    grid: &Grid,
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    k: usize,
    i: usize,
    best: &Mutex<BestCell>,
    policy: BestCellPolicy,
) -> Score {
    let j = k - i;
    let v = cell(
        scorer,
        query[i - 1],
        target[j - 1],
        grid.get(i - 1, j),
        grid.get(i, j - 1),
        grid.get(i - 1, j - 1),
        gap,
    );
    // Zero never displaces the origin under either policy.
    if v > 0 {
        let mut guard = best.lock().unwrap_or_else(PoisonError::into_inner);
        guard.offer(v, Coord::new(i, j), policy);
    }
    v
}

/// Values of rows `lo..=hi` on diagonal `k`, in row order.
#[cfg(feature = "parallel")]
#[allow(clippy::too_many_arguments)]
fn evaluate_diagonal<S: SymbolScorer + ?Sized>(
    grid: &Grid,
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    k: usize,
    lo: usize,
    hi: usize,
    best: &Mutex<BestCell>,
    policy: BestCellPolicy,
) -> Vec<Score> {
    (lo..hi + 1)
        .into_par_iter()
        .map(|i| evaluate_cell(grid, query, target, gap, scorer, k, i, best, policy))
        .collect()
}

#[cfg(not(feature = "parallel"))]
#[allow(clippy::too_many_arguments)]
fn evaluate_diagonal<S: SymbolScorer + ?Sized>(
    grid: &Grid,
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    k: usize,
    lo: usize,
    hi: usize,
    best: &Mutex<BestCell>,
    policy: BestCellPolicy,
) -> Vec<Score> {
    (lo..hi + 1)
        .map(|i| evaluate_cell(grid, query, target, gap, scorer, k, i, best, policy))
        .collect()
}
