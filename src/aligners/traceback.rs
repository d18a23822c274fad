//! Path reconstruction over a filled grid.
//!
//! The walk only ever reads the current traceback coordinate `(x, y)` and
//! its three predecessors. At each step the candidate values are re-derived
//! with the fill recurrence:
//!
//! - top:  `cell[x-1][y] - g`
//! - left: `cell[x][y-1] - g`
//! - diag: `cell[x-1][y-1] + sigma(Q[x-1], T[y-1])`
//!
//! In [`TraceMode::Local`] a gap candidate that consumes a boundary symbol
//! is `Score::MIN`, as in the local fill. The largest defined candidate wins.
//! Ties prefer top, then left, then diagonal; this order is part of the
//! output contract so that paths are reproducible across implementations.

use crate::grid::{Coord, Grid};
use crate::traits::{Score, Symbol, SymbolScorer};
use crate::utils::{add_score, gap_step};

/// Termination rule for a traceback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceMode {
    /// Walk until `(0, 0)`.
    Global,
    /// Also stop as soon as every candidate predecessor is negative, i.e. the
    /// current cell came from the zero floor and starts the local alignment.
    Local,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Top,
    Left,
    Diag,
}

/// Walk back from `start` and return the visited cells, `start` first.
pub fn trace<S: SymbolScorer + ?Sized>(
    grid: &Grid,
    query: &[Symbol],
    target: &[Symbol],
    gap: Score,
    scorer: &S,
    start: Coord,
    mode: TraceMode,
) -> Vec<Coord> {
    debug_assert!(start.x < grid.rows() && start.y < grid.cols());

    let bounded = mode == TraceMode::Local;
    let (mut x, mut y) = (start.x, start.y);
    let mut path = Vec::with_capacity(x + y + 1);
    path.push(start);

    while x > 0 || y > 0 {
        let top = (x > 0).then(|| {
            gap_step(grid.get(x - 1, y), gap, bounded && scorer.is_boundary(query[x - 1]))
        });
        let left = (y > 0).then(|| {
            gap_step(grid.get(x, y - 1), gap, bounded && scorer.is_boundary(target[y - 1]))
        });
        let diag = (x > 0 && y > 0).then(|| {
            add_score(
                grid.get(x - 1, y - 1),
                scorer.score(query[x - 1], target[y - 1]),
            )
        });

        if mode == TraceMode::Local && [top, left, diag].iter().flatten().all(|&v| v < 0) {
            break;
        }

        match pick(top, left, diag) {
            Step::Top => x -= 1,
            Step::Left => y -= 1,
            Step::Diag => {
                x -= 1;
                y -= 1;
            }
        }
        path.push(Coord::new(x, y));
    }

    path
}

/// Largest defined candidate; strict comparison keeps the earlier one on ties.
fn pick(top: Option<Score>, left: Option<Score>, diag: Option<Score>) -> Step {
    let mut best: Option<(Step, Score)> = None;
    for (step, value) in [(Step::Top, top), (Step::Left, left), (Step::Diag, diag)] {
        if let Some(v) = value {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((step, v));
            }
        }
    }
    // At least one move exists whenever (x, y) != (0, 0).
    best.map_or(Step::Diag, |(step, _)| step)
}
