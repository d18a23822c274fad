//! Alignment recurrences.
//!
//! - [`global`]    : Needleman–Wunsch with linear gap cost, corner to corner.
//! - [`local`]     : Smith–Waterman over a full matrix, best-cell anchored.
//! - [`linear`]    : Smith–Waterman best score keeping two rows.
//! - [`wavefront`] : Smith–Waterman evaluated one anti-diagonal at a time.
//! - [`traceback`] : path reconstruction shared by the full-matrix variants.

pub mod global;
pub mod linear;
pub mod local;
pub mod traceback;
pub mod wavefront;

use crate::grid::Coord;
use crate::traits::{Score, Symbol, SENTINEL};

/// Score and traceback path of one alignment.
///
/// `path[0]` is the cell the traceback started from (the corner for global
/// alignment, the best cell for local alignment); the last element is the
/// cell nearest the alignment origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub score: Score,
    pub path: Vec<Coord>,
}

impl Alignment {
    /// Cell the traceback started from.
    pub fn end(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    /// Cell where the traceback stopped.
    pub fn origin(&self) -> Option<Coord> {
        self.path.last().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Path ordered from the origin toward the end cell.
    pub fn path_from_origin(&self) -> Vec<Coord> {
        self.path.iter().rev().copied().collect()
    }

    /// Render the aligned region as two rows of space-separated columns.
    ///
    /// Gaps show as `.` and sentinels as `|`. This is a display helper; it
    /// assumes `query` and `target` are the sequences the path was computed on.
    pub fn render(&self, query: &[Symbol], target: &[Symbol]) -> (String, String) {
        let forward = self.path_from_origin();
        let mut top = Vec::with_capacity(forward.len());
        let mut bottom = Vec::with_capacity(forward.len());

        for w in forward.windows(2) {
            let (prev, cur) = (w[0], w[1]);
            let (q_tok, t_tok) = match (cur.x - prev.x, cur.y - prev.y) {
                (1, 1) => (token(query[prev.x]), token(target[prev.y])),
                (1, 0) => (token(query[prev.x]), ".".to_string()),
                _ => (".".to_string(), token(target[prev.y])),
            };
            let width = q_tok.len().max(t_tok.len());
            top.push(format!("{q_tok:>width$}"));
            bottom.push(format!("{t_tok:>width$}"));
        }

        (top.join(" "), bottom.join(" "))
    }
}

fn token(s: Symbol) -> String {
    if s == SENTINEL {
        "|".to_string()
    } else {
        s.to_string()
    }
}
