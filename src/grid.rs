//! Grid storage and best-cell tracking shared by the aligners.
//!
//! A [`Grid`] holds one [`Score`] per coordinate `(i, j)` with
//! `0 <= i <= |Q|` and `0 <= j <= |T|`, laid out row-major in a single
//! allocation. It is created per alignment call and dropped after the score
//! and path have been extracted.

use crate::traits::Score;

/// A position in the DP grid: `x` indexes the query, `y` the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (usize, usize) {
    #[inline]
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

/// Dense row-major score matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Score>,
}

impl Grid {
    /// Allocate a `rows x cols` grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: Score) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Grid sized for aligning `q_len` query symbols against `t_len` target symbols.
    pub fn for_lengths(q_len: usize, t_len: usize, fill: Score) -> Self {
        Self::new(q_len + 1, t_len + 1, fill)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Score {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Score) {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j] = value;
    }

    #[inline]
    pub fn at(&self, c: Coord) -> Score {
        self.get(c.x, c.y)
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[Score] {
        let start = i * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[Score] {
        &self.cells
    }

    /// Largest cell value; `None` for a zero-sized grid.
    pub fn max_value(&self) -> Option<Score> {
        self.cells.iter().copied().max()
    }
}

/// How a best-cell tracker treats a candidate equal to the current best.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BestCellPolicy {
    /// Equal values keep the lexicographically lowest `(i, j)`.
    ///
    /// This is the cell a row-major sequential fill settles on, so it makes
    /// the wavefront result reproducible and identical to the sequential one.
    #[default]
    Lexicographic,
    /// Only strictly greater values replace the best.
    ///
    /// Under the wavefront aligner the winner among equal cells on one
    /// anti-diagonal then depends on thread scheduling. Grid values and the
    /// best value are unaffected.
    FirstCome,
}

/// Best value seen so far together with its coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestCell {
    pub value: Score,
    pub coord: Coord,
}

impl BestCell {
    /// Starting point for local alignment: value 0 at `(0, 0)`.
    pub const fn origin() -> Self {
        Self {
            value: 0,
            coord: Coord::new(0, 0),
        }
    }

    /// Offer a candidate; returns true if it replaced the current best.
    #[inline]
    pub fn offer(&mut self, value: Score, coord: Coord, policy: BestCellPolicy) -> bool {
        let better = value > self.value
            || (policy == BestCellPolicy::Lexicographic
                && value == self.value
                && coord < self.coord);
        if better {
            self.value = value;
            self.coord = coord;
        }
        better
    }
}

impl Default for BestCell {
    fn default() -> Self {
        Self::origin()
    }
}
