//! Configured aligner.
//!
//! [`Aligner`] bundles a scorer with a gap penalty and a best-cell policy and
//! exposes every alignment variant plus corpus identity resolution. It holds
//! no per-call state: each call allocates its own grid (or two rows) and
//! drops it before returning.
//!
//! Typical usage:
//! ```
//! use motif_align::{Aligner, CorpusBuilder, MatchScorer, TrackRecord};
//!
//! let mut corpus = CorpusBuilder::new();
//! let track = TrackRecord {
//!     track_index: 0,
//!     instrument_name: "Lead".into(),
//!     program: 81,
//!     is_drum: false,
//!     pitch_intervals: Some(vec![2, 2, -4, 5, 0, -1]),
//! };
//! corpus.push_track("Artist", "Song", &track).unwrap();
//! let corpus = corpus.finish();
//!
//! let aligner = Aligner::new(MatchScorer::default());
//! let hit = aligner.search(&[-4, 5, 0], &corpus.symbols, 0, &corpus.registry);
//! assert_eq!(hit.alignment.score, 9);
//! assert_eq!(hit.identity.map(|id| id.song), Some("Song".to_string()));
//! ```

use crate::aligners::{global, linear, local, wavefront, Alignment};
use crate::grid::{BestCell, BestCellPolicy};
use crate::registry::{IdentityRecord, IntervalRegistry};
use crate::traits::{Score, Symbol, SymbolScorer};

/// Gap penalty used when none is configured.
pub const DEFAULT_GAP_PENALTY: Score = 5;

/// A local alignment and the corpus track it ended in, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub alignment: Alignment,
    pub identity: Option<IdentityRecord>,
}

/// Alignment front end for a scorer `S`.
pub struct Aligner<S: SymbolScorer> {
    scorer: S,
    gap: Score,
    policy: BestCellPolicy,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl<S: SymbolScorer> Aligner<S> {
    /// Aligner with [`DEFAULT_GAP_PENALTY`], the lexicographic best-cell
    /// policy and the global worker pool.
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            gap: DEFAULT_GAP_PENALTY,
            policy: BestCellPolicy::default(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    pub(crate) fn from_parts(
        scorer: S,
        gap: Score,
        policy: BestCellPolicy,
        #[cfg(feature = "parallel")] pool: Option<rayon::ThreadPool>,
    ) -> Self {
        Self {
            scorer,
            gap,
            policy,
            #[cfg(feature = "parallel")]
            pool,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn gap_penalty(&self) -> Score {
        self.gap
    }

    pub fn best_cell_policy(&self) -> BestCellPolicy {
        self.policy
    }

    /// Needleman–Wunsch alignment of the whole of both sequences.
    pub fn global(&self, query: &[Symbol], target: &[Symbol]) -> Alignment {
        global::align(query, target, self.gap, &self.scorer)
    }

    /// Smith–Waterman alignment over a full matrix.
    pub fn local(&self, query: &[Symbol], target: &[Symbol]) -> Alignment {
        local::align(query, target, self.gap, &self.scorer)
    }

    /// Smith–Waterman best score only, in O(|T|) memory.
    pub fn local_linear(&self, query: &[Symbol], target: &[Symbol]) -> Score {
        linear::score(query, target, self.gap, &self.scorer)
    }

    /// Smith–Waterman alignment filled by anti-diagonal.
    ///
    /// Runs on the dedicated pool when one was configured.
    pub fn local_wavefront(&self, query: &[Symbol], target: &[Symbol]) -> Alignment {
        let run = || wavefront::align(query, target, self.gap, &self.scorer, self.policy);
        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            return pool.install(run);
        }
        run()
    }

    /// Best local cell found in O(|T|) memory, resolved along the target
    /// axis. Suited to corpus-scale targets where no full grid fits.
    ///
    /// `target_offset` is the flat corpus index of `target[0]`.
    pub fn locate<'r>(
        &self,
        query: &[Symbol],
        target: &[Symbol],
        target_offset: usize,
        registry: &'r IntervalRegistry,
    ) -> (BestCell, Option<&'r IdentityRecord>) {
        let best = linear::best_cell(query, target, self.gap, &self.scorer);
        let identity = resolve_best(registry, &best, target_offset);
        (best, identity)
    }

    /// Full local alignment plus the identity of the track its best cell
    /// falls in.
    pub fn search(
        &self,
        query: &[Symbol],
        target: &[Symbol],
        target_offset: usize,
        registry: &IntervalRegistry,
    ) -> Match {
        let alignment = self.local(query, target);
        let identity = alignment
            .end()
            .filter(|_| alignment.score > 0)
            .and_then(|end| registry.resolve_target(end, target_offset))
            .cloned();
        Match {
            alignment,
            identity,
        }
    }
}

/// A zero-score best cell is the origin, not a match.
fn resolve_best<'r>(
    registry: &'r IntervalRegistry,
    best: &BestCell,
    target_offset: usize,
) -> Option<&'r IdentityRecord> {
    if best.value <= 0 {
        return None;
    }
    let identity = registry.resolve_target(best.coord, target_offset);
    if identity.is_none() {
        tracing::debug!(x = best.coord.x, y = best.coord.y, "best cell outside every interval");
    }
    identity
}
