//! Motif alignment over a concatenated track corpus.
//!
//! This crate aligns a short excerpt (a *query*) of encoded pitch-interval
//! deltas against a *target* sequence, usually a large corpus built by
//! joining many per-track sequences with a sentinel symbol between them,
//! and resolves the winning alignment back to the track it came from.
//!
//! ## Core idea
//! 1. Encode both sequences as [`Symbol`]s; track boundaries carry [`SENTINEL`].
//! 2. Pick a [`SymbolScorer`] that scores the sentinel as `i32::MIN` and
//!    reports it from [`SymbolScorer::is_boundary`]; local alignments then
//!    never match or skip over a boundary.
//! 3. Run one of the aligners and look the winning cell up in an
//!    [`IntervalRegistry`].
//!
//! ## Quick start
//! ```
//! use motif_align::{AlignerBuilder, MatchScorer};
//!
//! let aligner = AlignerBuilder::new(MatchScorer::default())
//!     .gap_penalty(5)
//!     .build()
//!     .unwrap();
//! let alignment = aligner.local(&[1, 1, 1], &[1, 1, 1]);
//! assert_eq!(alignment.score, 9);
//! assert_eq!(alignment.path.len(), 4);
//! ```
//!
//! ## Aligners
//! The `aligners` module contains the recurrences:
//! - [`aligners::global`]    : Needleman–Wunsch, corner anchored.
//! - [`aligners::local`]     : Smith–Waterman, best-cell anchored.
//! - [`aligners::linear`]    : Smith–Waterman score in O(|T|) memory.
//! - [`aligners::wavefront`] : Smith–Waterman evaluated by anti-diagonal,
//!   concurrently within each diagonal when the `parallel` feature is on.
//!
//! The full-matrix variants need O(|Q|·|T|) memory; corpus-scale targets
//! should go through [`Aligner::locate`] or [`Aligner::local_linear`].

pub mod aligners;
pub mod builder;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod grid;
pub mod registry;
pub mod scoring;
pub mod traits;
pub mod utils;

pub use crate::aligners::Alignment;
pub use crate::builder::AlignerBuilder;
pub use crate::corpus::{Corpus, CorpusBuilder, TrackRecord};
pub use crate::engine::{Aligner, Match};
pub use crate::error::{ConfigError, CorpusError, RegistryError};
pub use crate::grid::{BestCell, BestCellPolicy, Coord, Grid};
pub use crate::registry::{IdentityRecord, Interval, IntervalRegistry};
pub use crate::scoring::MatchScorer;
pub use crate::traits::{Score, Symbol, SymbolScorer, SENTINEL};
