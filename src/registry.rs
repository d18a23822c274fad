//! Interval-to-identity lookup over the flat corpus index space.
//!
//! A corpus sequence is the concatenation of many tracks, each followed by
//! one [`SENTINEL`](crate::SENTINEL). Every track's symbols occupy one
//! half-open [`Interval`]; the sentinel after a track sits at that interval's
//! `stop` and belongs to no interval. The registry maps intervals to the
//! [`IdentityRecord`] of the track, and resolves a flat index to the record
//! whose interval contains it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::grid::Coord;

/// Half-open index range `[start, stop)`.
///
/// Ordered lexicographically by `(start, stop)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub stop: usize,
}

impl Interval {
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop);
        Self { start, stop }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.stop
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.stop && other.start < self.stop
    }
}

/// Where one track came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub artist: String,
    pub song: String,
    pub track_index: i64,
    pub instrument: String,
    pub program: i64,
    pub is_drum: bool,
}

/// Ordered, read-only-after-build association from [`Interval`] to [`IdentityRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalRegistry {
    entries: BTreeMap<Interval, IdentityRecord>,
}

impl IntervalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `interval`; it must be non-empty and disjoint from every
    /// interval already present.
    pub fn insert(&mut self, interval: Interval, record: IdentityRecord) -> Result<(), RegistryError> {
        if interval.is_empty() {
            return Err(RegistryError::Empty {
                start: interval.start,
                stop: interval.stop,
            });
        }
        // Only the nearest neighbours on either side can overlap a disjoint set.
        let before = self.entries.range(..interval).next_back();
        let after = self.entries.range(interval..).next();
        for (existing, _) in before.into_iter().chain(after) {
            if existing.overlaps(&interval) {
                return Err(RegistryError::Overlap {
                    start: interval.start,
                    stop: interval.stop,
                    existing_start: existing.start,
                    existing_stop: existing.stop,
                });
            }
        }
        self.entries.insert(interval, record);
        Ok(())
    }

    /// Interval and record covering flat index `index`, if any.
    pub fn lookup(&self, index: usize) -> Option<(&Interval, &IdentityRecord)> {
        let probe = Interval {
            start: index,
            stop: usize::MAX,
        };
        self.entries
            .range(..=probe)
            .next_back()
            .filter(|(interval, _)| interval.contains(index))
    }

    /// Record covering flat index `index`; `None` for sentinels and
    /// positions outside every interval.
    pub fn resolve(&self, index: usize) -> Option<&IdentityRecord> {
        self.lookup(index).map(|(_, record)| record)
    }

    /// Resolve a grid cell along the target axis.
    ///
    /// Cell `(i, j)` with `j >= 1` ends on target symbol `T[j-1]`, whose flat
    /// index is `target_offset + j - 1`; `target_offset` is where `T[0]` sits
    /// in the corpus. Column 0 is unresolved.
    pub fn resolve_target(&self, coord: Coord, target_offset: usize) -> Option<&IdentityRecord> {
        let j = coord.y.checked_sub(1)?;
        self.resolve(target_offset.checked_add(j)?)
    }

    /// Resolve a grid cell along the query axis, for searches that put the
    /// corpus window in the query role.
    pub fn resolve_query(&self, coord: Coord, query_offset: usize) -> Option<&IdentityRecord> {
        let i = coord.x.checked_sub(1)?;
        self.resolve(query_offset.checked_add(i)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in interval order.
    pub fn iter(&self) -> impl Iterator<Item = (&Interval, &IdentityRecord)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(song: &str, track_index: i64) -> IdentityRecord {
        IdentityRecord {
            artist: "Artist".into(),
            song: song.into(),
            track_index,
            instrument: "Piano".into(),
            program: 0,
            is_drum: false,
        }
    }

    /// Two tracks: [0, 3) sentinel@3, [4, 6) sentinel@6.
    fn two_tracks() -> IntervalRegistry {
        let mut r = IntervalRegistry::new();
        r.insert(Interval::new(0, 3), record("a", 0)).unwrap();
        r.insert(Interval::new(4, 6), record("b", 1)).unwrap();
        r
    }

    #[test]
    fn resolves_interior_and_edges() {
        let r = two_tracks();
        assert_eq!(r.resolve(0).map(|x| x.song.as_str()), Some("a"));
        assert_eq!(r.resolve(2).map(|x| x.song.as_str()), Some("a"));
        assert_eq!(r.resolve(4).map(|x| x.song.as_str()), Some("b"));
        assert_eq!(r.resolve(5).map(|x| x.song.as_str()), Some("b"));
    }

    #[test]
    fn sentinels_and_out_of_range_are_unresolved() {
        let r = two_tracks();
        assert!(r.resolve(3).is_none());
        assert!(r.resolve(6).is_none());
        assert!(r.resolve(1_000).is_none());
        assert!(IntervalRegistry::new().resolve(0).is_none());
    }

    #[test]
    fn overlapping_and_empty_intervals_rejected() {
        let mut r = two_tracks();
        assert!(matches!(
            r.insert(Interval::new(2, 5), record("c", 2)),
            Err(RegistryError::Overlap { existing_start: 0, .. })
        ));
        assert!(matches!(
            r.insert(Interval::new(5, 9), record("c", 2)),
            Err(RegistryError::Overlap { existing_start: 4, .. })
        ));
        assert!(matches!(
            r.insert(Interval::new(7, 7), record("c", 2)),
            Err(RegistryError::Empty { .. })
        ));
        // Adjacent is fine.
        r.insert(Interval::new(6, 8), record("c", 2)).unwrap();
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut v = vec![Interval::new(4, 6), Interval::new(0, 9), Interval::new(0, 3)];
        v.sort();
        assert_eq!(v, vec![Interval::new(0, 3), Interval::new(0, 9), Interval::new(4, 6)]);
    }

    #[test]
    fn target_axis_uses_column_minus_one() {
        let r = two_tracks();
        // Column 0 has no target symbol.
        assert!(r.resolve_target(Coord::new(5, 0), 0).is_none());
        assert_eq!(r.resolve_target(Coord::new(9, 1), 0).unwrap().song, "a");
        assert!(r.resolve_target(Coord::new(0, 4), 0).is_none()); // sentinel at 3
        assert_eq!(r.resolve_target(Coord::new(0, 1), 4).unwrap().song, "b");
    }

    #[test]
    fn query_axis_uses_row_minus_one() {
        let r = two_tracks();
        assert!(r.resolve_query(Coord::new(0, 5), 0).is_none());
        assert_eq!(r.resolve_query(Coord::new(5, 1), 0).unwrap().song, "b");
        assert_eq!(r.resolve_query(Coord::new(1, 1), 2).unwrap().song, "a");
    }
}
