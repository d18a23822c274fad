//! Corpus construction: per-track pitch-interval records to one flat
//! target sequence plus its [`IntervalRegistry`].
//!
//! On disk a corpus is a directory tree `base/<artist>/<song>.json`, where
//! each song file holds a JSON array of track records:
//!
//! ```json
//! [
//!   {"track_index": 0, "instrument_name": "Piano", "program": 0,
//!    "is_drum": false, "pitch_intervals": [2, 2, -4, 5]}
//! ]
//! ```
//!
//! Tracks without `pitch_intervals` are skipped. Every accepted track's
//! deltas are appended to the flat sequence followed by one [`SENTINEL`].
//! Unreadable files, malformed JSON and rejected tracks are reported with
//! `tracing::warn!` and skipped; only a missing base directory aborts.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::registry::{IdentityRecord, Interval, IntervalRegistry};
use crate::traits::{Symbol, SENTINEL};

/// One track as stored in a song file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(default = "unknown_number")]
    pub track_index: i64,
    #[serde(default = "unknown_instrument")]
    pub instrument_name: String,
    #[serde(default = "unknown_number")]
    pub program: i64,
    #[serde(default)]
    pub is_drum: bool,
    #[serde(default)]
    pub pitch_intervals: Option<Vec<i64>>,
}

fn unknown_number() -> i64 {
    -1
}

fn unknown_instrument() -> String {
    "Unknown".to_string()
}

/// Flat symbol sequence and the registry describing its tracks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    pub symbols: Vec<Symbol>,
    pub registry: IntervalRegistry,
}

impl Corpus {
    /// Load every `base/<artist>/<song>.json` file.
    ///
    /// Artists and songs are visited in name order so the same tree always
    /// yields the same flat sequence.
    pub fn load_dir(base: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let base = base.as_ref();
        if !base.is_dir() {
            return Err(CorpusError::MissingDir {
                path: base.to_path_buf(),
            });
        }

        let span = tracing::debug_span!("corpus_load", base = %base.display());
        let _enter = span.enter();

        let mut builder = CorpusBuilder::new();
        for artist_dir in sorted_entries(base).map_err(|e| CorpusError::io(base, e))? {
            if !artist_dir.is_dir() {
                continue;
            }
            let artist = file_name(&artist_dir);
            let songs = match sorted_entries(&artist_dir) {
                Ok(songs) => songs,
                Err(e) => {
                    tracing::warn!("{}", CorpusError::io(&artist_dir, e));
                    continue;
                }
            };
            for song_path in songs.into_iter().filter(|p| is_json(p)) {
                let song = song_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let text = match fs::read_to_string(&song_path) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("{}", CorpusError::io(&song_path, e));
                        continue;
                    }
                };
                if let Err(e) = builder.push_song_json(&artist, &song, &text) {
                    let err = CorpusError::Json {
                        path: song_path.clone(),
                        source: e,
                    };
                    tracing::warn!("{err}");
                }
            }
        }

        let corpus = builder.finish();
        tracing::debug!(
            tracks = corpus.registry.len(),
            symbols = corpus.symbols.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in `range` (clamped to the corpus) and the flat index of the
    /// first one, for windowed searches.
    pub fn window(&self, range: Range<usize>) -> (&[Symbol], usize) {
        let end = range.end.min(self.symbols.len());
        let start = range.start.min(end);
        (&self.symbols[start..end], start)
    }

    /// Symbols of the track occupying `interval`.
    pub fn track_symbols(&self, interval: &Interval) -> &[Symbol] {
        self.window(interval.start..interval.stop).0
    }
}

/// Incremental corpus builder.
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    symbols: Vec<Symbol>,
    registry: IntervalRegistry,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one track.
    ///
    /// Returns `Ok(false)` for a track with no (or empty) `pitch_intervals`.
    /// A delta outside `[-127, 127]` rejects the whole track and leaves the
    /// builder unchanged.
    pub fn push_track(
        &mut self,
        artist: &str,
        song: &str,
        track: &TrackRecord,
    ) -> Result<bool, CorpusError> {
        let deltas = match track.pitch_intervals.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => return Ok(false),
        };

        let encoded = deltas
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                Symbol::try_from(value)
                    .ok()
                    .filter(|&s| s != SENTINEL)
                    .ok_or_else(|| CorpusError::DeltaOutOfRange {
                        artist: artist.to_string(),
                        song: song.to_string(),
                        track_index: track.track_index,
                        position,
                        value,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let start = self.symbols.len();
        let interval = Interval::new(start, start + encoded.len());
        self.registry.insert(
            interval,
            IdentityRecord {
                artist: artist.to_string(),
                song: song.to_string(),
                track_index: track.track_index,
                instrument: track.instrument_name.clone(),
                program: track.program,
                is_drum: track.is_drum,
            },
        )?;
        self.symbols.extend(encoded);
        self.symbols.push(SENTINEL);
        Ok(true)
    }

    /// Append every track of one song file's JSON text.
    ///
    /// The text must be a JSON array. Individual entries that fail to decode
    /// or are rejected by [`Self::push_track`] are logged and skipped.
    /// Returns the number of tracks added.
    pub fn push_song_json(
        &mut self,
        artist: &str,
        song: &str,
        text: &str,
    ) -> Result<usize, serde_json::Error> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(text)?;
        let mut added = 0;
        for (n, entry) in entries.into_iter().enumerate() {
            let track: TrackRecord = match serde_json::from_value(entry) {
                Ok(track) => track,
                Err(e) => {
                    tracing::warn!(artist, song, entry = n, "skipping malformed track: {e}");
                    continue;
                }
            };
            match self.push_track(artist, song, &track) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(artist, song, entry = n, "skipping track: {e}"),
            }
        }
        Ok(added)
    }

    pub fn finish(self) -> Corpus {
        Corpus {
            symbols: self.symbols,
            registry: self.registry,
        }
    }
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_json(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: i64, deltas: Option<Vec<i64>>) -> TrackRecord {
        TrackRecord {
            track_index: index,
            instrument_name: "Bass".into(),
            program: 33,
            is_drum: false,
            pitch_intervals: deltas,
        }
    }

    #[test]
    fn tracks_are_sentinel_separated() {
        let mut b = CorpusBuilder::new();
        assert!(b.push_track("A", "s1", &track(0, Some(vec![1, 2, 3]))).unwrap());
        assert!(b.push_track("A", "s1", &track(1, Some(vec![-5, 4]))).unwrap());
        let c = b.finish();
        assert_eq!(c.symbols, vec![1, 2, 3, SENTINEL, -5, 4, SENTINEL]);
        let spans: Vec<Interval> = c.registry.iter().map(|(i, _)| *i).collect();
        assert_eq!(spans, vec![Interval::new(0, 3), Interval::new(4, 6)]);
        assert_eq!(c.track_symbols(&spans[1]), &[-5, 4]);
        assert_eq!(c.registry.resolve(4).unwrap().track_index, 1);
        assert!(c.registry.resolve(3).is_none());
    }

    #[test]
    fn tracks_without_intervals_are_skipped() {
        let mut b = CorpusBuilder::new();
        assert!(!b.push_track("A", "s", &track(0, None)).unwrap());
        assert!(!b.push_track("A", "s", &track(1, Some(vec![]))).unwrap());
        let c = b.finish();
        assert!(c.is_empty());
        assert!(c.registry.is_empty());
    }

    #[test]
    fn out_of_range_delta_rejects_whole_track() {
        let mut b = CorpusBuilder::new();
        b.push_track("A", "s", &track(0, Some(vec![1]))).unwrap();
        for bad in [128, -128, 400] {
            let err = b.push_track("A", "s", &track(1, Some(vec![2, bad]))).unwrap_err();
            assert!(matches!(err, CorpusError::DeltaOutOfRange { position: 1, .. }));
        }
        let c = b.finish();
        assert_eq!(c.symbols, vec![1, SENTINEL]);
        assert_eq!(c.registry.len(), 1);
    }

    #[test]
    fn song_json_defaults_and_per_track_skips() {
        let text = r#"[
            {"pitch_intervals": [3, -3]},
            {"track_index": 2, "pitch_intervals": "oops"},
            {"track_index": 3, "instrument_name": "Lead", "program": 81, "is_drum": true,
             "pitch_intervals": [7]},
            {"track_index": 4}
        ]"#;
        let mut b = CorpusBuilder::new();
        assert_eq!(b.push_song_json("Band", "Tune", text).unwrap(), 2);
        let c = b.finish();
        let first = c.registry.resolve(0).unwrap();
        assert_eq!(first.track_index, -1);
        assert_eq!(first.instrument, "Unknown");
        assert_eq!(first.program, -1);
        let second = c.registry.resolve(3).unwrap();
        assert_eq!((second.track_index, second.program, second.is_drum), (3, 81, true));
        assert_eq!(second.instrument, "Lead");
    }

    #[test]
    fn song_json_must_be_an_array() {
        let mut b = CorpusBuilder::new();
        assert!(b.push_song_json("A", "s", "{\"pitch_intervals\": [1]}").is_err());
        assert!(b.push_song_json("A", "s", "not json").is_err());
    }

    #[test]
    fn window_clamps_to_bounds() {
        let c = Corpus {
            symbols: vec![1, 2, 3, SENTINEL],
            registry: IntervalRegistry::new(),
        };
        assert_eq!(c.window(1..3), (&[2, 3][..], 1));
        assert_eq!(c.window(2..99), (&[3, SENTINEL][..], 2));
        assert_eq!(c.window(10..20), (&[][..], 4));
    }
}
