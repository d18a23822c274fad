//! Example: find a motif in a track corpus and report where it came from.
//!
//! Run with:
//! `cargo run --example search`
//! `cargo run --example search -- <corpus-dir> 2,2,-4,5`
//!
//! Without arguments a small in-memory corpus is used.

use std::env;
use std::process;

use motif_align::{
    AlignerBuilder, Corpus, CorpusBuilder, MatchScorer, Symbol, TrackRecord,
};

fn main() {
    let mut args = env::args().skip(1);
    let corpus = match args.next() {
        Some(dir) => Corpus::load_dir(&dir).unwrap_or_else(|err| {
            eprintln!("search: {err}");
            process::exit(1);
        }),
        None => demo_corpus(),
    };
    let query: Vec<Symbol> = match args.next() {
        Some(list) => parse_query(&list).unwrap_or_else(|err| {
            eprintln!("search: {err}");
            process::exit(2);
        }),
        None => vec![5, -1, -2, 2],
    };

    println!(
        "corpus: {} tracks, {} symbols; query: {:?}",
        corpus.registry.len(),
        corpus.len(),
        query
    );

    let aligner = AlignerBuilder::new(MatchScorer::default())
        .gap_penalty(2)
        .build()
        .unwrap_or_else(|err| {
            eprintln!("search: {err}");
            process::exit(2);
        });

    let hit = aligner.search(&query, &corpus.symbols, 0, &corpus.registry);
    println!("local score: {}", hit.alignment.score);
    match &hit.identity {
        Some(id) => println!(
            "match: {} / {} track {} ({}, program {}{})",
            id.artist,
            id.song,
            id.track_index,
            id.instrument,
            id.program,
            if id.is_drum { ", drums" } else { "" }
        ),
        None => println!("match: unresolved"),
    }

    if let Some(origin) = hit.alignment.origin().filter(|_| hit.alignment.score > 0) {
        let (q_row, t_row) = hit.alignment.render(&query, &corpus.symbols);
        println!("  query : {q_row}");
        println!("  corpus: {t_row}   (from index {})", origin.y);
    }

    let linear = aligner.local_linear(&query, &corpus.symbols);
    let wavefront = aligner.local_wavefront(&query, &corpus.symbols).score;
    println!("linear-space score: {linear}, wavefront score: {wavefront}");
}

fn parse_query(list: &str) -> Result<Vec<Symbol>, String> {
    list.split(',')
        .map(|s| {
            s.trim()
                .parse::<Symbol>()
                .map_err(|e| format!("bad interval '{s}': {e}"))
        })
        .collect()
}

fn demo_corpus() -> Corpus {
    let tracks = [
        ("Ada", "Opening", 0, "Piano", 0, vec![2, 2, 1, -5, 7, 0, -2]),
        ("Ada", "Opening", 1, "Bass", 33, vec![0, -12, 12, 0, -5]),
        ("Bo", "Reprise", 0, "Lead", 81, vec![3, 5, -1, -2, 2, 4, -4]),
    ];
    let mut builder = CorpusBuilder::new();
    for (artist, song, track_index, instrument, program, deltas) in tracks {
        let record = TrackRecord {
            track_index,
            instrument_name: instrument.to_string(),
            program,
            is_drum: false,
            pitch_intervals: Some(deltas),
        };
        if let Err(err) = builder.push_track(artist, song, &record) {
            eprintln!("search: {err}");
        }
    }
    builder.finish()
}
