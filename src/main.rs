use std::env;
use std::fs;
use std::process;
use std::sync::Arc;

use pantam::{
    map_transcription, PlaybackScheduler, LogRenderer, RunCallbacks, Transcription,
    TuningCatalog, DEFAULT_TUNING,
};

fn usage() -> ! {
    eprintln!("Usage: pantam list");
    eprintln!("       pantam map <transcription.json> [tuning-id]");
    eprintln!("       pantam play <transcription.json> [tuning-id]");
    process::exit(1);
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let catalog = TuningCatalog::builtin();

    match args[1].as_str() {
        "list" => {
            for (id, name) in catalog.list() {
                if id == DEFAULT_TUNING {
                    println!("{:<12} {} (default)", id, name);
                } else {
                    println!("{:<12} {}", id, name);
                }
            }
        }
        "map" => {
            let mapped = load_and_map(&args, &catalog);
            match serde_json::to_string_pretty(&mapped) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing mapped notes: {}", e);
                    process::exit(1);
                }
            }
        }
        "play" => {
            let mapped = load_and_map(&args, &catalog);
            if mapped.is_empty() {
                eprintln!("Nothing to play: the transcription has no notes");
                process::exit(1);
            }

            let scheduler = PlaybackScheduler::new();
            let callbacks = RunCallbacks::new(
                |note| println!("\u{25b6} {:<4} {:8.2} Hz  t={:.2}s", note.note, note.frequency, note.time),
                |note| println!("  \u{2715} {}", note.note),
            )
            .with_completion(|| println!("Playback complete"));

            match scheduler.start_run(mapped, Arc::new(LogRenderer), callbacks) {
                Ok(handle) => handle.wait(),
                Err(e) => {
                    eprintln!("Error starting playback: {}", e);
                    process::exit(1);
                }
            }
        }
        _ => usage(),
    }
}

/// Read a transcription file and map it onto the requested tuning.
fn load_and_map(args: &[String], catalog: &TuningCatalog) -> Vec<pantam::MappedNote> {
    let input_path = match args.get(2) {
        Some(path) => path,
        None => usage(),
    };
    let tuning_id = args.get(3).map(String::as_str).unwrap_or(DEFAULT_TUNING);

    let body = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let transcription = match Transcription::from_json(&body) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error parsing transcription: {}", e);
            process::exit(1);
        }
    };

    match map_transcription(&transcription, catalog, tuning_id) {
        Ok(mapped) => mapped,
        Err(e) => {
            eprintln!("Error mapping notes: {}", e);
            process::exit(1);
        }
    }
}
