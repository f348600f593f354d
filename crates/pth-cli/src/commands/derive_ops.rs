use std::fs;
use std::io::{self, BufWriter, Write};

use pth_core::explain::{explain, format_text};
use pth_core::Position;

use super::{die, EngineArgs};

fn parse_position(desc: &str) -> Position {
    die!(Position::from_description(desc), "Invalid position {desc}: {}")
}

pub fn derive(descriptions: &[String], args: &EngineArgs) {
    let (rules, opts) = die!(args.load(), "Error: {}");
    for desc in descriptions {
        let pos = parse_position(desc);
        let surface = die!(rules.derive(&pos, &opts), "Error deriving {desc}: {}");
        if descriptions.len() == 1 {
            println!("{surface}");
        } else {
            println!("{pos}\t{surface}");
        }
    }
}

pub fn explain_position(desc: &str, json: bool, args: &EngineArgs) {
    let (rules, opts) = die!(args.load(), "Error: {}");
    let pos = parse_position(desc);
    let result = die!(explain(rules, &pos, &opts), "Error explaining {desc}: {}");
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&result), "JSON error: {}")
        );
    } else {
        print!("{}", format_text(&result));
    }
}

/// Derive every legal position and write one JSON object per line.
pub fn sweep(output: Option<&str>, args: &EngineArgs) {
    let (rules, opts) = die!(args.load(), "Error: {}");
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(die!(fs::File::create(path), "Error creating {path}: {}")),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);

    let mut count = 0usize;
    for pos in Position::all() {
        let derivation = die!(rules.derive_full(&pos, &opts), "Error deriving {pos}: {}");
        let line = die!(serde_json::to_string(&derivation), "JSON error: {}");
        die!(writeln!(writer, "{line}"), "Write error: {}");
        count += 1;
    }
    die!(writer.flush(), "Write error: {}");

    if let Some(path) = output {
        eprintln!("Wrote {count} derivations to {path}");
    }
}
