//! Normalize ingredient lines from stdin, one per line, printing the
//! shopping item for each line that produces one.
//!
//! With `--json`, prints the full response including omitted lines.

use std::io::{self, BufRead, Write};

use snaprecipe::tools::ingredients::normalize_lines;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = std::env::args().skip(1).any(|a| a == "--json");

    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<String>, _>>()?;

    let response = normalize_lines(&lines);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    } else {
        for item in &response.items {
            writeln!(out, "{}", item)?;
        }
    }

    if !response.omitted.is_empty() {
        eprintln!("Omitted {} line(s)", response.omitted.len());
    }

    Ok(())
}
