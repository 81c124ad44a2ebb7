use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

/// Squash a list of permutations (one per line) into a single string.
/// Lines starting with '.' are skipped, so `xc --trace` output can be fed back in.
#[derive(Parser, Debug)]
struct Cli {
    /// Input file; stdin when omitted
    file: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = match &cli.file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path))?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let lines = text
        .lines()
        .filter(|line| !line.starts_with('.'))
        .map(str::trim);
    println!("{}", superperm::squash::squash(lines));
    Ok(())
}
