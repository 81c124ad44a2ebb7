use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use superperm::cycle_graph::Analysis;

/// Show the 2-cycles a superpermutation passes through and how they connect.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of symbols
    n: usize,
    /// Output the results in graphviz format
    #[clap(long, short = 'g', default_value_t = false, conflicts_with = "oneline")]
    graph: bool,
    /// Output the results in one-line format
    #[clap(long, default_value_t = false)]
    oneline: bool,
    /// File holding the superpermutation; stdin when omitted
    file: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let n = superperm::check_size(cli.n)?;
    let (header, text) = match &cli.file {
        Some(path) => (
            format!("\n=>{}", path),
            std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path))?,
        ),
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            (String::new(), s)
        }
    };
    let analysis = Analysis::of(n, text.trim());
    eprintln!(
        "[two_cycles] two_cycles={} three_cycles={}",
        analysis.two_cycles.len(),
        analysis.three_cycles.len()
    );

    if cli.oneline {
        println!("{}", analysis.oneline());
    } else if cli.graph {
        print!("{}", analysis.graphviz());
    } else {
        println!("{}", header);
        print!("{}", analysis.adjacency());
    }
    Ok(())
}
