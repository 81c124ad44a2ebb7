use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use std::io::Read;
use superperm::split;

/// Find the permutations in a string.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of symbols
    n: usize,
    /// Print the number of distinct permutations instead, with '*' if all are present
    #[clap(long, short = 'c', default_value_t = false)]
    count: bool,
    /// Print the lengths of runs of consecutive permutations
    #[clap(long, short = 's', default_value_t = false, conflicts_with = "count")]
    spans: bool,
    /// The string to scan; stdin when omitted
    superperm: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let n = superperm::check_size(cli.n)?;
    let s = match cli.superperm {
        Some(s) => s,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let s = s.trim();

    if cli.count {
        let count = split::count_permutations(n, s);
        let mark = if count == superperm::factorial(n) { "*" } else { "" };
        println!("{}{}", count, mark);
    } else if cli.spans {
        println!("{}", split::spans(n, s).iter().join(" "));
    } else {
        for w in split::windows(n, s) {
            println!("{}", w.unwrap_or("..."));
        }
    }
    Ok(())
}
