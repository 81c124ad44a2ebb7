use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;
use superperm::decode;
use superperm::matrix::single_3cycle;
use superperm::xc::{Covering, DancingLinks, ExactCover};

/// Find superpermutations whose 2-cycle graph is a single 3-cycle with a tree attached.
#[derive(Parser, Debug)]
struct Args {
    /// Number of symbols
    n: usize,
    /// Stop after this many coverings
    #[clap(long, short = 'l')]
    limit: Option<usize>,
    /// Decoding threads; above 1 the output order follows completion
    #[clap(long, short = 'j', default_value_t = 1)]
    threads: usize,
    /// Print the decoding walk before each superpermutation
    #[clap(long, default_value_t = false)]
    trace: bool,
    /// One JSON object per line instead of bare strings
    #[clap(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Found<'a> {
    n: usize,
    covering: usize,
    rows: Vec<String>,
    length: usize,
    superperm: &'a str,
}

struct Output {
    n: usize,
    trace: bool,
    json: bool,
}

impl Output {
    /// `None` when the covering does not decode.
    fn decode(&self, index: usize, covering: &Covering) -> Result<Option<String>> {
        let Ok(steps) = decode::walk(self.n, covering.iter().copied()) else {
            return Ok(None);
        };
        let superperm =
            superperm::squash::squash(steps.iter().map(|step| step.permutation.as_str()));
        let mut out = String::new();
        if self.trace {
            for row in covering {
                out.push_str(&format!("{} {}\n", row, itertools::join(row.one_cycles_set(), " ")));
            }
            out.push_str(&decode::trace(&steps));
        }
        if self.json {
            let found = Found {
                n: self.n,
                covering: index,
                rows: covering.iter().map(|row| row.to_string()).collect(),
                length: superperm.len(),
                superperm: &superperm,
            };
            out.push_str(
                &serde_json::to_string(&found)
                    .with_context(|| format!("serializing covering {}", index))?,
            );
        } else {
            out.push_str(&superperm);
        }
        Ok(Some(out))
    }
}

/// Writes one result line. A failed write raises `stop` so the search ends.
fn write_line(out: &mut impl Write, text: &str, stop: &AtomicBool) -> Result<()> {
    writeln!(out, "{}", text)
        .and_then(|()| out.flush())
        .map_err(|e| {
            stop.store(true, Ordering::SeqCst);
            e
        })
        .context("writing to stdout")
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn main() -> Result<()> {
    let Args {
        n,
        limit,
        mut threads,
        trace,
        json,
    } = Args::parse();
    let n = superperm::check_size(n)?;
    if threads == 0 {
        threads = 1;
    }

    let stime = Instant::now();
    let instance = single_3cycle(n);
    eprintln!(
        "[xc] n={} rows={} primary={} secondary={}",
        n,
        instance.rows.len(),
        instance.primary_items().len(),
        instance.secondary.len()
    );

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            eprintln!("[xc] interrupted, finishing up");
            stop.store(true, Ordering::SeqCst);
        })?;
    }

    let mut coverings = DancingLinks
        .coverings(&instance)
        .take(limit.unwrap_or(usize::MAX))
        .take_while(|_| !stop.load(Ordering::SeqCst))
        .enumerate();
    let output = Output { n, trace, json };
    let seen = AtomicUsize::new(0);
    let bad = AtomicUsize::new(0);
    let emit = |(index, covering): (usize, Covering)| -> Result<()> {
        seen.fetch_add(1, Ordering::Relaxed);
        let Some(text) = output.decode(index, &covering)? else {
            bad.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        };
        write_line(&mut io::stdout().lock(), &text, &stop)
    };

    let result = if threads == 1 {
        coverings.try_for_each(emit)
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| coverings.par_bridge().try_for_each(emit))
    };

    let seen = seen.into_inner();
    let bad = bad.into_inner();
    eprintln!(
        "[xc] coverings={} decoded={} bad={} time={:.3}s",
        seen,
        seen - bad,
        bad,
        stime.elapsed().as_secs_f64()
    );
    match result {
        Err(e) if is_broken_pipe(&e) => Ok(()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_output_stops_the_search() {
        let stop = AtomicBool::new(false);
        let err = write_line(&mut ClosedPipe, "123121321", &stop).unwrap_err();
        assert!(stop.load(Ordering::SeqCst));
        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn lines_are_written() {
        let stop = AtomicBool::new(false);
        let mut buf = Vec::new();
        write_line(&mut buf, "123121321", &stop).unwrap();
        assert_eq!(buf, b"123121321\n");
        assert!(!stop.load(Ordering::SeqCst));
    }

    #[test]
    fn json_output_n3() {
        let output = Output {
            n: 3,
            trace: false,
            json: true,
        };
        let text = output.decode(0, &Vec::new()).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["superperm"], "123121321");
        assert_eq!(value["length"], 9);
        assert_eq!(value["rows"], serde_json::json!([]));
    }
}
