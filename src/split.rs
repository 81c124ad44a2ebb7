//! # Finding permutations in a string
//!
//! A sliding window of width `n` with per-symbol counts. A window is a
//! permutation exactly when it has no repeated symbol and no symbol from
//! outside the first `n` of the alphabet.

use crate::{SYMBOLS, factorial};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

static SYMBOL_INDEX: Lazy<FxHashMap<u8, usize>> =
    Lazy::new(|| SYMBOLS.bytes().enumerate().map(|(i, b)| (b, i)).collect());

/// Counts symbols of the current window. Bucket `n` collects everything not
/// among the first `n` symbols.
struct Window {
    n: usize,
    counts: Vec<usize>,
    defects: usize,
}

impl Window {
    fn new(n: usize) -> Self {
        Self {
            n,
            counts: vec![0; n + 1],
            defects: 0,
        }
    }

    fn bucket(&self, b: u8) -> usize {
        match SYMBOL_INDEX.get(&b) {
            Some(&i) if i < self.n => i,
            _ => self.n,
        }
    }

    fn defect(&self, bucket: usize) -> usize {
        let c = self.counts[bucket];
        if bucket == self.n { c } else { c.saturating_sub(1) }
    }

    fn add(&mut self, b: u8, delta: isize) {
        let k = self.bucket(b);
        self.defects -= self.defect(k);
        self.counts[k] = self.counts[k].wrapping_add_signed(delta);
        self.defects += self.defect(k);
    }

    fn is_permutation(&self) -> bool {
        self.defects == 0
    }
}

/// Every width-`n` window of `s`: `Some` when it is a permutation, `None` otherwise.
pub fn windows(n: usize, s: &str) -> impl Iterator<Item = Option<&str>> {
    let bytes = s.as_bytes();
    let mut window = Window::new(n);
    let len = if n == 0 || s.len() < n { 0 } else { s.len() - n + 1 };
    (0..len).map(move |i| {
        if i == 0 {
            for &b in &bytes[..n] {
                window.add(b, 1);
            }
        } else {
            window.add(bytes[i - 1], -1);
            window.add(bytes[i + n - 1], 1);
        }
        window.is_permutation().then(|| &s[i..i + n])
    })
}

/// Number of distinct permutations of the first `n` symbols occurring in `s`.
pub fn count_permutations(n: usize, s: &str) -> usize {
    windows(n, s).flatten().collect::<FxHashSet<_>>().len()
}

pub fn is_superpermutation(n: usize, s: &str) -> bool {
    count_permutations(n, s) == factorial(n)
}

/// Lengths of runs of consecutive permutation windows. Every non-permutation
/// window emits the current run (possibly 0); a trailing nonzero run is emitted too.
pub fn spans(n: usize, s: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut k = 0;
    for w in windows(n, s) {
        if w.is_some() {
            k += 1;
        } else {
            out.push(k);
            k = 0;
        }
    }
    if k != 0 {
        out.push(k);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_n3() {
        let ws: Vec<Option<&str>> = windows(3, "123121321").collect();
        assert_eq!(
            ws,
            [
                Some("123"),
                Some("231"),
                Some("312"),
                None,
                Some("213"),
                Some("132"),
                Some("321")
            ]
        );
    }

    #[test]
    fn foreign_symbols_break_windows() {
        let ws: Vec<Option<&str>> = windows(3, "12x312").collect();
        assert_eq!(ws, [None, None, None, Some("312")]);
        // '4' is in the alphabet but not among the first three symbols
        let ws: Vec<Option<&str>> = windows(3, "1243").collect();
        assert_eq!(ws, [None, None]);
    }

    #[test]
    fn short_inputs() {
        assert_eq!(windows(5, "1234").count(), 0);
        assert_eq!(windows(0, "1234").count(), 0);
        assert_eq!(count_permutations(4, ""), 0);
    }

    #[test]
    fn counts_and_completeness() {
        assert_eq!(count_permutations(3, "123121321"), 6);
        assert!(is_superpermutation(3, "123121321"));
        assert!(!is_superpermutation(3, "12312132"));
        assert_eq!(count_permutations(3, "1231231"), 3);
        assert!(is_superpermutation(4, "123412314231243121342132413214321"));
    }

    #[test]
    fn span_map() {
        assert_eq!(spans(3, "123121321"), [3, 3]);
        assert_eq!(spans(3, "1123"), [0, 1]);
        assert_eq!(spans(3, "1231"), [2]);
        assert_eq!(
            spans(4, "123412314231243121342132413214321"),
            [4, 4, 4, 0, 4, 4, 4]
        );
    }
}
