//! # Squash
//!
//! Compaction of a sequence of strings into one string, eliding the longest
//! suffix/prefix overlap between the accumulated result and each next string.
//! The fold runs strictly left to right, so the order of the input matters.

/// The largest `k` such that the last `k` bytes of `x` equal the first `k` bytes of `y`.
pub fn overlap(x: &str, y: &str) -> usize {
    let (x, y) = (x.as_bytes(), y.as_bytes());
    let m = x.len().min(y.len());
    (0..=m)
        .rev()
        .find(|&k| x[x.len() - k..] == y[..k])
        .unwrap_or(0)
}

/// Left fold of `acc + next[overlap(acc, next)..]`, starting from the empty string.
pub fn squash<I, S>(xs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut acc = String::new();
    for x in xs {
        let x = x.as_ref();
        let k = overlap(&acc, x);
        acc.push_str(&x[k..]);
    }
    acc
}
