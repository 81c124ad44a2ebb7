//! # Cyclic classes of permutations
//!
//! Permutations are strings over [`crate::SYMBOLS`], one byte per symbol.
//!
//! * A [`OneCycle`] is a permutation up to rotation.
//! * A [`TwoCycle`] fixes a head symbol and a body; its one-cycles are the
//!   head inserted at each position of the body.
//! * A [`ThreeCycle`] does the same one level up, producing two-cycles.
//! * A [`PartialTwoCycle`] is a two-cycle with one of its one-cycles left out.
//!   These are the rows of the exact-cover instance.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Rotates `w` so that it starts with `x`. Returns `w` unchanged if `x` does not occur.
pub fn rotate(w: &str, x: char) -> String {
    let i = w.find(x).unwrap_or(0);
    format!("{}{}", &w[i..], &w[..i])
}

/// Canonical representative of the rotation class of `w`: the rotation starting at its minimum symbol.
pub fn cyclerep(w: &str) -> String {
    match w.chars().min() {
        Some(m) => rotate(w, m),
        None => String::new(),
    }
}

/// `w` with `x` inserted before byte position `i`.
fn insert(w: &str, i: usize, x: char) -> String {
    let mut s = String::with_capacity(w.len() + 1);
    s.push_str(&w[..i]);
    s.push(x);
    s.push_str(&w[i..]);
    s
}

fn last_symbol(w: &str) -> char {
    w.as_bytes()[w.len() - 1] as char
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OneCycle(String);

impl OneCycle {
    pub fn new(start: &str) -> Self {
        Self(cyclerep(start))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `permutation` is a rotation of this cycle.
    pub fn contains(&self, permutation: &str) -> bool {
        self.0 == cyclerep(permutation)
    }
}

impl fmt::Display for OneCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity is the `(head, body)` pair as given, not the set of one-cycles it produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TwoCycle {
    head: char,
    body: String,
}

impl TwoCycle {
    /// `start` must hold at least two symbols; its last symbol becomes the head.
    pub fn new(start: &str) -> Self {
        assert!(start.len() >= 2, "two-cycle needs at least 2 symbols: {start:?}");
        Self {
            head: last_symbol(start),
            body: start[..start.len() - 1].to_owned(),
        }
    }

    pub fn head(&self) -> char {
        self.head
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The head inserted before each body position, one cycle per position.
    pub fn one_cycles(&self) -> impl Iterator<Item = OneCycle> + '_ {
        (0..self.body.len()).map(|i| OneCycle::new(&insert(&self.body, i, self.head)))
    }

    /// Same as [`TwoCycle::one_cycles`], consuming the two-cycle.
    pub fn into_one_cycles(self) -> impl Iterator<Item = OneCycle> {
        let Self { head, body } = self;
        (0..body.len()).map(move |i| OneCycle::new(&insert(&body, i, head)))
    }
}

impl fmt::Display for TwoCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.head, self.body)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThreeCycle {
    head1: char,
    head2: char,
    body: String,
}

impl ThreeCycle {
    /// `start` must hold at least three symbols; the last two become the heads.
    pub fn new(start: &str) -> Self {
        assert!(start.len() >= 3, "three-cycle needs at least 3 symbols: {start:?}");
        let k = start.len();
        Self {
            head1: last_symbol(start),
            head2: last_symbol(&start[..k - 1]),
            body: start[..k - 2].to_owned(),
        }
    }

    pub fn two_cycles(&self) -> impl Iterator<Item = TwoCycle> + '_ {
        (0..self.body.len()).map(|i| {
            let mut start = insert(&self.body, i, self.head2);
            start.push(self.head1);
            TwoCycle::new(&start)
        })
    }

    pub fn one_cycles(&self) -> impl Iterator<Item = OneCycle> + '_ {
        self.two_cycles().flat_map(TwoCycle::into_one_cycles)
    }
}

impl fmt::Display for ThreeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.head1, self.head2, self.body)
    }
}

/// A two-cycle with the one-cycle at position `index` left out.
///
/// Equality and hashing look only at the remaining one-cycles, so two gadgets
/// built from different bodies that cover the same cycles compare equal.
#[derive(Clone, Debug)]
pub struct PartialTwoCycle {
    two_cycle: TwoCycle,
    index: usize,
    one_cycles: BTreeSet<OneCycle>,
    omitted: OneCycle,
}

impl PartialTwoCycle {
    /// `index` must be below the number of one-cycles of `two_cycle`.
    pub fn new(two_cycle: TwoCycle, index: usize) -> Self {
        let mut all: Vec<OneCycle> = two_cycle.one_cycles().collect();
        assert!(index < all.len(), "omitted index {index} out of range for {two_cycle}");
        let omitted = all.remove(index);
        Self {
            two_cycle,
            index,
            one_cycles: all.into_iter().collect(),
            omitted,
        }
    }

    pub fn two_cycle(&self) -> &TwoCycle {
        &self.two_cycle
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn one_cycles_set(&self) -> &BTreeSet<OneCycle> {
        &self.one_cycles
    }

    pub fn omitted(&self) -> &OneCycle {
        &self.omitted
    }

    /// The omitted cycle rotated to start at the head: reaching this
    /// permutation during decoding forces a jump.
    pub fn entrance(&self) -> String {
        rotate(self.omitted.as_str(), self.two_cycle.head)
    }

    /// Entry and exit shapes of the jump, each claimable by at most one row.
    pub fn secondary_constraints(&self) -> [String; 2] {
        let e = self.entrance();
        [format!("*{}", &e[2..]), format!("*{}", &e[1..e.len() - 1])]
    }

    pub fn contains(&self, one_cycle: &OneCycle) -> bool {
        self.one_cycles.contains(one_cycle)
    }

    pub fn intersects<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a OneCycle>,
    {
        others.into_iter().any(|c| self.contains(c))
    }
}

impl PartialEq for PartialTwoCycle {
    fn eq(&self, other: &Self) -> bool {
        self.one_cycles == other.one_cycles
    }
}

impl Eq for PartialTwoCycle {}

impl Hash for PartialTwoCycle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.one_cycles.hash(state);
    }
}

impl fmt::Display for PartialTwoCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.two_cycle, self.index)
    }
}
