//! # Decoding a covering
//!
//! A covering is turned into an ordering of all `n!` permutations by a greedy
//! walk starting at the identity. From permutation `p` the walk tries, in order:
//!
//! 1. a forced jump to `p2` if `p` is the entrance of a chosen gadget,
//! 2. `p1`, the next permutation of the current one-cycle,
//! 3. `p2`, skipping one position,
//! 4. `p3`, skipping two positions,
//!
//! where `pk` keeps `p[k..]` and appends `p[..k]` reversed. If none of these is
//! available before every permutation has been visited, or a forced jump lands
//! on a visited permutation, the covering does not describe a realizable
//! ordering and decoding fails with [`BadSolution`].

use crate::cycles::PartialTwoCycle;
use crate::squash::squash;
use crate::{alphabet, factorial};
use rustc_hash::FxHashSet;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad solution: stuck at {at} after visiting {visited} permutations")]
pub struct BadSolution {
    pub at: String,
    pub visited: usize,
}

/// How the walk reached a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Start,
    /// Forced by an entrance; overlap `n - 2`.
    Jump,
    /// Overlap `n - 1`.
    Next,
    /// Overlap `n - 2`, one permutation skipped.
    SkipOne,
    /// Overlap `n - 3`, two permutations skipped.
    SkipTwo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub permutation: String,
    pub by: Move,
}

/// `p[k..]` followed by the first `k` symbols in reverse order.
pub fn successor(p: &str, k: usize) -> String {
    let mut s = String::with_capacity(p.len());
    s.push_str(&p[k..]);
    s.extend(p[..k].chars().rev());
    s
}

pub fn walk<'a, I>(n: usize, solution: I) -> Result<Vec<Step>, BadSolution>
where
    I: IntoIterator<Item = &'a PartialTwoCycle>,
{
    let entrances: FxHashSet<String> = solution.into_iter().map(|row| row.entrance()).collect();
    let total = factorial(n);

    let mut p = alphabet(n).to_owned();
    let mut visited = FxHashSet::default();
    visited.insert(p.clone());
    let mut steps = vec![Step {
        permutation: p.clone(),
        by: Move::Start,
    }];

    while visited.len() < total {
        let stuck = || BadSolution {
            at: p.clone(),
            visited: visited.len(),
        };
        let (next, by) = if entrances.contains(&p) {
            // a forced jump back into visited ground would repeat a permutation
            let q = successor(&p, 2);
            if visited.contains(&q) {
                return Err(stuck());
            }
            (q, Move::Jump)
        } else {
            [(1, Move::Next), (2, Move::SkipOne), (3, Move::SkipTwo)]
                .into_iter()
                .filter(|&(k, _)| k <= n)
                .map(|(k, by)| (successor(&p, k), by))
                .find(|(q, _)| !visited.contains(q))
                .ok_or_else(stuck)?
        };
        visited.insert(next.clone());
        steps.push(Step {
            permutation: next.clone(),
            by,
        });
        p = next;
    }
    Ok(steps)
}

/// The permutations in walk order; `n!` of them, all distinct.
pub fn permutations_in_solution<'a, I>(n: usize, solution: I) -> Result<Vec<String>, BadSolution>
where
    I: IntoIterator<Item = &'a PartialTwoCycle>,
{
    Ok(walk(n, solution)?
        .into_iter()
        .map(|step| step.permutation)
        .collect())
}

pub fn solution_as_superpermutation<'a, I>(n: usize, solution: I) -> Result<String, BadSolution>
where
    I: IntoIterator<Item = &'a PartialTwoCycle>,
{
    Ok(squash(permutations_in_solution(n, solution)?))
}

/// One permutation per line, `-->` before a forced jump and `...` for each
/// skipped permutation. Squashing the non-`.` lines gives the superpermutation.
pub fn trace(steps: &[Step]) -> String {
    let mut out = String::new();
    for step in steps {
        let marker = match step.by {
            Move::Start | Move::Next => "",
            Move::Jump => "-->\n",
            Move::SkipOne => "...\n",
            Move::SkipTwo => "...\n...\n",
        };
        let _ = writeln!(out, "{}{}", marker, step.permutation);
    }
    out
}
