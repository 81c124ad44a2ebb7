//! # The single-3-cycle instance
//!
//! A superpermutation whose 2-cycle graph is one 3-cycle with every other
//! 2-cycle attached as a tree corresponds to an exact cover of the one-cycles
//! outside that 3-cycle by [`PartialTwoCycle`]s. Each gadget also claims two
//! secondary items describing the jump it forces, so no two chosen gadgets
//! can fight over the same transition.

use crate::cycles::{OneCycle, PartialTwoCycle, ThreeCycle, TwoCycle};
use crate::alphabet;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;

/// One two-cycle per head and arrangement of the other symbols, with the
/// first body position pinned to the smallest non-head symbol.
///
/// Pinning drops body rotations that would repeat the same one-cycles. The
/// order is deterministic; the result is not claimed to be duplicate-free
/// across different heads.
pub fn two_cycles(n: usize) -> impl Iterator<Item = TwoCycle> {
    let symbols = alphabet(n);
    symbols.chars().flat_map(move |head| {
        let body: Vec<char> = symbols.chars().filter(|&c| c != head).collect();
        body.split_first()
            .map(|(&anchor, rest)| {
                let k = rest.len();
                rest.to_vec().into_iter().permutations(k).map(move |p| {
                    let mut start: String = std::iter::once(anchor).chain(p).collect();
                    start.push(head);
                    TwoCycle::new(&start)
                })
            })
            .into_iter()
            .flatten()
    })
}

/// Every two-cycle with each of its one-cycles omitted in turn.
pub fn partial_two_cycles(n: usize) -> impl Iterator<Item = PartialTwoCycle> {
    two_cycles(n).flat_map(move |two_cycle| {
        (0..n - 1).map(move |i| PartialTwoCycle::new(two_cycle.clone(), i))
    })
}

/// The 3-cycle of the identity permutation. It is never a row; its
/// one-cycles are covered implicitly.
pub fn principal_three_cycle(n: usize) -> ThreeCycle {
    ThreeCycle::new(alphabet(n))
}

/// An exact-cover instance: rows cover their one-cycles exactly once and
/// their secondary items at most once.
#[derive(Clone, Debug)]
pub struct Instance {
    pub n: usize,
    pub rows: Vec<PartialTwoCycle>,
    pub secondary: BTreeSet<String>,
}

impl Instance {
    /// Primary items in order of first appearance across the rows.
    pub fn primary_items(&self) -> Vec<&OneCycle> {
        let mut seen = FxHashSet::default();
        self.rows
            .iter()
            .flat_map(|row| row.one_cycles_set())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Each row as column indices: primary items first, then secondary items
    /// numbered after the last primary one.
    pub fn columns(&self) -> (usize, usize, Vec<Vec<usize>>) {
        let primary = self.primary_items();
        let primary_index: FxHashMap<&OneCycle, usize> =
            primary.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let secondary_index: FxHashMap<&str, usize> = self
            .secondary
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), primary.len() + i))
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cols: Vec<usize> = row
                    .one_cycles_set()
                    .iter()
                    .map(|c| primary_index[c])
                    .collect();
                for s in row.secondary_constraints() {
                    cols.push(secondary_index[s.as_str()]);
                }
                cols
            })
            .collect();
        (primary.len(), self.secondary.len(), rows)
    }
}

/// Builds the instance whose coverings are superpermutations with a single
/// 3-cycle that has the rest of the 2-cycles attached in a tree.
///
/// For `n < 3` the result is degenerate; callers validate `n` first.
pub fn single_3cycle(n: usize) -> Instance {
    let principal: FxHashSet<OneCycle> = principal_three_cycle(n).one_cycles().collect();
    let mut rows = Vec::new();
    let mut secondary = BTreeSet::new();
    for partial_two_cycle in partial_two_cycles(n) {
        if !partial_two_cycle.intersects(&principal) {
            secondary.extend(partial_two_cycle.secondary_constraints());
            rows.push(partial_two_cycle);
        }
    }
    Instance { n, rows, secondary }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cycles_counts() {
        assert_eq!(two_cycles(3).count(), 3);
        assert_eq!(two_cycles(5).count(), 30);
        assert_eq!(two_cycles(6).count(), 144);
        assert_eq!(partial_two_cycles(5).count(), 120);
        assert_eq!(partial_two_cycles(6).count(), 720);
    }

    #[test]
    fn two_cycles_are_anchored() {
        let ts: Vec<String> = two_cycles(4).map(|t| t.to_string()).collect();
        assert_eq!(&ts[..3], ["1/234", "1/243", "2/134"]);
        for t in two_cycles(5) {
            let anchor = if t.head() == '1' { '2' } else { '1' };
            assert!(t.body().starts_with(anchor), "{t}");
        }
    }

    #[test]
    fn small_sizes_have_no_rows() {
        // the principal 3-cycle already holds every one-cycle
        for n in [3, 4] {
            let inst = single_3cycle(n);
            assert!(inst.rows.is_empty());
            assert!(inst.secondary.is_empty());
            assert!(inst.primary_items().is_empty());
        }
    }

    #[test]
    fn instance_n5() {
        let inst = single_3cycle(5);
        assert_eq!(inst.rows.len(), 30);
        assert_eq!(inst.secondary.len(), 33);
        // 4! one-cycles in total, 12 of them in the principal 3-cycle
        assert_eq!(inst.primary_items().len(), 12);
        let principal: FxHashSet<OneCycle> = principal_three_cycle(5).one_cycles().collect();
        for row in &inst.rows {
            assert!(!row.intersects(&principal), "{row}");
            for s in row.secondary_constraints() {
                assert!(inst.secondary.contains(&s));
            }
        }
    }

    #[test]
    fn instance_n6() {
        let inst = single_3cycle(6);
        assert_eq!(inst.rows.len(), 464);
        assert_eq!(inst.secondary.len(), 316);
        assert_eq!(inst.primary_items().len(), 120 - 20);
    }

    #[test]
    fn columns_index_primary_then_secondary() {
        let inst = single_3cycle(5);
        let (primary, secondary, rows) = inst.columns();
        assert_eq!((primary, secondary), (12, 33));
        assert_eq!(rows.len(), inst.rows.len());
        for cols in &rows {
            assert_eq!(cols.len(), 3 + 2);
            assert!(cols[..3].iter().all(|&c| c < primary));
            assert!(cols[3..].iter().all(|&c| (primary..primary + secondary).contains(&c)));
        }
    }
}
