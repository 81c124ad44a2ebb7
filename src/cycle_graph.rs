//! # 2-cycle structure of a superpermutation
//!
//! Walks the permutation windows of a string and records which one-cycles,
//! 2-cycles and 3-cycles it passes through. Unlike [`crate::cycles::TwoCycle`],
//! the keys here are canonical: the body is reduced to its cycle representative.

use crate::cycles::cyclerep;
use crate::split::windows;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TwoCycleKey {
    pub head: char,
    pub body: String,
}

impl TwoCycleKey {
    /// The 2-cycle determined by the permutation `p`.
    pub fn of(p: &str) -> Self {
        let k = p.len();
        Self {
            head: p.as_bytes()[k - 1] as char,
            body: cyclerep(&p[..k - 1]),
        }
    }

    /// Every 2-cycle one step away: remove body symbol `i`, make it the new
    /// head, and put the old head back at position `j`. Flagged when `i == j`.
    pub fn neighbours(&self) -> Vec<(TwoCycleKey, bool)> {
        let body = self.body.as_bytes();
        let mut out = Vec::new();
        for i in 0..body.len() {
            let rest: String = self
                .body
                .char_indices()
                .filter(|&(k, _)| k != i)
                .map(|(_, c)| c)
                .collect();
            for j in 0..body.len() - 1 {
                let inserted = format!("{}{}{}", &rest[..j], self.head, &rest[j..]);
                out.push((
                    TwoCycleKey {
                        head: body[i] as char,
                        body: cyclerep(&inserted),
                    },
                    i == j,
                ));
            }
        }
        out
    }
}

impl fmt::Display for TwoCycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.head, self.body)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreeCycleKey {
    pub head1: char,
    pub head2: char,
    pub body: String,
}

impl ThreeCycleKey {
    /// The 3-cycle determined by the permutation `p`.
    pub fn of(p: &str) -> Self {
        let k = p.len();
        let b = p.as_bytes();
        Self {
            head1: b[k - 1] as char,
            head2: b[k - 2] as char,
            body: cyclerep(&p[..k - 2]),
        }
    }
}

impl fmt::Display for ThreeCycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.head1, self.head2, self.body)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Analysis {
    /// Each 2-cycle with the permutations at which the string entered one of its one-cycles.
    pub two_cycles: BTreeMap<TwoCycleKey, Vec<String>>,
    /// Each 3-cycle with the 2-cycles entered through it, in order, repeats kept.
    pub three_cycles: BTreeMap<ThreeCycleKey, Vec<TwoCycleKey>>,
}

impl Analysis {
    /// `n` must be at least 3.
    pub fn of(n: usize, s: &str) -> Self {
        let mut analysis = Self::default();
        let mut gap = true;
        let mut current: Option<TwoCycleKey> = None;
        for w in windows(n, s) {
            let Some(p) = w else {
                gap = true;
                continue;
            };
            if gap {
                let two = TwoCycleKey::of(p);
                if current.as_ref() != Some(&two) {
                    analysis
                        .three_cycles
                        .entry(ThreeCycleKey::of(p))
                        .or_default()
                        .push(two.clone());
                }
                analysis
                    .two_cycles
                    .entry(two.clone())
                    .or_default()
                    .push(p.to_owned());
                current = Some(two);
            }
            gap = false;
        }
        analysis
    }

    /// Space-separated `h/body` list of the 2-cycles, sorted.
    pub fn oneline(&self) -> String {
        itertools::join(self.two_cycles.keys(), " ")
    }

    /// One line per 2-cycle: `h body   neighbour, neighbour*, ...`, listing
    /// only neighbours that also occur.
    pub fn adjacency(&self) -> String {
        let mut out = String::new();
        for key in self.two_cycles.keys() {
            let nbs: Vec<String> = key
                .neighbours()
                .into_iter()
                .filter(|(nb, _)| self.two_cycles.contains_key(nb))
                .map(|(nb, same)| format!("{} {}{}", nb.head, nb.body, if same { "*" } else { "" }))
                .collect();
            let _ = writeln!(out, "{} {}   {}", key.head, key.body, nbs.join(", "));
        }
        out
    }

    /// Undirected graphviz graph; edges with `i == j` are bold.
    pub fn graphviz(&self) -> String {
        let mut out = String::from("graph {\n");
        for key in self.two_cycles.keys() {
            let _ = writeln!(out, "  \"{key}\";");
            for (nb, same) in key.neighbours() {
                if !self.two_cycles.contains_key(&nb) || nb < *key {
                    continue;
                }
                let edge = format!("\"{key}\" -- \"{nb}\"");
                if same {
                    let _ = writeln!(out, "  {{ edge[style=bold]; {edge}; }}");
                } else {
                    let _ = writeln!(out, "  {edge};");
                }
            }
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SP5: &str = "123451324513425134521354213524135214352134512341523412534123541231452314253142351423154231245312435124315243125432153421532415321453215432514325413254312";

    #[test]
    fn keys_of_permutation() {
        assert_eq!(TwoCycleKey::of("23415").to_string(), "5/1234");
        assert_eq!(ThreeCycleKey::of("34125").to_string(), "5/2/134");
    }

    #[test]
    fn neighbours_count() {
        let key = TwoCycleKey::of("12345");
        let nbs = key.neighbours();
        assert_eq!(nbs.len(), 4 * 3);
        assert_eq!(nbs.iter().filter(|(_, same)| *same).count(), 3);
        assert!(nbs.iter().all(|(nb, _)| nb.head != '5'));
    }

    #[test]
    fn trivial_superpermutations() {
        let a = Analysis::of(3, "123121321");
        assert_eq!(a.oneline(), "3/12");
        assert_eq!(a.three_cycles.len(), 1);

        let a = Analysis::of(4, "123412314231243121342132413214321");
        assert_eq!(a.oneline(), "4/123 4/132");
        let three: Vec<String> = a.three_cycles.keys().map(|k| k.to_string()).collect();
        assert_eq!(three, ["4/3/12"]);
    }

    #[test]
    fn single_3cycle_tree_n5() {
        let a = Analysis::of(5, SP5);
        assert_eq!(
            a.oneline(),
            "1/2543 2/1345 4/1352 4/1532 5/1234 5/1243 5/1423"
        );
        let principal = ThreeCycleKey::of("12345");
        assert_eq!(a.three_cycles[&principal].len(), 3);
        assert_eq!(
            a.adjacency(),
            "1 2543   5 1243, 4 1532\n\
             2 1345   4 1352, 5 1234\n\
             4 1352   2 1345\n\
             4 1532   1 2543\n\
             5 1234   2 1345\n\
             5 1243   1 2543\n\
             5 1423   \n"
        );
    }

    #[test]
    fn graphviz_lists_each_edge_once() {
        let a = Analysis::of(5, SP5);
        let g = a.graphviz();
        assert!(g.starts_with("graph {\n"));
        assert!(g.ends_with("}\n"));
        assert_eq!(g.matches(" -- ").count(), 4);
    }
}
