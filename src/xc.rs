//! # Exact cover
//!
//! The decoder only needs "give me coverings of this instance", expressed by
//! [`ExactCover`]. [`DancingLinks`] is the in-crate implementation: Knuth's
//! Algorithm X on a dancing-links matrix with primary columns (covered exactly
//! once) and secondary columns (covered at most once).
//!
//! Secondary column headers are not linked into the header ring, so the
//! search never has to choose them, but covering a row still removes every
//! other row sharing one of its secondary columns.
//!
//! The search keeps its own stack and yields solutions one at a time, so a
//! caller may stop after any number of them.

use crate::cycles::PartialTwoCycle;
use crate::matrix::Instance;

/// A set of rows that covers every primary item exactly once.
pub type Covering<'a> = Vec<&'a PartialTwoCycle>;

pub trait ExactCover {
    fn coverings<'a>(
        &self,
        instance: &'a Instance,
    ) -> Box<dyn Iterator<Item = Covering<'a>> + Send + 'a>;
}

/// Algorithm X with dancing links, minimum-remaining-values column choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct DancingLinks;

impl ExactCover for DancingLinks {
    fn coverings<'a>(
        &self,
        instance: &'a Instance,
    ) -> Box<dyn Iterator<Item = Covering<'a>> + Send + 'a> {
        let (primary, secondary, rows) = instance.columns();
        let matrix = Matrix::new(primary, secondary, &rows);
        Box::new(
            matrix
                .solutions()
                .map(move |rows| rows.into_iter().map(|r| &instance.rows[r]).collect()),
        )
    }
}

const HEADER: usize = usize::MAX;

#[derive(Clone, Debug)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    column: usize,
    row: usize,
}

/// Dancing-links matrix. Node 0 is the root, nodes `1..=primary + secondary`
/// are column headers, the rest are the 1-entries of the rows.
#[derive(Clone, Debug)]
pub struct Matrix {
    nodes: Vec<Node>,
    size: Vec<usize>,
}

impl Matrix {
    /// `rows[r]` lists the columns of row `r`: `0..primary` are primary,
    /// `primary..primary + secondary` are secondary.
    pub fn new(primary: usize, secondary: usize, rows: &[Vec<usize>]) -> Self {
        let columns = primary + secondary;
        let mut nodes = Vec::with_capacity(1 + columns + rows.iter().map(Vec::len).sum::<usize>());
        nodes.push(Node {
            left: primary,
            right: if primary == 0 { 0 } else { 1 },
            up: 0,
            down: 0,
            column: 0,
            row: HEADER,
        });
        for c in 1..=columns {
            let (left, right) = if c <= primary {
                (c - 1, if c == primary { 0 } else { c + 1 })
            } else {
                (c, c)
            };
            nodes.push(Node {
                left,
                right,
                up: c,
                down: c,
                column: c,
                row: HEADER,
            });
        }
        let mut size = vec![0; columns + 1];

        for (r, cols) in rows.iter().enumerate() {
            let mut first: Option<usize> = None;
            for &c in cols {
                assert!(c < columns, "column {c} out of range in row {r}");
                let header = c + 1;
                let x = nodes.len();
                let up = nodes[header].up;
                nodes.push(Node {
                    left: x,
                    right: x,
                    up,
                    down: header,
                    column: header,
                    row: r,
                });
                nodes[up].down = x;
                nodes[header].up = x;
                size[header] += 1;
                if let Some(first) = first {
                    let last = nodes[first].left;
                    nodes[x].left = last;
                    nodes[x].right = first;
                    nodes[last].right = x;
                    nodes[first].left = x;
                } else {
                    first = Some(x);
                }
            }
        }
        Self { nodes, size }
    }

    pub fn solutions(self) -> Solutions {
        Solutions {
            matrix: self,
            stack: Vec::new(),
            state: State::Descend,
        }
    }

    /// The uncovered primary column with the fewest rows, or `None` when all are covered.
    fn choose_column(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut c = self.nodes[0].right;
        while c != 0 {
            if best.is_none_or(|b| self.size[c] < self.size[b]) {
                best = Some(c);
                if self.size[c] == 0 {
                    break;
                }
            }
            c = self.nodes[c].right;
        }
        best
    }

    fn cover(&mut self, c: usize) {
        let (l, r) = (self.nodes[c].left, self.nodes[c].right);
        self.nodes[r].left = l;
        self.nodes[l].right = r;
        let mut i = self.nodes[c].down;
        while i != c {
            let mut j = self.nodes[i].right;
            while j != i {
                let (u, d) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[d].up = u;
                self.nodes[u].down = d;
                self.size[self.nodes[j].column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    fn uncover(&mut self, c: usize) {
        let mut i = self.nodes[c].up;
        while i != c {
            let mut j = self.nodes[i].left;
            while j != i {
                self.size[self.nodes[j].column] += 1;
                let (u, d) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[d].up = j;
                self.nodes[u].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }
        let (l, r) = (self.nodes[c].left, self.nodes[c].right);
        self.nodes[r].left = c;
        self.nodes[l].right = c;
    }

    /// Covers the other columns of the row containing node `x`.
    fn select(&mut self, x: usize) {
        let mut j = self.nodes[x].right;
        while j != x {
            self.cover(self.nodes[j].column);
            j = self.nodes[j].right;
        }
    }

    fn unselect(&mut self, x: usize) {
        let mut j = self.nodes[x].left;
        while j != x {
            self.uncover(self.nodes[j].column);
            j = self.nodes[j].left;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Descend,
    Backtrack,
    Done,
}

/// Lazy enumeration of all solutions; each is a list of row indices in the
/// order they were chosen.
pub struct Solutions {
    matrix: Matrix,
    stack: Vec<usize>,
    state: State,
}

impl Solutions {
    fn push(&mut self, x: usize) {
        self.stack.push(x);
        self.matrix.select(x);
        self.state = State::Descend;
    }
}

impl Iterator for Solutions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            match self.state {
                State::Done => return None,
                State::Descend => {
                    let Some(c) = self.matrix.choose_column() else {
                        self.state = State::Backtrack;
                        return Some(self.stack.iter().map(|&x| self.matrix.nodes[x].row).collect());
                    };
                    self.matrix.cover(c);
                    let x = self.matrix.nodes[c].down;
                    if x == c {
                        self.matrix.uncover(c);
                        self.state = State::Backtrack;
                    } else {
                        self.push(x);
                    }
                }
                State::Backtrack => {
                    let Some(x) = self.stack.pop() else {
                        self.state = State::Done;
                        continue;
                    };
                    self.matrix.unselect(x);
                    let c = self.matrix.nodes[x].column;
                    let next = self.matrix.nodes[x].down;
                    if next == c {
                        self.matrix.uncover(c);
                    } else {
                        self.push(next);
                    }
                }
            }
        }
    }
}
