//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which keeps an explicit closed set, so that the nodes expanded by a search can be reported
//! back to the caller whether or not the goal was found.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::{IndexMap, IndexSet};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// How queue entries with equal estimated total cost are ordered. Remaining ties are broken by
/// the node ordering, smallest first, so the search is fully deterministic either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Prefer the entry with the smallest cost so far.
    #[default]
    FewestMoves,
    /// Prefer the entry with the largest cost so far, i.e. the one closest to the goal.
    MostMoves,
}

struct SmallestCostHolder<N, K> {
    estimated_cost: K,
    cost: K,
    node: N,
    index: usize,
    tie_break: TieBreak,
}

impl<N: Ord, K: Ord> Eq for SmallestCostHolder<N, K> {}

impl<N: Ord, K: Ord> PartialEq for SmallestCostHolder<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord, K: Ord> PartialOrd for SmallestCostHolder<N, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord, K: Ord> Ord for SmallestCostHolder<N, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest element, so every comparison is reversed where the
        // smallest value should win.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| match self.tie_break {
                TieBreak::FewestMoves => other.cost.cmp(&self.cost),
                TieBreak::MostMoves => self.cost.cmp(&other.cost),
            })
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Result of [astar]: the path and its cost if the goal was reached, and every node that was
/// closed, in the order it was closed.
#[derive(Clone, Debug)]
pub struct AstarOutcome<N, C> {
    pub path: Option<(Vec<N>, C)>,
    pub closed: FxIndexSet<N>,
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Best-first search from `start` until a node satisfying `success` is popped from the queue.
///
/// Nodes are never expanded twice: an entry popped for an already closed node is stale and
/// skipped. A node's cost is only updated when it has no record yet or the new cost is strictly
/// lower. With a consistent heuristic the returned path is a cheapest one.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    tie_break: TieBreak,
) -> AstarOutcome<N, C>
where
    N: Eq + Hash + Clone + Ord,
    C: Zero + Ord + Copy + Add<Output = C>,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        node: start.clone(),
        index: 0,
        tie_break,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut closed: FxIndexSet<N> = FxIndexSet::default();

    while let Some(SmallestCostHolder {
        cost, node, index, ..
    }) = to_see.pop()
    {
        if !closed.insert(node.clone()) {
            continue;
        }
        if success(&node) {
            let path = reverse_path(&parents, |&(p, _)| p, index);
            return AstarOutcome {
                path: Some((path, cost)),
                closed,
            };
        }
        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            let node = successor.clone();
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                node,
                index: n,
                tie_break,
            });
        }
    }
    AstarOutcome {
        path: None,
        closed,
    }
}
