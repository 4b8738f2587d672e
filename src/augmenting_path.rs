//! Breadth-first search for augmenting paths in a residual structure.
//!
//! Maximum flow and bipartite matching run the same phase loop: search the
//! residual graph until a target is discovered, walk the parent pointers back
//! to augment, repeat until the search fails. Only the notion of "residual
//! step" differs, and that is what [`ResidualNetwork`] abstracts.

use std::collections::VecDeque;

/// A graph whose traversable arcs depend on the current flow or matching.
pub trait ResidualNetwork {
    /// Identifies the arc used to reach a vertex (an edge id, or nothing).
    type Step: Copy;

    fn num_nodes(&self) -> usize;

    /// Calls `visit(v, step)` for every residual arc `u -> v`.
    fn for_each_residual_step<F>(&self, u: usize, visit: F)
    where
        F: FnMut(usize, Self::Step);
}

/// Outcome of one search: reachability plus the BFS tree.
#[derive(Clone, Debug)]
pub struct SearchTree<Step> {
    reached: Vec<bool>,
    prev: Vec<Option<(usize, Step)>>,
    target: Option<usize>,
}

impl<Step: Copy> SearchTree<Step> {
    #[inline]
    pub fn is_reached(&self, u: usize) -> bool {
        self.reached[u]
    }

    pub fn reached(&self) -> &[bool] {
        &self.reached
    }

    /// The discovered target, if the search succeeded.
    #[inline]
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Arcs of the path from a search root to `u`, listed from `u` backwards
    /// as `(from, step, to)`.
    pub fn path_to(&self, u: usize) -> PathIter<'_, Step> {
        PathIter { tree: self, current: u }
    }

    pub(crate) fn into_reached(self) -> Vec<bool> {
        self.reached
    }
}

pub struct PathIter<'a, Step> {
    tree: &'a SearchTree<Step>,
    current: usize,
}

impl<Step: Copy> Iterator for PathIter<'_, Step> {
    type Item = (usize, Step, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (from, step) = self.tree.prev[self.current]?;
        let to = self.current;
        self.current = from;
        Some((from, step, to))
    }
}

/// Breadth-first search from `sources` that stops as soon as a vertex with
/// `is_target(v)` is discovered. Sources themselves are never targets.
///
/// The returned path to the target has the fewest arcs among all residual
/// paths from any source.
pub fn search<N, I, T>(network: &N, sources: I, mut is_target: T) -> SearchTree<N::Step>
where
    N: ResidualNetwork,
    I: IntoIterator<Item = usize>,
    T: FnMut(usize) -> bool,
{
    let num_nodes = network.num_nodes();
    let mut reached = vec![false; num_nodes];
    let mut prev = vec![None; num_nodes];
    let mut queue = VecDeque::new();

    for s in sources {
        if !reached[s] {
            reached[s] = true;
            queue.push_back(s);
        }
    }

    let mut target = None;
    while let Some(u) = queue.pop_front() {
        network.for_each_residual_step(u, |v, step| {
            if target.is_some() || reached[v] {
                return;
            }

            reached[v] = true;
            prev[v] = Some((u, step));
            if is_target(v) {
                target = Some(v);
            } else {
                queue.push_back(v);
            }
        });

        if target.is_some() {
            break;
        }
    }

    SearchTree { reached, prev, target }
}
