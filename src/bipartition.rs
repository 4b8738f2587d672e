use crate::error::{validate_vertex, Error, Result};
use crate::graph::AdjacencyList;
use crate::union_find::UnionFind;
use log::debug;
use std::collections::VecDeque;

/// Two-coloring of a graph, or an odd cycle when none exists.
#[derive(Clone, Debug)]
pub struct Bipartition {
    is_bipartite: bool,
    color: Vec<bool>,
    // first == last
    odd_cycle: Option<Vec<usize>>,
}

impl Bipartition {
    // O(n + m), breadth-first from every undiscovered vertex
    pub fn new<G: AdjacencyList>(graph: &G) -> Self {
        let num_nodes = graph.num_nodes();
        let mut color = vec![false; num_nodes];
        let mut visited = vec![false; num_nodes];
        let mut parent = vec![usize::MAX; num_nodes];
        let mut depth = vec![0; num_nodes];
        let mut que = VecDeque::new();

        for root in 0..num_nodes {
            if visited[root] {
                continue;
            }

            visited[root] = true;
            que.push_back(root);
            while let Some(u) = que.pop_front() {
                for &v in graph.neighbors(u) {
                    if !visited[v] {
                        visited[v] = true;
                        color[v] = !color[u];
                        parent[v] = u;
                        depth[v] = depth[u] + 1;
                        que.push_back(v);
                    } else if color[v] == color[u] {
                        let cycle = odd_cycle(u, v, &parent, &depth);
                        debug!("graph is not bipartite: odd cycle {:?}", cycle);
                        return Self { is_bipartite: false, color, odd_cycle: Some(cycle) };
                    }
                }
            }
        }

        Self { is_bipartite: true, color, odd_cycle: None }
    }

    #[inline]
    pub fn is_bipartite(&self) -> bool {
        self.is_bipartite
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.color.len()
    }

    /// Side of `u`; adjacent vertices always get different colors.
    pub fn color(&self, u: usize) -> Result<bool> {
        self.validate_vertex(u)?;
        if !self.is_bipartite {
            return Err(Error::NotBipartite);
        }
        Ok(self.color[u])
    }

    pub fn side(&self, u: usize) -> Result<bool> {
        self.color(u)
    }

    pub fn odd_cycle(&self) -> Option<&[usize]> {
        self.odd_cycle.as_deref()
    }

    pub fn validate_vertex(&self, u: usize) -> Result<()> {
        validate_vertex(u, self.num_nodes())
    }

    // unchecked, only meaningful when bipartite
    #[inline]
    pub(crate) fn colors(&self) -> &[bool] {
        &self.color
    }
}

// u and v are adjacent and have the same color, so the tree paths from both
// to their lowest common ancestor close an odd cycle with the edge u-v.
fn odd_cycle(u: usize, v: usize, parent: &[usize], depth: &[usize]) -> Vec<usize> {
    let (mut x, mut y) = (u, v);
    let mut from_u = Vec::new();
    let mut from_v = Vec::new();

    while depth[x] > depth[y] {
        from_u.push(x);
        x = parent[x];
    }
    while depth[y] > depth[x] {
        from_v.push(y);
        y = parent[y];
    }
    while x != y {
        from_u.push(x);
        from_v.push(y);
        x = parent[x];
        y = parent[y];
    }

    // lca -> ... -> u -> v -> ... -> lca
    let mut cycle = Vec::with_capacity(from_u.len() + from_v.len() + 2);
    cycle.push(x);
    cycle.extend(from_u.iter().rev());
    cycle.extend(from_v.iter());
    cycle.push(x);
    cycle
}

/// Bipartiteness by parity classes: vertex `u` and its twin `u + n` are
/// merged across every edge, so the graph is bipartite iff no vertex ends up
/// connected to its own twin.
pub fn is_bipartite_by_union_find<G: AdjacencyList>(graph: &G) -> bool {
    let n = graph.num_nodes();
    let mut uf = UnionFind::new(2 * n);
    for u in 0..n {
        for &v in graph.neighbors(u) {
            uf.merge(u, v + n);
            uf.merge(u + n, v);
        }
    }
    (0..n).all(|u| !uf.same_set(u, u + n))
}
