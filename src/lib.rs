//! Augmenting-path solvers for maximum flow / minimum cut in capacitated
//! networks and maximum matching / minimum vertex cover in bipartite graphs.

pub mod augmenting_path;
pub mod bipartite_matching;
pub mod bipartition;
pub mod check;
pub mod error;
pub mod graph;
pub mod maximum_flow;
pub mod union_find;

pub use crate::bipartite_matching::alternating_path::AlternatingPath;
pub use crate::bipartite_matching::matching::Matching;
pub use crate::bipartition::Bipartition;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::graph::{AdjacencyList, Graph};
pub use crate::maximum_flow::edmonds_karp::{EdmondsKarp, MaximumFlow};
pub use crate::maximum_flow::graph::Capacity;

/// Two-colors `graph`, or finds an odd cycle proving it cannot be colored.
pub fn compute_bipartition<G: AdjacencyList>(graph: &G) -> Bipartition {
    Bipartition::new(graph)
}

/// Pushes a maximum flow from `source` to `sink` through `network`, leaving the
/// optimal flow on its edges.
pub fn compute_max_flow<Flow: Capacity>(network: &mut maximum_flow::graph::Graph<Flow>, source: usize, sink: usize) -> Result<MaximumFlow<Flow>> {
    EdmondsKarp::default().solve(source, sink, network)
}

/// Maximum matching and minimum vertex cover of a bipartite graph.
pub fn compute_matching<G: AdjacencyList>(graph: &G) -> Result<Matching> {
    AlternatingPath::default().solve(graph)
}
