//! Certificate checks run after a solver converges.
//!
//! A [`Violation`] means a solver is wrong, not that its input was bad. The
//! solvers run these checks themselves in debug builds and panic on failure.

use crate::bipartite_matching::matching::Matching;
use crate::bipartition::{is_bipartite_by_union_find, Bipartition};
use crate::graph::AdjacencyList;
use crate::maximum_flow::edmonds_karp::MaximumFlow;
use crate::maximum_flow::graph::{Capacity, Graph as FlowNetwork};
use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum Violation {
    #[error("result covers {actual} vertices but the graph has {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("edge {u}-{v} joins two vertices of the same color")]
    MonochromaticEdge { u: usize, v: usize },

    #[error("odd cycle {0:?} is not a closed walk of odd length")]
    BadOddCycle(Vec<usize>),

    #[error("breadth-first and union-find bipartiteness verdicts differ")]
    VerdictMismatch,

    #[error("edge {edge_id} carries flow {flow} outside [0, {capacity}]")]
    CapacityExceeded { edge_id: usize, flow: String, capacity: String },

    #[error("flow is not conserved at vertex {vertex}")]
    NotConserved { vertex: usize },

    #[error("net flow into the sink is {actual}, reported value is {expected}")]
    ValueMismatch { expected: String, actual: String },

    #[error("source is not on the source side of the cut")]
    SourceNotInCut,

    #[error("sink is on the source side of the cut")]
    SinkInCut,

    #[error("cut capacity {cut} differs from flow value {value}")]
    CutMismatch { value: String, cut: String },

    #[error("mate of {u} is {v}, but mate of {v} is not {u}")]
    AsymmetricMate { u: usize, v: usize },

    #[error("{u} and {v} are matched but not adjacent")]
    MatchedNonEdge { u: usize, v: usize },

    #[error("matching reports {reported} pairs but {matched} vertices are matched")]
    CardinalityMismatch { reported: usize, matched: usize },

    #[error("edge {u}-{v} has no endpoint in the vertex cover")]
    UncoveredEdge { u: usize, v: usize },

    #[error("vertex cover has {cover} vertices, matching has {matching} pairs")]
    CoverSizeMismatch { cover: usize, matching: usize },
}

pub fn check_bipartition<G: AdjacencyList>(graph: &G, bipartition: &Bipartition) -> Result<(), Violation> {
    if bipartition.num_nodes() != graph.num_nodes() {
        return Err(Violation::SizeMismatch { expected: graph.num_nodes(), actual: bipartition.num_nodes() });
    }
    if bipartition.is_bipartite() != is_bipartite_by_union_find(graph) {
        return Err(Violation::VerdictMismatch);
    }

    match bipartition.odd_cycle() {
        None => {
            let color = bipartition.colors();
            for u in 0..graph.num_nodes() {
                if let Some(&v) = graph.neighbors(u).iter().find(|&&v| color[u] == color[v]) {
                    return Err(Violation::MonochromaticEdge { u, v });
                }
            }
        }
        Some(cycle) => {
            let closed = cycle.len() >= 2 && cycle.first() == cycle.last();
            let odd = cycle.len() % 2 == 0;
            let walk = cycle.iter().all(|&u| u < graph.num_nodes()) && cycle.windows(2).all(|w| graph.neighbors(w[0]).contains(&w[1]));
            if !(closed && odd && walk) {
                return Err(Violation::BadOddCycle(cycle.to_vec()));
            }
        }
    }
    Ok(())
}

pub fn check_flow<Flow: Capacity>(graph: &FlowNetwork<Flow>, max_flow: &MaximumFlow<Flow>) -> Result<(), Violation> {
    if max_flow.num_nodes() != graph.num_nodes() {
        return Err(Violation::SizeMismatch { expected: graph.num_nodes(), actual: max_flow.num_nodes() });
    }

    // capacity constraints
    for (edge_id, e) in graph.edges().iter().enumerate() {
        if e.flow() < Flow::zero() || e.flow() > e.capacity() {
            return Err(Violation::CapacityExceeded { edge_id, flow: format!("{:?}", e.flow()), capacity: format!("{:?}", e.capacity()) });
        }
    }

    // conservation; a sum that overflows `Flow` counts as unbalanced
    let (source, sink) = (max_flow.source(), max_flow.sink());
    let net = |u: usize| graph.inflow(u).ok().zip(graph.outflow(u).ok());
    for u in (0..graph.num_nodes()).filter(|&u| u != source && u != sink) {
        if !net(u).is_some_and(|(inflow, outflow)| inflow.approx_eq(outflow)) {
            return Err(Violation::NotConserved { vertex: u });
        }
    }
    let value = max_flow.value();
    let Some((inflow, outflow)) = net(sink) else {
        return Err(Violation::ValueMismatch { expected: format!("{:?}", value), actual: "overflow".into() });
    };
    if !outflow.checked_sum(value).is_some_and(|total| inflow.approx_eq(total)) {
        return Err(Violation::ValueMismatch { expected: format!("{:?}", value), actual: format!("{:?} - {:?}", inflow, outflow) });
    }

    // cut
    if max_flow.is_on_source_side(source) != Ok(true) {
        return Err(Violation::SourceNotInCut);
    }
    if max_flow.is_on_source_side(sink) != Ok(false) {
        return Err(Violation::SinkInCut);
    }
    // sizes already match
    let cut_edges = max_flow.cut_edges(graph).unwrap_or_default();
    let cut = cut_edges.into_iter().try_fold(Flow::zero(), |sum, edge_id| sum.checked_sum(graph.edges()[edge_id].capacity()));
    match cut {
        Some(cut) if cut.approx_eq(value) => {}
        Some(cut) => return Err(Violation::CutMismatch { value: format!("{:?}", value), cut: format!("{:?}", cut) }),
        None => return Err(Violation::CutMismatch { value: format!("{:?}", value), cut: "overflow".into() }),
    }
    Ok(())
}

pub fn check_matching<G: AdjacencyList>(graph: &G, matching: &Matching) -> Result<(), Violation> {
    let num_nodes = graph.num_nodes();
    if matching.num_nodes() != num_nodes {
        return Err(Violation::SizeMismatch { expected: num_nodes, actual: matching.num_nodes() });
    }

    let mates = matching.mates();
    let mut matched = 0;
    for u in 0..num_nodes {
        let Some(v) = mates[u] else {
            continue;
        };
        if v >= num_nodes || mates[v] != Some(u) {
            return Err(Violation::AsymmetricMate { u, v });
        }
        if !graph.neighbors(u).contains(&v) {
            return Err(Violation::MatchedNonEdge { u, v });
        }
        matched += 1;
    }
    if 2 * matching.size() != matched {
        return Err(Violation::CardinalityMismatch { reported: matching.size(), matched });
    }

    let cover = matching.cover();
    for u in 0..num_nodes {
        if let Some(&v) = graph.neighbors(u).iter().find(|&&v| !cover[u] && !cover[v]) {
            return Err(Violation::UncoveredEdge { u, v });
        }
    }
    let cover_size = cover.iter().filter(|&&c| c).count();
    if cover_size != matching.size() {
        return Err(Violation::CoverSizeMismatch { cover: cover_size, matching: matching.size() });
    }
    Ok(())
}

/// Checks every certificate a bipartite matching run produces.
pub fn check_all<G: AdjacencyList>(graph: &G, bipartition: &Bipartition, matching: &Matching) -> Result<(), Violation> {
    check_bipartition(graph, bipartition)?;
    check_matching(graph, matching)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bipartite_matching::alternating_path::AlternatingPath;
    use crate::graph::Graph;
    use crate::maximum_flow::edmonds_karp::EdmondsKarp;

    #[test]
    fn tampered_flow_is_caught() {
        let mut network = FlowNetwork::<i32>::new(3);
        network.add_directed_edge(0, 1, 2).unwrap();
        network.add_directed_edge(1, 2, 2).unwrap();
        let max_flow = EdmondsKarp::default().solve(0, 2, &mut network).unwrap();
        assert_eq!(check_flow(&network, &max_flow), Ok(()));

        network.edges[1].flow = 1;
        assert_eq!(check_flow(&network, &max_flow), Err(Violation::NotConserved { vertex: 1 }));

        network.edges[1].flow = 3;
        assert!(matches!(check_flow(&network, &max_flow), Err(Violation::CapacityExceeded { edge_id: 1, .. })));
    }

    #[test]
    fn stale_cut_is_caught() {
        let mut network = FlowNetwork::<i32>::new(3);
        network.add_directed_edge(0, 1, 2).unwrap();
        network.add_directed_edge(1, 2, 2).unwrap();
        let max_flow = EdmondsKarp::default().solve(0, 2, &mut network).unwrap();

        network.reset_flow();
        assert!(matches!(check_flow(&network, &max_flow), Err(Violation::ValueMismatch { .. })));
    }

    #[test]
    fn matching_on_wrong_graph_is_caught() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(2, 3).unwrap();
        let matching = AlternatingPath::default().solve(&graph).unwrap();
        let bipartition = Bipartition::new(&graph);
        assert_eq!(check_all(&graph, &bipartition, &matching), Ok(()));

        let mut disjoint = Graph::new(4);
        disjoint.add_edge(0, 2).unwrap();
        disjoint.add_edge(1, 3).unwrap();
        assert_eq!(check_matching(&disjoint, &matching), Err(Violation::MatchedNonEdge { u: 0, v: 1 }));
    }
}
