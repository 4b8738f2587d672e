use crate::augmenting_path;
use crate::check;
use crate::error::{validate_vertex, Error, Result};
use crate::maximum_flow::graph::{Capacity, Graph};
use log::{debug, trace};

/// Ford-Fulkerson with breadth-first (shortest) augmenting paths.
///
/// Every phase searches the residual network from the source, stops as soon
/// as the sink is discovered and pushes the bottleneck along that path. With
/// shortest paths the number of phases is O(nm), for any capacities.
#[derive(Default)]
pub struct EdmondsKarp {
    // (edge id, vertex the edge leads to) from sink back to source
    path: Vec<(usize, usize)>,
}

/// Value of a maximum flow and the minimum cut certifying it.
#[derive(Clone, PartialEq, Debug)]
pub struct MaximumFlow<Flow> {
    source: usize,
    sink: usize,
    value: Flow,
    source_side: Vec<bool>,
    num_augmentations: usize,
}

impl EdmondsKarp {
    /// Augments the flow already on `graph` (normally zero) to a maximum one.
    pub fn solve<Flow>(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>) -> Result<MaximumFlow<Flow>>
    where
        Flow: Capacity,
    {
        if graph.num_nodes() == 0 {
            return Err(Error::EmptyGraph);
        }
        validate_vertex(source, graph.num_nodes())?;
        validate_vertex(sink, graph.num_nodes())?;
        if source == sink {
            return Err(Error::SourceEqualsSink { vertex: source });
        }

        let mut value = initial_value(source, sink, graph)?;
        let mut num_augmentations = 0;

        let source_side = loop {
            let tree = augmenting_path::search(&*graph, [source], |v| v == sink);
            if tree.target().is_none() {
                break tree.into_reached();
            }

            self.path.clear();
            self.path.extend(tree.path_to(sink).map(|(_, edge_id, v)| (edge_id, v)));

            // calculate delta
            let (edge_id, v) = self.path[0];
            let mut delta = graph.edges[edge_id].residual_capacity_to(v)?;
            for &(edge_id, v) in self.path.iter() {
                let residual_capacity = graph.edges[edge_id].residual_capacity_to(v)?;
                if residual_capacity < delta {
                    delta = residual_capacity;
                }
            }

            // the flow on `graph` stays feasible when the value would overflow
            value = value.checked_sum(delta).ok_or(Error::FlowOverflow)?;

            // update flow
            for &(edge_id, v) in self.path.iter() {
                graph.edges[edge_id].add_residual_flow_to(v, delta)?;
            }

            num_augmentations += 1;
            trace!("augmenting path of {} edges, bottleneck {:?}", self.path.len(), delta);
        };

        debug!("maximum flow {:?} from {} to {} after {} augmentations", value, source, sink, num_augmentations);

        let max_flow = MaximumFlow { source, sink, value, source_side, num_augmentations };
        if cfg!(debug_assertions) {
            if let Err(violation) = check::check_flow(graph, &max_flow) {
                panic!("maximum flow certificate is broken: {violation}");
            }
        }
        Ok(max_flow)
    }
}

// net flow into the sink, after checking conservation everywhere else
fn initial_value<Flow: Capacity>(source: usize, sink: usize, graph: &Graph<Flow>) -> Result<Flow> {
    for u in (0..graph.num_nodes()).filter(|&u| u != source && u != sink) {
        if !graph.inflow(u)?.approx_eq(graph.outflow(u)?) {
            return Err(Error::InfeasibleFlow { vertex: u });
        }
    }

    let (inflow, outflow) = (graph.inflow(sink)?, graph.outflow(sink)?);
    if inflow.approx_eq(outflow) {
        return Ok(Flow::zero());
    }
    if inflow < outflow {
        return Err(Error::InfeasibleFlow { vertex: sink });
    }
    Ok(inflow - outflow)
}

impl<Flow> MaximumFlow<Flow>
where
    Flow: Capacity,
{
    #[inline]
    pub fn value(&self) -> Flow {
        self.value
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.sink
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.source_side.len()
    }

    /// Phases that found an augmenting path; zero when the input flow was
    /// already maximum.
    #[inline]
    pub fn num_augmentations(&self) -> usize {
        self.num_augmentations
    }

    /// Whether `u` is reachable from the source in the final residual network.
    pub fn is_on_source_side(&self, u: usize) -> Result<bool> {
        validate_vertex(u, self.num_nodes())?;
        Ok(self.source_side[u])
    }

    /// Source side of the minimum cut.
    pub fn min_cut(&self) -> Vec<usize> {
        (0..self.num_nodes()).filter(|&u| self.source_side[u]).collect()
    }

    /// Ids of the edges of `graph` leaving the source side; their capacities
    /// sum to the flow value. `graph` must be the network that was solved.
    pub fn cut_edges(&self, graph: &Graph<Flow>) -> Result<Vec<usize>> {
        if graph.num_nodes() != self.num_nodes() {
            return Err(Error::NetworkMismatch { expected: self.num_nodes(), actual: graph.num_nodes() });
        }

        Ok(graph
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, e)| self.source_side[e.from] && !self.source_side[e.to])
            .map(|(edge_id, _)| edge_id)
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::{fixture, rstest};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn network<Flow: Capacity>(num_nodes: usize, edges: &[(usize, usize, Flow)]) -> Graph<Flow> {
        let mut graph = Graph::new(num_nodes);
        for &(from, to, capacity) in edges {
            graph.add_directed_edge(from, to, capacity).unwrap();
        }
        graph
    }

    #[fixture]
    fn two_paths() -> Graph<i64> {
        network(6, &[(0, 1, 10), (1, 3, 4), (0, 2, 8), (2, 3, 9), (1, 2, 2)])
    }

    #[rstest]
    fn bottleneck_paths(mut two_paths: Graph<i64>) {
        init_logger();
        let max_flow = EdmondsKarp::default().solve(0, 3, &mut two_paths).unwrap();

        assert_eq!(max_flow.value(), 13);
        assert_eq!(max_flow.min_cut(), vec![0, 1, 2]);
        assert!(max_flow.is_on_source_side(0).unwrap());
        assert!(!max_flow.is_on_source_side(3).unwrap());
        // vertices 4 and 5 are isolated
        assert!(!max_flow.is_on_source_side(4).unwrap());
        assert!(check::check_flow(&two_paths, &max_flow).is_ok());

        let cut_capacity: i64 = max_flow.cut_edges(&two_paths).unwrap().iter().map(|&e| two_paths.edges()[e].capacity()).sum();
        assert_eq!(cut_capacity, 13);
    }

    #[rstest]
    fn rerun_is_idempotent(mut two_paths: Graph<i64>) {
        let first = EdmondsKarp::default().solve(0, 3, &mut two_paths).unwrap();
        let flows: Vec<i64> = two_paths.edges().iter().map(|e| e.flow()).collect();

        let second = EdmondsKarp::default().solve(0, 3, &mut two_paths).unwrap();
        assert_eq!(second.value(), first.value());
        assert_eq!(second.num_augmentations(), 0);
        assert_eq!(second.min_cut(), first.min_cut());
        assert_eq!(two_paths.edges().iter().map(|e| e.flow()).collect::<Vec<_>>(), flows);
    }

    #[rstest]
    // classic CLRS network
    #[case(6, vec![(0, 1, 16), (0, 2, 13), (1, 3, 12), (2, 1, 4), (2, 4, 14), (3, 2, 9), (3, 5, 20), (4, 3, 7), (4, 5, 4)], 0, 5, 23, vec![0, 1, 2, 4])]
    // shortest paths leave the cross edge unused
    #[case(4, vec![(0, 1, 100), (0, 2, 100), (1, 2, 1), (1, 3, 100), (2, 3, 100)], 0, 3, 200, vec![0])]
    #[case(4, vec![(0, 1, 3), (2, 3, 3)], 0, 3, 0, vec![0, 1])]
    #[case(3, vec![(0, 1, 0), (1, 2, 5)], 0, 2, 0, vec![0])]
    #[case(4, vec![(0, 1, 5), (0, 1, 5), (1, 2, 3), (2, 1, 7), (1, 3, 8)], 0, 3, 8, vec![0, 1, 2])]
    fn maximum_flow(
        #[case] num_nodes: usize,
        #[case] edges: Vec<(usize, usize, i64)>,
        #[case] source: usize,
        #[case] sink: usize,
        #[case] expected: i64,
        #[case] expected_cut: Vec<usize>,
    ) {
        init_logger();
        let mut graph = network(num_nodes, &edges);
        let max_flow = EdmondsKarp::default().solve(source, sink, &mut graph).unwrap();

        assert_eq!(max_flow.value(), expected);
        assert_eq!(max_flow.min_cut(), expected_cut);
        assert!(check::check_flow(&graph, &max_flow).is_ok());
    }

    #[test]
    fn fractional_capacities() {
        let mut graph = network(4, &[(0, 1, 0.5_f64), (0, 2, 0.25), (1, 2, 0.1), (1, 3, 0.3), (2, 3, 0.7)]);
        let max_flow = EdmondsKarp::default().solve(0, 3, &mut graph).unwrap();

        assert!((max_flow.value() - 0.65).abs() < 1e-9);
        assert!(check::check_flow(&graph, &max_flow).is_ok());
    }

    #[test]
    fn starts_from_given_flow() {
        let mut graph = Graph::new(4);
        graph.add_directed_edge_with_flow(0, 1, 4, 2).unwrap();
        graph.add_directed_edge_with_flow(1, 3, 3, 2).unwrap();
        graph.add_directed_edge(0, 2, 2).unwrap();
        graph.add_directed_edge(2, 3, 5).unwrap();

        let max_flow = EdmondsKarp::default().solve(0, 3, &mut graph).unwrap();
        assert_eq!(max_flow.value(), 5);
        assert_eq!(max_flow.num_augmentations(), 2);
    }

    #[rstest]
    #[case(0, 0, Error::SourceEqualsSink { vertex: 0 })]
    #[case(0, 7, Error::InvalidVertex { vertex: 7, num_nodes: 6 })]
    #[case(9, 3, Error::InvalidVertex { vertex: 9, num_nodes: 6 })]
    fn bad_terminals(mut two_paths: Graph<i64>, #[case] source: usize, #[case] sink: usize, #[case] expected: Error) {
        let result = EdmondsKarp::default().solve(source, sink, &mut two_paths);
        assert_eq!(result, Err(expected));
        assert!(two_paths.edges().iter().all(|e| e.flow() == 0));
    }

    #[test]
    fn empty_network() {
        let mut graph = Graph::<u32>::new(0);
        assert_eq!(EdmondsKarp::default().solve(0, 1, &mut graph), Err(Error::EmptyGraph));
    }

    #[test]
    fn infeasible_initial_flow() {
        let mut graph = Graph::new(3);
        graph.add_directed_edge_with_flow(0, 1, 4, 3).unwrap();
        graph.add_directed_edge_with_flow(1, 2, 4, 1).unwrap();

        let error = EdmondsKarp::default().solve(0, 2, &mut graph).unwrap_err();
        assert_eq!(error, Error::InfeasibleFlow { vertex: 1 });
        assert_eq!(error.kind(), ErrorKind::PreconditionViolation);
    }

    #[test]
    fn cut_membership_out_of_range() {
        let mut graph = network(2, &[(0, 1, 1)]);
        let max_flow = EdmondsKarp::default().solve(0, 1, &mut graph).unwrap();
        assert_eq!(max_flow.is_on_source_side(2), Err(Error::InvalidVertex { vertex: 2, num_nodes: 2 }));

        let larger = network(4, &[(0, 1, 1), (2, 3, 1)]);
        assert_eq!(max_flow.cut_edges(&larger), Err(Error::NetworkMismatch { expected: 2, actual: 4 }));
        assert_eq!(max_flow.cut_edges(&graph), Ok(vec![0]));
    }

    #[test]
    fn value_overflow() {
        let mut graph = network::<u8>(3, &[(0, 1, 200), (0, 2, 200), (1, 2, 200), (1, 2, 200)]);
        let error = EdmondsKarp::default().solve(0, 2, &mut graph).unwrap_err();

        assert_eq!(error, Error::FlowOverflow);
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        // the first path was pushed, the overflowing one was not
        assert_eq!(graph.edges().iter().map(|e| e.flow()).collect::<Vec<_>>(), vec![0, 200, 0, 0]);
        assert_eq!(graph.inflow(2), Ok(200));
    }

    #[test]
    fn large_float_capacities() {
        let mut graph = network(4, &[(0, 1, 198818.75152792604), (0, 2, 3.0e6 / 7.0), (1, 2, 1.0e5 / 3.0), (1, 3, 123456.789), (2, 3, 2.5e5)]);
        let max_flow = EdmondsKarp::default().solve(0, 3, &mut graph).unwrap();

        assert!(max_flow.value().approx_eq(123456.789 + 2.5e5));
        assert_eq!(check::check_flow(&graph, &max_flow), Ok(()));
    }
}
