use crate::augmenting_path::ResidualNetwork;
use crate::error::{validate_vertex, Error, Result};
use num_traits::{CheckedAdd, NumAssign};
use std::fmt::Debug;

/// Numeric type of capacities and flows.
///
/// Integers compare exactly. Floats compare sums of flows within a relative
/// `tolerance`, since a flow that passed through many augmentations carries
/// round-off proportional to its magnitude.
pub trait Capacity: NumAssign + PartialOrd + Copy + Debug {
    fn tolerance() -> Self;

    /// `|self - other| <= tolerance * max(1, |self|, |other|)`.
    fn approx_eq(self, other: Self) -> bool;

    /// `self + other`, or `None` if the sum does not fit.
    fn checked_sum(self, other: Self) -> Option<Self>;
}

macro_rules! impl_exact_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                #[inline]
                fn tolerance() -> Self {
                    0
                }

                #[inline]
                fn approx_eq(self, other: Self) -> bool {
                    self == other
                }

                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

macro_rules! impl_float_capacity {
    ($($t:ty => $tolerance:expr),*) => {
        $(
            impl Capacity for $t {
                #[inline]
                fn tolerance() -> Self {
                    $tolerance
                }

                #[inline]
                fn approx_eq(self, other: Self) -> bool {
                    let scale = self.abs().max(other.abs()).max(1.0);
                    (self - other).abs() <= <$t as Capacity>::tolerance() * scale
                }

                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.is_finite().then_some(sum)
                }
            }
        )*
    };
}

impl_exact_capacity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_capacity!(f32 => 1e-4, f64 => 1e-11);

fn sum_flows<'a, Flow, I>(mut edges: I) -> Result<Flow>
where
    Flow: Capacity + 'a,
    I: Iterator<Item = (usize, &'a Edge<Flow>)>,
{
    edges.try_fold(Flow::zero(), |sum, (_, e)| sum.checked_sum(e.flow)).ok_or(Error::FlowOverflow)
}

/// Directed capacitated edge `from -> to`.
///
/// The same edge is listed in the incidence lists of both endpoints: toward
/// `to` it can carry `capacity - flow` more, toward `from` it can give back
/// `flow`.
#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub(crate) flow: Flow,
    pub(crate) capacity: Flow,
}

impl<Flow> Edge<Flow>
where
    Flow: Capacity,
{
    #[inline]
    pub fn capacity(&self) -> Flow {
        self.capacity
    }

    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn other(&self, vertex: usize) -> Result<usize> {
        if vertex == self.from {
            Ok(self.to)
        } else if vertex == self.to {
            Ok(self.from)
        } else {
            Err(self.not_an_endpoint(vertex))
        }
    }

    pub fn residual_capacity_to(&self, vertex: usize) -> Result<Flow> {
        if vertex == self.from {
            Ok(self.flow)
        } else if vertex == self.to {
            Ok(self.capacity - self.flow)
        } else {
            Err(self.not_an_endpoint(vertex))
        }
    }

    /// Pushes `delta` more units toward `vertex`. The caller keeps `delta`
    /// within `residual_capacity_to(vertex)`.
    pub fn add_residual_flow_to(&mut self, vertex: usize, delta: Flow) -> Result<()> {
        if !(delta >= Flow::zero()) {
            return Err(Error::NegativeDelta(format!("{:?}", delta)));
        }

        if vertex == self.from {
            self.flow -= delta;
        } else if vertex == self.to {
            self.flow += delta;
        } else {
            return Err(self.not_an_endpoint(vertex));
        }

        // round-off can leave a float flow an ulp outside its bounds
        if self.flow < Flow::zero() {
            self.flow = Flow::zero();
        } else if self.flow > self.capacity {
            self.flow = self.capacity;
        }
        Ok(())
    }

    // (other endpoint, residual capacity toward it)
    #[inline]
    pub(crate) fn residual_arc_from(&self, u: usize) -> (usize, Flow) {
        if u == self.from {
            (self.to, self.capacity - self.flow)
        } else {
            (self.from, self.flow)
        }
    }

    fn not_an_endpoint(&self, vertex: usize) -> Error {
        Error::NotAnEndpoint { vertex, from: self.from, to: self.to }
    }
}

/// Flow network. Edges live in one arena; each vertex keeps the ids of the
/// edges incident to it, in either direction.
#[derive(Default, Clone, Debug)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
    incident: Vec<Vec<usize>>,
}

impl<Flow> Graph<Flow>
where
    Flow: Capacity,
{
    pub fn new(num_nodes: usize) -> Self {
        let mut graph = Self { num_nodes: 0, num_edges: 0, edges: Vec::new(), incident: Vec::new() };
        graph.add_nodes(num_nodes);
        graph
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.incident.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.incident.resize_with(self.num_nodes + num_nodes, Vec::new);
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_directed_edge(&mut self, from: usize, to: usize, capacity: Flow) -> Result<usize> {
        self.add_directed_edge_with_flow(from, to, capacity, Flow::zero())
    }

    pub fn add_directed_edge_with_flow(&mut self, from: usize, to: usize, capacity: Flow, flow: Flow) -> Result<usize> {
        validate_vertex(from, self.num_nodes)?;
        validate_vertex(to, self.num_nodes)?;
        if from == to {
            return Err(Error::SelfLoop { vertex: from });
        }
        if !(capacity >= Flow::zero()) {
            return Err(Error::NegativeCapacity(format!("{:?}", capacity)));
        }
        if !(flow >= Flow::zero() && flow <= capacity) {
            return Err(Error::FlowOutOfRange { flow: format!("{:?}", flow), capacity: format!("{:?}", capacity) });
        }

        self.edges.push(Edge { from, to, flow, capacity });
        self.incident[from].push(self.num_edges);
        self.incident[to].push(self.num_edges);

        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<&Edge<Flow>> {
        self.edges.get(edge_id)
    }

    pub fn edges(&self) -> &[Edge<Flow>] {
        &self.edges
    }

    /// Edges entering or leaving `u`, with their ids.
    pub fn incident_edges(&self, u: usize) -> Result<impl Iterator<Item = (usize, &Edge<Flow>)> + '_> {
        validate_vertex(u, self.num_nodes)?;
        Ok(self.incident[u].iter().map(move |&edge_id| (edge_id, &self.edges[edge_id])))
    }

    /// Total flow on edges entering `u`.
    pub fn inflow(&self, u: usize) -> Result<Flow> {
        sum_flows(self.incident_edges(u)?.filter(|(_, e)| e.to == u))
    }

    /// Total flow on edges leaving `u`.
    pub fn outflow(&self, u: usize) -> Result<Flow> {
        sum_flows(self.incident_edges(u)?.filter(|(_, e)| e.from == u))
    }

    pub fn reset_flow(&mut self) {
        self.edges.iter_mut().for_each(|e| e.flow = Flow::zero());
    }
}

impl<Flow> ResidualNetwork for Graph<Flow>
where
    Flow: Capacity,
{
    type Step = usize;

    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn for_each_residual_step<F>(&self, u: usize, mut visit: F)
    where
        F: FnMut(usize, usize),
    {
        for &edge_id in self.incident[u].iter() {
            let (v, residual_capacity) = self.edges[edge_id].residual_arc_from(u);
            if residual_capacity > Flow::zero() {
                visit(v, edge_id);
            }
        }
    }
}
