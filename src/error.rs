use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The input itself is malformed (bad vertex id, negative capacity, ...).
    InvalidArgument,
    /// The input is well formed, but the requested operation does not apply
    /// to it (matching a non-bipartite graph, solving from an infeasible flow).
    PreconditionViolation,
}

#[derive(Error, PartialEq, Debug)]
pub enum Error {
    #[error("vertex {vertex} is not between 0 and {}", .num_nodes.saturating_sub(1))]
    InvalidVertex { vertex: usize, num_nodes: usize },

    #[error("vertex {vertex} is not an endpoint of edge {from}->{to}")]
    NotAnEndpoint { vertex: usize, from: usize, to: usize },

    #[error("edge capacity must be non-negative, got {0}")]
    NegativeCapacity(String),

    #[error("residual flow delta must be non-negative, got {0}")]
    NegativeDelta(String),

    #[error("initial flow {flow} is outside [0, {capacity}]")]
    FlowOutOfRange { flow: String, capacity: String },

    #[error("self-loop at vertex {vertex} is not allowed in a flow network")]
    SelfLoop { vertex: usize },

    #[error("source and sink are both vertex {vertex}")]
    SourceEqualsSink { vertex: usize },

    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("initial matching is inconsistent at vertex {vertex}")]
    InvalidMatching { vertex: usize },

    #[error("graph is not bipartite")]
    NotBipartite,

    #[error("initial flow violates conservation at vertex {vertex}")]
    InfeasibleFlow { vertex: usize },

    #[error("total flow does not fit in the capacity type")]
    FlowOverflow,

    #[error("network has {actual} vertices, but the flow was computed on {expected}")]
    NetworkMismatch { expected: usize, actual: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotBipartite | Error::InfeasibleFlow { .. } => ErrorKind::PreconditionViolation,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Checks `vertex` against a graph of `num_nodes` vertices.
#[inline]
pub(crate) fn validate_vertex(vertex: usize, num_nodes: usize) -> Result<()> {
    if vertex >= num_nodes {
        return Err(Error::InvalidVertex { vertex, num_nodes });
    }
    Ok(())
}
