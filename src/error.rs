//! Error types for graph validation and the owned solver API.
//! The relaxation loop itself never fails; these surface only at the edges.

/// Violations of the CSR adjacency contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("array {array} has {actual} entries, expected {expected}")]
    LengthMismatch { array: &'static str, expected: usize, actual: usize },

    #[error("link range [{first}, {last}) of node {node} is out of bounds for {link_count} links")]
    RangeOutOfBounds { node: usize, first: i64, last: i64, link_count: usize },

    #[error("sorted link position {position} is covered by more than one node range")]
    OverlappingRange { position: usize },

    #[error("node ranges cover {covered} sorted link positions, expected {link_count}")]
    NotExhaustive { covered: usize, link_count: usize },

    #[error("sorted link position {position} holds {link}, which is not a unique link index")]
    NotPermutation { position: usize, link: i64 },

    #[error("link {link} is listed under node {node} but its tail is {tail}")]
    TailMismatch { link: usize, node: usize, tail: i64 },

    #[error("link {link} references node {node}, outside [0, {node_count})")]
    EndpointOutOfRange { link: usize, node: i64, node_count: usize },

    #[error("link {link} has cost {cost}; expected a finite non-negative value")]
    InvalidCost { link: usize, cost: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("origin {origin} is outside [0, {node_count})")]
    InvalidOrigin { origin: usize, node_count: usize },

    #[error("buffer {buffer} has {actual} entries, expected {expected}")]
    BufferSize { buffer: &'static str, expected: usize, actual: usize },

    #[error("invalid solver configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unknown shortest path algorithm {0:?}; choose deque, fifo or dijkstra")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
