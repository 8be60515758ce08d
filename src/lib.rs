//! One-to-all shortest paths for transportation network assignment, exposed via a stable C ABI.
//!
//! The engine is the deque-based modified label-correcting (MLC) algorithm: a node whose
//! label improves after it was scanned is pushed to the front of the scan-eligible list,
//! a first-time discovery to the back. Two filters sit on top of it:
//!  - mode eligibility: links a travel mode may not use are skipped
//!  - through nodes: trip-end (centroid) nodes can start or end a path but never relay one
//!
//! Entry points:
//!  - [`ffi::shortest_path`] / [`ffi::shortest_path_n`] over caller-owned flat arrays
//!  - [`ShortestPathTree`] for Rust callers, reusing its buffers across origins
//!  - [`label_correcting`] over borrowed buffers ([`LabelState`])
//!
//! The graph is read-only and may be shared across threads; each concurrent run needs
//! its own label buffers.

pub mod config;
pub mod deque;
pub mod error;
pub mod ffi;
pub mod graph;
pub mod mode;
pub mod path;
pub mod reference;
pub mod solver;

pub use config::{SolverConfig, ThroughNodes, DEFAULT_MAX_LABEL_COST};
pub use error::{Error, GraphError, Result};
pub use graph::{CsrGraph, GraphView};
pub use mode::{AllModes, CharMode, ModeFilter, TokenMode};
pub use path::PathKind;
pub use reference::Algorithm;
pub use solver::{label_correcting, LabelState, MlcStats, ShortestPathTree, NO_PRED};
