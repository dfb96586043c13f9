//! Data model for the route visualizer: the airway graph received from the
//! graph service, the recorded pathfinding trace received from the compute
//! service, and the sanitizing pass that makes the raw trace parseable.

mod errors;
mod graph;
mod sanitize;
mod trace;

pub use errors::{GraphError, TraceError};
pub use graph::{Edge, Graph, Node, NodeKind};
pub use sanitize::sanitize;
pub use trace::{Algorithm, AlgorithmStep, PathResult};
