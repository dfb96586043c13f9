use std::fmt::{self, Display};

/// Enum representing the errors that can occur while parsing a graph payload.
///
/// The possible errors are:
///
/// - `InvalidJson`: the payload is not valid JSON or does not have the
///   expected `{ nodes, edges }` shape.
/// - `UnknownNodeKind`: a node carries a `type` tag that is neither an
///   airport (0) nor a waypoint (1).
///
/// A failed parse means the graph is unavailable; callers must not keep a
/// partially built graph around.
#[derive(Debug, PartialEq)]
pub enum GraphError {
    InvalidJson(String),
    UnknownNodeKind { id: String, tag: u8 },
}

impl Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidJson(detail) => {
                write!(f, "[InvalidJson]: The graph payload could not be parsed: {}", detail)
            }
            GraphError::UnknownNodeKind { id, tag } => {
                write!(f, "[UnknownNodeKind]: Node '{}' has unknown type tag {}", id, tag)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Enum representing the errors that can occur while building a pathfinding
/// trace from a sanitized payload.
///
/// The possible errors are:
///
/// - `InvalidJson`: the sanitized payload still does not parse as JSON or
///   does not have the expected `{ path, totalDistance, steps }` shape.
/// - `EmptySteps`: the trace carries no algorithm steps. Every trace has at
///   least the initial state, so this violates the service contract.
/// - `UnknownPathNode`: the final path names a node that no algorithm step
///   ever referenced.
/// - `InvalidDistance`: `totalDistance` is negative or non-finite.
/// - `MissingDistance`: the trace has a non-empty path but no total distance.
///
/// No partial trace is ever installed after one of these.
#[derive(Debug, PartialEq)]
pub enum TraceError {
    InvalidJson(String),
    EmptySteps,
    UnknownPathNode(String),
    InvalidDistance(f64),
    MissingDistance,
}

impl Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::InvalidJson(detail) => {
                write!(f, "[InvalidJson]: The trace payload could not be parsed: {}", detail)
            }
            TraceError::EmptySteps => {
                write!(f, "[EmptySteps]: The trace contains no algorithm steps")
            }
            TraceError::UnknownPathNode(id) => {
                write!(
                    f,
                    "[UnknownPathNode]: Path node '{}' is not referenced by any step",
                    id
                )
            }
            TraceError::InvalidDistance(value) => {
                write!(f, "[InvalidDistance]: Total distance {} is not a valid distance", value)
            }
            TraceError::MissingDistance => {
                write!(f, "[MissingDistance]: The trace has a path but no total distance")
            }
        }
    }
}

impl std::error::Error for TraceError {}
