use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::errors::TraceError;

/// The graph-search algorithm to request from the compute service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dijkstra,
    Bfs,
}

impl Algorithm {
    /// Wire name used by the compute service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Bfs => "bfs",
        }
    }

    /// Human-readable name for the controls panel.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Bfs => "Breadth-First Search",
        }
    }
}

/// One discrete snapshot of algorithm progress.
///
/// `distances` maps node ids to the best known distance at this step;
/// `None` means the node has not been reached yet (the sanitized form of
/// the backend's infinity sentinel). `previous` holds the best predecessor
/// of each reached node, enough to reconstruct partial paths mid-replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmStep {
    pub current_node: String,
    pub visited_nodes: Vec<String>,
    pub frontier: Vec<String>,
    #[serde(default)]
    pub distances: HashMap<String, Option<f64>>,
    #[serde(default, rename = "previousNodes")]
    pub previous: HashMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPathResult {
    #[serde(default)]
    path: Vec<String>,
    #[serde(default)]
    total_distance: Option<f64>,
    steps: Vec<AlgorithmStep>,
}

/// A completed pathfinding trace: the ordered algorithm steps, the final
/// path (empty when the destination is unreachable) and the summed edge
/// distance along it (`None` when unreachable).
///
/// Built once per completed request, never mutated, and discarded when the
/// user clears the flight or submits a new request.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub steps: Vec<AlgorithmStep>,
    pub path: Vec<String>,
    pub total_distance: Option<f64>,
}

impl PathResult {
    /// Builds a trace from a sanitized payload, validating the compute
    /// service's contract: at least one step, every path node referenced
    /// by some step, and a sensible total distance.
    pub fn from_json(sanitized: &str) -> Result<PathResult, TraceError> {
        let parsed: RawPathResult =
            serde_json::from_str(sanitized).map_err(|e| TraceError::InvalidJson(e.to_string()))?;

        if parsed.steps.is_empty() {
            return Err(TraceError::EmptySteps);
        }

        let mut referenced: HashSet<&str> = HashSet::new();
        for step in &parsed.steps {
            referenced.insert(step.current_node.as_str());
            referenced.extend(step.visited_nodes.iter().map(String::as_str));
            referenced.extend(step.frontier.iter().map(String::as_str));
            referenced.extend(step.distances.keys().map(String::as_str));
        }
        for id in &parsed.path {
            if !referenced.contains(id.as_str()) {
                return Err(TraceError::UnknownPathNode(id.clone()));
            }
        }

        // An empty path means unreachable; whatever distance the backend
        // serialized alongside it is meaningless and dropped.
        let total_distance = if parsed.path.is_empty() {
            None
        } else {
            match parsed.total_distance {
                Some(d) if d.is_finite() && d >= 0.0 => Some(d),
                Some(d) => return Err(TraceError::InvalidDistance(d)),
                None => return Err(TraceError::MissingDistance),
            }
        };

        Ok(PathResult {
            steps: parsed.steps,
            path: parsed.path,
            total_distance,
        })
    }

    /// Number of replayable steps. Always at least 1 for a valid trace.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&AlgorithmStep> {
        self.steps.get(index)
    }

    /// Whether the destination was reached at all.
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}
