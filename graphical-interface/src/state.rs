use std::time::Instant;

use replay::ReplayEngine;
use route_graph::{Algorithm, Graph, Node, PathResult};

/// Tracks the user's route selection and which node's detail popup is open.
pub struct SelectionState {
    pub start: Option<String>,
    pub end: Option<String>,
    pub algorithm: Algorithm,
    pub inspected: Option<String>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self {
            start: None,
            end: None,
            algorithm: Algorithm::Dijkstra,
            inspected: None,
        }
    }

    /// Marks a node for the details popup. Clicking the same node again
    /// closes it.
    pub fn toggle_inspection(&mut self, node: &Node) {
        if self.inspected.as_deref() == Some(node.id.as_str()) {
            self.inspected = None;
        } else {
            self.inspected = Some(node.id.clone());
        }
    }

    /// Sets the departure airport. Picking the same airport for both
    /// endpoints is allowed; the backend answers with a single-node path.
    pub fn set_start(&mut self, id: &str) {
        self.start = Some(id.to_string());
    }

    /// Sets the arrival airport.
    pub fn set_end(&mut self, id: &str) {
        self.end = Some(id.to_string());
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn clear_route(&mut self) {
        self.start = None;
        self.end = None;
    }
}

/// Owns the loaded graph and the currently replayed trace together with its
/// engine. The engine exists exactly as long as its trace: installing a new
/// trace rebuilds both, so a cadence armed for a discarded trace can never
/// advance the new one.
pub struct Session {
    pub graph: Option<Graph>,
    pub trace: Option<PathResult>,
    pub engine: Option<ReplayEngine>,
}

impl Session {
    pub fn new() -> Session {
        Self {
            graph: None,
            trace: None,
            engine: None,
        }
    }

    /// Replaces the graph wholesale after a successful fetch.
    pub fn install_graph(&mut self, graph: Graph) {
        self.graph = Some(graph);
    }

    /// Installs a freshly parsed trace and starts replaying it.
    pub fn install_trace(&mut self, trace: PathResult, now: Instant) {
        let mut engine = ReplayEngine::new(trace.step_count());
        engine.play(now);
        self.trace = Some(trace);
        self.engine = Some(engine);
    }

    /// Drops the trace and its engine in one action.
    pub fn clear_flight(&mut self) {
        self.trace = None;
        self.engine = None;
    }

    pub fn current_step_index(&self) -> Option<usize> {
        self.engine.as_ref().map(|engine| engine.current_step())
    }
}
