use std::collections::HashMap;

use route_graph::{Graph, NodeKind, PathResult};

/// Plain RGB triple, kept free of any UI toolkit type so the styling pass
/// stays pure and comparable in tests.
pub type Rgb = (u8, u8, u8);

const START: Rgb = (34, 197, 94);
const END: Rgb = (239, 68, 68);
const VISITED: Rgb = (59, 130, 246);
const FRONTIER: Rgb = (249, 115, 22);
const AIRPORT: Rgb = (128, 128, 128);
const WAYPOINT: Rgb = (107, 114, 128);
const PATH_EDGE: Rgb = (59, 130, 246);
const DEFAULT_EDGE: Rgb = (107, 114, 128);

const AIRPORT_RADIUS: f32 = 10.0;
const WAYPOINT_RADIUS: f32 = 6.0;

/// Visual attributes for one node marker. `halo` is set for nodes the
/// current step has visited or queued, drawn as a translucent ring around
/// the marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub color: Rgb,
    pub radius: f32,
    pub halo: Option<Rgb>,
}

/// Visual attributes for one edge polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Rgb,
    pub width: f32,
    pub opacity: f32,
}

impl EdgeStyle {
    fn on_path() -> Self {
        EdgeStyle {
            color: PATH_EDGE,
            width: 3.0,
            opacity: 1.0,
        }
    }

    fn default_style() -> Self {
        EdgeStyle {
            color: DEFAULT_EDGE,
            width: 1.0,
            opacity: 0.5,
        }
    }
}

/// Per-node and per-edge styles for one replay frame. Edge keys are the
/// `(from, to)` pair exactly as stored in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Visuals {
    pub nodes: HashMap<String, NodeStyle>,
    pub edges: HashMap<(String, String), EdgeStyle>,
}

/// Derives the visual attributes for every node and edge of the graph at
/// the given replay position.
///
/// Node color precedence, first match wins: selected start, selected end,
/// in the current step's visited set, in the current step's frontier,
/// default by node kind. An edge is emphasized iff the final path contains
/// its endpoints as adjacent entries in either order.
///
/// Pure function of its inputs; it is recomputed on every replay tick.
pub fn derive_visuals(
    graph: &Graph,
    trace: Option<&PathResult>,
    current_step: Option<usize>,
    start: Option<&str>,
    end: Option<&str>,
) -> Visuals {
    let step = trace
        .zip(current_step)
        .and_then(|(t, index)| t.step(index));

    let mut nodes = HashMap::with_capacity(graph.nodes().len());
    for node in graph.nodes() {
        let id = node.id.as_str();
        let color = if start == Some(id) {
            START
        } else if end == Some(id) {
            END
        } else if step.is_some_and(|s| s.visited_nodes.iter().any(|v| v == id)) {
            VISITED
        } else if step.is_some_and(|s| s.frontier.iter().any(|v| v == id)) {
            FRONTIER
        } else {
            match node.kind {
                NodeKind::Airport { .. } => AIRPORT,
                NodeKind::Waypoint { .. } => WAYPOINT,
            }
        };
        let halo = if color == VISITED || color == FRONTIER {
            Some(color)
        } else {
            None
        };
        let radius = match node.kind {
            NodeKind::Airport { .. } => AIRPORT_RADIUS,
            NodeKind::Waypoint { .. } => WAYPOINT_RADIUS,
        };
        nodes.insert(node.id.clone(), NodeStyle { color, radius, halo });
    }

    let path: &[String] = trace.map(|t| t.path.as_slice()).unwrap_or(&[]);
    let mut edges = HashMap::with_capacity(graph.edges().len());
    for edge in graph.edges() {
        let style = if on_final_path(path, &edge.from, &edge.to) {
            EdgeStyle::on_path()
        } else {
            EdgeStyle::default_style()
        };
        edges.insert((edge.from.clone(), edge.to.clone()), style);
    }

    Visuals { nodes, edges }
}

// Edges are undirected: (from, to) and (to, from) name the same airway.
fn on_final_path(path: &[String], from: &str, to: &str) -> bool {
    path.windows(2).any(|pair| {
        (pair[0] == from && pair[1] == to) || (pair[0] == to && pair[1] == from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_graph::{sanitize, PathResult};

    fn graph() -> Graph {
        Graph::from_json(
            r#"{
                "nodes": [
                    {"id": "GMMN", "lat": 33.36, "lng": -7.58, "type": 0,
                     "name": "Mohammed V", "city": "Casablanca", "country": "Morocco", "elevation": 656},
                    {"id": "FES", "lat": 33.92, "lng": -4.97, "type": 1,
                     "countryCode": "MA", "countryName": "Morocco"},
                    {"id": "GMFF", "lat": 33.93, "lng": -4.97, "type": 0,
                     "name": "Fes-Sais", "city": "Fes", "country": "Morocco", "elevation": 1900},
                    {"id": "GMTT", "lat": 35.73, "lng": -5.92, "type": 0,
                     "name": "Ibn Batouta", "city": "Tangier", "country": "Morocco", "elevation": 62}
                ],
                "edges": [
                    {"from": "GMMN", "to": "FES", "distance": 120.5},
                    {"from": "GMFF", "to": "FES", "distance": 3.2},
                    {"from": "GMMN", "to": "GMTT", "distance": 180.0}
                ]
            }"#,
        )
        .unwrap()
    }

    fn trace() -> PathResult {
        let raw = r#"{
            "path": ["GMMN", "FES", "GMFF"],
            "totalDistance": 123.7,
            "steps": [
                {
                    "currentNode": "GMMN",
                    "visitedNodes": ["GMMN"],
                    "frontier": ["FES", "GMTT"],
                    "distances": {"GMMN": 0, "FES": 120.5, "GMTT": 180.0, "GMFF": inf},
                    "previousNodes": {"FES": "GMMN", "GMTT": "GMMN"}
                },
                {
                    "currentNode": "FES",
                    "visitedNodes": ["GMMN", "FES"],
                    "frontier": ["GMFF"],
                    "distances": {"GMMN": 0, "FES": 120.5, "GMTT": 180.0, "GMFF": 123.7},
                    "previousNodes": {"FES": "GMMN", "GMTT": "GMMN", "GMFF": "FES"}
                }
            ]
        }"#;
        PathResult::from_json(&sanitize(raw)).unwrap()
    }

    #[test]
    fn selection_wins_over_replay_state() {
        let graph = graph();
        let trace = trace();
        let visuals =
            derive_visuals(&graph, Some(&trace), Some(1), Some("GMMN"), Some("GMFF"));

        // GMMN is visited at step 1 but the start color takes precedence
        assert_eq!(visuals.nodes["GMMN"].color, START);
        // GMFF is in the frontier but the end color takes precedence
        assert_eq!(visuals.nodes["GMFF"].color, END);
        assert_eq!(visuals.nodes["FES"].color, VISITED);
        assert_eq!(visuals.nodes["FES"].halo, Some(VISITED));
        assert_eq!(visuals.nodes["GMTT"].color, AIRPORT);
    }

    #[test]
    fn frontier_nodes_get_the_frontier_color() {
        let graph = graph();
        let trace = trace();
        let visuals = derive_visuals(&graph, Some(&trace), Some(0), None, None);
        assert_eq!(visuals.nodes["FES"].color, FRONTIER);
        assert_eq!(visuals.nodes["GMTT"].color, FRONTIER);
        assert_eq!(visuals.nodes["GMFF"].color, AIRPORT);
    }

    #[test]
    fn defaults_by_kind_without_a_trace() {
        let graph = graph();
        let visuals = derive_visuals(&graph, None, None, None, None);
        assert_eq!(visuals.nodes["GMMN"].color, AIRPORT);
        assert_eq!(visuals.nodes["GMMN"].radius, AIRPORT_RADIUS);
        assert_eq!(visuals.nodes["FES"].color, WAYPOINT);
        assert_eq!(visuals.nodes["FES"].radius, WAYPOINT_RADIUS);
        assert_eq!(visuals.nodes["FES"].halo, None);
    }

    #[test]
    fn path_edges_are_emphasized_in_either_direction() {
        let graph = graph();
        let trace = trace();
        let visuals = derive_visuals(&graph, Some(&trace), Some(1), None, None);

        // path is GMMN -> FES -> GMFF; the second edge is stored reversed
        assert_eq!(
            visuals.edges[&("GMMN".to_string(), "FES".to_string())],
            EdgeStyle::on_path()
        );
        assert_eq!(
            visuals.edges[&("GMFF".to_string(), "FES".to_string())],
            EdgeStyle::on_path()
        );
        assert_eq!(
            visuals.edges[&("GMMN".to_string(), "GMTT".to_string())],
            EdgeStyle::default_style()
        );
    }

    #[test]
    fn unreachable_trace_leaves_all_edges_default() {
        let graph = graph();
        let raw = r#"{
            "path": [],
            "totalDistance": null,
            "steps": [{
                "currentNode": "GMMN",
                "visitedNodes": ["GMMN"],
                "frontier": [],
                "distances": {"GMMN": 0},
                "previousNodes": {}
            }]
        }"#;
        let trace = PathResult::from_json(raw).unwrap();
        let visuals = derive_visuals(&graph, Some(&trace), Some(0), None, None);
        assert!(visuals
            .edges
            .values()
            .all(|style| *style == EdgeStyle::default_style()));
    }

    #[test]
    fn identical_inputs_yield_identical_visuals() {
        let graph = graph();
        let trace = trace();
        for step in [None, Some(0), Some(1), Some(7)] {
            let a = derive_visuals(&graph, Some(&trace), step, Some("GMMN"), None);
            let b = derive_visuals(&graph, Some(&trace), step, Some("GMMN"), None);
            assert_eq!(a, b);
        }
    }
}
