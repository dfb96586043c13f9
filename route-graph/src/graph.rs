use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::GraphError;

/// Variant-specific data for a graph node.
///
/// Nodes arrive with an integer `type` tag: 0 for airports, 1 for waypoints.
/// Modelling the two shapes as an enum keeps consumers from probing for
/// optional fields at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Airport {
        name: String,
        city: String,
        country: String,
        elevation: f64,
    },
    Waypoint {
        country_code: String,
        country_name: String,
    },
}

impl NodeKind {
    pub fn is_airport(&self) -> bool {
        matches!(self, NodeKind::Airport { .. })
    }
}

/// A point in the airway graph: an airport or an intermediate waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: NodeKind,
}

/// An undirected weighted connection between two node ids. The distance is
/// in nautical miles. `(from, to)` and `(to, from)` name the same airway.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    lat: f64,
    lng: f64,
    #[serde(rename = "type")]
    tag: u8,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    elevation: Option<f64>,
    #[serde(default, rename = "countryCode")]
    country_code: Option<String>,
    #[serde(default, rename = "countryName")]
    country_name: Option<String>,
}

#[derive(Deserialize)]
struct RawEdge {
    from: String,
    to: String,
    distance: f64,
}

/// Immutable in-memory representation of the airway graph.
///
/// Built once per successful fetch from the graph service and replaced
/// wholesale on refresh. Nodes keep their payload order (duplicated ids:
/// last write wins, in place) and edges keep insertion order, so iteration
/// is stable across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Parses a `{ nodes, edges }` payload into a graph.
    pub fn from_json(raw: &str) -> Result<Graph, GraphError> {
        let parsed: RawGraph =
            serde_json::from_str(raw).map_err(|e| GraphError::InvalidJson(e.to_string()))?;

        let mut nodes: Vec<Node> = Vec::with_capacity(parsed.nodes.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(parsed.nodes.len());

        for raw_node in parsed.nodes {
            let kind = match raw_node.tag {
                0 => NodeKind::Airport {
                    name: raw_node.name.unwrap_or_default(),
                    city: raw_node.city.unwrap_or_default(),
                    country: raw_node.country.unwrap_or_default(),
                    elevation: raw_node.elevation.unwrap_or_default(),
                },
                1 => NodeKind::Waypoint {
                    country_code: raw_node.country_code.unwrap_or_default(),
                    country_name: raw_node.country_name.unwrap_or_default(),
                },
                tag => {
                    return Err(GraphError::UnknownNodeKind {
                        id: raw_node.id,
                        tag,
                    })
                }
            };

            let node = Node {
                id: raw_node.id,
                lat: raw_node.lat,
                lng: raw_node.lng,
                kind,
            };

            match index.get(&node.id) {
                Some(&slot) => nodes[slot] = node,
                None => {
                    index.insert(node.id.clone(), nodes.len());
                    nodes.push(node);
                }
            }
        }

        let edges = parsed
            .edges
            .into_iter()
            .map(|e| Edge {
                from: e.from,
                to: e.to,
                distance: e.distance,
            })
            .collect();

        Ok(Graph {
            nodes,
            index,
            edges,
        })
    }

    /// Looks up a node by id in O(1).
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// All nodes in payload order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in payload order, stable across calls.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The airports of the graph, sorted by id. Only airports are valid
    /// route endpoints; waypoints are intermediate nodes.
    pub fn airports(&self) -> Vec<&Node> {
        let mut airports: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|node| node.kind.is_airport())
            .collect();
        airports.sort_by(|a, b| a.id.cmp(&b.id));
        airports
    }
}
