use egui::{Response, Stroke};
use walkers::{Plugin, Position, Projector};

use replay::Visuals;
use route_graph::Graph;

use super::to_color32;

/// Draws every edge of the airway graph as a line between its endpoints,
/// using the styles derived for the current replay frame: edges on the
/// final path are emphasized, all others are faint.
pub struct Airways<'a> {
    graph: &'a Graph,
    visuals: &'a Visuals,
}

impl<'a> Airways<'a> {
    pub fn new(graph: &'a Graph, visuals: &'a Visuals) -> Self {
        Self { graph, visuals }
    }
}

impl Plugin for Airways<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for edge in self.graph.edges() {
            let (Some(from), Some(to)) = (
                self.graph.find_node(&edge.from),
                self.graph.find_node(&edge.to),
            ) else {
                continue;
            };
            let Some(style) = self
                .visuals
                .edges
                .get(&(edge.from.clone(), edge.to.clone()))
            else {
                continue;
            };

            let a = projector
                .project(Position::from_lat_lon(from.lat, from.lng))
                .to_pos2();
            let b = projector
                .project(Position::from_lat_lon(to.lat, to.lng))
                .to_pos2();

            let color = to_color32(style.color).gamma_multiply(style.opacity);
            ui.painter()
                .line_segment([a, b], Stroke::new(style.width, color));
        }
    }
}
