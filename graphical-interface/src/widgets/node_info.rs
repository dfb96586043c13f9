use egui::{self, RichText};

use route_graph::{Graph, NodeKind};

use crate::state::SelectionState;

/// A popup window with the details of a clicked node. Airports additionally
/// offer shortcuts to use them as route endpoints.
pub struct WidgetNodeInfo {
    pub node_id: String,
}

impl WidgetNodeInfo {
    pub fn new(node_id: String) -> Self {
        Self { node_id }
    }

    /// Shows the popup; returns `false` once the user closed it.
    pub fn show(
        &self,
        ctx: &egui::Context,
        graph: &Graph,
        selection: &mut SelectionState,
    ) -> bool {
        let Some(node) = graph.find_node(&self.node_id) else {
            return false;
        };
        let mut open = true;

        egui::Window::new(format!("Node {}", node.id))
            .resizable(false)
            .collapsible(true)
            .open(&mut open)
            .fixed_pos([20.0, 20.0])
            .show(ctx, |ui| match &node.kind {
                NodeKind::Airport {
                    name,
                    city,
                    country,
                    elevation,
                } => {
                    ui.label(RichText::new(name).size(16.0).strong());
                    ui.label(format!("{}, {}", city, country));
                    ui.label(format!("Elevation: {}ft", elevation));
                    ui.label(RichText::new("Airport").weak());

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Set as departure").clicked() {
                            selection.set_start(&node.id);
                        }
                        if ui.button("Set as arrival").clicked() {
                            selection.set_end(&node.id);
                        }
                    });
                }
                NodeKind::Waypoint {
                    country_code,
                    country_name,
                } => {
                    ui.label(format!("{} - {}", country_code, country_name));
                    ui.label(RichText::new("Waypoint").weak());
                }
            });

        open
    }
}
