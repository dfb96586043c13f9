use route_graph::{Algorithm, Graph, Node, NodeKind};

use crate::state::SelectionState;

/// What the user asked for through the controls panel.
pub enum ControlsAction {
    FindRoute,
    ClearFlight,
}

/// The route submission panel: departure and arrival airport selectors, the
/// algorithm selector, and the find/clear buttons. Only airports are
/// offered; waypoints cannot be route endpoints.
pub struct WidgetFlightControls;

impl WidgetFlightControls {
    pub fn show(
        ctx: &egui::Context,
        graph: &Graph,
        selection: &mut SelectionState,
        busy: bool,
    ) -> Option<ControlsAction> {
        let mut action = None;

        egui::Window::new("Flight Controls")
            .resizable(false)
            .collapsible(true)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                let airports = graph.airports();

                ui.label("Departure Airport");
                Self::airport_combo(ui, "departure_combo", &airports, &mut selection.start);

                ui.add_space(8.0);
                ui.label("Arrival Airport");
                Self::airport_combo(ui, "arrival_combo", &airports, &mut selection.end);

                ui.add_space(8.0);
                ui.label("Pathfinding Algorithm");
                egui::ComboBox::from_id_salt("algorithm_combo")
                    .selected_text(selection.algorithm.label())
                    .show_ui(ui, |ui| {
                        for algorithm in [Algorithm::Dijkstra, Algorithm::Bfs] {
                            ui.selectable_value(
                                &mut selection.algorithm,
                                algorithm,
                                algorithm.label(),
                            );
                        }
                    });

                ui.add_space(12.0);

                let ready = selection.is_complete() && !busy;
                let find_label = if busy { "Finding Route..." } else { "Find Route" };
                if ui
                    .add_enabled(ready, egui::Button::new(find_label))
                    .clicked()
                {
                    action = Some(ControlsAction::FindRoute);
                }

                if ui.button("Clear Flight").clicked() {
                    action = Some(ControlsAction::ClearFlight);
                }
            });

        action
    }

    fn airport_combo(
        ui: &mut egui::Ui,
        id_salt: &str,
        airports: &[&Node],
        selected: &mut Option<String>,
    ) {
        let selected_text = selected.clone().unwrap_or_else(|| "Select airport".to_string());
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for airport in airports {
                    let is_selected = selected.as_deref() == Some(airport.id.as_str());
                    if ui
                        .selectable_label(is_selected, airport_label(airport))
                        .clicked()
                    {
                        *selected = Some(airport.id.clone());
                    }
                }
            });
    }
}

fn airport_label(node: &Node) -> String {
    match &node.kind {
        NodeKind::Airport { name, city, .. } => format!("{} - {}, {}", node.id, name, city),
        NodeKind::Waypoint { .. } => node.id.clone(),
    }
}
