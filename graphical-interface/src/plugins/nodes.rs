use std::{cell::RefCell, rc::Rc};

use egui::{Color32, Rect, Response, Sense, Stroke, Vec2};
use walkers::{Plugin, Position, Projector};

use replay::Visuals;
use route_graph::Graph;

use super::to_color32;
use crate::state::SelectionState;

/// Draws every graph node as a colored marker; visited and frontier nodes
/// of the current replay step get a translucent halo. Clicking a marker
/// toggles its detail popup.
pub struct Nodes<'a> {
    graph: &'a Graph,
    visuals: &'a Visuals,
    selection: Rc<RefCell<SelectionState>>,
}

impl<'a> Nodes<'a> {
    pub fn new(
        graph: &'a Graph,
        visuals: &'a Visuals,
        selection: Rc<RefCell<SelectionState>>,
    ) -> Self {
        Self {
            graph,
            visuals,
            selection,
        }
    }
}

impl Plugin for Nodes<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for node in self.graph.nodes() {
            let Some(style) = self.visuals.nodes.get(&node.id) else {
                continue;
            };

            let screen_position = projector.project(Position::from_lat_lon(node.lat, node.lng));
            let center = screen_position.to_pos2();

            if let Some(halo) = style.halo {
                ui.painter()
                    .circle_filled(center, style.radius * 2.2, to_color32(halo).gamma_multiply(0.2));
            }

            ui.painter().circle(
                center,
                style.radius,
                to_color32(style.color),
                Stroke::new(2.0, Color32::WHITE),
            );

            let clickable_area =
                Rect::from_center_size(center, Vec2::splat(style.radius * 2.0 + 4.0));
            let response = ui.allocate_rect(clickable_area, Sense::click());

            if response.clicked() {
                self.selection.borrow_mut().toggle_inspection(node);
            }
        }
    }
}
