use std::time::Instant;

use egui::{self, RichText};

use replay::ReplayEngine;
use route_graph::PathResult;

/// The replay control panel: current node and total distance, transport
/// buttons (skip back, play/pause, skip forward), a scrub slider over the
/// step sequence, and the final path listing.
pub struct WidgetRouteProgress;

impl WidgetRouteProgress {
    pub fn show(
        ctx: &egui::Context,
        trace: &PathResult,
        engine: &mut ReplayEngine,
        now: Instant,
    ) {
        egui::Window::new("Algorithm Progress")
            .resizable(false)
            .collapsible(true)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .show(ctx, |ui| {
                if let Some(step) = trace.step(engine.current_step()) {
                    ui.label(format!("Current Node: {}", step.current_node));
                }
                match trace.total_distance {
                    Some(distance) => {
                        ui.label(format!("Distance: {:.2} nautical miles", distance));
                    }
                    None => {
                        ui.label("Destination unreachable");
                    }
                }

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button("⏮").clicked() {
                        engine.step_to_start();
                    }
                    let transport = if engine.is_playing() { "⏸" } else { "▶" };
                    if ui.button(transport).clicked() {
                        engine.toggle(now);
                    }
                    if ui.button("⏭").clicked() {
                        engine.step_to_end();
                    }
                });

                let mut index = engine.current_step();
                let last = engine.step_count() - 1;
                if ui
                    .add(egui::Slider::new(&mut index, 0..=last).text("step"))
                    .changed()
                {
                    engine.seek(index);
                }

                if trace.is_reachable() {
                    ui.add_space(8.0);
                    ui.label(RichText::new("Path").strong());
                    ui.label(RichText::new(trace.path.join(" → ")).monospace());
                }
            });
    }
}
