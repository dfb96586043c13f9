mod map;
mod net;
mod plugins;
mod state;
mod widgets;
mod windows;

use map::App;

pub fn run() -> Result<(), eframe::Error> {
    eframe::run_native(
        "IFR Route Visualizer",
        Default::default(),
        Box::new(|cc| Ok(Box::new(App::new(cc.egui_ctx.clone())))),
    )
}
