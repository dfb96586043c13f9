mod airways;
mod nodes;

pub use airways::Airways;
pub use nodes::Nodes;

use egui::Color32;
use replay::Rgb;

fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}
