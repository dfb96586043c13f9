mod flight_controls;
mod node_info;
mod route_progress;

pub use flight_controls::{ControlsAction, WidgetFlightControls};
pub use node_info::WidgetNodeInfo;
pub use route_progress::WidgetRouteProgress;
