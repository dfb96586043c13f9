//! Playback of a recorded pathfinding trace: the replay state machine that
//! owns the current step index, and the pure presentation pass that turns
//! graph + trace + replay position into per-node and per-edge styles.

mod engine;
mod visuals;

pub use engine::{PlaybackStatus, ReplayEngine, DEFAULT_CADENCE};
pub use visuals::{derive_visuals, EdgeStyle, NodeStyle, Rgb, Visuals};
