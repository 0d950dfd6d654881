//! Zoomable sunburst over a value hierarchy.

mod component;
pub mod partition;
mod render;
mod state;
pub mod zoom;

pub use component::SunburstChart;
