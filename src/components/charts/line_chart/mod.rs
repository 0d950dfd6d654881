//! Year series line chart with nearest-point hover.
mod component;
mod render;
pub mod series;
mod state;

pub use component::LineChart;
