//! Categorical scatter with sized bubbles, a legend and region pinning.
mod component;
pub mod layout;
mod render;
pub mod state;

pub use component::BubbleChart;
