//! Top-N topic donut.
mod component;
pub mod layout;
mod render;
mod state;

pub use component::DonutChart;
