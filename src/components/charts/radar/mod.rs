//! Sector comparison radar over the three score axes.
mod component;
pub mod layout;
mod render;
mod state;

pub use component::RadarChart;
