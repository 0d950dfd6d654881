//! Canvas charts and the helpers they share.
pub mod bubble;
pub mod canvas;
pub mod donut;
pub mod line_chart;
pub mod palette;
pub mod radar;
pub mod scale;
pub mod sunburst;
pub mod tooltip;
pub mod transition;
