pub mod charts;
pub mod dropdown;
