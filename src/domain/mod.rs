// Domain layer - Readings, datasets and chart ranges
pub mod chart;
pub mod dataset;
pub mod reading;
