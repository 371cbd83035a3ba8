// Domain layer - rows, series specs and chart-ready points
pub mod error;
pub mod row;
pub mod series;
pub mod timestamp;
