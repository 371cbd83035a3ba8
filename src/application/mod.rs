// Application layer - use cases and ports
pub mod chart_service;
pub mod conversion_registry;
pub mod row_source;
pub mod series_builder;
