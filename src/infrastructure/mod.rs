// Infrastructure layer - configuration and data-provider adapters
pub mod config;
pub mod json_row_source;
