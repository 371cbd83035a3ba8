//! Reshapes tabular rows into the `series` option of a Highstock chart.
//!
//! Each series spec names a time column and one or more value columns; the
//! builder turns every row into a `[time, value...]` tuple or an `{x: time, ...}`
//! record and sorts the result by time.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::chart_service::ChartService;
pub use application::conversion_registry::ConversionRegistry;
pub use application::row_source::{InMemoryRowSource, RowSource};
pub use application::series_builder::SeriesBuilder;
pub use domain::error::SeriesError;
pub use domain::row::Row;
pub use domain::series::{ChartOptions, DataColumns, DataPoint, Series, SeriesSpec};
