// Errors raised while turning rows into chart series
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// `timeType` names neither a built-in encoding nor a registered conversion
    #[error("series '{series}': unsupported timeType '{time_type}' (no handler {handler} registered)")]
    UnsupportedConversion {
        series: String,
        time_type: String,
        handler: String,
    },

    #[error("series '{series}': invalid configuration: {reason}")]
    Configuration { series: String, reason: String },

    /// A configured column is not present in a row
    #[error("series '{series}': column '{column}' missing from row")]
    MissingColumn { series: String, column: String },

    #[error("series '{series}': cannot convert timestamp {value} from column '{column}'")]
    InvalidTimestamp {
        series: String,
        column: String,
        value: String,
    },
}

impl SeriesError {
    pub fn configuration(series: &str, reason: impl Into<String>) -> Self {
        SeriesError::Configuration {
            series: series.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_column(series: &str, column: &str) -> Self {
        SeriesError::MissingColumn {
            series: series.to_string(),
            column: column.to_string(),
        }
    }

    /// Label of the series the error belongs to
    pub fn series(&self) -> &str {
        match self {
            SeriesError::UnsupportedConversion { series, .. }
            | SeriesError::Configuration { series, .. }
            | SeriesError::MissingColumn { series, .. }
            | SeriesError::InvalidTimestamp { series, .. } => series,
        }
    }
}
