// Registry of caller-supplied timestamp conversions
use crate::domain::error::SeriesError;
use crate::domain::row::Row;
use crate::domain::timestamp::{handler_name, TimeType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Converts the time column of a row into epoch milliseconds.
///
/// Receives the row and the configured time column name.
pub type TimeConversion = Arc<dyn Fn(&Row, &str) -> Result<f64, SeriesError> + Send + Sync>;

/// Custom `timeType` tags and the conversions they dispatch to.
#[derive(Clone, Default)]
pub struct ConversionRegistry {
    conversions: HashMap<String, TimeConversion>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion for `tag`; built-in tags cannot be replaced
    pub fn register<F>(&mut self, tag: impl Into<String>, conversion: F) -> Result<(), SeriesError>
    where
        F: Fn(&Row, &str) -> Result<f64, SeriesError> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if TimeType::is_builtin(&tag) {
            return Err(SeriesError::configuration(
                &tag,
                format!("timeType '{}' is built in and cannot be re-registered", tag),
            ));
        }
        tracing::debug!("Registering time conversion {} for '{}'", handler_name(&tag), tag);
        self.conversions.insert(tag, Arc::new(conversion));
        Ok(())
    }

    pub fn with<F>(mut self, tag: impl Into<String>, conversion: F) -> Result<Self, SeriesError>
    where
        F: Fn(&Row, &str) -> Result<f64, SeriesError> + Send + Sync + 'static,
    {
        self.register(tag, conversion)?;
        Ok(self)
    }

    pub fn get(&self, tag: &str) -> Option<&TimeConversion> {
        self.conversions.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.conversions.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.conversions.keys().collect();
        tags.sort();
        f.debug_struct("ConversionRegistry").field("tags", &tags).finish()
    }
}
