// Series builder - reshapes data-provider rows into chart series
use crate::application::conversion_registry::ConversionRegistry;
use crate::domain::error::SeriesError;
use crate::domain::row::{coerce_f64, Row};
use crate::domain::series::{DataColumns, DataPoint, Series, SeriesSpec};
use crate::domain::timestamp::{handler_name, parse_date_seconds, TimeType};
use serde_json::Value;

/// Builds chart series from rows according to each spec's column mapping.
///
/// Building never mutates its inputs: every call returns a fresh spec list
/// in which timed specs carry their computed series in `data` and no `time`.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    conversions: ConversionRegistry,
}

/// A spec resolved against its configuration, ready to consume rows
struct Plan<'a> {
    label: String,
    time_column: &'a str,
    time_type: TimeType,
    columns: DataColumns,
    hash_mode: bool,
    null_filter: Option<String>,
}

impl SeriesBuilder {
    pub fn new(conversions: ConversionRegistry) -> Self {
        Self { conversions }
    }

    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    /// Build every spec; the first failing spec fails the whole build
    pub fn build(&self, rows: &[Row], specs: &[SeriesSpec]) -> Result<Vec<SeriesSpec>, SeriesError> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| self.build_spec(rows, spec, index))
            .collect()
    }

    /// Build every spec independently, one result per spec
    pub fn build_each(
        &self,
        rows: &[Row],
        specs: &[SeriesSpec],
    ) -> Vec<Result<SeriesSpec, SeriesError>> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| self.build_spec(rows, spec, index))
            .collect()
    }

    fn build_spec(&self, rows: &[Row], spec: &SeriesSpec, index: usize) -> Result<SeriesSpec, SeriesError> {
        let Some(plan) = self.plan(spec, spec.label(index))? else {
            tracing::debug!("Series {} has no time column, passing through", spec.label(index));
            return Ok(spec.clone());
        };

        let series = self.collect(rows, &plan)?;

        let mut built = spec.clone();
        built.time = None;
        built.data = Some(series.to_value());
        Ok(built)
    }

    /// Series for a single spec; a passthrough spec yields an empty series
    pub fn build_series(&self, rows: &[Row], spec: &SeriesSpec) -> Result<Series, SeriesError> {
        match self.plan(spec, spec.label(0))? {
            Some(plan) => self.collect(rows, &plan),
            None => Ok(Series::default()),
        }
    }

    fn plan<'a>(&self, spec: &'a SeriesSpec, label: String) -> Result<Option<Plan<'a>>, SeriesError> {
        let Some(time_column) = spec.time_column(&label)? else {
            return Ok(None);
        };
        let Some(data) = &spec.data else {
            return Ok(None);
        };
        let columns = DataColumns::from_value(data, &label)?;

        let time_type = TimeType::parse(spec.time_type.as_deref());
        if let TimeType::Custom(tag) = &time_type {
            if !self.conversions.contains(tag) {
                return Err(SeriesError::UnsupportedConversion {
                    series: label,
                    time_type: tag.clone(),
                    handler: handler_name(tag),
                });
            }
        }

        let null_filter = if spec.removes_nulls() {
            Some(columns.null_filter_column(&label)?.to_string())
        } else {
            None
        };

        Ok(Some(Plan {
            label,
            time_column,
            time_type,
            columns,
            hash_mode: spec.hash_mode(),
            null_filter,
        }))
    }

    fn collect(&self, rows: &[Row], plan: &Plan<'_>) -> Result<Series, SeriesError> {
        let mut points = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for row in rows {
            if let Some(column) = &plan.null_filter {
                if row.is_null(column) {
                    dropped += 1;
                    continue;
                }
            }

            let time = self.convert_timestamp(row, plan)?;
            points.push(extract_values(row, plan, time)?);
        }

        let mut series = Series(points);
        series.sort_by_time();

        if dropped > 0 {
            tracing::debug!("Series {}: dropped {} rows with null values", plan.label, dropped);
        }
        tracing::debug!("Series {}: built {} points from {} rows", plan.label, series.len(), rows.len());

        Ok(series)
    }

    /// Epoch milliseconds for a row according to the plan's time encoding
    fn convert_timestamp(&self, row: &Row, plan: &Plan<'_>) -> Result<f64, SeriesError> {
        let column = plan.time_column;
        let value = row
            .get(column)
            .ok_or_else(|| SeriesError::missing_column(&plan.label, column))?;

        let invalid = || SeriesError::InvalidTimestamp {
            series: plan.label.clone(),
            column: column.to_string(),
            value: value.to_string(),
        };

        match &plan.time_type {
            TimeType::Mysql => coerce_f64(value).map(|secs| secs * 1000.0).ok_or_else(invalid),
            TimeType::Plain => coerce_f64(value).ok_or_else(invalid),
            TimeType::Date => match value {
                Value::String(text) => parse_date_seconds(text)
                    .map(|secs| secs as f64 * 1000.0)
                    .ok_or_else(invalid),
                _ => Err(invalid()),
            },
            TimeType::Custom(tag) => match self.conversions.get(tag) {
                Some(conversion) => conversion(row, column),
                None => Err(SeriesError::UnsupportedConversion {
                    series: plan.label.clone(),
                    time_type: tag.clone(),
                    handler: handler_name(tag),
                }),
            },
        }
    }
}

fn extract_values(row: &Row, plan: &Plan<'_>, time: f64) -> Result<DataPoint, SeriesError> {
    let required = |column: &str| -> Result<Option<f64>, SeriesError> {
        match row.get(column) {
            Some(value) => Ok(coerce_f64(value)),
            None => Err(SeriesError::missing_column(&plan.label, column)),
        }
    };

    let point = match &plan.columns {
        // A lone column tolerates absence: the point just carries a gap
        DataColumns::Single(column) => DataPoint::Positional {
            time,
            values: vec![row.numeric(column)],
        },
        DataColumns::List(columns) if plan.hash_mode => DataPoint::Named {
            time,
            values: columns
                .iter()
                .enumerate()
                .map(|(i, column)| required(column).map(|value| (i.to_string(), value)))
                .collect::<Result<_, _>>()?,
        },
        DataColumns::List(columns) => DataPoint::Positional {
            time,
            values: columns
                .iter()
                .map(|column| required(column))
                .collect::<Result<_, _>>()?,
        },
        DataColumns::Named(columns) if plan.hash_mode => DataPoint::Named {
            time,
            values: columns
                .iter()
                .map(|(key, column)| required(column).map(|value| (key.clone(), value)))
                .collect::<Result<_, _>>()?,
        },
        DataColumns::Named(columns) => DataPoint::Positional {
            time,
            values: columns
                .iter()
                .map(|(_, column)| required(column))
                .collect::<Result<_, _>>()?,
        },
    };

    Ok(point)
}
