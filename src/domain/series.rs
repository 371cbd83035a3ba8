// Series domain models: the declarative spec and the chart-ready output
use super::error::SeriesError;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One entry of the chart's `series` option.
///
/// `time` and `data` stay raw JSON: a spec without a usable `time` column is
/// handed to the chart untouched, so its `data` may be anything the chart accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_data_points: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_nulls: Option<bool>,
    /// Everything else (name, type, color, ...) passes through to the chart
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesSpec {
    /// Label used in logs and errors: the `name` option, else `#index`
    pub fn label(&self, index: usize) -> String {
        match self.extra.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => format!("#{}", index),
        }
    }

    pub fn hash_mode(&self) -> bool {
        self.hash_data_points.unwrap_or(false)
    }

    pub fn removes_nulls(&self) -> bool {
        self.remove_nulls.unwrap_or(false)
    }

    /// Time column name when this spec should be built from rows.
    ///
    /// `Ok(None)` means passthrough: no time, a null time, an array of literal
    /// times, or no `data`.
    pub fn time_column(&self, label: &str) -> Result<Option<&str>, SeriesError> {
        if self.data.as_ref().is_none_or(Value::is_null) {
            return Ok(None);
        }
        match &self.time {
            None | Some(Value::Null) | Some(Value::Array(_)) => Ok(None),
            Some(Value::String(column)) => Ok(Some(column)),
            Some(other) => Err(SeriesError::configuration(
                label,
                format!("time must be a column name, got {}", other),
            )),
        }
    }
}

/// Which row columns feed the value part of each data point.
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumns {
    Single(String),
    List(Vec<String>),
    /// Output key to column, in configuration order
    Named(Vec<(String, String)>),
}

impl DataColumns {
    pub fn from_value(value: &Value, label: &str) -> Result<Self, SeriesError> {
        match value {
            Value::String(column) => Ok(DataColumns::Single(column.clone())),
            Value::Array(items) => {
                let columns = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            SeriesError::configuration(
                                label,
                                format!("data list entries must be column names, got {}", item),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if columns.is_empty() {
                    return Err(SeriesError::configuration(label, "data list is empty"));
                }
                Ok(DataColumns::List(columns))
            }
            Value::Object(map) => {
                let columns = map
                    .iter()
                    .map(|(key, item)| match item.as_str() {
                        Some(column) => Ok((key.clone(), column.to_string())),
                        None => Err(SeriesError::configuration(
                            label,
                            format!("data key '{}' must map to a column name, got {}", key, item),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if columns.is_empty() {
                    return Err(SeriesError::configuration(label, "data mapping is empty"));
                }
                if columns.iter().any(|(key, _)| key == "x") {
                    return Err(SeriesError::configuration(
                        label,
                        "data key 'x' is reserved for the timestamp",
                    ));
                }
                Ok(DataColumns::Named(columns))
            }
            other => Err(SeriesError::configuration(
                label,
                format!("data must be a column name, list or mapping, got {}", other),
            )),
        }
    }

    /// Column consulted by `removeNulls`
    pub fn null_filter_column(&self, label: &str) -> Result<&str, SeriesError> {
        match self {
            DataColumns::Single(column) => Ok(column.as_str()),
            DataColumns::List(columns) => Ok(columns[0].as_str()),
            DataColumns::Named(columns) => columns
                .iter()
                .find(|(key, _)| key == "y")
                .map(|(_, column)| column.as_str())
                .ok_or_else(|| {
                    SeriesError::configuration(label, "removeNulls on a data mapping needs a 'y' key")
                }),
        }
    }
}

/// A chart-ready point.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPoint {
    /// `[time, v1, v2, ...]`
    Positional { time: f64, values: Vec<Option<f64>> },
    /// `{k1: v1, ..., x: time}`
    Named {
        time: f64,
        values: Vec<(String, Option<f64>)>,
    },
}

impl DataPoint {
    pub fn timestamp(&self) -> f64 {
        match self {
            DataPoint::Positional { time, .. } | DataPoint::Named { time, .. } => *time,
        }
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        match self {
            DataPoint::Positional { values, .. } => key
                .parse::<usize>()
                .ok()
                .and_then(|i| values.get(i).copied().flatten()),
            DataPoint::Named { values, .. } => values
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| *v),
        }
    }
}

/// Epoch milliseconds; whole values go out as JSON integers
struct Millis(f64);

impl Serialize for Millis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataPoint::Positional { time, values } => {
                let mut seq = serializer.serialize_seq(Some(values.len() + 1))?;
                seq.serialize_element(&Millis(*time))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            DataPoint::Named { time, values } => {
                let mut map = serializer.serialize_map(Some(values.len() + 1))?;
                for (key, value) in values {
                    map.serialize_entry(key, value)?;
                }
                map.serialize_entry("x", &Millis(*time))?;
                map.end()
            }
        }
    }
}

/// Data points of one series, ascending by timestamp once sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(pub Vec<DataPoint>);

impl Series {
    /// Stable ascending sort by timestamp
    pub fn sort_by_time(&mut self) {
        self.0
            .sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The chart widget's options document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
