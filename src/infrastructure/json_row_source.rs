// JSON file row source
use crate::application::row_source::RowSource;
use crate::domain::row::Row;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Rows stored as JSON, either a list of records or a columnar table:
///
/// ```json
/// {"columns": ["time", "value"], "values": [[1370044800, 12.5]]}
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileRowSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsDocument {
    Records(Vec<Row>),
    Table {
        columns: Vec<String>,
        values: Vec<Vec<Value>>,
    },
}

impl JsonFileRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(text: &str) -> Result<Vec<Row>> {
        let document: RowsDocument =
            serde_json::from_str(text).context("Rows must be a list of objects or a columns/values table")?;

        match document {
            RowsDocument::Records(rows) => Ok(rows),
            RowsDocument::Table { columns, values } => values
                .into_iter()
                .enumerate()
                .map(|(i, value_row)| -> Result<Row> {
                    if value_row.len() != columns.len() {
                        anyhow::bail!(
                            "Row {} has {} values but {} columns are declared",
                            i,
                            value_row.len(),
                            columns.len()
                        );
                    }
                    Ok(columns.iter().cloned().zip(value_row).collect())
                })
                .collect(),
        }
    }
}

#[async_trait]
impl RowSource for JsonFileRowSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read rows from {}", self.path.display()))?;

        let rows = Self::parse(&text)
            .with_context(|| format!("Failed to parse rows in {}", self.path.display()))?;

        tracing::debug!("Loaded {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let rows = JsonFileRowSource::parse(r#"[{"t": 1, "v": 2}, {"t": 2, "v": null}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].numeric("v"), Some(2.0));
        assert!(rows[1].is_null("v"));
    }

    #[test]
    fn test_parse_columnar_table() {
        let rows = JsonFileRowSource::parse(
            r#"{"columns": ["time", "value"], "values": [[1370044800, 12.5], [1370044860, null]]}"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].numeric("time"), Some(1_370_044_800.0));
        assert_eq!(rows[0].numeric("value"), Some(12.5));
        assert!(rows[1].is_null("value"));
    }

    #[test]
    fn test_parse_rejects_ragged_table() {
        let err = JsonFileRowSource::parse(r#"{"columns": ["a", "b"], "values": [[1]]}"#).unwrap_err();
        assert!(err.to_string().contains("Row 0 has 1 values"));
    }

    #[tokio::test]
    async fn test_fetch_rows_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"RankDate": "2013-06-01", "SiteRank12": 87}]"#).unwrap();

        let rows = JsonFileRowSource::new(&path).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].numeric("SiteRank12"), Some(87.0));
    }

    #[tokio::test]
    async fn test_fetch_rows_missing_file() {
        let err = JsonFileRowSource::new("no/such/rows.json")
            .fetch_rows()
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read rows from"));
    }
}
