// Data-provider port: where chart rows come from
use crate::domain::row::Row;
use async_trait::async_trait;

#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch every row for one chart render, in provider order
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>>;
}

/// Rows already resident in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRowSource {
    rows: Vec<Row>,
}

impl InMemoryRowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RowSource for InMemoryRowSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>> {
        Ok(self.rows.clone())
    }
}
