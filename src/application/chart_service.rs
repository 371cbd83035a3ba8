// Chart service - use case for turning a row source into chart options
use crate::application::row_source::RowSource;
use crate::application::series_builder::SeriesBuilder;
use crate::domain::series::ChartOptions;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    source: Arc<dyn RowSource>,
    builder: SeriesBuilder,
}

impl ChartService {
    pub fn new(source: Arc<dyn RowSource>, builder: SeriesBuilder) -> Self {
        Self { source, builder }
    }

    /// Fetch rows once and return a new options document with built series.
    ///
    /// Keys other than `series` are copied as they are.
    pub async fn render(&self, options: &ChartOptions) -> anyhow::Result<ChartOptions> {
        let rows = self
            .source
            .fetch_rows()
            .await
            .context("Failed to fetch chart rows")?;

        tracing::info!(
            "Building {} series from {} rows",
            options.series.len(),
            rows.len()
        );

        let series = self
            .builder
            .build(&rows, &options.series)
            .context("Failed to build chart series")?;

        Ok(ChartOptions {
            series,
            extra: options.extra.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::row_source::InMemoryRowSource;
    use crate::domain::error::SeriesError;
    use crate::domain::row::Row;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingSource;

    #[async_trait]
    impl RowSource for FailingSource {
        async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>> {
            anyhow::bail!("database unavailable")
        }
    }

    fn options(value: serde_json::Value) -> ChartOptions {
        serde_json::from_value(value).unwrap()
    }

    fn in_memory(value: serde_json::Value) -> Arc<dyn RowSource> {
        Arc::new(InMemoryRowSource::new(serde_json::from_value(value).unwrap()))
    }

    #[tokio::test]
    async fn test_render_replaces_series_data() {
        let service = ChartService::new(
            in_memory(json!([
                {"RankDate": 1370044900, "SiteRank12": 40},
                {"RankDate": 1370044800, "SiteRank12": "35.5"}
            ])),
            SeriesBuilder::default(),
        );
        let input = options(json!({
            "title": {"text": "Site Percentile"},
            "yAxis": {"title": {"text": "Site Rank"}},
            "series": [{"name": "Site percentile", "data": "SiteRank12", "time": "RankDate"}]
        }));

        let rendered = service.render(&input).await.unwrap();

        assert_eq!(
            serde_json::to_value(&rendered).unwrap(),
            json!({
                "title": {"text": "Site Percentile"},
                "yAxis": {"title": {"text": "Site Rank"}},
                "series": [{
                    "name": "Site percentile",
                    "data": [[1370044800000i64, 35.5], [1370044900000i64, 40.0]]
                }]
            })
        );
        // the caller's document is left alone
        assert_eq!(input.series[0].time, Some(json!("RankDate")));
    }

    #[tokio::test]
    async fn test_render_propagates_source_errors() {
        let service = ChartService::new(Arc::new(FailingSource), SeriesBuilder::default());
        let err = service.render(&ChartOptions::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch chart rows");
        assert!(format!("{:#}", err).contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_render_surfaces_unsupported_conversion() {
        let service = ChartService::new(in_memory(json!([{"t": 1, "v": 1}])), SeriesBuilder::default());
        let input = options(json!({
            "series": [{"time": "t", "data": "v", "timeType": "julian"}]
        }));

        let err = service.render(&input).await.unwrap_err();
        let cause = err.downcast_ref::<SeriesError>().unwrap();
        assert!(matches!(cause, SeriesError::UnsupportedConversion { .. }));
    }
}
