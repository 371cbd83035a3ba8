// Main entry point - wires configuration, row source and output
use std::sync::Arc;

use chart_series::application::chart_service::ChartService;
use chart_series::application::series_builder::SeriesBuilder;
use chart_series::infrastructure::config::{load_chart_options, load_settings};
use chart_series::infrastructure::json_row_source::JsonFileRowSource;
use chart_series::presentation::output::write_options;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the options document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let settings_path = std::env::args().nth(1).unwrap_or_else(|| "config/chart".to_string());
    let settings = load_settings(&settings_path)?;
    let options = load_chart_options(&settings.chart.options)?;

    // Create row source and service
    let source = Arc::new(JsonFileRowSource::new(settings.source.path));
    let service = ChartService::new(source, SeriesBuilder::default());

    let rendered = service.render(&options).await?;
    write_options(std::io::stdout().lock(), &rendered, settings.output.pretty)?;

    Ok(())
}
