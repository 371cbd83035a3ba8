use crate::domain::series::ChartOptions;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub source: SourceSettings,
    pub chart: ChartSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    /// JSON file holding the rows
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    /// Widget options document (TOML or JSON)
    pub options: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub pretty: bool,
}

/// Load settings from a file, overridable through `CHART__*` environment variables
pub fn load_settings(path: &str) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix("CHART").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Load the chart options document; `.json` files are read as JSON, anything else as TOML
pub fn load_chart_options(path: impl AsRef<Path>) -> anyhow::Result<ChartOptions> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart options from {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse chart options in {}", path.display()))
    } else {
        parse_chart_options(&text)
            .with_context(|| format!("Failed to parse chart options in {}", path.display()))
    }
}

/// Parse a TOML chart options document
pub fn parse_chart_options(text: &str) -> anyhow::Result<ChartOptions> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_chart_options() {
        let text = r#"
            title = { text = "Site Percentile" }

            [[series]]
            name = "Site percentile"
            data = "SiteRank12"
            time = "RankDate"
            timeType = "date"

            [[series]]
            name = "Range"
            type = "arearange"
            time = "RankDate"
            data = ["Column1", "Column2"]
        "#;

        let options = parse_chart_options(text).unwrap();

        assert_eq!(options.series.len(), 2);
        assert_eq!(options.series[0].time_type.as_deref(), Some("date"));
        assert_eq!(options.series[1].data, Some(json!(["Column1", "Column2"])));
        assert_eq!(options.series[1].extra.get("type"), Some(&json!("arearange")));
        assert_eq!(options.extra.get("title"), Some(&json!({"text": "Site Percentile"})));
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[source]\npath = \"rows.json\"\n\n[chart]\noptions = \"options.toml\"\n\n[output]\npretty = true"
        )
        .unwrap();

        let settings = load_settings(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.source.path, "rows.json");
        assert_eq!(settings.chart.options, "options.toml");
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_load_json_chart_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"series": [{"data": "v", "time": "t"}], "chart": {"zoomType": "x"}}"#)
            .unwrap();

        let options = load_chart_options(&path).unwrap();

        assert_eq!(options.series[0].time, Some(json!("t")));
        assert_eq!(options.extra.get("chart"), Some(&json!({"zoomType": "x"})));
    }

    #[test]
    fn test_load_missing_options_file() {
        let err = load_chart_options("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
