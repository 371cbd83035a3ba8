// Hands the finished options document to the chart widget as JSON
use crate::domain::series::ChartOptions;
use anyhow::Context;
use std::io::Write;

pub fn write_options<W: Write>(mut writer: W, options: &ChartOptions, pretty: bool) -> anyhow::Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, options)
    } else {
        serde_json::to_writer(&mut writer, options)
    };
    written.context("Failed to serialize chart options")?;

    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_compact_options() {
        let options: ChartOptions = serde_json::from_value(json!({
            "title": {"text": "Load"},
            "series": [{"name": "cpu", "data": [[1000, 0.5]]}]
        }))
        .unwrap();

        let mut out = Vec::new();
        write_options(&mut out, &options, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["series"][0]["data"], json!([[1000, 0.5]]));
    }

    #[test]
    fn test_write_pretty_options() {
        let mut out = Vec::new();
        write_options(&mut out, &ChartOptions::default(), true).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"series\": []\n}\n");
    }
}
