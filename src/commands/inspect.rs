use crate::commands::read_input;
use crate::config::DisplayConfig;
use crate::formatting::format_header;
use crate::tui::widgets::DataDisplayDialog;
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

const STDIN_TITLE: &str = "stdin";

/// Parse `input` as a JSON object
pub fn parse_mapping(input: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Expected a JSON object at the top level, found {}",
            crate::tui::widgets::DataValue::classify(other).type_description()
        ),
    }
}

/// Lay out `data` the way the inspection dialog does, as plain text
pub fn format_inspection(title: &str, data: Map<String, Value>, display: &DisplayConfig) -> String {
    let dialog = DataDisplayDialog::new(title, data, || {});
    let mut output = format_header(title, true, display);
    for line in dialog.plain_lines(&display.box_chars) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

pub fn run(file: Option<&Path>, title: Option<String>, display: &DisplayConfig) -> Result<()> {
    let input = read_input(file)?;
    let data = parse_mapping(&input)?;
    let title = title.unwrap_or_else(|| match file {
        Some(path) if path != Path::new("-") => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        _ => STDIN_TITLE.to_string(),
    });
    tracing::debug!("Inspecting {} key(s) from {}", data.len(), title);

    print!("{}", format_inspection(&title, data, display));
    Ok(())
}
