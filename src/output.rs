use log::info;
use std::{fs, io::Write, path::Path};

use crate::error::SliceResult;
use crate::models::FilteredDocument;

/// Serialization used for the filtered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render the document in full before anything is written
pub fn render(doc: &FilteredDocument, format: OutputFormat) -> SliceResult<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(doc)?,
        OutputFormat::Yaml => serde_yaml::to_string(doc)?,
    };
    Ok(rendered)
}

/// Write the rendered document to `path`, or to `out` when no path is given.
/// A confirmation line goes to `out` after a file write.
pub fn emit<W: Write>(
    doc: &FilteredDocument,
    format: OutputFormat,
    path: Option<&Path>,
    out: &mut W,
) -> SliceResult<()> {
    let rendered = render(doc, format)?;

    match path {
        Some(path) => {
            fs::write(path, &rendered)?;
            info!("Wrote {} bytes to {}", rendered.len(), path.display());
            writeln!(out, "Result saved to {}", path.display())?;
        }
        None => {
            writeln!(out, "{}", rendered)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilteredComponents;
    use indexmap::IndexMap;
    use serde_json::json;
    use tempfile::tempdir;

    fn minimal() -> FilteredDocument {
        FilteredDocument {
            openapi: "3.0.0".to_string(),
            info: json!({ "title": "T", "version": "1" }),
            security: Vec::new(),
            paths: IndexMap::new(),
            components: FilteredComponents::default(),
        }
    }

    #[test]
    fn test_render_json_field_order_and_indent() {
        let json = render(&minimal(), OutputFormat::Json).unwrap();
        let expected = r#"{
  "openapi": "3.0.0",
  "info": {
    "title": "T",
    "version": "1"
  },
  "security": [],
  "paths": {},
  "components": {
    "schemas": {},
    "securitySchemes": {}
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&minimal(), OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("openapi:"));
        assert!(yaml.contains("securitySchemes:"));
        let parsed: FilteredDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, minimal());
    }

    #[test]
    fn test_emit_to_stdout_writer() {
        let mut out = Vec::new();
        emit(&minimal(), OutputFormat::Json, None, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let parsed: FilteredDocument = serde_json::from_str(&printed).unwrap();
        assert_eq!(parsed, minimal());
    }

    #[test]
    fn test_emit_to_file_prints_confirmation() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("filtered.json");

        let mut out = Vec::new();
        emit(&minimal(), OutputFormat::Json, Some(&file_path), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, format!("Result saved to {}\n", file_path.display()));

        let written = fs::read_to_string(&file_path).unwrap();
        let parsed: FilteredDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, minimal());
    }
}
