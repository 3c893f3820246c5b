//! Output formatting module
//!
//! Records are rendered as table, CSV, JSON or YAML and written to stdout or
//! to the file given with `--output`.

mod csv;
mod table;

use log::debug;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::error::{DwcError, Result};

pub use self::csv::{escape_csv, to_csv};
pub use self::table::to_table;

/// Record that can be printed as a row
///
/// JSON and YAML use the `Serialize` form; table and CSV use `headers`/`row`.
pub trait Tabular: Serialize {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Where and how to print
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub no_header: bool,
    pub file: Option<PathBuf>,
}

impl From<&Cli> for OutputOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            format: cli.output_format,
            no_header: cli.no_header,
            file: cli.output.clone(),
        }
    }
}

/// Render records in the requested format
pub fn render<T: Tabular>(records: &[T], options: &OutputOptions) -> Result<String> {
    match options.format {
        OutputFormat::Table => Ok(to_table(records, options.no_header)),
        OutputFormat::Csv => Ok(to_csv(records, options.no_header)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => serde_yml::to_string(records)
            .map_err(|e| DwcError::Json(format!("YAML serialization failed: {}", e))),
    }
}

/// Render records and write them to stdout or the output file
pub fn write_output<T: Tabular>(records: &[T], options: &OutputOptions) -> Result<()> {
    let text = render(records, options)?;
    match &options.file {
        Some(path) => {
            std::fs::write(path, format!("{}\n", text.trim_end()))?;
            debug!("Wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize)]
    pub struct Sample {
        pub name: String,
        pub label: String,
    }

    impl Sample {
        pub fn new(name: &str, label: &str) -> Self {
            Self {
                name: name.to_string(),
                label: label.to_string(),
            }
        }
    }

    impl Tabular for Sample {
        fn headers() -> &'static [&'static str] {
            &["NAME", "LABEL"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.name.clone(), self.label.clone()]
        }
    }

    fn options(format: OutputFormat) -> OutputOptions {
        OutputOptions {
            format,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_json() {
        let out = render(&[Sample::new("SALES", "Sales")], &options(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "SALES");
    }

    #[test]
    fn test_render_yaml() {
        let out = render(&[Sample::new("SALES", "Sales")], &options(OutputFormat::Yaml)).unwrap();
        assert!(out.contains("name: SALES"));
        assert!(out.contains("label: Sales"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let opts = OutputOptions {
            format: OutputFormat::Csv,
            no_header: false,
            file: Some(path.clone()),
        };

        write_output(&[Sample::new("HR", "Human Resources")], &opts).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, "NAME,LABEL\nHR,Human Resources\n");
    }
}
