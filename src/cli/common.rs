//! Common CLI types shared across commands

use clap::{Args, ValueEnum};

use crate::dwc::resolver::NamePatterns;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table (default)
    #[default]
    Table,
    /// Comma-separated values
    Csv,
    /// JSON array
    Json,
    /// YAML format
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Optional list of name patterns plus the wildcard switch
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Names to match; all when omitted
    pub names: Vec<String>,

    /// Match names by containment instead of equality
    #[arg(short, long)]
    pub wildcard: bool,
}

impl PatternArgs {
    pub fn patterns(&self) -> NamePatterns {
        if self.names.is_empty() {
            NamePatterns::all()
        } else {
            NamePatterns::from(self.names.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        names: PatternArgs,
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_no_names_means_all() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.names.patterns().is_all());
        assert!(!cli.names.wildcard);
    }

    #[test]
    fn test_names_and_wildcard() {
        let cli = TestCli::parse_from(["test", "SALES", "HR", "-w"]);
        assert_eq!(
            cli.names.patterns().as_list().unwrap(),
            &["SALES".to_string(), "HR".to_string()]
        );
        assert!(cli.names.wildcard);
    }
}
