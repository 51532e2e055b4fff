//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::args::OutputFormat;

pub const CONFIG_FILE_NAME: &str = "sqlhelper.toml";

/// Configuration for sqlhelper
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// File patterns checked when none are given on the command line
    #[serde(default)]
    pub files: Vec<String>,

    /// SQL dialect ("mysql" or "postgresql")
    #[serde(default)]
    pub dialect: Option<String>,

    /// Output format (human, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Source language, overriding extension detection
    #[serde(default)]
    pub language: Option<String>,

    /// Issue codes to ignore (e.g., ["W0003"])
    #[serde(default)]
    pub disable: Vec<String>,

    /// Default log filter (e.g., "info" or "sqlhelper_core=debug")
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).into_diagnostic()
    }

    /// Try to find and load sqlhelper.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Load the explicit config file, or the nearest one, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::find_and_load()?.unwrap_or_default()),
        }
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(
        mut self,
        files: &[PathBuf],
        dialect: &Option<String>,
        format: &Option<OutputFormat>,
        language: &Option<String>,
        disable: &[String],
    ) -> Self {
        if !files.is_empty() {
            self.files = files.iter().map(|p| p.display().to_string()).collect();
        }

        if dialect.is_some() {
            self.dialect = dialect.clone();
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        if language.is_some() {
            self.language = language.clone();
        }

        if !disable.is_empty() {
            self.disable = disable.to_vec();
        }

        self
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            Some("json") => OutputFormat::Json,
            Some("sarif") => OutputFormat::Sarif,
            _ => OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(
            r#"
            dialect = "postgresql"
            format = "json"
            disable = ["W0003"]
            files = ["queries/**/*.sql"]
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect.as_deref(), Some("postgresql"));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.disable, vec!["W0003".to_string()]);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_args_override_config() {
        let config = Config::from_toml("dialect = \"mysql\"\nformat = \"json\"").unwrap();
        let merged = config.merge_with_args(
            &[PathBuf::from("a.sql")],
            &Some("pg".to_string()),
            &Some(OutputFormat::Sarif),
            &None,
            &[],
        );

        assert_eq!(merged.files, vec!["a.sql".to_string()]);
        assert_eq!(merged.dialect.as_deref(), Some("pg"));
        assert_eq!(merged.output_format(), OutputFormat::Sarif);
    }
}
