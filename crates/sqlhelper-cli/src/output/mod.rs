//! Output formatting

use std::collections::HashMap;

use miette::{LabeledSpan, MietteDiagnostic, NamedSource};
use sqlhelper_core::{DiagnosticStore, Issue, Severity, SqlDialect};

use crate::args::OutputFormat;

/// Output formatter for analysis results
pub struct OutputFormatter {
    format: OutputFormat,
    dialect: SqlDialect,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, dialect: SqlDialect) -> Self {
        Self { format, dialect }
    }

    /// Print every document in the store in the configured format.
    ///
    /// `sources` maps document names to the text that was analyzed, which
    /// is what issue spans point into.
    pub fn print_report(&self, store: &DiagnosticStore, sources: &HashMap<String, String>) {
        match self.format {
            OutputFormat::Human => {
                for (file_name, issues) in store.iter() {
                    let source = sources.get(file_name).map(String::as_str).unwrap_or("");
                    self.print_human(file_name, issues, source);
                }
            }
            OutputFormat::Json => self.print_json(store),
            OutputFormat::Sarif => self.print_sarif(store),
        }
    }

    fn print_human(&self, file_name: &str, issues: &[Issue], source: &str) {
        for issue in issues {
            let severity = match issue.severity {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
            };

            let diagnostic = MietteDiagnostic::new(format!(
                "[{}] {}",
                self.dialect.tag(),
                issue.kind.title()
            ))
            .with_code(issue.code())
            .with_severity(severity)
            .with_help(issue.suggestion.clone())
            .with_label(LabeledSpan::at(issue.span, issue.description.clone()));

            let report = miette::Report::new(diagnostic)
                .with_source_code(NamedSource::new(file_name, source.to_string()));
            eprintln!("{:?}", report);
        }
    }

    fn print_json(&self, store: &DiagnosticStore) {
        let files: Vec<serde_json::Value> = store
            .iter()
            .map(|(file_name, issues)| {
                serde_json::json!({
                    "file": file_name,
                    "issues": issues
                })
            })
            .collect();

        let output = serde_json::json!({
            "dialect": self.dialect.to_string(),
            "files": files
        });
        print_pretty(&output);
    }

    fn print_sarif(&self, store: &DiagnosticStore) {
        let results: Vec<serde_json::Value> = store
            .iter()
            .flat_map(|(file_name, issues)| {
                issues.iter().map(move |issue| {
                    serde_json::json!({
                        "ruleId": issue.code(),
                        "level": match issue.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        },
                        "message": {
                            "text": format!("{}: {}", issue.kind.title(), issue.description)
                        },
                        "locations": [{
                            "physicalLocation": {
                                "artifactLocation": {
                                    "uri": file_name
                                },
                                "region": {
                                    "startLine": issue.span.line,
                                    "startColumn": issue.span.column
                                }
                            }
                        }]
                    })
                })
            })
            .collect();

        let sarif = serde_json::json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": "sqlhelper",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                },
                "results": results
            }]
        });

        print_pretty(&sarif);
    }
}

fn print_pretty(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("failed to serialize output: {}", e),
    }
}
