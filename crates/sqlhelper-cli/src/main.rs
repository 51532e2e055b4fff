//! sqlhelper CLI - heuristic SQL checker, fixer and formatter

mod args;
mod config;
mod output;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlhelper_core::{
    extract_sql, AnalysisOutcome, Analyzer, AutoFixer, DiagnosticStore, Formatter, HostLanguage,
    Issue, IssueKind, SqlDialect,
};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            return ExitCode::from(2);
        }
    };

    init_tracing(args.verbose, args.quiet, config.log_level.as_deref());

    match run(args.command, config, args.quiet) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` wins, then -v/-q, then the config file, then `warn`
fn init_tracing(verbose: u8, quiet: bool, config_level: Option<&str>) {
    let default_filter = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level.unwrap_or("warn"),
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: Config, quiet: bool) -> Result<bool> {
    match command {
        Command::Analyze {
            files,
            dialect,
            format,
            language,
            disable,
        } => {
            // CLI takes precedence over config
            let config = config.merge_with_args(&files, &dialect, &format, &language, &disable);
            let dialect = parse_dialect(config.dialect.as_deref())?;
            let language_override = config
                .language
                .as_deref()
                .map(str::parse::<HostLanguage>)
                .transpose()
                .into_diagnostic()?;

            let query_files = collect_files(&config.files)?;
            if query_files.is_empty() {
                miette::bail!(
                    "No files specified. Use positional arguments or configure in sqlhelper.toml"
                );
            }

            let disabled = disabled_kinds(&config.disable);
            let analyzer = Analyzer::new(dialect);
            let mut store = DiagnosticStore::new();
            let mut sources = HashMap::new();

            for path in &query_files {
                let name = display_name(path);
                let content = read_input(path)?;
                let language = language_override
                    .or_else(|| HostLanguage::from_path(path))
                    .unwrap_or_default();
                let sql = extract_sql(&content, language);

                match analyzer.analyze(&sql) {
                    AnalysisOutcome::NoSqlFound => {
                        if !quiet {
                            eprintln!("note: no SQL queries found in {}", name);
                        }
                        store.clear(&name);
                    }
                    AnalysisOutcome::Analyzed(result) => {
                        let issues: Vec<Issue> = result
                            .issues
                            .into_iter()
                            .filter(|issue| !disabled.contains(&issue.kind))
                            .collect();
                        tracing::info!(file = %name, %language, issues = issues.len(), "analyzed");
                        store.set(name.clone(), issues);
                        sources.insert(name, sql);
                    }
                }
            }

            OutputFormatter::new(config.output_format(), dialect).print_report(&store, &sources);

            let total_errors = store.total_errors();
            let total_warnings = store.total_warnings();
            if !quiet {
                if total_errors > 0 || total_warnings > 0 {
                    eprintln!();
                    eprintln!(
                        "Found {} error(s), {} warning(s) in {} file(s)",
                        total_errors,
                        total_warnings,
                        query_files.len()
                    );
                } else {
                    eprintln!(
                        "No common {} issues detected in {} file(s)",
                        dialect.tag(),
                        query_files.len()
                    );
                }
            }

            Ok(total_errors > 0)
        }

        Command::Fix {
            files,
            dialect,
            write,
        } => {
            let config = config.merge_with_args(&files, &dialect, &None, &None, &[]);
            let dialect = parse_dialect(config.dialect.as_deref())?;
            let fixer = AutoFixer::new(dialect);

            for path in require_files(&config.files)? {
                let name = display_name(&path);
                if !is_sql_input(&path) {
                    tracing::warn!(file = %name, "skipping non-SQL file, auto-fix only rewrites SQL files");
                    continue;
                }

                let content = read_input(&path)?;
                match fixer.fix(&content) {
                    None => {
                        if !quiet {
                            eprintln!("No fixes needed for {}. SQL is already correct.", name);
                        }
                    }
                    Some(fixed) if write && !is_stdin(&path) => {
                        fs::write(&path, fixed).into_diagnostic()?;
                        if !quiet {
                            eprintln!("Fixed {} SQL issues in {}", dialect.tag(), name);
                        }
                    }
                    Some(fixed) => print!("{}", fixed),
                }
            }

            Ok(false)
        }

        Command::Format {
            files,
            dialect,
            write,
        } => {
            let config = config.merge_with_args(&files, &dialect, &None, &None, &[]);
            let dialect = config
                .dialect
                .as_deref()
                .map(str::parse::<SqlDialect>)
                .transpose()
                .into_diagnostic()?;
            let formatter = Formatter::new(dialect);

            for path in require_files(&config.files)? {
                let name = display_name(&path);
                if !is_sql_input(&path) {
                    tracing::warn!(file = %name, "skipping non-SQL file");
                    continue;
                }

                let content = read_input(&path)?;
                let formatted = formatter.format(&content);

                if write && !is_stdin(&path) {
                    if formatted != content {
                        fs::write(&path, &formatted).into_diagnostic()?;
                        tracing::info!(file = %name, "formatted");
                    }
                } else {
                    println!("{}", formatted);
                }
            }

            Ok(false)
        }
    }
}

fn parse_dialect(value: Option<&str>) -> Result<SqlDialect> {
    Ok(value
        .map(str::parse::<SqlDialect>)
        .transpose()
        .into_diagnostic()?
        .unwrap_or_default())
}

/// Expand glob patterns; plain paths and `-` are kept as given
fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}

fn require_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let files = collect_files(patterns)?;
    if files.is_empty() {
        miette::bail!("No files specified. Use positional arguments or configure in sqlhelper.toml");
    }
    Ok(files)
}

fn disabled_kinds(codes: &[String]) -> HashSet<IssueKind> {
    codes
        .iter()
        .filter_map(|code| {
            let kind = IssueKind::from_code(code);
            if kind.is_none() {
                tracing::warn!(code = %code, "ignoring unknown issue code");
            }
            kind
        })
        .collect()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn is_sql_input(path: &Path) -> bool {
    is_stdin(path)
        || matches!(
            HostLanguage::from_path(path),
            None | Some(HostLanguage::Sql)
        )
}

fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .into_diagnostic()?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).into_diagnostic()
    }
}
