//! sqlhelper-core: heuristic SQL checks
//!
//! This library flags common structural mistakes in SQL text (missing
//! clauses, unbalanced quotes and parentheses, missing semicolons), applies
//! best-effort fixes and reflows SQL by keyword. It does not parse SQL.

pub mod analyzer;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod fixer;
pub mod formatter;
pub mod statement;
pub mod store;

pub use analyzer::{analyze, AnalysisOutcome, AnalysisResult, Analyzer};
pub use dialect::SqlDialect;
pub use error::{Error, Issue, IssueKind, Severity, Span};
pub use extract::{extract_sql, HostLanguage};
pub use fixer::{auto_fix, AutoFixer};
pub use formatter::{format_sql, Formatter};
pub use statement::{split_statements, Statement};
pub use store::DiagnosticStore;
