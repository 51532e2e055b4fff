//! SQL analyzer module

mod rules;

use crate::dialect::SqlDialect;
use crate::error::{Issue, Severity};
use crate::statement::split_statements;

/// Issues found in one piece of SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub dialect: SqlDialect,
    /// Issues in statement order, then rule order
    pub issues: Vec<Issue>,
}

impl AnalysisResult {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    /// `true` when no error-level issue was found
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Result of an analysis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The input was empty or whitespace only
    NoSqlFound,
    Analyzed(AnalysisResult),
}

impl AnalysisOutcome {
    pub fn issues(&self) -> &[Issue] {
        match self {
            AnalysisOutcome::NoSqlFound => &[],
            AnalysisOutcome::Analyzed(result) => &result.issues,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            AnalysisOutcome::NoSqlFound => None,
            AnalysisOutcome::Analyzed(result) => Some(result),
        }
    }
}

/// SQL Analyzer - flags structural problems in SQL text
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    dialect: SqlDialect,
}

impl Analyzer {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Analyze SQL text and return the issues found
    pub fn analyze(&self, sql: &str) -> AnalysisOutcome {
        if sql.trim().is_empty() {
            tracing::debug!(dialect = %self.dialect, "no SQL to analyze");
            return AnalysisOutcome::NoSqlFound;
        }

        let statements = split_statements(sql);
        let issues: Vec<Issue> = statements.iter().flat_map(rules::check_statement).collect();

        tracing::debug!(
            dialect = %self.dialect,
            statements = statements.len(),
            issues = issues.len(),
            "analyzed SQL"
        );

        AnalysisOutcome::Analyzed(AnalysisResult {
            dialect: self.dialect,
            issues,
        })
    }
}

/// Analyze `sql` with the given dialect
pub fn analyze(sql: &str, dialect: SqlDialect) -> AnalysisOutcome {
    Analyzer::new(dialect).analyze(sql)
}
