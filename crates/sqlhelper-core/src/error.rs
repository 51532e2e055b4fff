//! Error and issue types

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

/// Errors raised when parsing names supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown dialect: '{0}'. Supported dialects: mysql, postgresql.")]
    UnknownDialect(String),
    #[error("{0} dialect is not yet supported. Supported dialects: mysql, postgresql.")]
    UnsupportedDialect(String),
    #[error("Unknown language: '{0}'. Supported languages: sql, java, javascript, typescript, python.")]
    UnknownLanguage(String),
}

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset from start of source
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            line: 0,
            column: 0,
        }
    }

    /// Create a span at `offset` in `source`, computing line and column
    pub fn locate(source: &str, offset: usize, length: usize) -> Self {
        let (line, column) = offset_to_line_col(source, offset);
        Self {
            offset,
            length,
            line,
            column,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.offset.into(), span.length)
    }
}

/// Convert byte offset to line and column (1-indexed)
fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A structural problem detected in one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub description: String,
    pub suggestion: String,
    /// Line the statement starts on (1-indexed)
    pub line: usize,
    pub span: Span,
}

impl Issue {
    pub fn error(kind: IssueKind, span: Span, description: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, kind, span, description)
    }

    pub fn warning(kind: IssueKind, span: Span, description: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, kind, span, description)
    }

    fn with_severity(
        severity: Severity,
        kind: IssueKind,
        span: Span,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            suggestion: kind.default_suggestion().to_string(),
            line: span.line,
            span,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    /// Get the issue code string (e.g., "E0001")
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Types of issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// E0001: SELECT without FROM
    SelectWithoutFrom,
    /// E0002: INSERT INTO without VALUES
    InsertWithoutValues,
    /// E0003: UPDATE without WHERE (affects every row)
    UpdateWithoutWhere,
    /// E0004: DELETE FROM without WHERE (removes every row)
    DeleteWithoutWhere,
    /// W0001: `(` and `)` counts differ
    UnbalancedParentheses,
    /// W0002: odd number of single quotes
    UnclosedQuote,
    /// W0003: statement not terminated by `;`
    MissingSemicolon,
}

impl IssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::SelectWithoutFrom => "E0001",
            IssueKind::InsertWithoutValues => "E0002",
            IssueKind::UpdateWithoutWhere => "E0003",
            IssueKind::DeleteWithoutWhere => "E0004",
            IssueKind::UnbalancedParentheses => "W0001",
            IssueKind::UnclosedQuote => "W0002",
            IssueKind::MissingSemicolon => "W0003",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IssueKind::SelectWithoutFrom => "select-without-from",
            IssueKind::InsertWithoutValues => "insert-without-values",
            IssueKind::UpdateWithoutWhere => "update-without-where",
            IssueKind::DeleteWithoutWhere => "delete-without-where",
            IssueKind::UnbalancedParentheses => "unbalanced-parentheses",
            IssueKind::UnclosedQuote => "unclosed-quote",
            IssueKind::MissingSemicolon => "missing-semicolon",
        }
    }

    /// Human-readable title, as shown in issue lists
    pub fn title(&self) -> &'static str {
        match self {
            IssueKind::SelectWithoutFrom => "SELECT without FROM",
            IssueKind::InsertWithoutValues => "INSERT without VALUES",
            IssueKind::UpdateWithoutWhere => "UPDATE without WHERE",
            IssueKind::DeleteWithoutWhere => "DELETE without WHERE",
            IssueKind::UnbalancedParentheses => "Unbalanced parentheses",
            IssueKind::UnclosedQuote => "Unclosed quote",
            IssueKind::MissingSemicolon => "Missing semicolon",
        }
    }

    fn default_suggestion(&self) -> &'static str {
        match self {
            IssueKind::SelectWithoutFrom => {
                "Most SELECT queries require a FROM clause. E.g.: SELECT * FROM table"
            }
            IssueKind::InsertWithoutValues => "INSERT INTO table (columns) VALUES (values);",
            IssueKind::UpdateWithoutWhere => {
                "UPDATE without WHERE will affect ALL rows. E.g.: UPDATE table SET col = val WHERE condition;"
            }
            IssueKind::DeleteWithoutWhere => {
                "DELETE without WHERE will REMOVE ALL ROWS. E.g.: DELETE FROM table WHERE condition;"
            }
            IssueKind::UnbalancedParentheses => "Ensure all parentheses are balanced",
            IssueKind::UnclosedQuote => "Ensure all single quotes are balanced",
            IssueKind::MissingSemicolon => "SQL statements should end with ;",
        }
    }

    /// Look up a kind by code (`E0003`) or name (`update-without-where`)
    pub fn from_code(code: &str) -> Option<Self> {
        IssueKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code) || kind.name() == code)
    }

    pub const ALL: [IssueKind; 7] = [
        IssueKind::SelectWithoutFrom,
        IssueKind::InsertWithoutValues,
        IssueKind::UpdateWithoutWhere,
        IssueKind::DeleteWithoutWhere,
        IssueKind::UnbalancedParentheses,
        IssueKind::UnclosedQuote,
        IssueKind::MissingSemicolon,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_locate() {
        let source = "SELECT 1;\n  SELECT 2;";
        let span = Span::locate(source, 12, 8);
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 3);
    }

    #[test]
    fn test_span_into_source_span() {
        let span: SourceSpan = Span::new(4, 10).into();
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_issue_kind_from_code() {
        assert_eq!(
            IssueKind::from_code("e0003"),
            Some(IssueKind::UpdateWithoutWhere)
        );
        assert_eq!(
            IssueKind::from_code("missing-semicolon"),
            Some(IssueKind::MissingSemicolon)
        );
        assert_eq!(IssueKind::from_code("E9999"), None);
    }
}
