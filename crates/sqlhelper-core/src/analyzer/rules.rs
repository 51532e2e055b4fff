//! Heuristic per-statement rules

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Issue, IssueKind};
use crate::statement::{paren_counts, quotes_balanced, Statement};

/// Calls that are valid without a FROM clause
fn no_from_call() -> &'static Regex {
    static NO_FROM_CALL: OnceLock<Regex> = OnceLock::new();
    NO_FROM_CALL.get_or_init(|| {
        Regex::new(r"(?i)COUNT\s*\(|NOW\s*\(|CURDATE\s*\(").expect("invalid built-in call regex")
    })
}

/// Evaluate every rule against one statement, in rule order
pub(super) fn check_statement(stmt: &Statement) -> Vec<Issue> {
    let mut issues = Vec::new();
    let upper = stmt.text.to_ascii_uppercase();
    let location = format!("Statement starting at line {}", stmt.line());
    let described = format!("{}: {}", location, stmt.text);

    if let Some(pos) = upper.find("SELECT") {
        let after_select = &stmt.text[pos + "SELECT".len()..];
        if !upper.contains("FROM") && !no_from_call().is_match(after_select) {
            issues.push(Issue::error(
                IssueKind::SelectWithoutFrom,
                stmt.span,
                described.clone(),
            ));
        }
    }

    if upper.contains("INSERT INTO") && !upper.contains("VALUES") {
        issues.push(Issue::error(
            IssueKind::InsertWithoutValues,
            stmt.span,
            described.clone(),
        ));
    }

    if upper.contains("UPDATE") && !upper.contains("WHERE") {
        issues.push(Issue::error(
            IssueKind::UpdateWithoutWhere,
            stmt.span,
            described.clone(),
        ));
    }

    if upper.contains("DELETE FROM") && !upper.contains("WHERE") {
        issues.push(Issue::error(
            IssueKind::DeleteWithoutWhere,
            stmt.span,
            described.clone(),
        ));
    }

    let (open, close) = paren_counts(&stmt.text);
    if open != close {
        issues.push(
            Issue::warning(
                IssueKind::UnbalancedParentheses,
                stmt.span,
                format!("{}: Open: {}, Close: {}", location, open, close),
            )
            .with_suggestion(format!(
                "Open: {}, Close: {}. Ensure parentheses are balanced",
                open, close
            )),
        );
    }

    if !quotes_balanced(&stmt.text) {
        issues.push(Issue::warning(
            IssueKind::UnclosedQuote,
            stmt.span,
            described.clone(),
        ));
    }

    if !stmt.terminated {
        issues.push(Issue::warning(
            IssueKind::MissingSemicolon,
            stmt.span,
            described,
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::split_statements;

    fn kinds(sql: &str) -> Vec<IssueKind> {
        split_statements(sql)
            .iter()
            .flat_map(check_statement)
            .map(|issue| issue.kind)
            .collect()
    }

    #[test]
    fn test_select_without_from() {
        assert_eq!(kinds("SELECT a, b;"), vec![IssueKind::SelectWithoutFrom]);
    }

    #[test]
    fn test_select_allowed_calls() {
        assert!(kinds("SELECT NOW();").is_empty());
        assert!(kinds("select curdate ();").is_empty());
        assert!(kinds("SELECT COUNT(*);").is_empty());
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("delete from logs;"),
            vec![IssueKind::DeleteWithoutWhere]
        );
    }

    #[test]
    fn test_insert_without_values() {
        assert_eq!(
            kinds("INSERT INTO t (a) SELECT a FROM s;"),
            vec![IssueKind::InsertWithoutValues]
        );
    }

    #[test]
    fn test_rule_order_within_statement() {
        assert_eq!(
            kinds("UPDATE t SET name = 'x WHERE (id = 1"),
            vec![
                IssueKind::UnbalancedParentheses,
                IssueKind::UnclosedQuote,
                IssueKind::MissingSemicolon,
            ]
        );
    }

    #[test]
    fn test_paren_counts_in_message() {
        let issues = check_statement(&split_statements("SELECT (1 FROM t;")[0]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("Open: 1, Close: 0"));
    }
}
