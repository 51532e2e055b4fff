//! Best-effort textual repairs

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::dialect::SqlDialect;
use crate::statement::{paren_counts, quotes_balanced};

struct TypePatterns {
    create_table: Regex,
    int_auto_increment: Regex,
    bigint_auto_increment: Regex,
    serial: Regex,
    bigserial: Regex,
    varchar: Regex,
}

fn patterns() -> &'static TypePatterns {
    static PATTERNS: OnceLock<TypePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let build = |pattern: &str| Regex::new(pattern).expect("invalid built-in type regex");
        TypePatterns {
            create_table: build(r"(?i)CREATE\s+TABLE"),
            // ASCII word boundaries: `éSERIAL` still contains SERIAL
            int_auto_increment: build(r"(?i)(?-u:\b)(?:INTEGER|INT)\s+AUTO_INCREMENT(?-u:\b)"),
            bigint_auto_increment: build(r"(?i)(?-u:\b)BIGINT\s+AUTO_INCREMENT(?-u:\b)"),
            serial: build(r"(?i)(?-u:\b)SERIAL(?-u:\b)"),
            bigserial: build(r"(?i)(?-u:\b)BIGSERIAL(?-u:\b)"),
            varchar: build(r"(?i)(?-u:\b)VARCHAR(?-u:\b)(\s*\()?"),
        }
    })
}

/// Applies per-statement repairs for one dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFixer {
    dialect: SqlDialect,
}

impl AutoFixer {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Fix `sql`, returning `None` when nothing changed.
    ///
    /// Each non-blank `;` segment is repaired and written back followed by
    /// a newline. Comments are kept as they are.
    pub fn fix(&self, sql: &str) -> Option<String> {
        let mut fixed = String::with_capacity(sql.len() + 16);
        let mut count = 0;

        for segment in sql.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            fixed.push_str(&self.fix_statement(segment));
            fixed.push('\n');
            count += 1;
        }

        if fixed == sql {
            tracing::debug!(dialect = %self.dialect, "no fixes needed");
            return None;
        }

        tracing::debug!(dialect = %self.dialect, statements = count, "applied auto-fix");
        Some(fixed)
    }

    fn fix_statement(&self, statement: &str) -> String {
        let mut stmt = statement.to_string();

        if !quotes_balanced(&stmt) {
            stmt.push('\'');
        }

        let (open, close) = paren_counts(&stmt);
        if open > close {
            stmt.push_str(&")".repeat(open - close));
        }

        if !stmt.ends_with(';') {
            stmt.push(';');
        }

        if patterns().create_table.is_match(&stmt) {
            stmt = self.normalize_types(&stmt);
        }

        stmt
    }

    /// Rewrite column types in a CREATE TABLE body to the target dialect
    fn normalize_types(&self, stmt: &str) -> String {
        let p = patterns();
        let stmt = match self.dialect {
            SqlDialect::PostgreSQL => {
                let stmt = p.bigint_auto_increment.replace_all(stmt, "BIGSERIAL");
                p.int_auto_increment
                    .replace_all(&stmt, "SERIAL")
                    .into_owned()
            }
            SqlDialect::MySQL => {
                let stmt = p.bigserial.replace_all(stmt, "BIGINT AUTO_INCREMENT");
                p.serial
                    .replace_all(&stmt, "INT AUTO_INCREMENT")
                    .into_owned()
            }
        };

        p.varchar
            .replace_all(&stmt, |caps: &Captures| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    "VARCHAR(255)".to_string()
                }
            })
            .into_owned()
    }
}

/// Fix `sql` for the given dialect, `None` when nothing changed
pub fn auto_fix(sql: &str, dialect: SqlDialect) -> Option<String> {
    AutoFixer::new(dialect).fix(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_semicolon() {
        assert_eq!(
            auto_fix("SELECT 1", SqlDialect::MySQL).as_deref(),
            Some("SELECT 1;\n")
        );
    }

    #[test]
    fn test_clean_input_needs_no_fix() {
        assert_eq!(
            auto_fix("SELECT * FROM t;\nDELETE FROM t WHERE id = 1;\n", SqlDialect::MySQL),
            None
        );
    }

    #[test]
    fn test_extra_close_paren_left_alone() {
        assert_eq!(
            auto_fix("SELECT 1)", SqlDialect::MySQL).as_deref(),
            Some("SELECT 1);\n")
        );
    }

    #[test]
    fn test_quote_closed_before_paren() {
        assert_eq!(
            auto_fix("INSERT INTO t VALUES ('a", SqlDialect::MySQL).as_deref(),
            Some("INSERT INTO t VALUES ('a');\n")
        );
    }

    #[test]
    fn test_mysql_serial_types() {
        let fixed = auto_fix(
            "CREATE TABLE t (id BIGSERIAL, other serial, name varchar)",
            SqlDialect::MySQL,
        )
        .unwrap();
        assert_eq!(
            fixed,
            "CREATE TABLE t (id BIGINT AUTO_INCREMENT, other INT AUTO_INCREMENT, name VARCHAR(255));\n"
        );
    }

    #[test]
    fn test_postgres_keeps_explicit_varchar_length() {
        let fixed = auto_fix(
            "CREATE TABLE t (id BIGINT AUTO_INCREMENT, code VARCHAR (12), name VARCHAR NOT NULL)",
            SqlDialect::PostgreSQL,
        )
        .unwrap();
        assert_eq!(
            fixed,
            "CREATE TABLE t (id BIGSERIAL, code VARCHAR (12), name VARCHAR(255) NOT NULL);\n"
        );
    }

    #[test]
    fn test_type_names_use_ascii_word_boundaries() {
        assert_eq!(
            auto_fix("CREATE TABLE t (id éSERIAL)", SqlDialect::MySQL).as_deref(),
            Some("CREATE TABLE t (id éINT AUTO_INCREMENT);\n")
        );
    }

    #[test]
    fn test_types_outside_create_table_untouched() {
        assert_eq!(
            auto_fix("ALTER TABLE t ADD COLUMN id SERIAL", SqlDialect::MySQL).as_deref(),
            Some("ALTER TABLE t ADD COLUMN id SERIAL;\n")
        );
    }
}
