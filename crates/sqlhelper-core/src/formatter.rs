//! Keyword-based SQL reflow

use std::sync::OnceLock;

use regex::Regex;

use crate::dialect::SqlDialect;

/// Keywords every dialect breaks lines on. Applied in this order.
pub const BASE_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "ON",
    "ORDER BY",
    "GROUP BY",
    "HAVING",
    "LIMIT",
    "INSERT INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "CREATE",
    "DROP",
    "ALTER",
    "AND",
    "OR",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
];

type KeywordTable = Vec<(&'static str, Regex)>;

/// Compiled keyword patterns, built once per dialect
fn keyword_table(dialect: Option<SqlDialect>) -> &'static [(&'static str, Regex)] {
    static BASE: OnceLock<KeywordTable> = OnceLock::new();
    static MYSQL: OnceLock<KeywordTable> = OnceLock::new();
    static POSTGRES: OnceLock<KeywordTable> = OnceLock::new();

    let cell = match dialect {
        None => &BASE,
        Some(SqlDialect::MySQL) => &MYSQL,
        Some(SqlDialect::PostgreSQL) => &POSTGRES,
    };
    cell.get_or_init(|| {
        let extra = dialect.map(|d| d.format_keywords()).unwrap_or_default();
        BASE_KEYWORDS
            .iter()
            .chain(extra)
            .map(|&keyword| {
                // ASCII word boundaries, so `éSELECT` still breaks before SELECT
                let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(keyword));
                let regex = Regex::new(&pattern).expect("invalid built-in keyword regex");
                (keyword, regex)
            })
            .collect()
    })
}

/// Puts each recognized keyword on its own line
#[derive(Clone, Copy)]
pub struct Formatter {
    keywords: &'static [(&'static str, Regex)],
}

impl Formatter {
    pub fn new(dialect: Option<SqlDialect>) -> Self {
        Self {
            keywords: keyword_table(dialect),
        }
    }

    /// Keywords in the order they are applied
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keywords.iter().map(|(keyword, _)| *keyword)
    }

    pub fn format(&self, sql: &str) -> String {
        let mut formatted = sql.to_string();
        for (keyword, regex) in self.keywords {
            let replacement = format!("\n{}", keyword);
            formatted = regex
                .replace_all(&formatted, regex::NoExpand(&replacement))
                .into_owned();
        }

        formatted
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format `sql`, adding the dialect's keywords when one is given
pub fn format_sql(sql: &str, dialect: Option<SqlDialect>) -> String {
    Formatter::new(dialect).format(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_select() {
        assert_eq!(
            format_sql("select id from users where id = 1 and active = 1", None),
            "SELECT id\nFROM users\nWHERE id = 1\nAND active = 1"
        );
    }

    #[test]
    fn test_keyword_order_splits_compound_keywords() {
        // FROM is applied before DELETE FROM, JOIN before LEFT JOIN
        assert_eq!(format_sql("DELETE FROM t", None), "DELETE\nFROM t");
        assert_eq!(
            format_sql("SELECT * FROM a LEFT JOIN b ON a.id = b.id", None),
            "SELECT *\nFROM a LEFT\nJOIN b\nON a.id = b.id"
        );
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(
            format_sql("SELECT created_on, selection FROM t", None),
            "SELECT created_on, selection\nFROM t"
        );
    }

    #[test]
    fn test_ascii_word_boundaries() {
        assert_eq!(format_sql("éSELECT x FROM t", None), "é\nSELECT x\nFROM t");
    }

    #[test]
    fn test_keyword_tables_are_cached() {
        let first = Formatter::new(Some(SqlDialect::PostgreSQL));
        let second = Formatter::new(Some(SqlDialect::PostgreSQL));
        assert!(std::ptr::eq(first.keywords, second.keywords));
        assert!(!std::ptr::eq(
            first.keywords,
            Formatter::new(None).keywords
        ));
    }

    #[test]
    fn test_dialect_keywords() {
        let mysql = Formatter::new(Some(SqlDialect::MySQL));
        assert!(mysql.keywords().any(|k| k == "ENGINE"));
        assert!(!mysql.keywords().any(|k| k == "RETURNING"));

        assert_eq!(
            format_sql(
                "INSERT INTO t (a) VALUES (1) RETURNING id",
                Some(SqlDialect::PostgreSQL)
            ),
            "INSERT INTO t (a)\nVALUES (1)\nRETURNING id"
        );
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(format_sql("  \n\n ", None), "");
    }
}
