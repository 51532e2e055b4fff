//! SQL dialect support

use std::str::FromStr;

use crate::error::Error;

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    #[default]
    MySQL,
    PostgreSQL,
}

impl SqlDialect {
    /// Keywords the formatter breaks lines on, in addition to the base set
    pub fn format_keywords(&self) -> &'static [&'static str] {
        match self {
            SqlDialect::MySQL => &["AUTO_INCREMENT", "ENGINE", "CHARSET", "COLLATE"],
            SqlDialect::PostgreSQL => &["SERIAL", "BIGSERIAL", "RETURNING", "LANGUAGE"],
        }
    }

    /// Upper-case tag used when labelling output, e.g. `[MYSQL]`
    pub fn tag(&self) -> &'static str {
        match self {
            SqlDialect::MySQL => "MYSQL",
            SqlDialect::PostgreSQL => "POSTGRESQL",
        }
    }
}

impl FromStr for SqlDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(SqlDialect::PostgreSQL),
            "mysql" | "mysql8" => Ok(SqlDialect::MySQL),
            "sqlite" => Err(Error::UnsupportedDialect("SQLite".to_string())),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlDialect::PostgreSQL => write!(f, "postgresql"),
            SqlDialect::MySQL => write!(f, "mysql"),
        }
    }
}
