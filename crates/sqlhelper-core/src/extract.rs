//! Pull SQL out of host-language source files

use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;

/// Language of the file SQL is analyzed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostLanguage {
    #[default]
    Sql,
    Java,
    JavaScript,
    TypeScript,
    Python,
}

impl HostLanguage {
    /// Detect the language from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "sql" => Some(HostLanguage::Sql),
            "java" => Some(HostLanguage::Java),
            "js" | "mjs" | "cjs" | "jsx" => Some(HostLanguage::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(HostLanguage::TypeScript),
            "py" => Some(HostLanguage::Python),
            _ => None,
        }
    }

    fn literal_regex(&self) -> Option<&'static Regex> {
        static JAVA: OnceLock<Regex> = OnceLock::new();
        static JS: OnceLock<Regex> = OnceLock::new();
        static PYTHON: OnceLock<Regex> = OnceLock::new();

        let build = |pattern: &str| Regex::new(pattern).expect("invalid built-in literal regex");
        match self {
            HostLanguage::Sql => None,
            HostLanguage::Java => Some(JAVA.get_or_init(|| {
                build(r#"(?i)["']([^"']*(?:SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER)[^"']*)["']"#)
            })),
            HostLanguage::JavaScript | HostLanguage::TypeScript => Some(JS.get_or_init(|| {
                build(r#"(?i)[`'"]([^`'"]*(?:SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER)[^`'"]*)[`'"]"#)
            })),
            HostLanguage::Python => Some(PYTHON.get_or_init(|| {
                build(r#"(?i)['"]{1,3}([^'"]*(?:SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER)[^'"]*)['"]{1,3}"#)
            })),
        }
    }
}

impl FromStr for HostLanguage {
    type Err = Error;

    /// Accepts editor language ids as well as common short names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" => Ok(HostLanguage::Sql),
            "java" => Ok(HostLanguage::Java),
            "javascript" | "js" => Ok(HostLanguage::JavaScript),
            "typescript" | "ts" => Ok(HostLanguage::TypeScript),
            "python" | "py" => Ok(HostLanguage::Python),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for HostLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostLanguage::Sql => write!(f, "sql"),
            HostLanguage::Java => write!(f, "java"),
            HostLanguage::JavaScript => write!(f, "javascript"),
            HostLanguage::TypeScript => write!(f, "typescript"),
            HostLanguage::Python => write!(f, "python"),
        }
    }
}

/// Return the SQL contained in `source`.
///
/// SQL files are returned as-is. For other languages, every string literal
/// that mentions a DML/DDL keyword is collected, one per line.
pub fn extract_sql(source: &str, language: HostLanguage) -> String {
    let Some(regex) = language.literal_regex() else {
        return source.to_string();
    };

    let queries: Vec<&str> = regex
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    tracing::debug!(%language, queries = queries.len(), "extracted SQL literals");
    queries.join("\n")
}
