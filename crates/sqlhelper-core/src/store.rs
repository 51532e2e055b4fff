//! Per-document issue store owned by the host layer

use indexmap::IndexMap;

use crate::error::{Issue, Severity};

/// Issues published per document, in insertion order
#[derive(Debug, Clone, Default)]
pub struct DiagnosticStore {
    documents: IndexMap<String, Vec<Issue>>,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the issues of `key`. An empty list clears it.
    pub fn set(&mut self, key: impl Into<String>, issues: Vec<Issue>) {
        let key = key.into();
        if issues.is_empty() {
            self.clear(&key);
            return;
        }
        tracing::trace!(document = %key, issues = issues.len(), "published issues");
        self.documents.insert(key, issues);
    }

    /// Remove the issues of `key`, returning them
    pub fn clear(&mut self, key: &str) -> Option<Vec<Issue>> {
        self.documents.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&[Issue]> {
        self.documents.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Issue])> {
        self.documents
            .iter()
            .map(|(key, issues)| (key.as_str(), issues.as_slice()))
    }

    /// Number of documents with issues
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn total_errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn total_warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.documents
            .values()
            .flatten()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::dialect::SqlDialect;

    fn issues(sql: &str) -> Vec<Issue> {
        analyze(sql, SqlDialect::MySQL).issues().to_vec()
    }

    #[test]
    fn test_set_and_get() {
        let mut store = DiagnosticStore::new();
        store.set("a.sql", issues("DELETE FROM t"));
        store.set("b.sql", issues("SELECT 1 FROM t"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a.sql").map(<[Issue]>::len), Some(2));
        assert_eq!(store.total_errors(), 1);
        assert_eq!(store.total_warnings(), 2);
        let keys: Vec<_> = store.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a.sql", "b.sql"]);
    }

    #[test]
    fn test_set_empty_clears() {
        let mut store = DiagnosticStore::new();
        store.set("a.sql", issues("DELETE FROM t"));
        store.set("a.sql", Vec::new());
        assert!(store.is_empty());
        assert!(store.get("a.sql").is_none());
    }

    #[test]
    fn test_clear_returns_issues() {
        let mut store = DiagnosticStore::new();
        store.set("a.sql", issues("SELECT x"));
        let removed = store.clear("a.sql").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(store.clear("a.sql").is_none());
    }
}
