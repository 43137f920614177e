//! Metadata filters for retrieval.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Metadata field holding a document's source.
pub const SOURCE_FIELD: &str = "source";

/// Equality constraints on document metadata (`where` clause).
///
/// A document matches when every constrained field is present in its
/// metadata with an equal value. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhereFilter {
    conditions: BTreeMap<String, Value>,
}

impl WhereFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter restricting results to documents from `source`.
    pub fn source(source: impl Into<String>) -> Self {
        let source: String = source.into();
        Self::new().with(SOURCE_FIELD, source)
    }

    /// Add an equality constraint.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.conditions.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check a document's metadata against every condition.
    pub fn matches(&self, metadata: &Map<String, Value>) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| metadata.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_source_filter() {
        let filter = WhereFilter::source("doc2.pdf");
        assert_eq!(filter.get("source"), Some(&json!("doc2.pdf")));
        assert!(filter.matches(&metadata(json!({"source": "doc2.pdf", "page": 1}))));
        assert!(!filter.matches(&metadata(json!({"source": "doc1.pdf"}))));
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let filter = WhereFilter::source("doc.pdf");
        assert!(!filter.matches(&metadata(json!({"page": 1}))));
    }

    #[test]
    fn test_all_conditions_required() {
        let filter = WhereFilter::source("doc.pdf").with("data_type", "pdf_file");
        assert!(filter.matches(&metadata(json!({"source": "doc.pdf", "data_type": "pdf_file"}))));
        assert!(!filter.matches(&metadata(json!({"source": "doc.pdf", "data_type": "text"}))));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = WhereFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&Map::new()));
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let filter = WhereFilter::source("a.pdf");
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({"source": "a.pdf"}));
    }
}
