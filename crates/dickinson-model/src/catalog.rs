use serde::{Deserialize, Serialize};

/// One row of the poem list: a title and the page that holds its text.
///
/// Produced while reading the index page and consumed right away by the
/// pipeline; it is never written to disk on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    /// Absolute URL of the detail page.
    pub url: String,
}

/// A single poem as written to the catalog file.
///
/// `content` is `None` when the detail page loaded but carried no poem
/// container. It serializes as `null` rather than being omitted, so every
/// object in the output has exactly the `title` and `content` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    pub title: String,
    pub content: Option<String>,
}

impl PoemRecord {
    pub fn new(title: impl Into<String>, content: Option<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// Counts reported once a catalog run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub with_content: usize,
    pub without_content: usize,
}

impl CatalogSummary {
    pub fn from_records(records: &[PoemRecord]) -> Self {
        let with_content = records.iter().filter(|r| r.has_content()).count();
        Self {
            total: records.len(),
            with_content,
            without_content: records.len() - with_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_content_serializes_as_null() {
        let record = PoemRecord::new("Poem B", None);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"Poem B","content":null}"#);
    }

    #[test]
    fn test_field_order_is_title_then_content() {
        let record = PoemRecord::new("Poem A", Some("Line1\nLine2".to_string()));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"Poem A","content":"Line1\nLine2"}"#);
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let record = PoemRecord::new("Ésope — “Hope”", Some("’tis".to_string()));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("Ésope — “Hope”"));
        assert!(json.contains("’tis"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            PoemRecord::new("A", Some("text".to_string())),
            PoemRecord::new("B", None),
            PoemRecord::new("A", Some("again".to_string())),
        ];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(
            summary,
            CatalogSummary {
                total: 3,
                with_content: 2,
                without_content: 1,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_catalog() {
        assert_eq!(CatalogSummary::from_records(&[]), CatalogSummary::default());
    }
}
