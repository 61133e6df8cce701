//! Document representation for the document backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored document with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Creation timestamp
    #[serde(rename = "_created_at")]
    pub created_at: DateTime<Utc>,

    /// The actual document data
    #[serde(flatten)]
    pub data: Value,
}

impl Document {
    /// Create a new document with a generated ID
    pub fn new(data: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            data,
        }
    }

    /// Get a field from the document
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(json!({"product_name": "Uncle chips", "product_price": 40.0}));
        assert!(!doc.id.is_empty());
        assert_eq!(doc.get("product_name"), Some(&json!("Uncle chips")));
    }

    #[test]
    fn test_id_uniqueness() {
        let a = Document::new(json!({}));
        let b = Document::new(json!({}));
        assert_ne!(a.id, b.id);
    }
}
