//! The Product record shared by both backends

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single catalog entry. `id` is assigned by the relational engine and is
/// absent on the document side, where identity is the document `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: String,
    pub department: String,
}

impl Product {
    pub fn new(name: &str, price: f64, quantity: &str, department: &str) -> Self {
        Self {
            id: None,
            product_name: name.to_string(),
            product_price: price,
            quantity: quantity.to_string(),
            department: department.to_string(),
        }
    }

    /// Document body for the document backend (no relational id).
    pub fn to_document_body(&self) -> Value {
        serde_json::json!({
            "product_name": self.product_name,
            "product_price": self.product_price,
            "quantity": self.quantity,
            "department": self.department,
        })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "id = {}, ", id)?,
            None => {}
        }
        write!(
            f,
            "product name = {}, product price = {}, quantity = {}, department = {}",
            self.product_name, self.product_price, self.quantity, self.department
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_body_omits_id() {
        let product = Product::new("Dove bathing soap", 60.0, "60gms", "body care");
        let body = product.to_document_body();
        assert_eq!(body.get("id"), None);
        assert_eq!(body.get("product_name"), Some(&json!("Dove bathing soap")));
    }

    #[test]
    fn test_display_includes_all_fields() {
        let mut product = Product::new("Uncle chips", 40.0, "90gms", "munchies");
        product.id = Some(3);
        let line = product.to_string();
        assert!(line.contains("id = 3"));
        assert!(line.contains("Uncle chips"));
        assert!(line.contains("munchies"));
    }
}
