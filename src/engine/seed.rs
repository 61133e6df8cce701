//! Sample catalog rows inserted into both backends
//!
//! Neither backend enforces uniqueness, so seeding twice duplicates every
//! record in both stores.

use tracing::info;

use super::compare::CompareError;
use super::docstore::{Collection, Document};
use super::product::Product;
use super::sql::SqlStore;

/// The single-record insert.
pub fn dove() -> Product {
    Product::new("Dove bathing soap", 60.0, "60gms", "body care")
}

/// The multi-record insert.
pub fn munchies() -> Vec<Product> {
    vec![
        Product::new("Dairy Milk", 40.0, "120gms", "munchies"),
        Product::new("Lays cream & onion", 80.0, "150gms", "munchies"),
        Product::new("Uncle chips", 40.0, "90gms", "munchies"),
    ]
}

/// Insert one record into both backends, returning how many rows/documents
/// each side holds afterwards.
pub fn seed_one(sql: &SqlStore, col: &Collection) -> Result<(usize, usize), CompareError> {
    let product = dove();
    let inserted = sql.insert(&product)?;
    col.insert(Document::new(product.to_document_body()))?;
    info!(inserted, "seeded single record");
    Ok((sql.all()?.len(), col.count()?))
}

/// Insert the multi-record batch into both backends.
pub fn seed_many(sql: &SqlStore, col: &Collection) -> Result<(usize, usize), CompareError> {
    let batch = munchies();
    let inserted = sql.insert_many(&batch)?;
    col.insert_many(
        batch
            .iter()
            .map(|p| Document::new(p.to_document_body()))
            .collect(),
    )?;
    info!(inserted, "seeded record batch");
    Ok((sql.all()?.len(), col.count()?))
}

/// Full sample data set: the single record plus the batch.
pub fn seed_all(sql: &SqlStore, col: &Collection) -> Result<(), CompareError> {
    seed_one(sql, col)?;
    seed_many(sql, col)?;
    Ok(())
}
