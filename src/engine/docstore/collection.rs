//! Collection management for the document backend

use std::fs;
use std::path::{Path, PathBuf};
use serde_json::Value;
use tracing::debug;

use super::document::Document;
use super::error::{DocStoreError, Result};
use super::filter::{self, Query};

/// A document collection (the counterpart of a table). Names are
/// case-sensitive: `Products` and `products` are distinct collections.
pub struct Collection {
    /// Collection name
    pub name: String,

    /// Path to collection directory
    path: PathBuf,
}

impl Collection {
    /// Open an existing collection
    pub fn open(base_path: &Path, name: &str) -> Result<Self> {
        let path = base_path.join(name);

        if !path.exists() {
            return Err(DocStoreError::CollectionNotFound(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            path,
        })
    }

    /// Create a new collection
    pub fn create(base_path: &Path, name: &str) -> Result<Self> {
        validate_collection_name(name)?;

        let path = base_path.join(name);

        if path.exists() {
            return Err(DocStoreError::CollectionAlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&path)?;
        debug!(collection = name, "created collection");

        Ok(Self {
            name: name.to_string(),
            path,
        })
    }

    /// Insert a document, returning its ID
    pub fn insert(&self, doc: Document) -> Result<String> {
        let doc_path = self.path.join(format!("{}.json", doc.id));

        if doc_path.exists() {
            return Err(DocStoreError::DuplicateId(doc.id));
        }

        let content = serde_json::to_string_pretty(&doc)?;
        fs::write(doc_path, content)?;

        Ok(doc.id)
    }

    /// Insert several documents, returning their IDs
    pub fn insert_many(&self, docs: Vec<Document>) -> Result<Vec<String>> {
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            ids.push(self.insert(doc)?);
        }
        Ok(ids)
    }

    /// Get a document by ID
    pub fn get(&self, id: &str) -> Result<Document> {
        let doc_path = self.path.join(format!("{}.json", id));

        if !doc_path.exists() {
            return Err(DocStoreError::DocumentNotFound(id.to_string()));
        }

        let content = fs::read_to_string(doc_path)?;
        let doc: Document = serde_json::from_str(&content)?;

        Ok(doc)
    }

    /// List all document IDs
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    let name = stem.to_string_lossy();
                    // Skip system files
                    if !name.starts_with('_') {
                        ids.push(name.to_string());
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Count all documents
    pub fn count(&self) -> Result<usize> {
        Ok(self.list_ids()?.len())
    }

    /// Get all documents
    pub fn all(&self) -> Result<Vec<Document>> {
        let ids = self.list_ids()?;
        let mut docs = Vec::with_capacity(ids.len());

        for id in ids {
            docs.push(self.get(&id)?);
        }

        Ok(docs)
    }

    /// Run a filter query over the collection
    pub fn find(&self, query: &Query) -> Result<Vec<Document>> {
        query.execute(self.all()?)
    }

    /// Count documents matching a filter query
    pub fn count_matching(&self, query: &Query) -> Result<usize> {
        query.count(self.all()?)
    }

    /// Projection stage: rename `field` to `alias` across all documents
    pub fn project(&self, field: &str, alias: &str) -> Result<Vec<Value>> {
        Ok(filter::project(&self.all()?, field, alias))
    }

    /// Drop this collection
    pub fn drop(self) -> Result<()> {
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }
}

/// Validate collection name
fn validate_collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DocStoreError::InvalidCollectionName(
            "name cannot be empty".to_string(),
        ));
    }

    if name.starts_with('_') {
        return Err(DocStoreError::InvalidCollectionName(
            "name cannot start with underscore".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(DocStoreError::InvalidCollectionName(
            "name must be alphanumeric".to_string(),
        ));
    }

    Ok(())
}
