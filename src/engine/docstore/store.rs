//! Document Store Engine
//!
//! Main entry point for the document backend

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::collection::Collection;
use super::document::Document;
use super::error::{DocStoreError, Result};
use super::filter::Query;

/// The document store: a base directory holding one directory per collection.
pub struct DocStore {
    base_path: PathBuf,
}

impl DocStore {
    /// Open an existing store
    pub fn open(path: &Path) -> Result<Self> {
        let base_path = path.join("docstore");

        if !base_path.exists() {
            return Err(DocStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "document store not found",
            )));
        }

        Ok(Self { base_path })
    }

    /// Create a new store
    pub fn create(path: &Path) -> Result<Self> {
        let base_path = path.join("docstore");
        fs::create_dir_all(&base_path)?;
        debug!(path = %base_path.display(), "created document store");
        Ok(Self { base_path })
    }

    /// Open or create a store
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.join("docstore").exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// Create a new collection
    pub fn create_collection(&self, name: &str) -> Result<Collection> {
        Collection::create(&self.base_path, name)
    }

    /// Open an existing collection
    pub fn collection(&self, name: &str) -> Result<Collection> {
        Collection::open(&self.base_path, name)
    }

    /// Open a collection, creating it if missing
    pub fn collection_or_create(&self, name: &str) -> Result<Collection> {
        if self.collection_exists(name) {
            self.collection(name)
        } else {
            self.create_collection(name)
        }
    }

    /// List all collections
    pub fn list_collections(&self) -> Result<Vec<String>> {
        let mut collections = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                if let Some(name) = path.file_name() {
                    let name_str = name.to_string_lossy();
                    if !name_str.starts_with('.') && !name_str.starts_with('_') {
                        collections.push(name_str.to_string());
                    }
                }
            }
        }

        collections.sort();
        Ok(collections)
    }

    /// Drop a collection
    pub fn drop_collection(&self, name: &str) -> Result<()> {
        let collection = self.collection(name)?;
        collection.drop()
    }

    /// Check if a collection exists
    pub fn collection_exists(&self, name: &str) -> bool {
        self.base_path.join(name).exists()
    }

    // ========== Convenience Methods ==========

    /// Insert a document into a collection
    pub fn insert(&self, collection: &str, doc: Document) -> Result<String> {
        self.collection(collection)?.insert(doc)
    }

    /// Query documents
    pub fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        self.collection(collection)?.find(query)
    }

    /// Count documents in a collection
    pub fn count(&self, collection: &str) -> Result<usize> {
        self.collection(collection)?.count()
    }
}
