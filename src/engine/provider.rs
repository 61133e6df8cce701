//! Process-wide backend handles
//!
//! Both backends are opened lazily on first access and cached for the life of
//! the process. Initialization is guarded so concurrent first callers cannot
//! open two live handles. The relational store is a hard dependency: if it
//! cannot be opened the process exits non-zero. A document store failure is
//! returned to the caller instead.

use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::error;

use super::docstore::{DocStore, DocStoreError};
use super::sql::SqlStore;

static RELATIONAL: OnceLock<SqlStore> = OnceLock::new();

static DOCUMENT: RwLock<Option<Arc<DocStore>>> = RwLock::new(None);

/// Shared relational handle. The first call opens the store with the given
/// settings; later calls return the cached handle and ignore their arguments.
pub fn relational(db_path: &Path, table: &str) -> &'static SqlStore {
    RELATIONAL.get_or_init(|| match SqlStore::open(db_path, table) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to open relational store");
            eprintln!("failed to open relational store: {}", e);
            std::process::exit(1);
        }
    })
}

/// Shared document store handle. Check the cache, take the write lock,
/// re-check, then initialize once. Open errors propagate and leave the cache
/// empty, so a later call may retry.
pub fn document(base_path: &Path) -> Result<Arc<DocStore>, DocStoreError> {
    if let Some(store) = DOCUMENT.read().unwrap().as_ref() {
        return Ok(store.clone());
    }

    let mut guard = DOCUMENT.write().unwrap();
    if let Some(store) = guard.as_ref() {
        return Ok(store.clone());
    }

    let store = Arc::new(DocStore::open_or_create(base_path)?);
    *guard = Some(store.clone());
    Ok(store)
}
