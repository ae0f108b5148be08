//! Deterministic in-process store backend.
//!
//! # Responsibility
//! - Implement the full store contract against an in-memory map.
//! - Offer failure injection and a delete log for exercising partial
//!   failure paths in tests.
//!
//! # Invariants
//! - Listing returns immediate children only, in lexicographic key order.
//! - Urls are stable per path (`memory://<path>`).
//! - An injected failure fires on every mutating or reading call for the
//!   affected path until it is cleared.

use crate::store::remote::{ObjectRef, RemoteAssetStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default)]
struct StoredObject {
    bytes: Vec<u8>,
    metadata: BTreeMap<String, String>,
}

/// In-memory store used by tests and local smoke runs.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    objects: RefCell<BTreeMap<String, StoredObject>>,
    failing_paths: RefCell<HashSet<String>>,
    deleted_paths: RefCell<Vec<String>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call touching `path` fail with a network error.
    pub fn fail_path(&self, path: impl Into<String>) {
        self.failing_paths.borrow_mut().insert(path.into());
    }

    /// Clears a previously injected failure.
    pub fn heal_path(&self, path: &str) {
        self.failing_paths.borrow_mut().remove(path);
    }

    /// Whether an object currently exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.objects.borrow().contains_key(path)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.borrow().len()
    }

    /// Snapshot of one object's bytes, if the object exists.
    pub fn bytes_of(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .borrow()
            .get(path)
            .map(|object| object.bytes.clone())
    }

    /// Snapshot of one object's metadata, if the object exists.
    pub fn metadata_of(&self, path: &str) -> Option<BTreeMap<String, String>> {
        self.objects
            .borrow()
            .get(path)
            .map(|object| object.metadata.clone())
    }

    /// Every delete call that reached the backend, in call order.
    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted_paths.borrow().clone()
    }

    fn check_path(&self, path: &str) -> StoreResult<()> {
        if self.failing_paths.borrow().contains(path) {
            return Err(StoreError::Network {
                path: path.to_string(),
                message: "injected failure".to_string(),
                retryable: true,
            });
        }
        Ok(())
    }
}

impl RemoteAssetStore for MemoryAssetStore {
    fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>> {
        self.check_path(prefix)?;
        let lead = format!("{prefix}/");
        let refs = self
            .objects
            .borrow()
            .keys()
            .filter(|key| {
                key.strip_prefix(lead.as_str())
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .map(|key| ObjectRef::new(key.as_str()))
            .collect();
        Ok(refs)
    }

    fn download_url(&self, object: &ObjectRef) -> StoreResult<String> {
        self.check_path(object.path())?;
        if !self.contains(object.path()) {
            return Err(StoreError::ObjectMissing(object.path().to_string()));
        }
        Ok(format!("memory://{}", object.path()))
    }

    fn metadata(&self, object: &ObjectRef) -> StoreResult<BTreeMap<String, String>> {
        self.check_path(object.path())?;
        self.objects
            .borrow()
            .get(object.path())
            .map(|stored| stored.metadata.clone())
            .ok_or_else(|| StoreError::ObjectMissing(object.path().to_string()))
    }

    fn update_metadata(
        &self,
        object: &ObjectRef,
        metadata: BTreeMap<String, String>,
    ) -> StoreResult<()> {
        self.check_path(object.path())?;
        let mut objects = self.objects.borrow_mut();
        let stored = objects
            .get_mut(object.path())
            .ok_or_else(|| StoreError::ObjectMissing(object.path().to_string()))?;
        stored.metadata = metadata;
        Ok(())
    }

    fn put(&self, path: &str, bytes: &[u8]) -> StoreResult<ObjectRef> {
        self.check_path(path)?;
        self.objects.borrow_mut().insert(
            path.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                metadata: BTreeMap::new(),
            },
        );
        Ok(ObjectRef::new(path))
    }

    fn delete(&self, object: &ObjectRef) -> StoreResult<()> {
        self.check_path(object.path())?;
        let removed = self.objects.borrow_mut().remove(object.path());
        if removed.is_none() {
            return Err(StoreError::ObjectMissing(object.path().to_string()));
        }
        self.deleted_paths
            .borrow_mut()
            .push(object.path().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryAssetStore;
    use crate::store::remote::{ObjectRef, RemoteAssetStore, StoreError};

    #[test]
    fn list_returns_direct_children_only() {
        let store = MemoryAssetStore::new();
        store.put("images/Cat.png", b"cat").unwrap();
        store.put("images/Dog.png", b"dog").unwrap();
        store.put("images/Cat.png/variations/v2.png", b"v2").unwrap();

        let names: Vec<String> = store
            .list("images")
            .unwrap()
            .iter()
            .map(|object| object.name().to_string())
            .collect();
        assert_eq!(names, vec!["Cat.png", "Dog.png"]);

        let nested = store.list("images/Cat.png/variations").unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name(), "v2.png");
    }

    #[test]
    fn injected_failure_blocks_calls_until_healed() {
        let store = MemoryAssetStore::new();
        store.put("images/Cat.png", b"cat").unwrap();
        store.fail_path("images/Cat.png");

        let object = ObjectRef::new("images/Cat.png");
        let err = store.delete(&object).unwrap_err();
        assert!(matches!(err, StoreError::Network { .. }));
        assert!(store.contains("images/Cat.png"));

        store.heal_path("images/Cat.png");
        store.delete(&object).unwrap();
        assert!(!store.contains("images/Cat.png"));
        assert_eq!(store.deleted_paths(), vec!["images/Cat.png".to_string()]);
    }

    #[test]
    fn delete_of_missing_object_reports_object_missing() {
        let store = MemoryAssetStore::new();
        let err = store.delete(&ObjectRef::new("images/ghost.png")).unwrap_err();
        assert!(matches!(err, StoreError::ObjectMissing(_)));
    }
}
