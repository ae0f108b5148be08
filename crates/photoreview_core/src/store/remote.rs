//! Remote asset store contract and object key layout.
//!
//! # Responsibility
//! - Specify the operations the review core needs from a blob store.
//! - Provide the canonical key builders for originals and variations.
//!
//! # Invariants
//! - Top-level blobs live at `images/<name>`.
//! - Variation blobs live at `images/<parent name>/variations/<name>`.
//! - `update_metadata` replaces the stored custom-metadata map wholesale;
//!   callers merge before writing.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Root key prefix for every stored asset blob.
pub const ROOT_PREFIX: &str = "images";

/// Path segment separating a parent's blob from its variation blobs.
pub const VARIATIONS_SEGMENT: &str = "variations";

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level failure from the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Remote call failed in transit or on the remote side.
    Network {
        path: String,
        message: String,
        retryable: bool,
    },
    /// The addressed object does not exist.
    ObjectMissing(String),
}

impl StoreError {
    /// Whether retrying the same call can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { retryable, .. } => *retryable,
            Self::ObjectMissing(_) => false,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network {
                path,
                message,
                retryable,
            } => write!(
                f,
                "remote store call failed for `{path}` (retryable={retryable}): {message}"
            ),
            Self::ObjectMissing(path) => write!(f, "remote object not found: {path}"),
        }
    }
}

impl Error for StoreError {}

/// Handle to one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    path: String,
}

impl ObjectRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Full object key.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Leaf key component, which doubles as the asset display name.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(self.path.as_str())
    }
}

/// Capability contract for the remote key/blob store.
///
/// Implementations carry per-object string-map metadata alongside each blob.
/// All calls are synchronous and issued sequentially by the services.
pub trait RemoteAssetStore {
    /// Lists the immediate child objects under `prefix`, in stable order.
    fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>>;

    /// Resolves a transient retrieval url for one object.
    fn download_url(&self, object: &ObjectRef) -> StoreResult<String>;

    /// Reads the custom-metadata map attached to one object.
    fn metadata(&self, object: &ObjectRef) -> StoreResult<BTreeMap<String, String>>;

    /// Replaces the custom-metadata map attached to one object.
    fn update_metadata(
        &self,
        object: &ObjectRef,
        metadata: BTreeMap<String, String>,
    ) -> StoreResult<()>;

    /// Stores `bytes` at `path`, overwriting any existing object.
    fn put(&self, path: &str, bytes: &[u8]) -> StoreResult<ObjectRef>;

    /// Deletes one object and its metadata.
    fn delete(&self, object: &ObjectRef) -> StoreResult<()>;
}

impl<S: RemoteAssetStore + ?Sized> RemoteAssetStore for &S {
    fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>> {
        (**self).list(prefix)
    }

    fn download_url(&self, object: &ObjectRef) -> StoreResult<String> {
        (**self).download_url(object)
    }

    fn metadata(&self, object: &ObjectRef) -> StoreResult<BTreeMap<String, String>> {
        (**self).metadata(object)
    }

    fn update_metadata(
        &self,
        object: &ObjectRef,
        metadata: BTreeMap<String, String>,
    ) -> StoreResult<()> {
        (**self).update_metadata(object, metadata)
    }

    fn put(&self, path: &str, bytes: &[u8]) -> StoreResult<ObjectRef> {
        (**self).put(path, bytes)
    }

    fn delete(&self, object: &ObjectRef) -> StoreResult<()> {
        (**self).delete(object)
    }
}

/// Key of a top-level asset blob.
pub fn original_key(name: &str) -> String {
    format!("{ROOT_PREFIX}/{name}")
}

/// Key of a variation blob under its parent's name.
pub fn variation_key(parent_name: &str, name: &str) -> String {
    format!("{ROOT_PREFIX}/{parent_name}/{VARIATIONS_SEGMENT}/{name}")
}

/// Listing prefix holding all variation blobs of one parent.
pub fn variations_prefix(parent_name: &str) -> String {
    format!("{ROOT_PREFIX}/{parent_name}/{VARIATIONS_SEGMENT}")
}
