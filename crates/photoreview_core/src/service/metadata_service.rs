//! Status, comment and to-do note mutations.
//!
//! # Responsibility
//! - Apply field updates to one node located by id at either level.
//! - Pair every local update with the matching remote metadata write.
//!
//! # Invariants
//! - The remote write targets the pre-update key; none of these operations
//!   change identity-determining fields (name, nesting role, parent).
//! - The node is updated in memory only after the remote write succeeded.
//! - An unknown id is reported explicitly and causes no remote call.

use crate::model::asset::{Asset, AssetId, AssetStatus, Comment, TodoNote};
use crate::service::blob_key;
use crate::store::metadata;
use crate::store::remote::{ObjectRef, RemoteAssetStore, StoreError};
use crate::tree::asset_tree::AssetTree;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for metadata mutation operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors from metadata mutation operations.
#[derive(Debug)]
pub enum MetadataError {
    /// The id resolves to no node in the current tree.
    NotFound(AssetId),
    /// The remote metadata read or write failed.
    Store(StoreError),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "asset not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for MetadataError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Mutation entry points for per-asset review fields.
pub struct MetadataService<S: RemoteAssetStore> {
    store: S,
}

impl<S: RemoteAssetStore> MetadataService<S> {
    /// Creates a service using the provided store capability.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sets the review status of the node with `id`.
    pub fn update_status(
        &self,
        tree: &mut AssetTree,
        id: AssetId,
        status: AssetStatus,
    ) -> MetadataResult<()> {
        self.commit(tree, id, |asset| asset.status = status)
    }

    /// Replaces the comment list of the node with `id`.
    pub fn update_comments(
        &self,
        tree: &mut AssetTree,
        id: AssetId,
        comments: Vec<Comment>,
    ) -> MetadataResult<()> {
        self.commit(tree, id, move |asset| asset.comments = comments)
    }

    /// Replaces the to-do note list of the node with `id`.
    pub fn update_todo_notes(
        &self,
        tree: &mut AssetTree,
        id: AssetId,
        notes: Vec<TodoNote>,
    ) -> MetadataResult<()> {
        self.commit(tree, id, move |asset| asset.todo_notes = notes)
    }

    /// Writes the updated managed metadata remotely, then applies the same
    /// update to the in-memory node.
    fn commit<F>(&self, tree: &mut AssetTree, id: AssetId, update: F) -> MetadataResult<()>
    where
        F: FnOnce(&mut Asset),
    {
        let Some(node) = tree.find(id) else {
            return Err(MetadataError::NotFound(id));
        };
        let Some(key) = blob_key(tree, node) else {
            return Err(MetadataError::NotFound(id));
        };

        let mut updated = node.clone();
        update(&mut updated);

        let object = ObjectRef::new(key.as_str());
        let existing = match self.store.metadata(&object) {
            Ok(map) => map,
            Err(err) => {
                error!("event=metadata_read module=service status=error path={key} error={err}");
                return Err(err.into());
            }
        };
        let merged = metadata::merge_managed(existing, &updated);
        if let Err(err) = self.store.update_metadata(&object, merged) {
            error!("event=metadata_write module=service status=error path={key} error={err}");
            return Err(err.into());
        }

        if let Some(node) = tree.find_mut(id) {
            *node = updated;
        }
        info!("event=metadata_write module=service status=ok path={key}");
        Ok(())
    }
}
