//! Variation creation under a top-level asset.
//!
//! # Responsibility
//! - Upload a variation blob and register the child node on success.
//! - Enforce the one-level nesting cap above the tree layer.
//!
//! # Invariants
//! - The parent must resolve to an existing top-level asset before any
//!   remote call is made.
//! - The tree is touched only after blob, url and metadata are all
//!   committed remotely.
//! - Children are appended; existing variations are never reordered.

use crate::model::asset::{Asset, AssetId};
use crate::service::asset_service::UploadFile;
use crate::store::metadata;
use crate::store::remote::{self, RemoteAssetStore, StoreError};
use crate::tree::asset_tree::AssetTree;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for variation operations.
pub type VariationResult<T> = Result<T, VariationError>;

/// Errors from variation creation.
#[derive(Debug)]
pub enum VariationError {
    /// `parent_id` resolves to no node in the current tree.
    ParentNotFound(AssetId),
    /// `parent_id` resolves to a variation; nesting is capped at one level.
    InvalidParent(AssetId),
    /// Blob upload, url resolution or metadata write failed.
    Store(StoreError),
}

impl Display for VariationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentNotFound(id) => write!(f, "variation parent not found: {id}"),
            Self::InvalidParent(id) => {
                write!(f, "variation parent must be a top-level asset: {id}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VariationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for VariationError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Creates child assets under an existing top-level asset.
pub struct VariationService<S: RemoteAssetStore> {
    store: S,
}

impl<S: RemoteAssetStore> VariationService<S> {
    /// Creates a service using the provided store capability.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Uploads `file` as a new variation of `parent_id`.
    ///
    /// Returns the id of the appended child. Any failure before the final
    /// metadata write leaves both the tree and the parent untouched.
    pub fn add_variation(
        &self,
        tree: &mut AssetTree,
        parent_id: AssetId,
        file: &UploadFile,
    ) -> VariationResult<AssetId> {
        let parent = match tree.find(parent_id) {
            None => return Err(VariationError::ParentNotFound(parent_id)),
            Some(node) if node.is_variation => {
                return Err(VariationError::InvalidParent(parent_id));
            }
            Some(node) => node,
        };

        let key = remote::variation_key(&parent.name, &file.name);
        let variation = match self.upload_blob(&key, parent_id, file) {
            Ok(variation) => variation,
            Err(err) => {
                error!("event=variation_add module=service status=error path={key} error={err}");
                return Err(err.into());
            }
        };

        let id = variation.id;
        if let Some(parent) = tree.find_mut(parent_id) {
            parent.variations.push(variation);
        }
        info!("event=variation_add module=service status=ok path={key}");
        Ok(id)
    }

    /// Commits blob, url and initial metadata remotely, in that order.
    fn upload_blob(
        &self,
        key: &str,
        parent_id: AssetId,
        file: &UploadFile,
    ) -> Result<Asset, StoreError> {
        let object = self.store.put(key, &file.bytes)?;
        let url = self.store.download_url(&object)?;
        let variation = Asset::new_variation(parent_id, file.name.as_str(), url);

        let existing = self.store.metadata(&object)?;
        self.store
            .update_metadata(&object, metadata::merge_managed(existing, &variation))?;
        Ok(variation)
    }
}
