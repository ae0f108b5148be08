//! Top-level upload and library loading.
//!
//! # Responsibility
//! - Upload original image files and register them in the tree.
//! - Rebuild the asset tree from the remote store contents.
//!
//! # Invariants
//! - A file's node is appended only after blob, url and metadata are all
//!   committed remotely; a per-file failure never aborts the batch.
//! - Loading assigns fresh ids; remote keys, not ids, carry identity
//!   across sessions.

use crate::model::asset::{Asset, AssetId};
use crate::store::metadata;
use crate::store::remote::{self, ObjectRef, RemoteAssetStore, StoreError, StoreResult};
use crate::tree::asset_tree::AssetTree;
use log::{error, info};

/// One file handed in by the presentation layer for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Leaf file name, used as the asset name and remote key component.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome of one upload batch.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Ids of the assets appended to the tree, in upload order.
    pub added: Vec<AssetId>,
    /// File names whose upload failed, with the failure.
    pub failed: Vec<(String, StoreError)>,
}

/// Upload and load entry points for top-level assets.
pub struct AssetService<S: RemoteAssetStore> {
    store: S,
}

impl<S: RemoteAssetStore> AssetService<S> {
    /// Creates a service using the provided store capability.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Uploads `files` sequentially and appends one asset per success.
    ///
    /// Failed files are logged and reported; the remaining files still
    /// upload. The tree gains nodes only for fully committed files.
    pub fn upload(&self, tree: &mut AssetTree, files: &[UploadFile]) -> UploadReport {
        let mut report = UploadReport::default();
        for file in files {
            let key = remote::original_key(&file.name);
            match self.upload_original(&key, file) {
                Ok(asset) => {
                    info!("event=asset_upload module=service status=ok path={key}");
                    report.added.push(asset.id);
                    tree.push_original(asset);
                }
                Err(err) => {
                    error!(
                        "event=asset_upload module=service status=error path={key} error={err}"
                    );
                    report.failed.push((file.name.clone(), err));
                }
            }
        }
        report
    }

    /// Rebuilds the whole tree from the remote store.
    ///
    /// Statuses, notes and comments come from stored metadata; absent or
    /// malformed payloads fall back to their defaults. Any transport
    /// failure propagates and leaves the caller's current tree untouched.
    pub fn load(&self) -> StoreResult<AssetTree> {
        let mut assets = Vec::new();
        for object in self.store.list(remote::ROOT_PREFIX)? {
            let mut asset = self.load_node(&object, None)?;
            for child in self.store.list(&remote::variations_prefix(&asset.name))? {
                let variation = self.load_node(&child, Some(asset.id))?;
                asset.variations.push(variation);
            }
            assets.push(asset);
        }
        let tree = AssetTree::from_assets(assets);
        info!(
            "event=library_load module=service status=ok top_level={} nodes={}",
            tree.len(),
            tree.node_count()
        );
        Ok(tree)
    }

    /// Commits blob, url and initial metadata remotely, in that order.
    fn upload_original(&self, key: &str, file: &UploadFile) -> Result<Asset, StoreError> {
        let object = self.store.put(key, &file.bytes)?;
        let url = self.store.download_url(&object)?;
        let asset = Asset::new_original(file.name.as_str(), url);

        let existing = self.store.metadata(&object)?;
        self.store
            .update_metadata(&object, metadata::merge_managed(existing, &asset))?;
        Ok(asset)
    }

    /// Materializes one stored object into an asset node with a fresh id.
    fn load_node(&self, object: &ObjectRef, parent_id: Option<AssetId>) -> StoreResult<Asset> {
        let url = self.store.download_url(object)?;
        let stored = self.store.metadata(object)?;

        let mut asset = match parent_id {
            Some(parent_id) => Asset::new_variation(parent_id, object.name(), url),
            None => Asset::new_original(object.name(), url),
        };
        asset.status = metadata::decode_status(stored.get(metadata::STATUS_KEY).map(String::as_str));
        asset.todo_notes =
            metadata::decode_todo_notes(stored.get(metadata::TODO_NOTES_KEY).map(String::as_str));
        asset.comments =
            metadata::decode_comments(stored.get(metadata::COMMENTS_KEY).map(String::as_str));
        Ok(asset)
    }
}
