//! Multi-select set and bulk operations.
//!
//! # Responsibility
//! - Maintain the insertion-ordered selection spanning both tree levels.
//! - Execute bulk status change, bulk removal and bulk download over the
//!   current selection.
//!
//! # Invariants
//! - Selected ids are processed sequentially in insertion order; reports
//!   are deterministic for a given selection and store state.
//! - A node leaves the tree only after its remote delete, and for a
//!   top-level node every child delete, has been confirmed.
//! - Variations are deleted before their parent's own blob; no surviving
//!   variation ever points at a removed parent.

use crate::model::asset::{AssetId, AssetStatus};
use crate::service::blob_key;
use crate::store::metadata;
use crate::store::remote::{self, ObjectRef, RemoteAssetStore, StoreError};
use crate::tree::asset_tree::AssetTree;
use log::{error, info, warn};
use std::collections::HashSet;

/// Insertion-ordered, deduplicated set of selected asset ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<AssetId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it if present. Returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: AssetId) -> bool {
        if let Some(index) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// One client-side save the presentation layer should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub name: String,
    pub url: String,
}

/// Outcome of one bulk status change.
#[derive(Debug, Default)]
pub struct BatchStatusReport {
    /// Ids whose remote write succeeded and whose local status changed.
    pub updated: Vec<AssetId>,
    /// Ids whose remote write failed; their local status is unchanged.
    pub failed: Vec<(AssetId, StoreError)>,
    /// Selected ids that resolved to no node.
    pub missing: Vec<AssetId>,
}

/// Outcome of one bulk removal.
#[derive(Debug, Default)]
pub struct BatchRemoveReport {
    /// Ids of every node dropped from the tree, cascaded children included.
    pub removed: Vec<AssetId>,
    /// Selected ids kept locally because a required delete failed.
    pub failed: Vec<(AssetId, StoreError)>,
    /// Selected ids that resolved to no node.
    pub missing: Vec<AssetId>,
}

/// Owns the current selection and runs bulk operations against it.
pub struct SelectionService<S: RemoteAssetStore> {
    store: S,
    selection: SelectionSet,
}

impl<S: RemoteAssetStore> SelectionService<S> {
    /// Creates a service with an empty selection.
    pub fn new(store: S) -> Self {
        Self {
            store,
            selection: SelectionSet::new(),
        }
    }

    /// Toggles one id in the selection.
    pub fn toggle(&mut self, id: AssetId) -> bool {
        self.selection.toggle(id)
    }

    pub fn is_selected(&self, id: AssetId) -> bool {
        self.selection.contains(id)
    }

    /// Currently selected ids in insertion order.
    pub fn selected_ids(&self) -> &[AssetId] {
        self.selection.ids()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Sets `status` on every selected node whose remote write succeeds.
    ///
    /// The remote metadata writes are issued first, one per resolved node;
    /// the tree then changes in a single pass covering only the confirmed
    /// ids. Clears the selection when done.
    pub fn set_status_for_selected(
        &mut self,
        tree: &mut AssetTree,
        status: AssetStatus,
    ) -> BatchStatusReport {
        let mut report = BatchStatusReport::default();

        for id in self.selection.ids().to_vec() {
            let Some(node) = tree.find(id) else {
                report.missing.push(id);
                continue;
            };
            let Some(key) = blob_key(tree, node) else {
                report.missing.push(id);
                continue;
            };

            let mut updated = node.clone();
            updated.status = status;
            let object = ObjectRef::new(key.as_str());
            let write = self
                .store
                .metadata(&object)
                .and_then(|existing| {
                    self.store
                        .update_metadata(&object, metadata::merge_managed(existing, &updated))
                });
            match write {
                Ok(()) => report.updated.push(id),
                Err(err) => {
                    error!(
                        "event=batch_status module=service status=error path={key} error={err}"
                    );
                    report.failed.push((id, err));
                }
            }
        }

        for id in &report.updated {
            if let Some(node) = tree.find_mut(*id) {
                node.status = status;
            }
        }

        info!(
            "event=batch_status module=service status=ok updated={} failed={} missing={}",
            report.updated.len(),
            report.failed.len(),
            report.missing.len()
        );
        self.selection.clear();
        report
    }

    /// Removes every selected node whose remote deletes are confirmed.
    ///
    /// Processes ids sequentially. For a top-level node the variation
    /// blobs are deleted first, then the node's own blob; the node is
    /// dropped locally only when every one of those deletes succeeded.
    /// Confirmed-deleted variations are dropped even when a later step for
    /// the same parent fails. Failures never stop the remaining ids.
    /// Clears the selection when done.
    pub fn remove_selected(&mut self, tree: &mut AssetTree) -> BatchRemoveReport {
        let mut report = BatchRemoveReport::default();
        let mut confirmed: HashSet<AssetId> = HashSet::new();
        let mut removal_order: Vec<AssetId> = Vec::new();

        for id in self.selection.ids().to_vec() {
            if confirmed.contains(&id) {
                continue;
            }
            let Some(node) = tree.find(id) else {
                report.missing.push(id);
                continue;
            };
            let Some(key) = blob_key(tree, node) else {
                report.missing.push(id);
                continue;
            };

            let mut blocking_failure: Option<StoreError> = None;
            if !node.is_variation {
                for variation in &node.variations {
                    if confirmed.contains(&variation.id) {
                        continue;
                    }
                    let child_key = remote::variation_key(&node.name, &variation.name);
                    match self.store.delete(&ObjectRef::new(child_key.as_str())) {
                        Ok(()) => {
                            confirmed.insert(variation.id);
                            removal_order.push(variation.id);
                        }
                        Err(err) => {
                            warn!(
                                "event=batch_remove module=service status=error path={child_key} error={err}"
                            );
                            if blocking_failure.is_none() {
                                blocking_failure = Some(err);
                            }
                        }
                    }
                }
            }

            if blocking_failure.is_none() {
                if let Err(err) = self.store.delete(&ObjectRef::new(key.as_str())) {
                    warn!(
                        "event=batch_remove module=service status=error path={key} error={err}"
                    );
                    blocking_failure = Some(err);
                }
            }

            match blocking_failure {
                None => {
                    confirmed.insert(id);
                    removal_order.push(id);
                }
                Some(err) => report.failed.push((id, err)),
            }
        }

        tree.remove_ids(&confirmed);
        report.removed = removal_order;

        info!(
            "event=batch_remove module=service status=ok removed={} failed={} missing={}",
            report.removed.len(),
            report.failed.len(),
            report.missing.len()
        );
        self.selection.clear();
        report
    }

    /// Resolves one download request per selected node, in selection order.
    ///
    /// Pure read: neither the tree, the store nor the selection changes.
    /// Unresolvable ids are skipped.
    pub fn downloads_for_selected(&self, tree: &AssetTree) -> Vec<DownloadRequest> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| tree.find(*id))
            .map(|asset| DownloadRequest {
                name: asset.name.clone(),
                url: asset.url.clone(),
            })
            .collect()
    }
}
