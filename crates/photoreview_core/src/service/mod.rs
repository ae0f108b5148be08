//! Use-case services over the asset tree and the remote store.
//!
//! # Responsibility
//! - Orchestrate store calls and tree mutations into stable entry points.
//! - Keep presentational callers decoupled from key layout and wire format.
//!
//! # Invariants
//! - The tree is mutated only after the corresponding remote call has
//!   succeeded; a failed remote call leaves the tree as it was.
//! - Services receive the store as an injected capability.

pub mod asset_service;
pub mod metadata_service;
pub mod selection_service;
pub mod variation_service;

use crate::model::asset::Asset;
use crate::store::remote;
use crate::tree::asset_tree::AssetTree;

/// Resolves the remote blob key for one node of `tree`.
///
/// Returns `None` for a variation whose parent cannot be resolved; such a
/// node is not addressable remotely and callers treat it as not found.
pub(crate) fn blob_key(tree: &AssetTree, asset: &Asset) -> Option<String> {
    if asset.is_variation {
        let parent_name = tree.parent_name(asset)?;
        Some(remote::variation_key(parent_name, &asset.name))
    } else {
        Some(remote::original_key(&asset.name))
    }
}
