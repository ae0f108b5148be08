//! Case-insensitive substring filter over top-level asset names.
//!
//! # Responsibility
//! - Filter the top-level sequence for display without copying the tree.
//!
//! # Invariants
//! - Only top-level names are matched; a variation is visible exactly when
//!   its parent matches.
//! - Result order is the tree's original order.

use crate::model::asset::Asset;
use crate::tree::asset_tree::AssetTree;

/// Returns the top-level assets whose name contains `term`, ignoring case.
///
/// An empty term matches every asset. Matched assets keep their variations
/// attached; variation names themselves are never tested against the term.
pub fn search_by_name<'a>(tree: &'a AssetTree, term: &str) -> Vec<&'a Asset> {
    let needle = term.to_lowercase();
    tree.assets()
        .iter()
        .filter(|asset| asset.name.to_lowercase().contains(&needle))
        .collect()
}
