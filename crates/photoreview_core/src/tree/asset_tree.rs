//! Ordered asset hierarchy with id-based lookup.
//!
//! # Responsibility
//! - Hold the top-level asset sequence and traverse it for id resolution.
//! - Apply structural removals in a single deterministic pass.
//!
//! # Invariants
//! - Lookup order is document order: top-level nodes first, then each
//!   node's variations. Variation lists of variations are never traversed.
//! - Removal drops a selected top-level node together with all of its
//!   variations, and drops selected variations from surviving parents.

use crate::model::asset::{Asset, AssetId};
use std::collections::HashSet;

/// Ordered two-level collection of assets.
///
/// Lookup is a linear scan over every node; no secondary index is kept.
/// That is a deliberate trade-off for the intended collection size (tens to
/// low hundreds of assets) and becomes a scaling limit beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTree {
    assets: Vec<Asset>,
}

impl AssetTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree from an already-ordered top-level sequence.
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// Returns the top-level assets in upload order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Returns the number of top-level assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Returns the total node count across both levels.
    pub fn node_count(&self) -> usize {
        self.assets
            .iter()
            .map(|asset| 1 + asset.variations.len())
            .sum()
    }

    /// Appends one top-level asset, preserving upload order.
    pub fn push_original(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Finds the unique node with `id`, at either level.
    pub fn find(&self, id: AssetId) -> Option<&Asset> {
        for asset in &self.assets {
            if asset.id == id {
                return Some(asset);
            }
        }
        for asset in &self.assets {
            if let Some(variation) = asset.variations.iter().find(|v| v.id == id) {
                return Some(variation);
            }
        }
        None
    }

    /// Mutable counterpart of [`AssetTree::find`], same visit order.
    pub fn find_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        let top_index = self.assets.iter().position(|asset| asset.id == id);
        if let Some(index) = top_index {
            return self.assets.get_mut(index);
        }
        for asset in &mut self.assets {
            if let Some(variation) = asset.variations.iter_mut().find(|v| v.id == id) {
                return Some(variation);
            }
        }
        None
    }

    /// Finds a top-level node only; variations never match.
    pub fn find_top_level(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.find(id).is_some()
    }

    /// Returns the display name of a variation's owning top-level asset.
    pub fn parent_name(&self, variation: &Asset) -> Option<&str> {
        let parent_id = variation.parent_id?;
        self.find_top_level(parent_id)
            .map(|parent| parent.name.as_str())
    }

    /// Drops every node whose id is in `ids`, in one pass.
    ///
    /// A dropped top-level node takes all of its variations with it.
    /// Surviving top-level nodes lose exactly the variations named in `ids`.
    pub fn remove_ids(&mut self, ids: &HashSet<AssetId>) {
        self.assets.retain(|asset| !ids.contains(&asset.id));
        for asset in &mut self.assets {
            asset
                .variations
                .retain(|variation| !ids.contains(&variation.id));
        }
    }
}
