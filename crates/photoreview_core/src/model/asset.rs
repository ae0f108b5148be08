//! Asset domain model.
//!
//! # Responsibility
//! - Define the canonical record for originals and their variations.
//! - Provide constructors that establish creation-time defaults.
//!
//! # Invariants
//! - `id` is stable, globally unique, and independent of the remote key.
//! - `parent_id` is `Some` exactly when `is_variation` is true.
//! - `variations` stays empty forever on a variation node.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every asset node, original or variation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AssetId = Uuid;

/// Review lifecycle state of one asset.
///
/// The serialized form matches the strings persisted in remote metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Approved and ready for use.
    #[serde(rename = "Ready")]
    Ready,
    /// Actively being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Awaiting a reviewer. Default for every new asset.
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl AssetStatus {
    /// Returns the wire string stored in remote metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::InProgress => "In Progress",
            Self::NeedsReview => "Needs Review",
        }
    }

    /// Parses one wire string back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Ready" => Some(Self::Ready),
            "In Progress" => Some(Self::InProgress),
            "Needs Review" => Some(Self::NeedsReview),
            _ => None,
        }
    }
}

impl Default for AssetStatus {
    fn default() -> Self {
        Self::NeedsReview
    }
}

/// One to-do entry attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoNote {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl TodoNote {
    /// Creates an open note with a fresh stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

/// One review comment attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
}

impl Comment {
    /// Creates a comment with a fresh stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// One node of the asset hierarchy.
///
/// The same shape serves both levels; `is_variation`/`parent_id` mark the
/// nesting role, and only top-level nodes ever hold entries in `variations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable global id used for selection, lookup and mutation targeting.
    pub id: AssetId,
    /// Display name; equals the leaf component of the remote blob key.
    pub name: String,
    /// Transient retrieval location for the blob. Never used as identity.
    pub url: String,
    /// Current review state.
    pub status: AssetStatus,
    /// True only for children of a top-level asset.
    pub is_variation: bool,
    /// Owning top-level asset id. `Some` exactly when `is_variation`.
    pub parent_id: Option<AssetId>,
    /// Child assets in upload order. Always empty on a variation.
    pub variations: Vec<Asset>,
    /// Open and completed to-do entries, oldest first.
    pub todo_notes: Vec<TodoNote>,
    /// Review comments, oldest first.
    pub comments: Vec<Comment>,
}

impl Asset {
    /// Creates a top-level asset with creation-time defaults.
    pub fn new_original(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
            status: AssetStatus::NeedsReview,
            is_variation: false,
            parent_id: None,
            variations: Vec::new(),
            todo_notes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Creates a variation attached to `parent_id` with creation-time defaults.
    pub fn new_variation(
        parent_id: AssetId,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
            status: AssetStatus::NeedsReview,
            is_variation: true,
            parent_id: Some(parent_id),
            variations: Vec::new(),
            todo_notes: Vec::new(),
            comments: Vec::new(),
        }
    }
}
