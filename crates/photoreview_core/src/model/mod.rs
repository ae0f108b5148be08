//! Domain model for reviewed image assets.
//!
//! # Responsibility
//! - Define the canonical asset record shared by originals and variations.
//! - Keep one node shape for both hierarchy levels.
//!
//! # Invariants
//! - Every asset is identified by a stable `AssetId`.
//! - A variation carries `parent_id` and never owns variations of its own.

pub mod asset;
