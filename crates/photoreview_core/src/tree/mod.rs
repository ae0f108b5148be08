//! In-memory asset hierarchy and lookup.
//!
//! # Responsibility
//! - Own the ordered two-level asset collection.
//! - Provide id lookup and the single-pass bulk removal primitive.
//!
//! # Invariants
//! - Top-level order is upload order; nodes are only ever appended.
//! - Lookup visits top-level nodes first, then each node's variations,
//!   in document order.

pub mod asset_tree;
