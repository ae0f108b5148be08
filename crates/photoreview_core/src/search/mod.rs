//! Display-time filtering over the asset tree.
//!
//! # Responsibility
//! - Expose the read-only name filter used by list rendering.
//! - Keep matching rules inside core.

pub mod name_filter;
