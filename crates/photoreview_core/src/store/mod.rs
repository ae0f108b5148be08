//! Remote object store contract and metadata wire schema.
//!
//! # Responsibility
//! - Define the key/blob store capability injected into every service.
//! - Keep the object key layout and metadata schema in one place.
//!
//! # Invariants
//! - Metadata values are always strings; structured fields are JSON text.
//! - Services receive a store implementation; they never reach for one
//!   through shared global state.

pub mod memory;
pub mod metadata;
pub mod remote;
