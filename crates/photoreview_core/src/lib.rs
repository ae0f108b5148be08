//! Core domain logic for the photo review workflow.
//! This crate is the single source of truth for asset-tree invariants.

pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod tree;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::asset::{Asset, AssetId, AssetStatus, Comment, TodoNote};
pub use search::name_filter::search_by_name;
pub use service::asset_service::{AssetService, UploadFile, UploadReport};
pub use service::metadata_service::{MetadataError, MetadataResult, MetadataService};
pub use service::selection_service::{
    BatchRemoveReport, BatchStatusReport, DownloadRequest, SelectionService, SelectionSet,
};
pub use service::variation_service::{VariationError, VariationResult, VariationService};
pub use store::memory::MemoryAssetStore;
pub use store::remote::{ObjectRef, RemoteAssetStore, StoreError, StoreResult};
pub use tree::asset_tree::AssetTree;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
