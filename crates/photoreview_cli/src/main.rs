//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `photoreview_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use photoreview_core::{search_by_name, AssetService, MemoryAssetStore, UploadFile};

fn main() {
    println!("photoreview_core version={}", photoreview_core::core_version());

    let service = AssetService::new(MemoryAssetStore::new());
    let mut tree = photoreview_core::AssetTree::new();
    let report = service.upload(
        &mut tree,
        &[
            UploadFile::new("Cat1.png", b"cat".to_vec()),
            UploadFile::new("Dog.png", b"dog".to_vec()),
        ],
    );
    println!(
        "smoke upload added={} failed={}",
        report.added.len(),
        report.failed.len()
    );
    println!(
        "smoke search cat hits={}",
        search_by_name(&tree, "cat").len()
    );
}
