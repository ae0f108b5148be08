// The variation hierarchy is capped at one level by design; these
// properties assume and assert that cap rather than unlimited nesting.

use photoreview_core::{
    AssetId, AssetService, AssetTree, MemoryAssetStore, SelectionService, UploadFile,
    VariationService,
};
use uuid::Uuid;

fn all_ids(tree: &AssetTree) -> Vec<AssetId> {
    let mut ids = Vec::new();
    for asset in tree.assets() {
        ids.push(asset.id);
        for variation in &asset.variations {
            ids.push(variation.id);
        }
    }
    ids
}

fn assert_no_orphans(tree: &AssetTree) {
    for asset in tree.assets() {
        for variation in &asset.variations {
            assert_eq!(variation.parent_id, Some(asset.id));
            assert!(tree.find_top_level(asset.id).is_some());
        }
    }
}

#[test]
fn lookup_is_total_over_the_live_id_set() {
    let store = MemoryAssetStore::new();
    let assets = AssetService::new(&store);
    let variations = VariationService::new(&store);
    let mut tree = AssetTree::new();

    let report = assets.upload(
        &mut tree,
        &[
            UploadFile::new("Cat.png", b"c".to_vec()),
            UploadFile::new("Dog.png", b"d".to_vec()),
            UploadFile::new("Owl.png", b"o".to_vec()),
        ],
    );
    for parent_id in [report.added[0], report.added[1]] {
        variations
            .add_variation(&mut tree, parent_id, &UploadFile::new("v.png", b"v".to_vec()))
            .unwrap();
    }

    // Every id assigned by a successful create resolves.
    let ids = all_ids(&tree);
    assert_eq!(ids.len(), 5);
    for id in ids.iter().copied() {
        assert_eq!(tree.find(id).unwrap().id, id);
    }
    // Ids never assigned do not.
    assert!(tree.find(Uuid::new_v4()).is_none());

    // Removed ids stop resolving, and only those.
    let mut selection = SelectionService::new(&store);
    selection.toggle(report.added[0]);
    let removed = selection.remove_selected(&mut tree).removed;
    for id in ids.iter().copied() {
        if removed.contains(&id) {
            assert!(tree.find(id).is_none());
        } else {
            assert!(tree.find(id).is_some());
        }
    }
}

#[test]
fn add_and_remove_sequences_never_orphan_a_variation() {
    let store = MemoryAssetStore::new();
    let assets = AssetService::new(&store);
    let variations = VariationService::new(&store);
    let mut selection = SelectionService::new(&store);
    let mut tree = AssetTree::new();

    let report = assets.upload(
        &mut tree,
        &[
            UploadFile::new("A.png", b"a".to_vec()),
            UploadFile::new("B.png", b"b".to_vec()),
        ],
    );
    let a_id = report.added[0];
    let b_id = report.added[1];

    let a_child = variations
        .add_variation(&mut tree, a_id, &UploadFile::new("a1.png", b"1".to_vec()))
        .unwrap();
    variations
        .add_variation(&mut tree, b_id, &UploadFile::new("b1.png", b"1".to_vec()))
        .unwrap();
    assert_no_orphans(&tree);

    selection.toggle(a_child);
    selection.remove_selected(&mut tree);
    assert_no_orphans(&tree);

    selection.toggle(b_id);
    selection.remove_selected(&mut tree);
    assert_no_orphans(&tree);
    assert_eq!(tree.node_count(), 1);

    variations
        .add_variation(&mut tree, a_id, &UploadFile::new("a2.png", b"2".to_vec()))
        .unwrap();
    assert_no_orphans(&tree);
    assert_eq!(tree.node_count(), 2);
}
