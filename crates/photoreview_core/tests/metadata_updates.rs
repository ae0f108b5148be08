use photoreview_core::{
    AssetId, AssetService, AssetStatus, AssetTree, Comment, MemoryAssetStore, MetadataError,
    MetadataService, RemoteAssetStore, TodoNote, UploadFile, VariationService,
};
use uuid::Uuid;

const CAT_KEY: &str = "images/Cat.png";
const DOG_KEY: &str = "images/Dog.png";
const CAT_V2_KEY: &str = "images/Cat.png/variations/Cat-v2.png";

fn seed(store: &MemoryAssetStore) -> (AssetTree, AssetId, AssetId, AssetId) {
    let assets = AssetService::new(store);
    let mut tree = AssetTree::new();
    let report = assets.upload(
        &mut tree,
        &[
            UploadFile::new("Cat.png", b"cat".to_vec()),
            UploadFile::new("Dog.png", b"dog".to_vec()),
        ],
    );
    assert!(report.failed.is_empty());
    let cat_id = report.added[0];
    let dog_id = report.added[1];

    let variations = VariationService::new(store);
    let variation_id = variations
        .add_variation(&mut tree, cat_id, &UploadFile::new("Cat-v2.png", b"v2".to_vec()))
        .unwrap();

    (tree, cat_id, dog_id, variation_id)
}

#[test]
fn update_status_changes_exactly_the_target_node() {
    let store = MemoryAssetStore::new();
    let (seed_tree, _, _, _) = seed(&store);
    let service = MetadataService::new(&store);

    let mut all_ids = Vec::new();
    for asset in seed_tree.assets() {
        all_ids.push(asset.id);
        for variation in &asset.variations {
            all_ids.push(variation.id);
        }
    }

    for target in all_ids.iter().copied() {
        let mut tree = seed_tree.clone();
        service.update_status(&mut tree, target, AssetStatus::Ready).unwrap();

        for id in all_ids.iter().copied() {
            let status = tree.find(id).unwrap().status;
            if id == target {
                assert_eq!(status, AssetStatus::Ready);
            } else {
                assert_eq!(status, AssetStatus::NeedsReview);
            }
        }
    }
}

#[test]
fn update_status_writes_metadata_at_the_variation_key() {
    let store = MemoryAssetStore::new();
    let (mut tree, _, _, variation_id) = seed(&store);
    let service = MetadataService::new(&store);

    service
        .update_status(&mut tree, variation_id, AssetStatus::InProgress)
        .unwrap();

    let stored = store.metadata_of(CAT_V2_KEY).unwrap();
    assert_eq!(stored.get("status").map(String::as_str), Some("In Progress"));
}

#[test]
fn unknown_id_is_reported_and_changes_nothing() {
    let store = MemoryAssetStore::new();
    let (mut tree, _, _, _) = seed(&store);
    let before = tree.clone();
    let dog_metadata = store.metadata_of(DOG_KEY).unwrap();
    let service = MetadataService::new(&store);

    let missing = Uuid::new_v4();
    let err = service
        .update_status(&mut tree, missing, AssetStatus::Ready)
        .unwrap_err();
    assert!(matches!(err, MetadataError::NotFound(id) if id == missing));
    assert_eq!(tree, before);
    assert_eq!(store.metadata_of(DOG_KEY).unwrap(), dog_metadata);
}

#[test]
fn store_failure_leaves_local_state_unchanged() {
    let store = MemoryAssetStore::new();
    let (mut tree, _, dog_id, _) = seed(&store);
    let before = tree.clone();
    let dog_metadata = store.metadata_of(DOG_KEY).unwrap();
    let service = MetadataService::new(&store);

    store.fail_path(DOG_KEY);
    let err = service
        .update_status(&mut tree, dog_id, AssetStatus::Ready)
        .unwrap_err();
    assert!(matches!(err, MetadataError::Store(_)));
    assert_eq!(tree, before);

    store.heal_path(DOG_KEY);
    assert_eq!(store.metadata_of(DOG_KEY).unwrap(), dog_metadata);
}

#[test]
fn unmanaged_metadata_keys_survive_updates() {
    let store = MemoryAssetStore::new();
    let (mut tree, cat_id, _, _) = seed(&store);

    let mut stored = store.metadata_of(CAT_KEY).unwrap();
    stored.insert("uploadedBy".to_string(), "pipeline".to_string());
    store
        .update_metadata(&photoreview_core::ObjectRef::new(CAT_KEY), stored)
        .unwrap();

    let service = MetadataService::new(&store);
    let notes = vec![TodoNote::new("fix exposure")];
    service
        .update_todo_notes(&mut tree, cat_id, notes.clone())
        .unwrap();

    let stored = store.metadata_of(CAT_KEY).unwrap();
    assert_eq!(stored.get("uploadedBy").map(String::as_str), Some("pipeline"));
    let decoded: Vec<TodoNote> = serde_json::from_str(stored.get("todoNotes").unwrap()).unwrap();
    assert_eq!(decoded, notes);
}

#[test]
fn repeating_an_identical_update_is_idempotent() {
    let store = MemoryAssetStore::new();
    let (mut tree, cat_id, _, _) = seed(&store);
    let service = MetadataService::new(&store);

    let notes = vec![TodoNote::new("crop tighter"), TodoNote::new("fix color")];
    service
        .update_todo_notes(&mut tree, cat_id, notes.clone())
        .unwrap();
    let tree_after_first = tree.clone();
    let metadata_after_first = store.metadata_of(CAT_KEY).unwrap();

    service.update_todo_notes(&mut tree, cat_id, notes).unwrap();
    assert_eq!(tree, tree_after_first);
    assert_eq!(store.metadata_of(CAT_KEY).unwrap(), metadata_after_first);
}

#[test]
fn update_comments_replaces_the_comment_list() {
    let store = MemoryAssetStore::new();
    let (mut tree, _, dog_id, _) = seed(&store);
    let service = MetadataService::new(&store);

    let comments = vec![Comment::new("too dark"), Comment::new("retake?")];
    service
        .update_comments(&mut tree, dog_id, comments.clone())
        .unwrap();

    assert_eq!(tree.find(dog_id).unwrap().comments, comments);
    let stored = store.metadata_of(DOG_KEY).unwrap();
    let decoded: Vec<Comment> = serde_json::from_str(stored.get("comments").unwrap()).unwrap();
    assert_eq!(decoded, comments);
}
