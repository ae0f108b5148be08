//! Managed metadata schema and list payload codec.
//!
//! # Responsibility
//! - Serialize status, to-do notes and comments into string metadata values.
//! - Decode stored payloads back into model types.
//!
//! # Invariants
//! - Managed keys are exactly `status`, `todoNotes` and `comments`.
//! - Absent or malformed list payloads decode to an empty list, never an
//!   error; asset loading stays resilient to partially-written metadata.
//! - Merging preserves every unmanaged key untouched.

use crate::model::asset::{Asset, AssetStatus, Comment, TodoNote};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata key holding the status wire string.
pub const STATUS_KEY: &str = "status";

/// Metadata key holding the JSON-serialized to-do note list.
pub const TODO_NOTES_KEY: &str = "todoNotes";

/// Metadata key holding the JSON-serialized comment list.
pub const COMMENTS_KEY: &str = "comments";

const EMPTY_LIST: &str = "[]";

/// Serializes the to-do note list into its metadata string form.
pub fn encode_todo_notes(notes: &[TodoNote]) -> String {
    encode_list(notes, TODO_NOTES_KEY)
}

/// Serializes the comment list into its metadata string form.
pub fn encode_comments(comments: &[Comment]) -> String {
    encode_list(comments, COMMENTS_KEY)
}

/// Decodes a stored to-do note payload, falling back to an empty list.
pub fn decode_todo_notes(raw: Option<&str>) -> Vec<TodoNote> {
    decode_list(raw, TODO_NOTES_KEY)
}

/// Decodes a stored comment payload, falling back to an empty list.
pub fn decode_comments(raw: Option<&str>) -> Vec<Comment> {
    decode_list(raw, COMMENTS_KEY)
}

/// Decodes a stored status value, defaulting to `NeedsReview`.
pub fn decode_status(raw: Option<&str>) -> AssetStatus {
    match raw.and_then(AssetStatus::parse) {
        Some(status) => status,
        None => {
            if let Some(value) = raw {
                warn!(
                    "event=metadata_decode module=store status=fallback key={STATUS_KEY} value={value}"
                );
            }
            AssetStatus::NeedsReview
        }
    }
}

/// Builds the three managed entries from one asset's current state.
pub fn managed_entries(asset: &Asset) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    entries.insert(STATUS_KEY.to_string(), asset.status.as_str().to_string());
    entries.insert(
        TODO_NOTES_KEY.to_string(),
        encode_todo_notes(&asset.todo_notes),
    );
    entries.insert(COMMENTS_KEY.to_string(), encode_comments(&asset.comments));
    entries
}

/// Overwrites the managed keys in `existing` from `asset`, keeping every
/// unmanaged key so metadata set by other tooling survives.
pub fn merge_managed(
    mut existing: BTreeMap<String, String>,
    asset: &Asset,
) -> BTreeMap<String, String> {
    existing.append(&mut managed_entries(asset));
    existing
}

fn encode_list<T: Serialize>(items: &[T], key: &str) -> String {
    match serde_json::to_string(items) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("event=metadata_encode module=store status=fallback key={key} error={err}");
            EMPTY_LIST.to_string()
        }
    }
}

fn decode_list<T: DeserializeOwned>(raw: Option<&str>, key: &str) -> Vec<T> {
    let Some(payload) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(payload) {
        Ok(items) => items,
        Err(err) => {
            warn!("event=metadata_decode module=store status=fallback key={key} error={err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        decode_comments, decode_status, decode_todo_notes, encode_todo_notes, merge_managed,
        COMMENTS_KEY, STATUS_KEY, TODO_NOTES_KEY,
    };
    use crate::model::asset::{Asset, AssetStatus, TodoNote};
    use std::collections::BTreeMap;

    #[test]
    fn todo_notes_roundtrip_through_string_form() {
        let notes = vec![TodoNote::new("fix color"), TodoNote::new("crop")];
        let decoded = decode_todo_notes(Some(encode_todo_notes(&notes).as_str()));
        assert_eq!(decoded, notes);
    }

    #[test]
    fn malformed_payloads_fall_back_to_empty_lists() {
        assert!(decode_todo_notes(Some("not json")).is_empty());
        assert!(decode_comments(Some("{\"truncated\":")).is_empty());
        assert!(decode_todo_notes(None).is_empty());
    }

    #[test]
    fn status_defaults_to_needs_review() {
        assert_eq!(decode_status(None), AssetStatus::NeedsReview);
        assert_eq!(decode_status(Some("Draft")), AssetStatus::NeedsReview);
        assert_eq!(decode_status(Some("Ready")), AssetStatus::Ready);
    }

    #[test]
    fn merge_keeps_unmanaged_keys() {
        let mut existing = BTreeMap::new();
        existing.insert("uploadedBy".to_string(), "pipeline".to_string());
        existing.insert(STATUS_KEY.to_string(), "Ready".to_string());

        let mut asset = Asset::new_original("Cat.png", "url");
        asset.status = AssetStatus::InProgress;

        let merged = merge_managed(existing, &asset);
        assert_eq!(merged.get("uploadedBy").map(String::as_str), Some("pipeline"));
        assert_eq!(merged.get(STATUS_KEY).map(String::as_str), Some("In Progress"));
        assert_eq!(merged.get(TODO_NOTES_KEY).map(String::as_str), Some("[]"));
        assert_eq!(merged.get(COMMENTS_KEY).map(String::as_str), Some("[]"));
    }
}
