//! Import/export codec
//!
//! Serializes the item collection to a portable, human-diffable JSON
//! document and validates externally supplied documents back into items.
//!
//! Import is an explicit schema check rather than accept-or-reject on the
//! whole document: the top-level shape must be an array, and every record
//! is validated field by field so a bad document reports exactly which
//! records and fields are wrong. A failed import never yields items.
//!
//! Documents written by earlier versions of the format import cleanly:
//! `updatedAt` defaults to `createdAt`, a missing `category` defaults to
//! General, an empty `imageData` string means no image, and singular kind
//! names are accepted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::models::{Category, ImageData, Item, ItemId, ItemKind, Rating};

/// Serialize the full collection as a pretty-printed JSON array
///
/// All fields and the collection order are preserved; `import` of the
/// produced document yields the same items.
pub fn export(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

/// Errors rejecting an import document
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not JSON, or its root is not an array
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// One or more records failed the schema check
    #[error("{} record(s) failed validation", .0.len())]
    InvalidRecords(Vec<RecordError>),
}

/// All validation failures for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// Position of the record in the document array
    pub index: usize,
    /// Field-level failures
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: ", self.index)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Parse and validate an import document
///
/// On success returns the items in document order, ready for
/// `Store::replace_all`. On failure nothing is produced, so the caller's
/// current collection stays untouched.
pub fn import(document: &str) -> Result<Vec<Item>, ImportError> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| ImportError::InvalidFormat(format!("not valid JSON: {}", e)))?;

    let records = value
        .as_array()
        .ok_or_else(|| ImportError::InvalidFormat("top-level value must be an array".into()))?;

    let mut items = Vec::with_capacity(records.len());
    let mut failures = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        match validate_record(record, &mut seen_ids) {
            Ok(item) => items.push(item),
            Err(errors) => failures.push(RecordError { index, errors }),
        }
    }

    if !failures.is_empty() {
        return Err(ImportError::InvalidRecords(failures));
    }

    Ok(items)
}

/// Validate one record against the item schema
///
/// Collects every field failure instead of stopping at the first one.
fn validate_record(record: &Value, seen_ids: &mut HashSet<String>) -> Result<Item, Vec<FieldError>> {
    let Some(record) = record.as_object() else {
        return Err(vec![FieldError::new("record", "must be a JSON object")]);
    };

    let mut errors = Vec::new();

    let id = match required_str(record, "id") {
        Ok(id) if id.is_empty() => {
            errors.push(FieldError::new("id", "must not be empty"));
            None
        }
        Ok(id) if !seen_ids.insert(id.to_string()) => {
            errors.push(FieldError::new("id", format!("duplicate id '{}'", id)));
            None
        }
        Ok(id) => Some(ItemId::from(id)),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let kind = match required_str(record, "kind") {
        Ok("Posts") | Ok("Post") => Some(ItemKind::Post),
        Ok("Books") | Ok("Book") => Some(ItemKind::Book),
        Ok(other) => {
            errors.push(FieldError::new(
                "kind",
                format!("must be 'Posts' or 'Books', got '{}'", other),
            ));
            None
        }
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let title = optional_str(record, "title", &mut errors).unwrap_or_default();
    let content = optional_str(record, "content", &mut errors).unwrap_or_default();
    let author = optional_str(record, "author", &mut errors).unwrap_or_default();

    let category = match record.get("category").filter(|v| !v.is_null()) {
        None => Category::default(),
        Some(Value::String(name)) => match name.parse() {
            Ok(category) => category,
            Err(e) => {
                errors.push(FieldError::new("category", format!("{}", e)));
                Category::default()
            }
        },
        Some(_) => {
            errors.push(FieldError::new("category", "must be a string"));
            Category::default()
        }
    };

    let image_data = match record.get("imageData").filter(|v| !v.is_null()) {
        None => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => match ImageData::new(s.clone()) {
            Ok(image) => Some(image),
            Err(e) => {
                errors.push(FieldError::new("imageData", format!("{}", e)));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("imageData", "must be a string"));
            None
        }
    };

    let rating = match record.get("rating").filter(|v| !v.is_null()) {
        None => None,
        Some(value) => match value.as_f64() {
            Some(number) => match Rating::new(number) {
                Ok(rating) => Some(rating),
                Err(e) => {
                    errors.push(FieldError::new("rating", format!("{}", e)));
                    None
                }
            },
            None => {
                errors.push(FieldError::new("rating", "must be a number"));
                None
            }
        },
    };

    let created_at = timestamp_field(record, "createdAt", &mut errors);
    let updated_at = match record.get("updatedAt").filter(|v| !v.is_null()) {
        None => created_at,
        Some(_) => timestamp_field(record, "updatedAt", &mut errors),
    };

    // Cross-field rules mirror draft validation
    match kind {
        Some(ItemKind::Book) if title.trim().is_empty() => {
            errors.push(FieldError::new("title", "a book needs a title"));
        }
        Some(ItemKind::Post) => {
            if title.trim().is_empty() && content.trim().is_empty() {
                errors.push(FieldError::new(
                    "title",
                    "a post needs a title or some content",
                ));
            }
            if rating.is_some() {
                errors.push(FieldError::new("rating", "only books can carry a rating"));
            }
        }
        _ => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // All required fields parsed when errors is empty
    let (Some(id), Some(kind), Some(created_at), Some(updated_at)) =
        (id, kind, created_at, updated_at)
    else {
        return Err(vec![FieldError::new("record", "incomplete record")]);
    };

    Ok(Item {
        id,
        kind,
        title,
        content,
        author,
        category,
        image_data,
        rating,
        created_at,
        updated_at,
    })
}

fn required_str<'a>(
    record: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, FieldError> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(FieldError::new(field, "must be a string")),
        None => Err(FieldError::new(field, "missing required field")),
    }
}

fn optional_str(
    record: &serde_json::Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match record.get(field).filter(|v| !v.is_null()) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn timestamp_field(
    record: &serde_json::Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let Some(value) = record.get(field).filter(|v| !v.is_null()) else {
        errors.push(FieldError::new(field, "missing required field"));
        return None;
    };
    let Some(millis) = value.as_i64() else {
        errors.push(FieldError::new(field, "must be an integer timestamp"));
        return None;
    };
    match DateTime::from_timestamp_millis(millis) {
        Some(ts) => Some(ts),
        None => {
            errors.push(FieldError::new(
                field,
                format!("timestamp {} is out of range", millis),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDraft;

    fn sample_items() -> Vec<Item> {
        vec![
            ItemDraft::new()
                .title("Hello")
                .content("first post")
                .build(ItemKind::Post)
                .unwrap(),
            ItemDraft::new()
                .title("Dune")
                .author("Frank Herbert")
                .category(Category::Books)
                .rating(Rating::new(4.5).unwrap())
                .build(ItemKind::Book)
                .unwrap(),
        ]
    }

    #[test]
    fn test_export_import_round_trip() {
        let items = sample_items();
        let document = export(&items).unwrap();
        let imported = import(&document).unwrap();
        assert_eq!(imported, items);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let document = export(&sample_items()).unwrap();
        assert!(document.contains("\n  "));
    }

    #[test]
    fn test_import_rejects_object_root() {
        let err = import("{}").unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_rejects_garbage() {
        let err = import("definitely not json").unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_empty_array() {
        assert!(import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_original_format_document() {
        // The shape the original app exported: no updatedAt, empty
        // imageData strings, base-36 ids, no rating on posts
        let document = r#"[
            {
                "id": "mfx3k2-abcde",
                "kind": "Posts",
                "title": "Hi",
                "content": "",
                "author": "",
                "category": "General",
                "imageData": "",
                "createdAt": 1700000000000
            },
            {
                "id": "mfx3k2-fghij",
                "kind": "Books",
                "title": "The Hobbit",
                "content": "a classic",
                "author": "J.R.R. Tolkien",
                "category": "Books",
                "imageData": "",
                "rating": 5,
                "createdAt": 1700000100000
            }
        ]"#;

        let items = import(document).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::Post);
        assert_eq!(items[0].updated_at, items[0].created_at);
        assert!(items[0].image_data.is_none());
        assert_eq!(items[1].rating.unwrap().value(), 5.0);
    }

    #[test]
    fn test_import_reports_field_errors() {
        let document = r#"[
            {
                "id": "",
                "kind": "Gadgets",
                "title": "x",
                "createdAt": "yesterday"
            }
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 0);

        let fields: Vec<&str> = records[0].errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"id"));
        assert!(fields.contains(&"kind"));
        assert!(fields.contains(&"createdAt"));
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let document = r#"[
            {"id": "same", "kind": "Posts", "title": "one", "createdAt": 1000},
            {"id": "same", "kind": "Posts", "title": "two", "createdAt": 2000}
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 1);
        assert!(records[0].errors[0].message.contains("duplicate"));
    }

    #[test]
    fn test_import_rejects_out_of_range_rating() {
        let document = r#"[
            {"id": "b1", "kind": "Books", "title": "x", "rating": 9.5, "createdAt": 1000}
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        assert_eq!(records[0].errors[0].field, "rating");
    }

    #[test]
    fn test_import_rejects_rating_on_post() {
        let document = r#"[
            {"id": "p1", "kind": "Posts", "title": "x", "rating": 3, "createdAt": 1000}
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        assert_eq!(records[0].errors[0].field, "rating");
    }

    #[test]
    fn test_import_rejects_untitled_book() {
        let document = r#"[
            {"id": "b1", "kind": "Books", "content": "no title", "createdAt": 1000}
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        assert_eq!(records[0].errors[0].field, "title");
    }

    #[test]
    fn test_import_ignores_unknown_fields() {
        let document = r#"[
            {"id": "p1", "kind": "Posts", "title": "x", "createdAt": 1000, "legacyFlag": true}
        ]"#;
        assert_eq!(import(document).unwrap().len(), 1);
    }

    #[test]
    fn test_import_collects_errors_across_records() {
        let document = r#"[
            {"id": "ok", "kind": "Posts", "title": "fine", "createdAt": 1000},
            {"id": "bad", "kind": "Books", "createdAt": 1000},
            "not even an object"
        ]"#;

        let ImportError::InvalidRecords(records) = import(document).unwrap_err() else {
            panic!("expected InvalidRecords");
        };
        let indexes: Vec<usize> = records.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }
}
