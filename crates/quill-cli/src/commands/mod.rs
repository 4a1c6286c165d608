//! Command handlers

use anyhow::{bail, Result};

use quill_core::{ItemId, ItemKind, Store};

pub mod book;
pub mod config;
pub mod data;
pub mod post;
pub mod search;
pub mod stats;

/// Resolve an item id of the expected kind (supports full id or prefix)
pub fn resolve_item_id(store: &Store, kind: ItemKind, id: &str) -> Result<ItemId> {
    // Try exact match first
    if store
        .items()
        .iter()
        .any(|item| item.kind == kind && item.id.as_str() == id)
    {
        return Ok(ItemId::from(id));
    }

    // Try prefix match
    let matches: Vec<_> = store
        .items()
        .iter()
        .filter(|item| item.kind == kind && item.id.as_str().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple {}s match '{}':", kind, id);
            for item in &matches {
                eprintln!("  {} - {}", item.id, item.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
