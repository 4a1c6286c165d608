//! Search command handler

use anyhow::Result;

use quill_core::{filter_items, Store, Tab};

use crate::output::Output;

/// Search items by title, content, or author
pub fn run(store: &Store, tab: Tab, query: &str, output: &Output) -> Result<()> {
    let hits = filter_items(store.items(), tab, query);
    output.print_items(&hits);
    Ok(())
}
