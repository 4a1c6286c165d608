//! Export, import, and reset command handlers

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use quill_core::{codec, ImportError, Store};

use crate::output::Output;
use crate::prompt::confirm;

/// Export the full collection to a JSON file
pub fn export(store: &Store, file: &Path, output: &Output) -> Result<()> {
    let document = codec::export(store.items()).context("Failed to serialize items")?;

    fs::write(file, document).with_context(|| format!("Failed to write {:?}", file))?;

    output.success(&format!(
        "Exported {} item(s) to {}",
        store.len(),
        file.display()
    ));
    Ok(())
}

/// Import a JSON file, replacing the current collection
pub fn import(store: &mut Store, file: &Path, output: &Output) -> Result<()> {
    let document =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;

    let items = match codec::import(&document) {
        Ok(items) => items,
        Err(ImportError::InvalidFormat(reason)) => {
            bail!("Invalid import file: {}. Nothing was changed.", reason);
        }
        Err(ImportError::InvalidRecords(records)) => {
            eprintln!("Import rejected:");
            for record in &records {
                eprintln!("  {}", record);
            }
            bail!("Import failed. Nothing was changed.");
        }
    };

    let count = items.len();
    store
        .replace_all(items)
        .context("Failed to store imported items")?;

    output.success(&format!("Imported {} item(s)", count));
    Ok(())
}

/// Delete every post and book
pub fn reset(store: &mut Store, output: &Output) -> Result<()> {
    if output.should_prompt() && !confirm("Reset ALL posts & books?")? {
        println!("Cancelled.");
        return Ok(());
    }

    store.reset().context("Failed to reset items")?;

    output.success("All items deleted");
    Ok(())
}
