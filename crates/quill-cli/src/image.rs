//! Thumbnail loading
//!
//! Reads a pre-resized thumbnail file from disk and wraps it as the data
//! URL the item model carries. Resizing itself is out of scope; files are
//! attached as-is.

use std::path::Path;

use anyhow::{bail, Context, Result};

use quill_core::ImageData;

/// Read a thumbnail file into a data URL
///
/// The mime type is taken from the file extension; unknown extensions are
/// rejected so an unreadable blob never ends up attached to an item.
pub fn read_thumbnail(path: &Path) -> Result<ImageData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let mime = match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => bail!(
            "Could not process image {:?}: unsupported file type (expected jpg, jpeg, png, gif, or webp)",
            path
        ),
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("Could not read image file {:?}", path))?;

    Ok(ImageData::from_bytes(mime, &bytes))
}
