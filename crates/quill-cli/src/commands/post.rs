//! Post command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use quill_core::{filter_items, Category, ItemDraft, ItemKind, Store, Tab};

use crate::commands::resolve_item_id;
use crate::image::read_thumbnail;
use crate::output::Output;
use crate::prompt::{confirm, prompt_with_default};

/// Publish a new post
pub fn create(
    store: &mut Store,
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    category: Option<Category>,
    image: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut draft = ItemDraft::new()
        .title(title.unwrap_or_default())
        .content(content.unwrap_or_default())
        .author(author.unwrap_or_default())
        .category(category.unwrap_or_default());

    if let Some(path) = image {
        draft = draft.image_data(read_thumbnail(&path)?);
    }

    let post = draft.build(ItemKind::Post)?;
    let id = post.id.clone();

    store.publish(post).context("Failed to publish post")?;

    output.success(&format!("Published post: {}", id));
    if let Some(post) = store.get(&id) {
        output.print_item(post);
    }

    Ok(())
}

/// List posts, optionally filtered by a search query
pub fn list(store: &Store, query: Option<String>, output: &Output) -> Result<()> {
    let query = query.unwrap_or_default();
    let posts = filter_items(store.items(), Tab::Posts, &query);
    output.print_items(&posts);
    Ok(())
}

/// Edit a post interactively
pub fn edit(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, ItemKind::Post, &id)?;

    let mut post = match store.get(&id) {
        Some(post) => post.clone(),
        None => anyhow::bail!("Post not found: {}", id),
    };

    println!("Editing post: {}", post.id);
    println!("Press Enter to keep current value, or type new value.\n");

    if let Some(new_title) = prompt_with_default("Title", &post.title)? {
        post.set_title(new_title);
    }
    if let Some(new_content) = prompt_with_default("Content", &post.content)? {
        post.set_content(new_content);
    }
    if let Some(new_author) = prompt_with_default("Author", &post.author)? {
        post.set_author(new_author);
    }
    if let Some(new_category) = prompt_with_default("Category", post.category.name())? {
        post.set_category(new_category.parse()?);
    }

    store.publish(post).context("Failed to update post")?;

    output.success("Post updated");
    if let Some(post) = store.get(&id) {
        output.print_item(post);
    }

    Ok(())
}

/// Delete a post
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, ItemKind::Post, &id)?;

    // Confirm deletion
    if output.should_prompt() {
        if let Some(post) = store.get(&id) {
            println!("Delete post: {} - {}", post.id, post.title);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&id).context("Failed to delete post")?;

    output.success(&format!("Deleted post: {}", id));

    Ok(())
}
