//! Book command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use quill_core::{filter_items, Category, ItemDraft, ItemKind, Rating, Store, Tab};

use crate::commands::resolve_item_id;
use crate::image::read_thumbnail;
use crate::output::Output;
use crate::prompt::{confirm, prompt_with_default};

/// Add a new book
#[allow(clippy::too_many_arguments)]
pub fn create(
    store: &mut Store,
    title: String,
    content: Option<String>,
    author: Option<String>,
    rating: Option<f64>,
    category: Option<Category>,
    image: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut draft = ItemDraft::new()
        .title(title)
        .content(content.unwrap_or_default())
        .author(author.unwrap_or_default())
        .category(category.unwrap_or_default());

    if let Some(value) = rating {
        draft = draft.rating(Rating::new(value)?);
    }
    if let Some(path) = image {
        draft = draft.image_data(read_thumbnail(&path)?);
    }

    let book = draft.build(ItemKind::Book)?;
    let id = book.id.clone();

    store.publish(book).context("Failed to add book")?;

    output.success(&format!("Added book: {}", id));
    if let Some(book) = store.get(&id) {
        output.print_item(book);
    }

    Ok(())
}

/// List books, optionally filtered by a search query
pub fn list(store: &Store, query: Option<String>, output: &Output) -> Result<()> {
    let query = query.unwrap_or_default();
    let books = filter_items(store.items(), Tab::Books, &query);
    output.print_items(&books);
    Ok(())
}

/// Edit a book interactively
pub fn edit(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, ItemKind::Book, &id)?;

    let mut book = match store.get(&id) {
        Some(book) => book.clone(),
        None => anyhow::bail!("Book not found: {}", id),
    };

    println!("Editing book: {}", book.id);
    println!("Press Enter to keep current value, or type new value.\n");

    if let Some(new_title) = prompt_with_default("Title", &book.title)? {
        book.set_title(new_title);
    }
    if let Some(new_content) = prompt_with_default("Review", &book.content)? {
        book.set_content(new_content);
    }
    if let Some(new_author) = prompt_with_default("Author", &book.author)? {
        book.set_author(new_author);
    }
    if let Some(new_category) = prompt_with_default("Category", book.category.name())? {
        book.set_category(new_category.parse()?);
    }

    let current_rating = book
        .rating
        .map(|r| r.to_string())
        .unwrap_or_default();
    if let Some(new_rating) = prompt_with_default("Rating (0-5)", &current_rating)? {
        let value: f64 = new_rating
            .parse()
            .with_context(|| format!("'{}' is not a number", new_rating))?;
        book.set_rating(Some(Rating::new(value)?))?;
    }

    store.publish(book).context("Failed to update book")?;

    output.success("Book updated");
    if let Some(book) = store.get(&id) {
        output.print_item(book);
    }

    Ok(())
}

/// Delete a book
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, ItemKind::Book, &id)?;

    // Confirm deletion
    if output.should_prompt() {
        if let Some(book) = store.get(&id) {
            println!("Delete book: {} - {}", book.id, book.title);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&id).context("Failed to delete book")?;

    output.success(&format!("Deleted book: {}", id));

    Ok(())
}
