//! Item store
//!
//! The `Store` owns the canonical ordered list of items and keeps the
//! on-disk document in sync: every mutation writes the full collection
//! back through the persistence layer before returning.
//!
//! ## Ordering
//!
//! New items are prepended, so the collection reads newest-first. Edits
//! replace the entry in place and keep its position.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let post = ItemDraft::new().title("Hello").build(ItemKind::Post)?;
//! store.publish(post)?;
//!
//! for item in store.items() {
//!     println!("{}", item.title);
//! }
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::models::{Item, ItemId, ItemKind};
use crate::storage::JsonPersistence;

/// Owns the item collection and its persistence
pub struct Store {
    /// The ordered item collection, newest first
    items: Vec<Item>,
    /// Persistence handler for the stored document
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config))
    }

    /// Open the store with a specific configuration
    ///
    /// A missing document yields an empty collection. A document that
    /// exists but cannot be read or parsed also yields an empty
    /// collection: stored data is best-effort and a corrupt file should
    /// never keep the application from starting.
    pub fn open_with_config(config: Config) -> Self {
        let persistence = JsonPersistence::new(config.clone());

        let items = match persistence.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("stored items could not be read, starting empty: {err}");
                Vec::new()
            }
        };

        Self {
            items,
            persistence,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the collection, newest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in the collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by id
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of posts
    pub fn post_count(&self) -> usize {
        self.items.iter().filter(|i| i.kind == ItemKind::Post).count()
    }

    /// Number of books
    pub fn book_count(&self) -> usize {
        self.items.iter().filter(|i| i.kind == ItemKind::Book).count()
    }

    /// Publish an item
    ///
    /// If an entry with the same id exists it is replaced in place
    /// (position preserved) and its update time is stamped to now; with
    /// `edit_resets_created` set, the creation time is re-stamped too.
    /// Otherwise the item is prepended to the front of the collection.
    /// Returns the updated collection.
    pub fn publish(&mut self, mut item: Item) -> Result<&[Item]> {
        match self.items.iter().position(|existing| existing.id == item.id) {
            Some(index) => {
                let now = Utc::now();
                item.updated_at = now;
                if self.config.edit_resets_created {
                    item.created_at = now;
                }
                self.items[index] = item;
            }
            None => self.items.insert(0, item),
        }

        self.persist()?;
        Ok(&self.items)
    }

    /// Remove the item with the given id
    ///
    /// Removing an id that is not present is a no-op, not an error.
    pub fn remove(&mut self, id: &ItemId) -> Result<()> {
        let len_before = self.items.len();
        self.items.retain(|item| &item.id != id);

        if self.items.len() != len_before {
            self.persist()?;
        }
        Ok(())
    }

    /// Atomically replace the entire collection
    ///
    /// Used by import.
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<&[Item]> {
        self.items = items;
        self.persist()?;
        Ok(&self.items)
    }

    /// Clear the collection and delete the stored document
    pub fn reset(&mut self) -> Result<()> {
        self.items.clear();
        self.persistence
            .delete()
            .context("Failed to delete stored items")?;
        Ok(())
    }

    /// Write the current collection to disk
    fn persist(&self) -> Result<()> {
        self.persistence
            .save(&self.items)
            .context("Failed to persist items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemDraft, Rating};
    use std::fs;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            edit_resets_created: false,
        }
    }

    fn post(title: &str) -> Item {
        ItemDraft::new().title(title).build(ItemKind::Post).unwrap()
    }

    fn book(title: &str, rating: f64) -> Item {
        ItemDraft::new()
            .title(title)
            .rating(Rating::new(rating).unwrap())
            .build(ItemKind::Book)
            .unwrap()
    }

    #[test]
    fn test_open_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open_with_config(test_config(&temp_dir));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_with_corrupt_document_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        fs::write(config.data_file_path(), "{ definitely not items }").unwrap();

        let store = Store::open_with_config(config);
        assert!(store.is_empty());
    }

    #[test]
    fn test_publish_prepends_new_items() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir));

        store.publish(post("first")).unwrap();
        store.publish(post("second")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].title, "second");
        assert_eq!(store.items()[1].title, "first");
    }

    #[test]
    fn test_publish_existing_id_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir));

        store.publish(post("oldest")).unwrap();
        let original = post("target");
        store.publish(original.clone()).unwrap();
        store.publish(post("newest")).unwrap();

        let mut edited = original.clone();
        edited.content = "edited content".to_string();
        store.publish(edited).unwrap();

        // Length unchanged, position preserved
        assert_eq!(store.len(), 3);
        assert_eq!(store.items()[1].id, original.id);
        assert_eq!(store.items()[1].content, "edited content");
        // Creation time preserved, update time bumped
        assert_eq!(store.items()[1].created_at, original.created_at);
        assert!(store.items()[1].updated_at >= original.updated_at);
    }

    #[test]
    fn test_edit_resets_created_parity_flag() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.edit_resets_created = true;
        let mut store = Store::open_with_config(config);

        let original = post("target");
        store.publish(original.clone()).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(10));
        store.publish(original.clone()).unwrap();

        let republished = store.get(&original.id).unwrap();
        assert!(republished.created_at > original.created_at);
        assert_eq!(republished.created_at, republished.updated_at);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir));

        let item = post("gone soon");
        let id = item.id.clone();
        store.publish(item).unwrap();
        assert_eq!(store.len(), 1);

        store.remove(&id).unwrap();
        assert_eq!(store.len(), 0);

        // Second removal of the same id is a no-op
        store.remove(&id).unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_replace_all() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir));

        store.publish(post("will be replaced")).unwrap();
        store
            .replace_all(vec![post("a"), book("b", 4.0)])
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.post_count(), 1);
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn test_reset_clears_collection_and_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone());

        store.publish(post("hello")).unwrap();
        assert!(config.data_file_path().exists());

        store.reset().unwrap();
        assert!(store.is_empty());
        assert!(!config.data_file_path().exists());
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let snapshot;
        {
            let mut store = Store::open_with_config(config.clone());
            store.publish(post("keep me")).unwrap();
            store.publish(book("keep me too", 3.5)).unwrap();
            snapshot = store.items().to_vec();
        }

        // Reopen - round-trips the exact collection
        let store = Store::open_with_config(config);
        assert_eq!(store.items(), snapshot.as_slice());
    }

    #[test]
    fn test_publish_scenario_from_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir));

        let before = Utc::now();
        let item = post("Hi");
        store.publish(item.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, item.id);
        assert!(store.items()[0].created_at >= before);

        // Editing via publish keeps length and position, bumps update time
        let mut edited = item.clone();
        edited.content = "now with content".to_string();
        store.publish(edited).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].created_at, item.created_at);
        assert!(store.items()[0].updated_at >= item.updated_at);
    }
}
