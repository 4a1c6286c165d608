//! quill Core Library
//!
//! This crate provides the core functionality for quill, a local-first
//! personal blog manager for posts and book notes.
//!
//! # Architecture
//!
//! The `Store` owns the ordered item collection and mirrors every
//! mutation to a single JSON document on disk. Display values (search
//! results, averages, the activity calendar, badges) are pure functions
//! over the current collection in `views`, recomputed on every read.
//! Import/export round-trips the collection through a portable JSON
//! array in `codec`. The `identity` adapter wraps an external sign-in
//! provider for greeting text only.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Publish a post
//! let post = ItemDraft::new().title("Hello").build(ItemKind::Post)?;
//! store.publish(post)?;
//!
//! // Query items
//! let hits = views::filter_items(store.items(), Tab::Posts, "hello");
//! ```
//!
//! # Modules
//!
//! - `store`: the item store (main entry point)
//! - `models`: item records and their value types
//! - `views`: pure derived-view functions for display widgets
//! - `codec`: import/export serialization with schema validation
//! - `identity`: display-only adapter over an external sign-in provider
//! - `storage`: JSON document persistence
//! - `config`: application configuration

pub mod codec;
pub mod config;
pub mod identity;
pub mod models;
pub mod storage;
pub mod store;
pub mod views;

pub use codec::{export, import, FieldError, ImportError, RecordError};
pub use config::Config;
pub use identity::{
    AuthFailed, DisplayIdentity, IdentityAdapter, IdentityProvider, SessionEvent,
};
pub use models::{
    Category, ImageData, ImageDataError, Item, ItemDraft, ItemId, ItemKind, Rating, RatingError,
    UnknownCategory, ValidationError,
};
pub use storage::{JsonPersistence, StorageError};
pub use store::Store;
pub use views::{
    badge_tier, featured_books, filter_items, monthly_activity, quick_stats, quote_of_day,
    rating_summary, recent_posts, BadgeTier, MonthlyActivity, QuickStats, RatingSummary, Tab,
};
