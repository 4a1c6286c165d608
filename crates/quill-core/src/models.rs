//! Data models for quill
//!
//! Defines the core data structures: Item (a Post or a Book) and its
//! value types. The wire format uses camelCase field names and millisecond
//! timestamps so documents written by earlier versions import unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque unique identifier for an item
///
/// Generated ids are UUIDv4 strings, but any non-empty string is a valid
/// id so that documents from other sources import verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Discriminator between post and book semantics on an item
///
/// Wire names are the plural forms used by the stored document format;
/// singular forms are accepted as input aliases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemKind {
    #[serde(rename = "Posts", alias = "Post")]
    Post,
    #[serde(rename = "Books", alias = "Book")]
    Book,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Post => write!(f, "post"),
            ItemKind::Book => write!(f, "book"),
        }
    }
}

/// Fixed category set for organizing items
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[default]
    General,
    Tech,
    Life,
    Books,
    Art,
    Music,
    Travel,
    Food,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Tech,
        Category::Life,
        Category::Books,
        Category::Art,
        Category::Music,
        Category::Travel,
        Category::Food,
    ];

    /// Get the category name
    pub fn name(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Tech => "Tech",
            Category::Life => "Life",
            Category::Books => "Books",
            Category::Art => "Art",
            Category::Music => "Music",
            Category::Travel => "Travel",
            Category::Food => "Food",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Error for category names outside the fixed set
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}' (expected one of General, Tech, Life, Books, Art, Music, Travel, Food)")]
pub struct UnknownCategory(pub String);

/// A book rating, validated to lie in [0, 5] at construction
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Create a rating, rejecting non-finite values and values outside [0, 5]
    pub fn new(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(0.0..=5.0).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the numeric value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> f64 {
        rating.0
    }
}

/// Errors rejecting invalid rating values
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    /// NaN or infinite input
    #[error("rating must be a finite number")]
    NotFinite,
    /// Finite but outside the allowed range
    #[error("rating must be between 0 and 5, got {0}")]
    OutOfRange(f64),
}

/// A pre-resized thumbnail carried as a base64 data URL
///
/// The image itself is produced by an external resizer; this type only
/// guarantees the payload is a well-formed `data:<mime>;base64,<payload>`
/// string with decodable base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageData(String);

impl ImageData {
    /// Validate and wrap a data URL
    pub fn new(data_url: impl Into<String>) -> Result<Self, ImageDataError> {
        let data_url = data_url.into();
        let rest = data_url
            .strip_prefix("data:")
            .ok_or(ImageDataError::NotADataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageDataError::MissingPayload)?;
        if !header.ends_with(";base64") {
            return Err(ImageDataError::NotADataUrl);
        }
        BASE64
            .decode(payload)
            .map_err(|e| ImageDataError::InvalidBase64(e.to_string()))?;
        Ok(Self(data_url))
    }

    /// Encode raw thumbnail bytes as a data URL
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Get the full data URL
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageData {
    type Error = ImageDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImageData::new(value)
    }
}

impl From<ImageData> for String {
    fn from(image: ImageData) -> String {
        image.0
    }
}

/// Errors rejecting malformed image payloads
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageDataError {
    #[error("image data must be a base64 data: URL")]
    NotADataUrl,
    #[error("image data is missing its payload")]
    MissingPayload,
    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Submit-time validation failures for a draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a book needs a title")]
    TitleRequired,
    #[error("add a title or some content to publish a post")]
    TitleOrContentRequired,
    #[error("only books can carry a rating")]
    RatingOnPost,
}

/// A single post or book record, the unit of persistence and display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, immutable after creation
    pub id: ItemId,
    /// Post or Book, immutable after creation
    pub kind: ItemKind,
    /// Display title; required for books, optional for posts
    #[serde(default)]
    pub title: String,
    /// Body text or review
    #[serde(default)]
    pub content: String,
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Category, defaults to General
    #[serde(default)]
    pub category: Category,
    /// Optional pre-resized thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<ImageData>,
    /// Rating in [0, 5]; books only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// When this item was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// When this item was last published
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether this item is a post
    pub fn is_post(&self) -> bool {
        self.kind == ItemKind::Post
    }

    /// Whether this item is a book
    pub fn is_book(&self) -> bool {
        self.kind == ItemKind::Book
    }

    /// Update the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Update the content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Update the author
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
        self.updated_at = Utc::now();
    }

    /// Update the category
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    /// Attach or replace the thumbnail
    pub fn set_image_data(&mut self, image: Option<ImageData>) {
        self.image_data = image;
        self.updated_at = Utc::now();
    }

    /// Set the rating; rejected on posts
    pub fn set_rating(&mut self, rating: Option<Rating>) -> Result<(), ValidationError> {
        if self.is_post() && rating.is_some() {
            return Err(ValidationError::RatingOnPost);
        }
        self.rating = rating;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Builder for a new item, validated on `build`
///
/// This is the constructor the form layer uses: field values accumulate
/// freely, and the required-field rules are checked once at submit time.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    title: String,
    content: String,
    author: String,
    category: Category,
    image_data: Option<ImageData>,
    rating: Option<Rating>,
}

impl ItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn image_data(mut self, image: ImageData) -> Self {
        self.image_data = Some(image);
        self
    }

    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Validate the draft and produce a complete item
    ///
    /// Books require a title; posts require a title or content. Ratings
    /// are only accepted on books. Text fields are trimmed on the way in.
    pub fn build(self, kind: ItemKind) -> Result<Item, ValidationError> {
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();
        let author = self.author.trim().to_string();

        match kind {
            ItemKind::Book if title.is_empty() => return Err(ValidationError::TitleRequired),
            ItemKind::Post if title.is_empty() && content.is_empty() => {
                return Err(ValidationError::TitleOrContentRequired)
            }
            ItemKind::Post if self.rating.is_some() => {
                return Err(ValidationError::RatingOnPost)
            }
            _ => {}
        }

        let now = Utc::now();
        Ok(Item {
            id: ItemId::new(),
            kind,
            title,
            content,
            author,
            category: self.category,
            image_data: self.image_data,
            rating: self.rating,
            created_at: now,
            updated_at: now,
        })
    }
}
