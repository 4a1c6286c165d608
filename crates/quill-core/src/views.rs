//! Derived views
//!
//! Pure, stateless functions computing display values from an item slice:
//! the filtered/searched subset, rating averages, recent and featured
//! lists, the monthly activity calendar, badge tiers, and the quote of
//! the day. Everything is recomputed from the current collection on every
//! call; nothing here caches or mutates.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::models::{Item, ItemKind, Rating};

/// Browsing tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Posts,
    Books,
}

impl Tab {
    /// The kind this tab filters to, if any
    pub fn kind(self) -> Option<ItemKind> {
        match self {
            Tab::All => None,
            Tab::Posts => Some(ItemKind::Post),
            Tab::Books => Some(ItemKind::Book),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "posts" | "post" => Ok(Tab::Posts),
            "books" | "book" => Ok(Tab::Books),
            other => Err(format!("unknown tab '{}' (expected all, posts, or books)", other)),
        }
    }
}

/// Filter items by tab and free-text query
///
/// A non-All tab keeps only the matching kind. A non-empty query matches
/// case-insensitively as a substring of title, content, or author. Input
/// order is preserved; nothing is re-sorted.
pub fn filter_items<'a>(items: &'a [Item], tab: Tab, query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();

    items
        .iter()
        .filter(|item| {
            if let Some(kind) = tab.kind() {
                if item.kind != kind {
                    return false;
                }
            }
            if query.is_empty() {
                return true;
            }
            item.title.to_lowercase().contains(&query)
                || item.content.to_lowercase().contains(&query)
                || item.author.to_lowercase().contains(&query)
        })
        .collect()
}

/// Average rating over rated books
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Arithmetic mean of the rated books, 0.0 when there are none
    pub average: f64,
    /// How many books carry a rating
    pub rated_count: usize,
}

impl RatingSummary {
    /// Whether any book has been rated ("no rated books" signal when false)
    pub fn has_rated_books(&self) -> bool {
        self.rated_count > 0
    }
}

/// Compute the average rating over books that carry one
pub fn rating_summary(items: &[Item]) -> RatingSummary {
    let ratings: Vec<f64> = items
        .iter()
        .filter(|item| item.kind == ItemKind::Book)
        .filter_map(|item| item.rating.map(|r| r.value()))
        .collect();

    if ratings.is_empty() {
        return RatingSummary {
            average: 0.0,
            rated_count: 0,
        };
    }

    RatingSummary {
        average: ratings.iter().sum::<f64>() / ratings.len() as f64,
        rated_count: ratings.len(),
    }
}

/// The most recently created posts, newest first, at most `n`
pub fn recent_posts(items: &[Item], n: usize) -> Vec<&Item> {
    let mut posts: Vec<&Item> = items.iter().filter(|i| i.kind == ItemKind::Post).collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts.truncate(n);
    posts
}

/// The top-rated books, at most `n`
///
/// Sorted by rating descending with missing ratings treated as 0;
/// ties broken by creation time, newest first.
pub fn featured_books(items: &[Item], n: usize) -> Vec<&Item> {
    let rating_of = |item: &Item| item.rating.as_ref().map(Rating::value).unwrap_or(0.0);

    let mut books: Vec<&Item> = items.iter().filter(|i| i.kind == ItemKind::Book).collect();
    books.sort_by(|a, b| {
        rating_of(b)
            .partial_cmp(&rating_of(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    books.truncate(n);
    books
}

/// Calendar days with activity in one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyActivity {
    /// Days of the month (1-based, UTC) with at least one item created
    pub active_days: BTreeSet<u32>,
    /// Total days in the month
    pub days_in_month: u32,
}

impl MonthlyActivity {
    /// Number of active days
    pub fn active_count(&self) -> usize {
        self.active_days.len()
    }

    /// Whether a given day saw activity
    pub fn is_active(&self, day: u32) -> bool {
        self.active_days.contains(&day)
    }

    /// Active days as an integer-rounded percentage of the month
    pub fn percent(&self) -> u32 {
        if self.days_in_month == 0 {
            return 0;
        }
        ((self.active_count() as f64 / self.days_in_month as f64) * 100.0).round() as u32
    }
}

/// Which days of the given month (1-based) have at least one item created
/// on them, judged on UTC calendar days
pub fn monthly_activity(items: &[Item], year: i32, month: u32) -> MonthlyActivity {
    let days_in_month = days_in_month(year, month);

    let mut active_days = BTreeSet::new();
    for item in items {
        let date = item.created_at.date_naive();
        if date.year() == year && date.month() == month {
            active_days.insert(date.day());
        }
    }

    MonthlyActivity {
        active_days,
        days_in_month,
    }
}

/// Number of days in a month, 0 for an invalid year/month pair
fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(0)
}

/// Reputation tier computed from cumulative item count per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BadgeTier {
    /// No items yet
    None,
    /// At least 1 item
    Beginner,
    /// At least 5 items
    Rising,
    /// At least 10 items
    Master,
}

impl BadgeTier {
    /// Kind-specific badge text
    pub fn label(self, kind: ItemKind) -> &'static str {
        match (kind, self) {
            (ItemKind::Post, BadgeTier::None) => "No posts yet",
            (ItemKind::Post, BadgeTier::Beginner) => "Newbie Writer",
            (ItemKind::Post, BadgeTier::Rising) => "Rising Writer",
            (ItemKind::Post, BadgeTier::Master) => "Pro Writer",
            (ItemKind::Book, BadgeTier::None) => "No books yet",
            (ItemKind::Book, BadgeTier::Beginner) => "Book Explorer",
            (ItemKind::Book, BadgeTier::Rising) => "Avid Reader",
            (ItemKind::Book, BadgeTier::Master) => "Book Master",
        }
    }
}

/// Map an item count onto its badge tier
///
/// Thresholds are inclusive: exactly 1, 5, or 10 items land in the tier
/// that names that count.
pub fn badge_tier(count: usize) -> BadgeTier {
    match count {
        0 => BadgeTier::None,
        1..=4 => BadgeTier::Beginner,
        5..=9 => BadgeTier::Rising,
        _ => BadgeTier::Master,
    }
}

/// The fixed quote list for the quote-of-the-day widget
pub const QUOTES: [&str; 6] = [
    "Write the thing only you can write.",
    "A small step each day becomes a giant path.",
    "Create for joy, not for perfection.",
    "Share what you learn — others will too.",
    "Reading fuels the mind; writing frees it.",
    "Ideas grow faster when you write them down.",
];

/// Deterministic quote for a calendar date
///
/// The index is `(day + month + year) mod len` with a zero-based month,
/// so the same date always yields the same quote regardless of the time
/// of day.
pub fn quote_of_day(date: NaiveDate) -> &'static str {
    let sum = date.day() as i64 + date.month0() as i64 + date.year() as i64;
    QUOTES[sum.rem_euclid(QUOTES.len() as i64) as usize]
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStats {
    /// Number of posts
    pub posts: usize,
    /// Number of books
    pub books: usize,
    /// Most recent publish time across the collection
    pub last_update: Option<DateTime<Utc>>,
}

/// Count posts and books and find the latest publish time
pub fn quick_stats(items: &[Item]) -> QuickStats {
    QuickStats {
        posts: items.iter().filter(|i| i.kind == ItemKind::Post).count(),
        books: items.iter().filter(|i| i.kind == ItemKind::Book).count(),
        last_update: items.iter().map(|i| i.updated_at).max(),
    }
}
