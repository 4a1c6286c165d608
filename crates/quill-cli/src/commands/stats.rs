//! Stats command handler
//!
//! Renders the dashboard widgets: quote of the day, quick stats, rating
//! summary, recent posts, featured books, monthly activity, and badges.

use anyhow::Result;
use chrono::{Datelike, Utc};

use quill_core::{
    badge_tier, featured_books, monthly_activity, quick_stats, quote_of_day, rating_summary,
    recent_posts, ItemKind, Store,
};

use crate::output::{Output, OutputFormat};

/// Show the dashboard
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let items = store.items();
    let today = Utc::now().date_naive();

    let stats = quick_stats(items);
    let summary = rating_summary(items);
    let activity = monthly_activity(items, today.year(), today.month());
    let recents = recent_posts(items, 3);
    let featured = featured_books(items, 3);
    let quote = quote_of_day(today);
    let post_badge = badge_tier(stats.posts).label(ItemKind::Post);
    let book_badge = badge_tier(stats.books).label(ItemKind::Book);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "quote": quote,
                    "counts": {
                        "posts": stats.posts,
                        "books": stats.books,
                    },
                    "last_update": stats.last_update.map(|ts| ts.timestamp_millis()),
                    "rating": {
                        "average": summary.average,
                        "rated_count": summary.rated_count,
                    },
                    "activity": {
                        "active_days": &activity.active_days,
                        "days_in_month": activity.days_in_month,
                        "percent": activity.percent(),
                    },
                    "badges": {
                        "posts": post_badge,
                        "books": book_badge,
                    },
                    "recent_posts": recents.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
                    "featured_books": featured.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{} {}", stats.posts, stats.books);
        }
        OutputFormat::Human => {
            println!("Quote of the day:");
            println!("  \u{201c}{}\u{201d}", quote);
            println!();

            println!("Quick stats:");
            println!("  Posts: {}", stats.posts);
            println!("  Books: {}", stats.books);
            match stats.last_update {
                Some(ts) => println!("  Last update: {}", ts.format("%Y-%m-%d %H:%M")),
                None => println!("  Last update: -"),
            }
            println!();

            println!("Ratings:");
            if summary.has_rated_books() {
                println!(
                    "  {:.2} / 5 across {} rated book(s)",
                    summary.average, summary.rated_count
                );
            } else {
                println!("  No rated books yet");
            }
            println!();

            println!("Recent posts:");
            if recents.is_empty() {
                println!("  No posts yet");
            }
            for post in &recents {
                println!(
                    "  {} - {}",
                    post.created_at.format("%Y-%m-%d"),
                    if post.title.is_empty() {
                        "Untitled post"
                    } else {
                        &post.title
                    }
                );
            }
            println!();

            println!("Featured books:");
            if featured.is_empty() {
                println!("  No books yet");
            }
            for book in &featured {
                let rating = match book.rating {
                    Some(rating) => format!(" ({}/5)", rating),
                    None => String::new(),
                };
                println!("  {}{}", book.title, rating);
            }
            println!();

            println!(
                "Activity in {}:",
                today.format("%B %Y")
            );
            println!(
                "  {}/{} active day(s), {}% of the month",
                activity.active_count(),
                activity.days_in_month,
                activity.percent()
            );
            println!();

            println!("Badges:");
            println!("  Posts: {}", post_badge);
            println!("  Books: {}", book_badge);
        }
    }

    Ok(())
}
