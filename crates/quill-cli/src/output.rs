//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use quill_core::Item;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single item in full
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", item.id);
                println!("Kind:     {}", item.kind);
                println!("Title:    {}", display_title(item));
                if !item.content.is_empty() {
                    println!("Content:  {}", item.content);
                }
                if !item.author.is_empty() {
                    println!("Author:   {}", item.author);
                }
                println!("Category: {}", item.category);
                if let Some(rating) = item.rating {
                    println!("Rating:   {}/5", rating);
                }
                if item.image_data.is_some() {
                    println!("Image:    (attached)");
                }
                println!("Created:  {}", item.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", item.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print a list of items, one line each
    pub fn print_items(&self, items: &[&Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items yet.");
                    return;
                }
                for item in items {
                    let rating = match item.rating {
                        Some(rating) => format!(" {}/5", rating),
                        None => String::new(),
                    };
                    println!(
                        "{} | {} | {} | {}{}",
                        short_id(item.id.as_str()),
                        truncate(&display_title(item), 35),
                        item.category,
                        item.created_at.format("%Y-%m-%d"),
                        rating
                    );
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Title with a placeholder for untitled posts
fn display_title(item: &Item) -> String {
    if item.title.is_empty() {
        format!("Untitled {}", item.kind)
    } else {
        item.title.clone()
    }
}

/// First characters of an id, safe for short ids
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
