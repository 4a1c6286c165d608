//! quill CLI
//!
//! Command-line interface for quill - local-first posts and book notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quill_core::{Category, Store, Tab};

mod commands;
mod image;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "quill - Local-first posts and book notes")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Search posts and books by title, content, or author
    Search {
        /// Search query
        query: String,
        /// Restrict to one tab (all, posts, books)
        #[arg(long, default_value = "all")]
        tab: Tab,
    },
    /// Show the dashboard: counts, badges, activity, quote of the day
    Stats,
    /// Export all items to a JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },
    /// Import items from a JSON file, replacing the current collection
    Import {
        /// Source file
        file: PathBuf,
    },
    /// Delete every post and book
    Reset,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// Publish a new post
    #[command(alias = "add")]
    Create {
        /// Post title (optional when content is given)
        #[arg(short, long)]
        title: Option<String>,
        /// Post content
        #[arg(short, long)]
        content: Option<String>,
        /// Author name
        #[arg(short, long)]
        author: Option<String>,
        /// Category (General, Tech, Life, Books, Art, Music, Travel, Food)
        #[arg(long)]
        category: Option<Category>,
        /// Path to a pre-resized thumbnail image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Filter by a search query
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Edit a post
    Edit {
        /// Post ID (full ID or prefix)
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID (full ID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a new book
    #[command(alias = "add")]
    Create {
        /// Book title
        title: String,
        /// Short review or why you like this book
        #[arg(short, long)]
        content: Option<String>,
        /// Author name
        #[arg(short, long)]
        author: Option<String>,
        /// Rating from 0 to 5
        #[arg(short, long)]
        rating: Option<f64>,
        /// Category (General, Tech, Life, Books, Art, Music, Travel, Food)
        #[arg(long)]
        category: Option<Category>,
        /// Path to a pre-resized thumbnail image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List books
    #[command(alias = "ls")]
    List {
        /// Filter by a search query
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Edit a book
    Edit {
        /// Book ID (full ID or prefix)
        id: String,
    },
    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        /// Book ID (full ID or prefix)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, edit_resets_created)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config doesn't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut store = Store::open()?;

    match cli.command {
        Commands::Post { command } => handle_post_command(command, &mut store, &output),
        Commands::Book { command } => handle_book_command(command, &mut store, &output),
        Commands::Search { query, tab } => commands::search::run(&store, tab, &query, &output),
        Commands::Stats => commands::stats::show(&store, &output),
        Commands::Export { file } => commands::data::export(&store, &file, &output),
        Commands::Import { file } => commands::data::import(&mut store, &file, &output),
        Commands::Reset => commands::data::reset(&mut store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_post_command(command: PostCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        PostCommands::Create {
            title,
            content,
            author,
            category,
            image,
        } => commands::post::create(store, title, content, author, category, image, output),
        PostCommands::List { query } => commands::post::list(store, query, output),
        PostCommands::Edit { id } => commands::post::edit(store, id, output),
        PostCommands::Delete { id } => commands::post::delete(store, id, output),
    }
}

fn handle_book_command(command: BookCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        BookCommands::Create {
            title,
            content,
            author,
            rating,
            category,
            image,
        } => commands::book::create(store, title, content, author, rating, category, image, output),
        BookCommands::List { query } => commands::book::list(store, query, output),
        BookCommands::Edit { id } => commands::book::edit(store, id, output),
        BookCommands::Delete { id } => commands::book::delete(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
