use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use browser_session::bookmarks::Bookmark;
use browser_session::config::{default_db_path, SessionConfig};
use browser_session::history::ClearRange;
use browser_session::storage::{Persistence, SqliteStore};
use browser_session::SessionStore;

#[derive(Parser)]
#[command(name = "browser-session")]
#[command(about = "Inspect and drive a persisted browser session", long_about = None)]
#[command(version)]
struct Cli {
    /// Session database (SQLite)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON session config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List open tabs, marking the active one
    Tabs,

    /// Open a new tab (start page when no url is given)
    Open {
        url: Option<String>,
    },

    /// Navigate a tab to a url or search terms
    Navigate {
        tab_id: String,
        input: String,
    },

    /// Go back in a tab's history
    Back {
        tab_id: String,
    },

    /// Go forward in a tab's history
    Forward {
        tab_id: String,
    },

    /// Close a tab
    Close {
        tab_id: String,
    },

    /// Reopen the most recently closed tab
    Reopen,

    /// Show browsing history, newest first
    History {
        /// Filter by title or url
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Clear history: hour, day, week, month or all
    ClearHistory {
        range: ClearRange,
    },

    /// Bookmark a url
    Bookmark {
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Parent folder id (default: Favorites)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Print the bookmark tree
    Bookmarks,

    /// Export bookmarks as JSON
    ExportBookmarks {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import bookmarks from a JSON file
    ImportBookmarks {
        file: PathBuf,
    },

    /// Show the reading list, or add to it
    ReadingList {
        #[arg(short, long)]
        add: Option<String>,
    },

    /// Most visited sites
    TopSites {
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },

    /// Report what was repaired when the session was loaded
    Validate {
        /// Show detailed validation report
        #[arg(short, long)]
        detailed: bool,
    },
}

fn open_session(cli: &Cli) -> Result<SessionStore> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    let backend = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open session database {:?}", db_path))?;

    info!("Opened session database {:?}", db_path);
    Ok(SessionStore::with_config(Persistence::new(backend), config))
}

fn print_tree(nodes: &[Bookmark], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            Bookmark::Folder(folder) => {
                println!("{}📁 {} [{}]", indent, folder.title, folder.id);
                print_tree(&folder.children, depth + 1);
            }
            Bookmark::Link(link) => {
                println!("{}🔖 {} {} [{}]", indent, link.title, link.url, link.id);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut session = open_session(&cli)?;

    match cli.command {
        Commands::Tabs => {
            let active = session.active_tab_id().map(str::to_string);
            for tab in session.tabs() {
                let marker = if active.as_deref() == Some(tab.id.as_str()) { "*" } else { " " };
                let pin = if tab.is_pinned { "📌 " } else { "" };
                println!("{} {}  {}{}  {}", marker, tab.id, pin, tab.title, tab.url);
            }
        }

        Commands::Open { url } => {
            let tab = session.create_tab(url.as_deref(), None);
            println!("{}  {}", tab.id, tab.url);
        }

        Commands::Navigate { tab_id, input } => {
            if !session.navigate(&tab_id, &input) {
                anyhow::bail!("No tab {} or nothing to navigate to", tab_id);
            }
            if let Some(tab) = session.tab(&tab_id) {
                println!("{}  {}", tab.id, tab.url);
            }
        }

        Commands::Back { tab_id } => {
            if !session.back(&tab_id) {
                println!("Nothing to go back to");
            }
        }

        Commands::Forward { tab_id } => {
            if !session.forward(&tab_id) {
                println!("Nothing to go forward to");
            }
        }

        Commands::Close { tab_id } => {
            if !session.close_tab(&tab_id) {
                anyhow::bail!("No tab {}", tab_id);
            }
            info!("Closed tab {}", tab_id);
        }

        Commands::Reopen => match session.reopen_closed_tab() {
            Some(tab) => println!("{}  {}", tab.id, tab.url),
            None => println!("No recently closed tabs"),
        },

        Commands::History { search } => {
            let entries = session.search_history(search.as_deref().unwrap_or(""));
            for entry in entries {
                let when = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(entry.visited_at)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{}  {}  {}", when, entry.title, entry.url);
            }
        }

        Commands::ClearHistory { range } => {
            let removed = session.clear_history(range);
            println!("Removed {} history entries", removed);
        }

        Commands::Bookmark { url, title, parent } => {
            let title = title.unwrap_or_else(|| url.clone());
            let bookmark = session.add_bookmark(&url, &title, parent.as_deref());
            println!("{}  {}", bookmark.id(), bookmark.title());
        }

        Commands::Bookmarks => print_tree(session.bookmarks().roots(), 0),

        Commands::ExportBookmarks { output } => {
            let json = session.export_bookmarks();
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    info!("✅ Exported {} bookmarks to {:?}", session.bookmarks().count(), path);
                }
                None => println!("{}", json),
            }
        }

        Commands::ImportBookmarks { file } => {
            let data = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            if !session.import_bookmarks(&data) {
                anyhow::bail!("{:?} is not a valid bookmark export", file);
            }
            info!("✅ Import complete!");
        }

        Commands::ReadingList { add } => {
            if let Some(url) = add {
                session.add_to_reading_list(&url, &url, None);
            }
            for item in session.reading_list().items() {
                let mark = if item.is_read { "✓" } else { "•" };
                println!("{} {}  {}", mark, item.title, item.url);
            }
        }

        Commands::TopSites { limit } => {
            for favorite in session.top_sites(limit) {
                println!("{:>5}  {}  {}", favorite.visit_count, favorite.title, favorite.url);
            }
        }

        Commands::Validate { detailed } => {
            println!("{}", session.validation_report().format(detailed));
        }
    }

    Ok(())
}
