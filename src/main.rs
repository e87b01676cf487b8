use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use dailynews::app::{App, Content, ERROR_MESSAGE};
use dailynews::config::Config;
use dailynews::news::{NewsRepository, Selection};
use dailynews::store::{FirestoreStore, MemoryStore, NewsStore, StoreError};
use dailynews::ui;

/// Get the config directory path (~/.config/dailynews/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("dailynews"))
}

#[derive(Parser, Debug)]
#[command(name = "dailynews", about = "Today's news by category, in the terminal")]
struct Args {
    /// Config file (default: ~/.config/dailynews/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use built-in sample articles instead of Firestore
    #[arg(long)]
    demo: bool,

    /// Load once and print the cards to stdout instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Initial category: all, realestate, stock, economy, it
    #[arg(long, value_name = "TOKEN", default_value = "all")]
    category: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .with_env_overrides();

    let store: Arc<dyn NewsStore> = if args.demo {
        tracing::info!("Using demo articles");
        Arc::new(MemoryStore::demo(Utc::now()))
    } else {
        match FirestoreStore::new(&config) {
            Ok(store) => Arc::new(store),
            Err(StoreError::Unavailable(reason)) if config.project_id.is_none() => {
                eprintln!("Error: {}", reason);
                eprintln!();
                eprintln!("Set project_id in {}", config_path.display());
                eprintln!("or export FIRESTORE_PROJECT_ID, or run with --demo.");
                std::process::exit(1);
            }
            Err(e) => return Err(e).context("Failed to create Firestore client"),
        }
    };

    let repository = NewsRepository::new(store);
    let mut app = App::new();
    app.select_category(Selection::from_token(&args.category));

    if args.print {
        return print_once(&mut app, &repository).await;
    }

    ui::run(&mut app, repository).await?;
    Ok(())
}

async fn print_once(app: &mut App, repository: &NewsRepository) -> Result<()> {
    app.load(repository).await;
    match app.content() {
        Content::Feed(rendered) => {
            print!("{}", rendered.to_plain_text());
            Ok(())
        }
        Content::Error(_) => {
            eprintln!("{}", ERROR_MESSAGE);
            std::process::exit(1);
        }
    }
}
