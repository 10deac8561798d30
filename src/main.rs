//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "File-backed markdown blog engine for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    List {
        /// Type of content to list (post, featured, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post
    Show {
        /// Slug of the post (its file name without .md)
        slug: String,
    },

    /// Show one page of the post listing
    Page {
        /// Page number, starting at 1
        #[arg(default_value = "1")]
        page: usize,

        /// Posts per page (defaults to per_page from _config.yml)
        #[arg(long)]
        per_page: Option<NonZeroUsize>,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show or change the saved theme
    Theme {
        /// light, dark, or toggle
        choice: Option<String>,

        /// Treat the system color scheme as dark when no theme is saved
        #[arg(long)]
        prefers_dark: bool,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let folio = folio_rs::Folio::new(&base_dir)?;

    match cli.command {
        Commands::List { r#type } => {
            folio_rs::commands::list::run(&folio, &r#type)?;
        }

        Commands::Show { slug } => {
            folio_rs::commands::show::run(&folio, &slug)?;
        }

        Commands::Page { page, per_page } => {
            folio_rs::commands::page::run(&folio, page, per_page)?;
        }

        Commands::New { title, slug, tags } => {
            tracing::info!("Creating new post with title: {}", title);
            let path = folio_rs::commands::new::create_post(&folio, &title, slug.as_deref(), tags)?;
            println!("Created: {:?}", path);
        }

        Commands::Theme {
            choice,
            prefers_dark,
        } => {
            folio_rs::commands::theme::run(&folio, choice.as_deref(), prefers_dark)?;
        }

        Commands::Server { port, ip } => {
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port).await?;
        }
    }

    Ok(())
}
