//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Inspect and check the blog content of a portfolio site", long_about = None)]
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
    /// List every post slug across languages
    Slugs,

    /// List posts for a language
    #[command(alias = "ls")]
    List {
        /// Language code, e.g. en or es
        lang: String,

        /// Only show posts matching this search query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one post and its neighbors
    Show {
        lang: String,
        slug: String,

        /// Print the post record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build every post and report invalid content
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "folio=debug" } else { "folio=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Slugs => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::slugs(&folio)?;
        }

        Commands::List { lang, query } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &lang, query.as_deref()).await?;
        }

        Commands::Show { lang, slug, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&folio, &lang, &slug, json).await?;
        }

        Commands::Check => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Checking content in {:?}", folio.content_dir);
            folio::commands::check::run(&folio).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
