//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Query a markdown/MDX blog: posts, tags and RSS", long_about = None)]
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
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, slug)
        #[arg(default_value = "post")]
        r#type: String,

        /// Include hidden posts
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one post by slug
    Show {
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the posts under a tag slug
    Tag {
        tag: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate the RSS feed
    Feed {
        /// Output file, `-` for stdout (defaults to feed_path in _config.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the URL slug of a tag
    Slugify { raw: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::List { r#type, all, json } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type, all, json)?;
        }

        Commands::Show { slug, json } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::show::run(&site, &slug, json)?;
        }

        Commands::Tag { tag, json } => {
            let site = folio::Site::new(&base_dir)?;
            folio::commands::tag::run(&site, &tag, json)?;
        }

        Commands::Feed { output } => {
            let site = folio::Site::new(&base_dir)?;
            tracing::debug!("Generating feed from {:?}", site.content_dir);
            folio::commands::feed::run(&site, output.as_deref())?;
        }

        Commands::Slugify { raw } => {
            println!("{}", folio::helpers::slugify_tag(&raw));
        }
    }

    Ok(())
}
