//! CLI entry point for garden-core

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use garden_core::commands;
use garden_core::random::Seed;

#[derive(Parser)]
#[command(name = "garden-core")]
#[command(version)]
#[command(
    about = "Content model and tooling for a writing + digital garden site",
    long_about = None
)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Create a new garden note interactively
    NewGarden,

    /// Print randomly sampled posts as JSON
    RandomPosts {
        /// How many posts to return
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Seed for a reproducible selection
        #[arg(short, long)]
        seed: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (post, garden, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the schema definition
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "garden_core=debug,info"
    } else {
        "garden_core=info"
    };

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
        Commands::NewGarden => {
            let site = garden_core::Site::new(&base_dir)?;
            commands::new_garden::run(&site, &mut commands::new_garden::InquirePrompter)?;
        }

        Commands::RandomPosts { count, seed } => {
            let site = garden_core::Site::new(&base_dir)?;
            commands::random::run(&site, count, seed.map(Seed::from))?;
        }

        Commands::List { r#type } => {
            let site = garden_core::Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Schema => commands::schema::run()?,
    }

    Ok(())
}
