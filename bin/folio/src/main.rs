//! Folio CLI
//!
//! Builds the search index of a Folio site, queries it, and serves the site locally.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Search index builder for static article readers"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Site root directory
    #[arg(short, long, default_value = ".")]
    root: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the search index from the chapter files
    Build,
    /// Search the built index
    Search {
        /// Query, used as a case-insensitive regular expression
        query: String,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the site for local preview
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build => {
            folio::cmd::build::run(&cli.config, &cli.root)?;
        }
        Commands::Search { query, json } => {
            folio::cmd::search::run(&cli.config, &cli.root, &query, json)?;
        }
        Commands::Serve { port } => {
            folio::cmd::serve::run(&cli.root, port).await?;
        }
    }

    Ok(())
}
