//! verdant CLI - fetch and inspect plant API state from the terminal.
//!
//! Stands in for the mobile presentation layer: it builds the store,
//! triggers fetches, and renders the resulting slice state.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use verdant::{ApiClient, Config, Store};

#[derive(Parser)]
#[command(name = "verdant")]
#[command(version)]
#[command(about = "Data layer CLI for the Verdant plant identification client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch plant categories and print them
    Categories {
        /// Print the items as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Fetch home-screen questions and print them
    Questions {
        /// Print the items as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Load the config file, or fall back to built-in defaults when it does
/// not exist (the app ships with the production API baked in).
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).with_context(|| format!("Failed to load config from {path:?}"))
    } else {
        Ok(Config::default())
    }
}

fn print_example_config() {
    let example = r#"# verdant configuration file

[api]
# Plant API endpoint; supports ${ENV_VAR} expansion
base_url = "https://dummy-api-jtg6bessta-ey.a.run.app"
# Request timeout in milliseconds
timeout_ms = 10000
# Retry budget (not yet consulted by the fetch path)
retry_attempts = 3
"#;
    println!("{example}");
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Example => {
            print_example_config();
            return Ok(());
        }

        Commands::Validate => {
            let config = Config::from_file(&cli.config)
                .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

            info!("Configuration is valid");
            info!("  Base URL: {}", config.api.base_url);
            info!("  Timeout: {} ms", config.api.timeout_ms);
            info!("  Retry attempts: {}", config.api.retry_attempts);
            return Ok(());
        }

        Commands::Categories { json } => {
            let config = load_config(&cli.config)?;
            let client = ApiClient::new(config.api)?;
            let store = Arc::new(Store::new(client));

            let bar = spinner("Fetching categories");
            store.fetch_categories().await?;
            bar.finish_and_clear();

            let state = store.state();
            if let Some(error) = &state.categories.error {
                anyhow::bail!("{error}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state.categories.items)?);
            } else {
                println!("\n=== Categories ({}) ===", state.categories.items.len());
                for category in &state.categories.items {
                    println!("{:>3}. {}  [{}]", category.rank, category.title, category.image.url);
                }
            }
        }

        Commands::Questions { json } => {
            let config = load_config(&cli.config)?;
            let client = ApiClient::new(config.api)?;
            let store = Arc::new(Store::new(client));

            let bar = spinner("Fetching questions");
            store.fetch_questions().await?;
            bar.finish_and_clear();

            let state = store.state();
            if let Some(error) = &state.questions.error {
                anyhow::bail!("{error}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state.questions.items)?);
            } else {
                println!("\n=== Questions ({}) ===", state.questions.items.len());
                for question in &state.questions.items {
                    println!(
                        "{:>3}. {} ({})  [{}]",
                        question.order, question.title, question.subtitle, question.uri
                    );
                }
            }
        }
    }

    Ok(())
}
