use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analyze;
mod ask;
mod definitions;
mod report;

#[derive(Debug, Parser)]
#[command(name = "brandtrack")]
#[command(about = "Track how generative models mention your brands and their competitors")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query the model for every brand × prompt pair and write a CSV report
    Analyze {
        /// Brand definitions YAML (defaults to `BRANDTRACK_BRANDS_PATH`)
        #[arg(long)]
        brands: Option<PathBuf>,

        /// Prompt definitions YAML (defaults to `BRANDTRACK_PROMPTS_PATH`)
        #[arg(long)]
        prompts: Option<PathBuf>,

        /// Directory for the CSV report (defaults to `BRANDTRACK_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the planned pairs and the first composed query without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Send each prompt to the model without brand context and print the replies
    Ask {
        /// Prompt definitions YAML (defaults to `BRANDTRACK_PROMPTS_PATH`)
        #[arg(long)]
        prompts: Option<PathBuf>,
    },
    /// Print the loaded brand and prompt definitions
    Show {
        #[arg(long)]
        brands: Option<PathBuf>,

        #[arg(long)]
        prompts: Option<PathBuf>,
    },
}

/// Build the Gemini client from process configuration.
///
/// # Errors
///
/// Returns an error if `GEMINI_API_KEY` is missing or the client cannot be built.
pub(crate) fn build_gemini_client(
    config: &brandtrack_core::AppConfig,
) -> anyhow::Result<brandtrack_gemini::GeminiClient> {
    let gemini_config = brandtrack_gemini::GeminiConfig::from_app_config(config)
        .context("the Gemini API key is required for this command")?;

    brandtrack_gemini::GeminiClient::new(&gemini_config).context("failed to build Gemini client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brandtrack_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Analyze {
            brands,
            prompts,
            output_dir,
            dry_run,
        }) => {
            let args = analyze::AnalyzeArgs {
                brands,
                prompts,
                output_dir,
                dry_run,
            };
            analyze::run_analyze(&config, args).await?;
        }
        Some(Commands::Ask { prompts }) => ask::run_ask(&config, prompts.as_deref()).await?,
        Some(Commands::Show { brands, prompts }) => {
            let defs =
                definitions::load_definitions(&config, brands.as_deref(), prompts.as_deref())?;
            definitions::print_definitions(&defs);
        }
        None => println!("brandtrack: no command given; run `brandtrack --help` for usage"),
    }

    Ok(())
}
