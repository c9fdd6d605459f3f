mod analyze;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tweetmood-cli")]
#[command(about = "Run the tweetmood pipeline from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search, analyze, and print the sentiment payload as JSON
    Analyze {
        /// Search term (repeatable); defaults to the configured terms
        #[arg(long = "term")]
        terms: Vec<String>,

        /// Tweets to fetch per term; defaults to the configured count
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Fetch one page of tweets per term and print their texts as JSON
    Search {
        /// Search term (repeatable); defaults to the configured terms
        #[arg(long = "term")]
        terms: Vec<String>,

        /// Tweets per term, capped at one page; defaults to the configured count
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
    /// Print the resolved configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            terms,
            count,
            compact,
        }) => {
            let config = tweetmood_core::load_app_config_from_env()?;
            let count = count.map(usize::try_from).transpose()?;
            analyze::run_analyze(&config, terms, count, compact).await?;
        }
        Some(Commands::Search { terms, count }) => {
            let config = tweetmood_core::load_app_config_from_env()?;
            let count = count.map(usize::try_from).transpose()?;
            search::run_search(&config, terms, count).await?;
        }
        Some(Commands::Config) => {
            let config = tweetmood_core::load_app_config_from_env()?;
            println!("{config:#?}");
        }
        None => println!("tweetmood-cli ready; try `tweetmood-cli analyze --help`"),
    }

    Ok(())
}
