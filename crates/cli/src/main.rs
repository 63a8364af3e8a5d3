mod commands;

use anyhow::Result;
use campaign_scout_core::{DEFAULT_CAMPAIGN_LIST_LIMIT, Vertical, parse_vertical_list};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campaign-scout")]
#[command(about = "Campaign research across playlists, radio, DJ sets and press", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "38080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Research references once and print the report; nothing is saved
    Research {
        #[arg(short, long, default_value = "Ad-hoc research")]
        name: String,
        /// Comma-separated verticals (dsp,radio,dj,press); defaults to all
        #[arg(short, long)]
        verticals: Option<String>,
        /// Fixed seed for reproducible sample data
        #[arg(long)]
        seed: Option<u64>,
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Classify references and print the normalized inputs
    Normalize {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// List recently saved campaigns (needs DATABASE_URL)
    Campaigns {
        #[arg(short, long, default_value_t = DEFAULT_CAMPAIGN_LIST_LIMIT)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Research { name, verticals, seed, inputs } => {
            let verticals = match verticals {
                Some(raw) => parse_vertical_list(&raw)?,
                None => Vertical::ALL.to_vec(),
            };
            commands::research::run(name, inputs, verticals, seed).await?;
        },
        Commands::Normalize { inputs } => commands::research::normalize(&inputs)?,
        Commands::Campaigns { limit } => commands::research::list_campaigns(limit).await?,
    }

    Ok(())
}
