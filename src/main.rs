use clap::{Parser, Subcommand};

use yt_rank::commands;
use yt_rank::config::load_env;

#[derive(Parser)]
#[command(name = "yt-rank")]
#[command(about = "Rank every video on a YouTube channel by view count")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every video on a channel and rank them by views
    Rank {
        /// Channel handle (e.g., @veritasium or veritasium)
        channel: String,
    },

    /// Initialize with a YouTube Data API key
    Init {
        /// YouTube Data API v3 key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rank { channel } => commands::rank::run(&channel).await,
        Commands::Init { api_key, force } => commands::init::run(api_key, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
