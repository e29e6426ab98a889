//! arrbot binary.
//!
//! Start the bot with:
//! ```bash
//! RADARR_URL=http://localhost:7878 RADARR_API_KEY=xxx TELEGRAM_BOT_TOKEN=xxx arrbot
//! ```

use arrbot_telegram::{ArrBot, BotConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Telegram bot for curating a Radarr movie library
#[derive(Parser, Debug)]
#[command(name = "arrbot")]
#[command(about = "Telegram bot for curating a Radarr movie library")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load environment variables from .env.local or .env if present
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "arrbot_telegram=info,arrbot_radarr=info,teloxide=warn",
        1 => "arrbot_telegram=debug,arrbot_radarr=debug,teloxide=info",
        2 => "arrbot_telegram=trace,arrbot_radarr=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BotConfig::from_env()?;
    let bot = ArrBot::new(config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("arrbot running as @{username}");
            println!("Open Telegram and send /radarr to begin. Press Ctrl+C to stop.");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    bot.run().await?;

    Ok(())
}
