//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Radarr client error.
    #[error("Radarr error: {0}")]
    Radarr(#[from] arrbot_radarr::RadarrError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
