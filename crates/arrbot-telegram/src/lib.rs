//! Telegram bot interface for the arrbot movie library.
//!
//! A thin chat surface over [`arrbot_radarr`]: one `/radarr` command with a
//! sub-command word and free-form trailing arguments, dispatched to the
//! library operations and replied to in chunks that fit a chat message.
//!
//! # Environment Variables
//!
//! Required:
//! - `RADARR_URL`: Base URL of the Radarr instance
//! - `RADARR_API_KEY`: Radarr API key
//! - `TELEGRAM_BOT_TOKEN` (or `TELOXIDE_TOKEN`): Bot token from @BotFather
//!
//! Optional:
//! - `ARRBOT_CHAT_ID`: Restrict the bot to a single chat
//! - `ARRBOT_QUALITY_PROFILE`: Quality profile name for added movies
//! - `ARRBOT_USER_TAGS`: Fixed `username=label` pairs, comma-separated
//!
//! # Commands
//!
//! - `/radarr status [+]` - Library summary
//! - `/radarr list [title words]` - List movies
//! - `/radarr me [title words]` - Movies tagged with your username
//! - `/radarr tag <id>` / `untag <id>` - Claim / unclaim a movie
//! - `/radarr search <title words>` - Search the external catalog
//! - `/radarr add <tmdb id>` - Add a movie to the library
//! - `/radarr help` - Usage text

pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod handlers;

pub use bot::ArrBot;
pub use command::{Command, LibraryCommand};
pub use config::BotConfig;
pub use error::{BotError, Result};
pub use handlers::BotState;
