//! Main Telegram bot implementation.

use std::sync::Arc;

use arrbot_radarr::{MovieLibrary, RadarrClient};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::command::Command;
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::handlers::{handle_command, BotState};

/// The Telegram bot for the movie library.
pub struct ArrBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
}

impl ArrBot {
    /// Create a bot from configuration.
    pub fn new(config: BotConfig) -> Result<Self> {
        let client = RadarrClient::new(&config.radarr_url, config.radarr_api_key.clone())?;
        let library = MovieLibrary::new(client, config.user_tags, config.quality_profile);
        let state = BotState::new(library, config.allowed_chat_id.map(ChatId));

        Ok(Self {
            bot: Bot::new(config.bot_token),
            state,
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Run the bot in polling mode until ctrl-c.
    pub async fn run(&self) -> Result<()> {
        info!("Starting Telegram bot in polling mode...");

        let bot = self.bot.clone();
        let state_for_commands = Arc::clone(&self.state);
        let state_for_unknown = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Unrecognized commands (start with / but didn't parse)
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_unknown);
                        async move {
                            // Chat restriction applies here too
                            if !state.is_allowed(msg.chat.id) {
                                return Ok(());
                            }
                            if let Some(text) = msg.text() {
                                info!(cmd = %text, "Unrecognized command");
                                bot.send_message(
                                    msg.chat.id,
                                    format!(
                                        "Unknown command {}\n\nUse /help to see available commands.",
                                        text.split_whitespace().next().unwrap_or(text)
                                    ),
                                )
                                .await?;
                            }
                            Ok(())
                        }
                    }),
            );

        info!("Bot is running! Send /radarr to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
