//! Command handlers for the Telegram bot.

use std::sync::Arc;

use arrbot_radarr::MovieLibrary;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;
use tracing::{debug, error, info};

use crate::command::{Command, LibraryCommand, HELP_TEXT};

/// Shared state across handlers.
pub struct BotState {
    /// The Radarr library operations.
    pub library: MovieLibrary,
    /// When set, the bot only answers in this chat.
    pub allowed_chat: Option<ChatId>,
}

impl BotState {
    pub fn new(library: MovieLibrary, allowed_chat: Option<ChatId>) -> Arc<Self> {
        Arc::new(Self {
            library,
            allowed_chat,
        })
    }

    /// Whether the bot may answer in this chat. Every reply path must check
    /// this, including the unknown-command fallthrough.
    pub fn is_allowed(&self, chat_id: ChatId) -> bool {
        self.allowed_chat.is_none_or(|allowed| allowed == chat_id)
    }
}

/// Handle a parsed bot command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    if !state.is_allowed(msg.chat.id) {
        debug!(chat_id = %msg.chat.id, "Ignoring message from non-allowed chat");
        return Ok(());
    }

    match cmd {
        Command::Start | Command::Help => {
            send_pre(&bot, msg.chat.id, HELP_TEXT).await?;
        }
        Command::Radarr(args) => {
            handle_radarr(bot, msg, args, state).await?;
        }
    }
    Ok(())
}

/// Handle the `/radarr` command: parse the sub-command and dispatch.
async fn handle_radarr(
    bot: Bot,
    msg: Message,
    args: String,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    info!(chat_id = %msg.chat.id, args = %args, "Running radarr command");

    let cmd = match LibraryCommand::parse(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            send_pre(&bot, msg.chat.id, &e.reply()).await?;
            return Ok(());
        }
    };

    // Commands acting on the caller's tag need an identity.
    let username = msg.from.as_ref().and_then(|u| u.username.clone());
    let needs_user = matches!(
        cmd,
        LibraryCommand::Me(_) | LibraryCommand::Tag(_) | LibraryCommand::Untag(_)
    );
    let username = match (needs_user, username) {
        (true, None) => {
            send_pre(
                &bot,
                msg.chat.id,
                "You need a Telegram username set to use this command.",
            )
            .await?;
            return Ok(());
        }
        (_, username) => username.unwrap_or_default(),
    };

    let result = match cmd {
        LibraryCommand::Status { extended } => state.library.status(extended).await,
        LibraryCommand::List(terms) => state.library.list(&terms).await,
        LibraryCommand::Me(terms) => state.library.me(&username, &terms).await,
        LibraryCommand::Tag(id) => state
            .library
            .tag(&username, id)
            .await
            .map(|text| vec![text]),
        LibraryCommand::Untag(id) => state
            .library
            .untag(&username, id)
            .await
            .map(|text| vec![text]),
        LibraryCommand::Search(terms) => state.library.search(&terms).await,
        LibraryCommand::Add(id) => state.library.add(id).await.map(|text| vec![text]),
        LibraryCommand::Help => Ok(vec![HELP_TEXT.to_string()]),
    };

    match result {
        Ok(messages) => {
            for message in messages {
                if !message.is_empty() {
                    send_pre(&bot, msg.chat.id, &message).await?;
                }
            }
        }
        Err(e) => {
            error!(chat_id = %msg.chat.id, error = %e, "Radarr command failed");
            send_pre(&bot, msg.chat.id, &format!("Request failed: {e}")).await?;
        }
    }

    Ok(())
}

/// Send monospace text, HTML-escaped and wrapped in `<pre>`.
async fn send_pre(bot: &Bot, chat_id: ChatId, text: &str) -> ResponseResult<()> {
    bot.send_message(chat_id, format!("<pre>{}</pre>", html::escape(text)))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrbot_radarr::RadarrClient;
    use std::collections::HashMap;

    fn state(allowed_chat: Option<ChatId>) -> Arc<BotState> {
        let client = RadarrClient::new("http://localhost:7878", "key").unwrap();
        let library = MovieLibrary::new(client, HashMap::new(), None);
        BotState::new(library, allowed_chat)
    }

    #[test]
    fn test_unrestricted_bot_answers_any_chat() {
        let state = state(None);
        assert!(state.is_allowed(ChatId(1)));
        assert!(state.is_allowed(ChatId(-100)));
    }

    #[test]
    fn test_restricted_bot_only_answers_allowed_chat() {
        let state = state(Some(ChatId(42)));
        assert!(state.is_allowed(ChatId(42)));
        assert!(!state.is_allowed(ChatId(43)));
        assert!(!state.is_allowed(ChatId(-42)));
    }
}
