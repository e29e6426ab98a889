//! Environment-supplied bot configuration.

use std::collections::HashMap;

use crate::error::{BotError, Result};

/// Configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the Radarr instance.
    pub radarr_url: String,
    /// Radarr API key.
    pub radarr_api_key: String,
    /// Telegram bot token.
    pub bot_token: String,
    /// When set, the bot only answers in this chat.
    pub allowed_chat_id: Option<i64>,
    /// Quality profile name to use for added movies.
    pub quality_profile: Option<String>,
    /// Fixed username -> tag label table.
    pub user_tags: HashMap<String, String>,
}

impl BotConfig {
    /// Read configuration from environment variables.
    ///
    /// `RADARR_URL`, `RADARR_API_KEY` and a bot token (`TELEGRAM_BOT_TOKEN`
    /// or teloxide's own `TELOXIDE_TOKEN`) are required; the rest is
    /// optional.
    pub fn from_env() -> Result<Self> {
        let radarr_url =
            std::env::var("RADARR_URL").map_err(|_| BotError::MissingEnv("RADARR_URL"))?;
        let radarr_api_key =
            std::env::var("RADARR_API_KEY").map_err(|_| BotError::MissingEnv("RADARR_API_KEY"))?;
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .or_else(|_| std::env::var("TELOXIDE_TOKEN"))
            .map_err(|_| BotError::NoToken)?;

        let allowed_chat_id = match std::env::var("ARRBOT_CHAT_ID") {
            Ok(value) => Some(value.parse().map_err(|_| BotError::InvalidEnv {
                var: "ARRBOT_CHAT_ID",
                value,
            })?),
            Err(_) => None,
        };

        let quality_profile = std::env::var("ARRBOT_QUALITY_PROFILE").ok();

        let user_tags = match std::env::var("ARRBOT_USER_TAGS") {
            Ok(value) => parse_user_tags(&value)?,
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            radarr_url,
            radarr_api_key,
            bot_token,
            allowed_chat_id,
            quality_profile,
            user_tags,
        })
    }
}

/// Parse comma-separated `username=label` pairs.
fn parse_user_tags(value: &str) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for pair in value.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (username, label) = pair.split_once('=').ok_or_else(|| BotError::InvalidEnv {
            var: "ARRBOT_USER_TAGS",
            value: pair.to_string(),
        })?;
        map.insert(username.trim().to_string(), label.trim().to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_tags() {
        let map = parse_user_tags("simple_harmonic_motion=sean, elzibubble=alexis").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["simple_harmonic_motion"], "sean");
        assert_eq!(map["elzibubble"], "alexis");
    }

    #[test]
    fn test_parse_user_tags_empty() {
        assert!(parse_user_tags("").unwrap().is_empty());
        assert!(parse_user_tags(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_user_tags_rejects_malformed_pair() {
        let err = parse_user_tags("justausername").unwrap_err();
        assert!(matches!(
            err,
            BotError::InvalidEnv {
                var: "ARRBOT_USER_TAGS",
                ..
            }
        ));
    }
}
