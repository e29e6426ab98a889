//! Radarr client and movie library operations for arrbot.
//!
//! This crate wraps the Radarr v3 REST API and implements the bot-facing
//! library operations: status summaries, listings, per-user tagging, catalog
//! search and adding movies. All durable state lives in Radarr; this crate
//! holds only a client handle and the user/tag configuration.
//!
//! # Example
//!
//! ```no_run
//! use arrbot_radarr::{MovieLibrary, RadarrClient};
//! use std::collections::HashMap;
//!
//! # async fn run() -> arrbot_radarr::Result<()> {
//! let client = RadarrClient::new("http://localhost:7878", "api-key")?;
//! let library = MovieLibrary::new(client, HashMap::new(), None);
//! for message in library.status(false).await? {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod format;
pub mod fuzzy;
pub mod library;
pub mod types;

pub use client::RadarrClient;
pub use error::{RadarrError, Result};
pub use format::MESSAGE_LIMIT;
pub use library::MovieLibrary;
pub use types::{LookupMovie, Movie, QualityProfile, RootFolder, SystemStatus, Tag};
