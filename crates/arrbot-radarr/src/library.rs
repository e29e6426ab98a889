//! Bot-facing movie library operations.
//!
//! [`MovieLibrary`] pairs a [`RadarrClient`] with the user/tag configuration
//! and implements the sub-commands: status, list, me, tag, untag, search and
//! add. Operations return ready-to-send reply text; multi-message results
//! come back pre-chunked under [`MESSAGE_LIMIT`].

use std::collections::HashMap;

use tracing::{debug, info};

use crate::client::RadarrClient;
use crate::error::{RadarrError, Result};
use crate::format::{
    chunk_lines, human_size, lookup_line, movie_line, render_movie_lines, MESSAGE_LIMIT,
};
use crate::fuzzy::rank_by_title;
use crate::types::{Movie, Tag};

/// A Radarr library as seen by the bot's users.
pub struct MovieLibrary {
    client: RadarrClient,
    /// Fixed username -> tag label table. Usernames not listed fall back to
    /// their lowercased form.
    user_tags: HashMap<String, String>,
    /// Preferred quality profile name for adds (case-insensitive). Falls
    /// back to the first profile Radarr reports.
    quality_profile: Option<String>,
}

impl MovieLibrary {
    pub fn new(
        client: RadarrClient,
        user_tags: HashMap<String, String>,
        quality_profile: Option<String>,
    ) -> Self {
        Self {
            client,
            user_tags,
            quality_profile,
        }
    }

    /// The tag label for a chat username.
    fn user_label(&self, username: &str) -> String {
        self.user_tags
            .get(username)
            .cloned()
            .unwrap_or_else(|| username.to_lowercase())
    }

    /// Resolve a username to its tag, creating the tag if Radarr does not
    /// have it yet.
    async fn resolve_user_tag(&self, username: &str) -> Result<Tag> {
        let label = self.user_label(username);

        let tags = self.client.tags().await?;
        if let Some(tag) = tags.into_iter().find(|t| t.label == label) {
            return Ok(tag);
        }

        info!(username = %username, label = %label, "Tag not found, creating");
        self.client.create_tag(&label).await
    }

    /// Library summary. With `extended`, appends the server version and a
    /// per-tag breakdown. The breakdown grows with the tag set, so the
    /// result is chunked like the listings.
    pub async fn status(&self, extended: bool) -> Result<Vec<String>> {
        let movies = self.client.movies().await?;
        let mut text = status_summary(&movies);

        if extended {
            let version = self.client.system_status().await?.version;
            let tags = self.client.tags().await?;
            text.push_str(&format!("\nRadarr version {version}"));
            for line in tag_breakdown(&movies, &tags) {
                text.push('\n');
                text.push_str(&line);
            }
        }

        Ok(chunk_lines(&text, MESSAGE_LIMIT))
    }

    /// List movies, all of them sorted by title or the fuzzy top matches
    /// when search terms are given.
    pub async fn list(&self, terms: &[String]) -> Result<Vec<String>> {
        let movies = self.client.movies().await?;
        Ok(chunk_lines(&render_listing(movies, terms), MESSAGE_LIMIT))
    }

    /// As [`list`](Self::list), restricted to movies tagged for `username`.
    pub async fn me(&self, username: &str, terms: &[String]) -> Result<Vec<String>> {
        let tag = self.resolve_user_tag(username).await?;
        let movies = self.client.movies().await?;

        let text = render_me_listing(movies, tag.id, terms);
        if text.is_empty() {
            return Ok(vec![format!("No movies tagged {}", tag.label)]);
        }
        Ok(chunk_lines(&text, MESSAGE_LIMIT))
    }

    /// Tag a movie as claimed by `username`.
    pub async fn tag(&self, username: &str, movie_id: u64) -> Result<String> {
        let tag = self.resolve_user_tag(username).await?;

        let Some(mut movie) = self.client.movie(movie_id).await? else {
            return Ok(format!("No movie found with ID {movie_id}"));
        };

        if movie.has_tag(tag.id) {
            return Ok(format!(
                "Movie {} ({}) is already tagged for you",
                movie.title, movie.year
            ));
        }

        movie.add_tag(tag.id);
        let movie = self.client.update_movie(&movie).await?;
        debug!(movie_id, tag_id = tag.id, "Tagged movie");
        Ok(format!("Tagged {} ({})", movie.title, movie.year))
    }

    /// Remove `username`'s claim from a movie.
    pub async fn untag(&self, username: &str, movie_id: u64) -> Result<String> {
        let tag = self.resolve_user_tag(username).await?;

        let Some(mut movie) = self.client.movie(movie_id).await? else {
            return Ok(format!("No movie found with ID {movie_id}"));
        };

        if !movie.has_tag(tag.id) {
            return Ok(format!(
                "Movie {} ({}) is not tagged for you",
                movie.title, movie.year
            ));
        }

        movie.remove_tag(tag.id);
        let movie = self.client.update_movie(&movie).await?;
        debug!(movie_id, tag_id = tag.id, "Untagged movie");
        Ok(format!("Untagged {} ({})", movie.title, movie.year))
    }

    /// Search the external catalog, returning the fuzzy top matches with
    /// their TMDB ids.
    pub async fn search(&self, terms: &[String]) -> Result<Vec<String>> {
        let term = terms.join(" ");
        let results = self.client.lookup(&term).await?;

        if results.is_empty() {
            return Ok(vec![format!("No catalog matches for '{term}'")]);
        }

        let ranked = rank_by_title(results, terms, |m| &m.title);
        let text = ranked
            .iter()
            .map(|s| lookup_line(&s.item, Some(s.score)))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(chunk_lines(&text, MESSAGE_LIMIT))
    }

    /// Add a movie by TMDB id, monitored, kicking off a search for it.
    pub async fn add(&self, tmdb_id: u64) -> Result<String> {
        let lookup = self
            .client
            .lookup_tmdb(tmdb_id)
            .await?
            .ok_or(RadarrError::LookupNotFound(tmdb_id))?;

        let profile_id = self.pick_quality_profile().await?;
        let root = self
            .client
            .root_folders()
            .await?
            .into_iter()
            .next()
            .ok_or(RadarrError::NoRootFolder)?;

        match self.client.add_movie(&lookup, profile_id, &root.path).await {
            Ok(added) => {
                info!(tmdb_id, title = %added.title, "Movie added");
                Ok(format!(
                    "Added {} ({}), search started",
                    added.title, added.year
                ))
            }
            Err(RadarrError::AlreadyAdded) => Ok(format!(
                "{} ({}) is already in the library",
                lookup.title, lookup.year
            )),
            Err(e) => Err(e),
        }
    }

    /// The quality profile id to use for adds: the configured name if it
    /// matches (case-insensitive), otherwise the first profile.
    async fn pick_quality_profile(&self) -> Result<u64> {
        let profiles = self.client.quality_profiles().await?;

        if let Some(wanted) = &self.quality_profile {
            if let Some(profile) = profiles
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(wanted))
            {
                return Ok(profile.id);
            }
            debug!(wanted = %wanted, "Configured quality profile not found, using first");
        }

        profiles
            .first()
            .map(|p| p.id)
            .ok_or(RadarrError::NoQualityProfile)
    }
}

/// The one-line library summary.
fn status_summary(movies: &[Movie]) -> String {
    let count = movies.len();
    let total_size: u64 = movies.iter().map(|m| m.size_on_disk).sum();

    let untagged: Vec<&Movie> = movies.iter().filter(|m| m.tags.is_empty()).collect();
    let untagged_size: u64 = untagged.iter().map(|m| m.size_on_disk).sum();

    let untagged_message = if untagged.is_empty() {
        "(all tagged)".to_string()
    } else {
        format!(
            "({} untagged totalling {})",
            untagged.len(),
            human_size(untagged_size)
        )
    };

    format!(
        "There are {count} movies totalling {} {untagged_message}",
        human_size(total_size)
    )
}

/// Per-tag claim counts and sizes, one line per tag, sorted by label.
fn tag_breakdown(movies: &[Movie], tags: &[Tag]) -> Vec<String> {
    let mut tags: Vec<&Tag> = tags.iter().collect();
    tags.sort_by(|a, b| a.label.cmp(&b.label));

    tags.into_iter()
        .map(|tag| {
            let claimed: Vec<&Movie> = movies.iter().filter(|m| m.has_tag(tag.id)).collect();
            let size: u64 = claimed.iter().map(|m| m.size_on_disk).sum();
            format!(
                "  {}: {} movies, {}",
                tag.label,
                claimed.len(),
                human_size(size)
            )
        })
        .collect()
}

/// Render a listing: sorted by title without terms, fuzzy top matches with.
fn render_listing(mut movies: Vec<Movie>, terms: &[String]) -> String {
    if terms.is_empty() {
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        movies
            .iter()
            .map(|m| movie_line(m, None))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        render_movie_lines(&rank_by_title(movies, terms, |m| &m.title))
    }
}

/// Render the caller's listing. With terms, the WHOLE library is ranked to
/// its top matches first and only then restricted to the caller's tag, so
/// the caller sees their subset of the global top 10 rather than the top 10
/// of their own movies.
fn render_me_listing(movies: Vec<Movie>, tag_id: u64, terms: &[String]) -> String {
    if terms.is_empty() {
        let mut mine: Vec<Movie> = movies.into_iter().filter(|m| m.has_tag(tag_id)).collect();
        mine.sort_by(|a, b| a.title.cmp(&b.title));
        mine.iter()
            .map(|m| movie_line(m, None))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        rank_by_title(movies, terms, |m| &m.title)
            .iter()
            .filter(|s| s.item.has_tag(tag_id))
            .map(|s| movie_line(&s.item, Some(s.score)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(id: u64, title: &str, year: u16, size: u64, tags: &[u64]) -> Movie {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "year": year,
            "sizeOnDisk": size,
            "tags": tags,
        }))
        .unwrap()
    }

    fn sample_movies() -> Vec<Movie> {
        vec![
            movie(1, "Heat", 1995, 2_000_000_000, &[3]),
            movie(2, "Alien", 1979, 1_000_000_000, &[]),
            movie(3, "Ran", 1985, 500_000_000, &[3, 4]),
        ]
    }

    #[test]
    fn test_status_summary_with_untagged() {
        let text = status_summary(&sample_movies());
        assert_eq!(
            text,
            "There are 3 movies totalling 3.5 GB (1 untagged totalling 1.0 GB)"
        );
    }

    #[test]
    fn test_status_summary_all_tagged() {
        let movies = vec![movie(1, "Heat", 1995, 1_000, &[3])];
        assert_eq!(
            status_summary(&movies),
            "There are 1 movies totalling 1.0 kB (all tagged)"
        );
    }

    #[test]
    fn test_status_summary_empty_library() {
        assert_eq!(
            status_summary(&[]),
            "There are 0 movies totalling 0 Bytes (all tagged)"
        );
    }

    #[test]
    fn test_tag_breakdown_sorted_by_label() {
        let tags = vec![
            Tag {
                id: 4,
                label: "nick".to_string(),
            },
            Tag {
                id: 3,
                label: "alexis".to_string(),
            },
        ];

        let lines = tag_breakdown(&sample_movies(), &tags);
        assert_eq!(
            lines,
            vec![
                "  alexis: 2 movies, 2.5 GB".to_string(),
                "  nick: 1 movies, 500.0 MB".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_listing_sorted_without_terms() {
        let text = render_listing(sample_movies(), &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "    2: Alien (1979)",
                "    1: Heat (1995)",
                "    3: Ran (1985)",
            ]
        );
    }

    #[test]
    fn test_render_listing_fuzzy_with_terms() {
        let text = render_listing(sample_movies(), &["alien".to_string()]);
        let first = text.lines().next().unwrap();
        assert!(first.contains("Alien (1979)"));
        assert!(first.contains("fuzzy score:"));
    }

    #[test]
    fn test_render_me_listing_sorted_without_terms() {
        let text = render_me_listing(sample_movies(), 3, &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["    1: Heat (1995)", "    3: Ran (1985)"]);
    }

    #[test]
    fn test_render_me_listing_ranks_whole_library_before_filtering() {
        // 12 equally matching titles: the global top 10 is the first ten,
        // so a tagged movie ranked 12th must not appear even though the
        // caller has fewer than 10 movies.
        let movies: Vec<Movie> = (0..12)
            .map(|i| {
                let tags: &[u64] = if i == 3 || i == 11 { &[7] } else { &[] };
                movie(i + 1, &format!("Movie {i:02}"), 2000, 0, tags)
            })
            .collect();

        let text = render_me_listing(movies, 7, &["movie".to_string()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Movie 03"));
        assert!(!text.contains("Movie 11"));
        assert!(lines[0].contains("fuzzy score:"));
    }

    #[test]
    fn test_render_me_listing_empty_when_nothing_tagged() {
        assert!(render_me_listing(sample_movies(), 99, &[]).is_empty());
    }

    #[test]
    fn test_extended_status_text_chunks_under_limit() {
        // A big tag set pushes the breakdown past one message
        let movies = sample_movies();
        let tags: Vec<Tag> = (0..200)
            .map(|i| Tag {
                id: i,
                label: format!("user-with-a-long-name-{i:03}"),
            })
            .collect();

        let mut text = status_summary(&movies);
        for line in tag_breakdown(&movies, &tags) {
            text.push('\n');
            text.push_str(&line);
        }

        let chunks = chunk_lines(&text, MESSAGE_LIMIT);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MESSAGE_LIMIT);
        }
        assert_eq!(chunks.join("\n"), text);
    }
}
