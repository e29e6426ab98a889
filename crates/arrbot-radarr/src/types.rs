//! Wire types for the Radarr v3 API.
//!
//! Radarr's movie update endpoint expects the full movie object back, so
//! [`Movie`] and [`LookupMovie`] carry a flattened `extra` map preserving
//! every field the bot does not model. Decoding and re-encoding a movie is
//! lossless apart from field order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie in the Radarr library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Library id (not the TMDB id).
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub year: u16,

    /// Bytes on disk; zero when not yet downloaded.
    #[serde(default)]
    pub size_on_disk: u64,

    /// Ids of tags attached to this movie.
    #[serde(default)]
    pub tags: Vec<u64>,

    #[serde(default)]
    pub tmdb_id: Option<u64>,

    /// Fields the bot does not model, preserved for round-tripping.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Movie {
    /// Whether the movie carries the given tag.
    pub fn has_tag(&self, tag_id: u64) -> bool {
        self.tags.contains(&tag_id)
    }

    /// Add a tag id if not already present.
    pub fn add_tag(&mut self, tag_id: u64) {
        if !self.has_tag(tag_id) {
            self.tags.push(tag_id);
        }
    }

    /// Remove a tag id if present.
    pub fn remove_tag(&mut self, tag_id: u64) {
        self.tags.retain(|&t| t != tag_id);
    }
}

/// A tag (label) in Radarr. The bot uses one tag per user to mean
/// "claimed by that user".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub label: String,
}

/// Payload for creating a tag.
#[derive(Debug, Clone, Serialize)]
pub struct NewTag {
    pub label: String,
}

/// A quality profile.
#[derive(Debug, Clone, Deserialize)]
pub struct QualityProfile {
    pub id: u64,
    pub name: String,
}

/// A root folder movies are stored under.
#[derive(Debug, Clone, Deserialize)]
pub struct RootFolder {
    pub id: u64,
    pub path: String,
}

/// Server status, used for the extended status display.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub version: String,
}

/// A catalog search result from `/movie/lookup`.
///
/// Adding a movie POSTs this object back with the add fields filled in, so
/// the unmodeled metadata (images, overview, ...) is preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupMovie {
    pub title: String,

    #[serde(default)]
    pub year: u16,

    pub tmdb_id: u64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Fields added to a [`LookupMovie`] to turn it into an add request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    pub search_for_movie: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_deserialization() {
        let json = r#"{
            "id": 42,
            "title": "Alien",
            "year": 1979,
            "sizeOnDisk": 4200000000,
            "tags": [3, 7],
            "tmdbId": 348,
            "overview": "In space no one can hear you scream.",
            "monitored": true
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 42);
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.year, 1979);
        assert_eq!(movie.size_on_disk, 4_200_000_000);
        assert_eq!(movie.tags, vec![3, 7]);
        assert_eq!(movie.tmdb_id, Some(348));
        assert_eq!(movie.extra.get("monitored"), Some(&json!(true)));
    }

    #[test]
    fn test_movie_roundtrip_preserves_unmodeled_fields() {
        let json = r#"{
            "id": 1,
            "title": "Heat",
            "year": 1995,
            "sizeOnDisk": 0,
            "tags": [],
            "tmdbId": 949,
            "qualityProfileId": 6,
            "path": "/movies/Heat (1995)"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["qualityProfileId"], json!(6));
        assert_eq!(value["path"], json!("/movies/Heat (1995)"));
        assert_eq!(value["tmdbId"], json!(949));
    }

    #[test]
    fn test_movie_defaults() {
        // Radarr omits sizeOnDisk/tags on some listings
        let movie: Movie = serde_json::from_str(r#"{"id": 5, "title": "Ran"}"#).unwrap();
        assert_eq!(movie.year, 0);
        assert_eq!(movie.size_on_disk, 0);
        assert!(movie.tags.is_empty());
        assert_eq!(movie.tmdb_id, None);
    }

    #[test]
    fn test_tag_edits() {
        let mut movie: Movie = serde_json::from_str(r#"{"id": 5, "title": "Ran"}"#).unwrap();

        movie.add_tag(9);
        movie.add_tag(9);
        assert_eq!(movie.tags, vec![9]);
        assert!(movie.has_tag(9));

        movie.remove_tag(9);
        assert!(!movie.has_tag(9));
        movie.remove_tag(9);
        assert!(movie.tags.is_empty());
    }

    #[test]
    fn test_lookup_movie_roundtrip() {
        let json = r#"{
            "title": "Blade Runner",
            "year": 1982,
            "tmdbId": 78,
            "overview": "Replicants.",
            "images": []
        }"#;

        let lookup: LookupMovie = serde_json::from_str(json).unwrap();
        assert_eq!(lookup.tmdb_id, 78);

        let value = serde_json::to_value(&lookup).unwrap();
        assert_eq!(value["overview"], json!("Replicants."));
        assert_eq!(value["images"], json!([]));
    }

    #[test]
    fn test_system_status_deserialization() {
        let status: SystemStatus =
            serde_json::from_str(r#"{"version": "5.3.6.8612", "appName": "Radarr"}"#).unwrap();
        assert_eq!(status.version, "5.3.6.8612");
    }
}
