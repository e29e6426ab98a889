//! Radarr v3 REST client.
//!
//! A thin wrapper over `reqwest` that authenticates with the `X-Api-Key`
//! header and decodes JSON into the types in [`crate::types`]. Every call is
//! a single request/response; there are no retries and no caching, all state
//! lives on the Radarr side.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::{RadarrError, Result};
use crate::types::{
    AddOptions, LookupMovie, Movie, NewTag, QualityProfile, RootFolder, SystemStatus, Tag,
};

/// Markers Radarr puts in the 400 body when a movie is already present.
const ALREADY_ADDED_MARKERS: &[&str] = &["already been added", "MovieExistsValidator"];

/// Client for a single Radarr instance.
#[derive(Clone)]
pub struct RadarrClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

impl RadarrClient {
    /// Create a client for the Radarr instance at `url`.
    pub fn new(url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base = Url::parse(url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // Url::join treats a missing trailing slash as a file component,
        // which would drop any path prefix the instance is mounted under.
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| RadarrError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            for segment in path.split('/') {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RadarrError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        self.decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!(url = %url, "POST");
        let response = self
            .http
            .post(url)
            .header("X-Api-Key", &self.api_key)
            .json(body)
            .send()
            .await?;
        self.decode(response).await
    }

    /// Fetch all movies in the library.
    pub async fn movies(&self) -> Result<Vec<Movie>> {
        let movies: Vec<Movie> = self.get_json("api/v3/movie").await?;
        debug!(count = movies.len(), "Fetched movie list");
        Ok(movies)
    }

    /// Fetch one movie by library id. Returns `None` on 404.
    pub async fn movie(&self, id: u64) -> Result<Option<Movie>> {
        match self.get_json(&format!("api/v3/movie/{id}")).await {
            Ok(movie) => Ok(Some(movie)),
            Err(RadarrError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update a movie. Radarr expects the full object back.
    pub async fn update_movie(&self, movie: &Movie) -> Result<Movie> {
        let url = self.endpoint(&format!("api/v3/movie/{}", movie.id))?;
        trace!(url = %url, "PUT");
        let response = self
            .http
            .put(url)
            .header("X-Api-Key", &self.api_key)
            .json(movie)
            .send()
            .await?;
        self.decode(response).await
    }

    /// Fetch all tags.
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.get_json("api/v3/tag").await
    }

    /// Create a tag with the given label.
    pub async fn create_tag(&self, label: &str) -> Result<Tag> {
        debug!(label = %label, "Creating tag");
        self.post_json(
            "api/v3/tag",
            &NewTag {
                label: label.to_string(),
            },
        )
        .await
    }

    /// Search the external catalog by free-form term.
    pub async fn lookup(&self, term: &str) -> Result<Vec<LookupMovie>> {
        let mut url = self.endpoint("api/v3/movie/lookup")?;
        url.query_pairs_mut().append_pair("term", term);
        trace!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        self.decode(response).await
    }

    /// Look up a single movie by TMDB id. Returns `None` if the catalog has
    /// no such movie (Radarr answers 404 or an empty object).
    pub async fn lookup_tmdb(&self, tmdb_id: u64) -> Result<Option<LookupMovie>> {
        let mut url = self.endpoint("api/v3/movie/lookup/tmdb")?;
        url.query_pairs_mut()
            .append_pair("tmdbId", &tmdb_id.to_string());
        trace!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        match self.decode::<LookupMovie>(response).await {
            Ok(movie) => Ok(Some(movie)),
            Err(RadarrError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Add a looked-up movie to the library.
    ///
    /// A 400 response whose body mentions the movie already existing is
    /// mapped to [`RadarrError::AlreadyAdded`]; everything else propagates.
    pub async fn add_movie(
        &self,
        lookup: &LookupMovie,
        quality_profile_id: u64,
        root_folder_path: &str,
    ) -> Result<Movie> {
        let mut body = serde_json::to_value(lookup)?;
        body["qualityProfileId"] = serde_json::json!(quality_profile_id);
        body["rootFolderPath"] = serde_json::json!(root_folder_path);
        body["monitored"] = serde_json::json!(true);
        body["addOptions"] = serde_json::to_value(AddOptions {
            search_for_movie: true,
        })?;

        debug!(tmdb_id = lookup.tmdb_id, title = %lookup.title, "Adding movie");

        match self.post_json("api/v3/movie", &body).await {
            Err(RadarrError::Api { status: 400, body }) if is_already_added(&body) => {
                Err(RadarrError::AlreadyAdded)
            }
            other => other,
        }
    }

    /// Fetch all quality profiles.
    pub async fn quality_profiles(&self) -> Result<Vec<QualityProfile>> {
        self.get_json("api/v3/qualityprofile").await
    }

    /// Fetch all root folders.
    pub async fn root_folders(&self) -> Result<Vec<RootFolder>> {
        self.get_json("api/v3/rootfolder").await
    }

    /// Fetch server status (version etc.).
    pub async fn system_status(&self) -> Result<SystemStatus> {
        self.get_json("api/v3/system/status").await
    }
}

fn is_already_added(body: &str) -> bool {
    ALREADY_ADDED_MARKERS.iter().any(|m| body.contains(m))
}
