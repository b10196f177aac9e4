//! HTTP implementation of [`PlaylistService`]
//!
//! Every call is attempted once. Pagination follows the `next` links the API
//! returns until it runs out.

use super::{PlaylistService, Session};
use crate::error::{Error, Result};
use crate::models::{PlaylistId, TrackEntry};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = concat!("splanto/", env!("CARGO_PKG_VERSION"));
const PLAYLIST_PAGE_LIMIT: u32 = 50;
const ITEM_PAGE_LIMIT: u32 = 100;
/// The API rejects removal bodies with more tracks than this
const MAX_URIS_PER_REMOVAL: usize = 100;

#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimplePlaylist {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(default)]
    added_at: Option<String>,
    #[serde(default)]
    track: Option<PlayableTrack>,
}

#[derive(Debug, Deserialize)]
struct PlayableTrack {
    #[serde(default)]
    id: Option<String>,
    name: String,
    uri: String,
}

#[derive(Debug, Serialize)]
struct RemovalBody<'a> {
    tracks: Vec<UriRef<'a>>,
}

#[derive(Debug, Serialize)]
struct UriRef<'a> {
    uri: &'a str,
}

/// Spotify Web API client bound to one session
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(session: &Session) -> Result<Self> {
        Self::with_base_url(session, SPOTIFY_BASE_URL)
    }

    /// Client against a non-default API root
    pub fn with_base_url(session: &Session, base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: session.access_token.clone(),
        })
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<Page<T>> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = check_status(response, resource).await?;

        response
            .json()
            .await
            .map_err(|e| Error::TransientServiceError(format!("unexpected response for {}: {}", resource, e)))
    }
}

/// Map non-success statuses onto the error taxonomy
async fn check_status(response: reqwest::Response, resource: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), resource = %resource, body = %body, "Spotify API error");

    match status.as_u16() {
        401 | 403 => Err(Error::AuthFailure(format!(
            "access to {} refused (HTTP {})",
            resource,
            status.as_u16()
        ))),
        404 => Err(Error::NotFound(resource.to_string())),
        code => Err(Error::TransientServiceError(format!(
            "HTTP {} from {}: {}",
            code, resource, body
        ))),
    }
}

#[async_trait]
impl PlaylistService for SpotifyClient {
    async fn find_playlist_id(&self, marker: &str) -> Result<PlaylistId> {
        let mut next = Some(format!("{}/me/playlists?limit={}", self.base_url, PLAYLIST_PAGE_LIMIT));

        while let Some(url) = next {
            let page: Page<SimplePlaylist> = self.get_page(&url, "current user's playlists").await?;

            if let Some(playlist) = page
                .items
                .into_iter()
                .find(|p| p.description.as_deref() == Some(marker))
            {
                tracing::info!(
                    playlist_id = %playlist.id,
                    name = %playlist.name.as_deref().unwrap_or(""),
                    "Found playlist"
                );
                return Ok(PlaylistId(playlist.id));
            }

            next = page.next;
        }

        Err(Error::NotFound(marker.to_string()))
    }

    async fn list_entries(&self, playlist: &PlaylistId) -> Result<Vec<TrackEntry>> {
        let resource = format!("playlist {}", playlist);
        let mut next = Some(format!(
            "{}/playlists/{}/tracks?limit={}",
            self.base_url, playlist, ITEM_PAGE_LIMIT
        ));
        let mut entries = Vec::new();

        while let Some(url) = next {
            let page: Page<PlaylistItem> = self.get_page(&url, &resource).await?;

            for item in page.items {
                match item.track {
                    Some(track) => entries.push(TrackEntry {
                        id: track.id,
                        name: track.name,
                        added_at: item.added_at.unwrap_or_default(),
                        uri: track.uri,
                    }),
                    None => {
                        tracing::warn!(
                            playlist_id = %playlist,
                            added_at = ?item.added_at,
                            "Skipping unavailable playlist item"
                        );
                    }
                }
            }

            next = page.next;
        }

        tracing::info!(playlist_id = %playlist, count = entries.len(), "Listed playlist entries");
        Ok(entries)
    }

    async fn remove_all(&self, playlist: &PlaylistId, uris: &[String]) -> Result<()> {
        let resource = format!("playlist {}", playlist);
        let url = format!("{}/playlists/{}/tracks", self.base_url, playlist);

        let mut removed = 0;
        for chunk in uris.chunks(MAX_URIS_PER_REMOVAL) {
            let body = RemovalBody {
                tracks: chunk.iter().map(|uri| UriRef { uri: uri.as_str() }).collect(),
            };

            tracing::debug!(playlist_id = %playlist, count = chunk.len(), "DELETE playlist tracks");

            let sent = self
                .http_client
                .delete(&url)
                .bearer_auth(&self.access_token)
                .json(&body)
                .send()
                .await;

            let outcome = match sent {
                Ok(response) => check_status(response, &resource).await.map(|_| ()),
                Err(e) => Err(Error::from(e)),
            };
            outcome.map_err(|e| partial_failure(e, removed, uris.len()))?;

            removed += chunk.len();
        }

        tracing::info!(playlist_id = %playlist, count = uris.len(), "Removed playlist entries");
        Ok(())
    }
}

/// Note how far a chunked removal got before it failed
fn partial_failure(error: Error, removed: usize, total: usize) -> Error {
    if removed == 0 {
        return error;
    }

    tracing::warn!(removed, total, "Removal stopped part way");
    let progress = format!("{} of {} uris were already removed", removed, total);
    match error {
        Error::TransientServiceError(msg) => Error::TransientServiceError(format!("{}; {}", msg, progress)),
        Error::AuthFailure(msg) => Error::AuthFailure(format!("{}; {}", msg, progress)),
        other => other,
    }
}
