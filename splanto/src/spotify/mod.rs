//! Spotify Web API collaborators
//!
//! The curation core only sees [`PlaylistService`]; [`SpotifyClient`] is the
//! HTTP implementation and [`auth`] acquires the session it runs under.

pub mod auth;
mod client;

pub use auth::{OAuthSessionProvider, Session, SessionConfig};
pub use client::SpotifyClient;

use crate::error::Result;
use crate::models::{PlaylistId, TrackEntry};
use async_trait::async_trait;

/// Playlist lookup, listing and mutation for the authenticated user
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Id of the first playlist whose description equals `marker`
    ///
    /// Matching is exact and case-sensitive. No match is
    /// [`Error::NotFound`](crate::Error::NotFound).
    async fn find_playlist_id(&self, marker: &str) -> Result<PlaylistId>;

    /// Every entry of the playlist, in playlist order
    async fn list_entries(&self, playlist: &PlaylistId) -> Result<Vec<TrackEntry>>;

    /// Remove every occurrence of each uri
    ///
    /// Uris that are not in the playlist are ignored, so repeating the call is
    /// harmless.
    async fn remove_all(&self, playlist: &PlaylistId, uris: &[String]) -> Result<()>;
}
