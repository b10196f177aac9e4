//! Playlist data as the curation run sees it

use std::fmt;

/// Opaque playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(pub String);

impl PlaylistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One track occurrence in a playlist
///
/// The same track may appear more than once, each with its own `added_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    /// Track id; absent for local files
    pub id: Option<String>,
    /// Display name shown in the report
    pub name: String,
    /// Raw addition timestamp as delivered by the service
    pub added_at: String,
    /// Resource locator, used as the removal key
    pub uri: String,
}

impl TrackEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        added_at: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            added_at: added_at.into(),
            uri: uri.into(),
        }
    }
}
