//! Shared fixtures for splanto integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use splanto::spotify::PlaylistService;
use splanto::{Error, PlaylistId, Result, TrackEntry};
use std::sync::Mutex;

/// Fixed "now" used across tests
pub fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 4, 20, 9, 15, 0).unwrap()
}

/// Timestamp `days` before [`reference`], keeping its time of day
pub fn days_ago(days: i64) -> String {
    (reference() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

pub fn entry(name: &str, added_at: &str) -> TrackEntry {
    TrackEntry::new(
        format!("id-{}", name),
        name,
        added_at,
        format!("spotify:track:{}", name),
    )
}

/// How the fake should fail on removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalFailure {
    None,
    Transient,
    Auth,
}

/// In-memory playlist service recording every call
pub struct FakeService {
    /// (description, id)
    pub playlists: Vec<(Option<String>, String)>,
    pub entries: Vec<TrackEntry>,
    pub removal_failure: RemovalFailure,
    pub list_calls: Mutex<usize>,
    pub removals: Mutex<Vec<(PlaylistId, Vec<String>)>>,
}

impl FakeService {
    pub fn with_entries(entries: Vec<TrackEntry>) -> Self {
        Self {
            playlists: vec![
                (None, "pl-none".to_string()),
                (Some("Road trip".to_string()), "pl-road".to_string()),
                (Some("Plan to hear".to_string()), "pl-plan".to_string()),
            ],
            entries,
            removal_failure: RemovalFailure::None,
            list_calls: Mutex::new(0),
            removals: Mutex::new(Vec::new()),
        }
    }

    pub fn removals(&self) -> Vec<(PlaylistId, Vec<String>)> {
        self.removals.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl PlaylistService for FakeService {
    async fn find_playlist_id(&self, marker: &str) -> Result<PlaylistId> {
        self.playlists
            .iter()
            .find(|(description, _)| description.as_deref() == Some(marker))
            .map(|(_, id)| PlaylistId::new(id.clone()))
            .ok_or_else(|| Error::NotFound(marker.to_string()))
    }

    async fn list_entries(&self, _playlist: &PlaylistId) -> Result<Vec<TrackEntry>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.entries.clone())
    }

    async fn remove_all(&self, playlist: &PlaylistId, uris: &[String]) -> Result<()> {
        self.removals
            .lock()
            .unwrap()
            .push((playlist.clone(), uris.to_vec()));

        match self.removal_failure {
            RemovalFailure::None => Ok(()),
            RemovalFailure::Transient => {
                Err(Error::TransientServiceError("connection reset".to_string()))
            }
            RemovalFailure::Auth => Err(Error::AuthFailure("token expired".to_string())),
        }
    }
}
