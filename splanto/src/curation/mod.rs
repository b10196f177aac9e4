//! Curation engine
//!
//! Splits playlist entries into stale and fresh by the calendar date they were
//! added. Classification is pure: same entries and reference instant, same
//! result.

mod report;

pub use report::{summarize, Report};

use crate::error::{Error, Result};
use crate::models::TrackEntry;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use splanto_common::time::calendar_date;

/// Age in days past which an entry counts as stale
pub const RETENTION_DAYS: i64 = 7;

/// The fixed retention window (one week)
pub fn retention_window() -> Duration {
    Duration::days(RETENTION_DAYS)
}

/// Entries split by age, each side in playlist order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub stale: Vec<TrackEntry>,
    pub fresh: Vec<TrackEntry>,
}

impl Classification {
    /// Removal keys of the stale entries, in order, duplicates kept
    pub fn removal_set(&self) -> Vec<String> {
        self.stale.iter().map(|entry| entry.uri.clone()).collect()
    }

    pub fn total(&self) -> usize {
        self.stale.len() + self.fresh.len()
    }
}

/// First calendar date that still counts as fresh
pub fn cutoff_date(reference: DateTime<Utc>, window: Duration) -> NaiveDate {
    (reference - window).date_naive()
}

/// Classify entries against `reference - window`
///
/// An entry is stale when its added date is strictly before the cutoff date;
/// an entry added on the cutoff date is fresh. Any entry whose timestamp
/// cannot be read fails the whole call.
pub fn classify(
    entries: &[TrackEntry],
    reference: DateTime<Utc>,
    window: Duration,
) -> Result<Classification> {
    let cutoff = cutoff_date(reference, window);
    let mut result = Classification::default();

    for entry in entries {
        let added = calendar_date(&entry.added_at).map_err(|e| Error::MalformedEntry {
            entry: describe(entry),
            value: entry.added_at.clone(),
            reason: e.to_string(),
        })?;

        if added < cutoff {
            result.stale.push(entry.clone());
        } else {
            result.fresh.push(entry.clone());
        }
    }

    tracing::debug!(
        cutoff = %cutoff,
        stale = result.stale.len(),
        fresh = result.fresh.len(),
        "Classified playlist entries"
    );

    Ok(result)
}

fn describe(entry: &TrackEntry) -> String {
    match &entry.id {
        Some(id) => format!("\"{}\" ({})", entry.name, id),
        None => format!("\"{}\" ({})", entry.name, entry.uri),
    }
}
