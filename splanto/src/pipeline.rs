//! One curation run, start to finish
//!
//! resolve → list → classify → report → confirm and remove. Each step
//! finishes before the next one starts, and any error ends the run before the
//! playlist is touched.

use crate::curation::{self, Report};
use crate::deletion::{self, ConfirmationProvider, ExecutionResult};
use crate::error::Result;
use crate::models::PlaylistId;
use crate::spotify::PlaylistService;
use chrono::{DateTime, Utc};
use std::io::Write;

/// Description of the playlist curated when none is given
pub const DEFAULT_MARKER: &str = "Plan to hear";

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub playlist: PlaylistId,
    pub report: Report,
    pub execution: ExecutionResult,
}

/// Curate the playlist described by `marker` as of `reference`
///
/// The report and the final outcome message are written to `out`.
pub async fn run(
    service: &dyn PlaylistService,
    marker: &str,
    reference: DateTime<Utc>,
    confirmation: &mut dyn ConfirmationProvider,
    out: &mut dyn Write,
) -> Result<RunOutcome> {
    tracing::info!(marker = %marker, "Getting playlist ID");
    let playlist = service.find_playlist_id(marker).await?;

    let entries = service.list_entries(&playlist).await?;

    let classification = curation::classify(&entries, reference, curation::retention_window())?;
    let report = curation::summarize(&classification);

    writeln!(out)?;
    write!(out, "{}", report)?;
    out.flush()?;

    let removal_set = classification.removal_set();
    let execution = deletion::execute(service, &playlist, &removal_set, confirmation).await?;

    writeln!(out, "{}", execution)?;

    tracing::info!(
        playlist_id = %playlist,
        stale = report.stale_count,
        fresh = report.fresh_count,
        outcome = ?execution,
        "Run complete"
    );

    Ok(RunOutcome {
        playlist,
        report,
        execution,
    })
}
