//! Deletion executor
//!
//! Gates the removal set behind a single operator confirmation and then
//! issues one `remove_all` call. An empty removal set never prompts.

use crate::error::Result;
use crate::models::PlaylistId;
use crate::spotify::PlaylistService;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Question put to the operator before anything is removed
pub const CONFIRM_PROMPT: &str = "Are you sure you want to clear your playlist of old songs? (y/n): ";

/// Source of the operator's answer
///
/// Blocking by contract; the prompt is the run's only suspension point.
pub trait ConfirmationProvider {
    /// Show `prompt` and return the raw answer
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Interactive confirmation on the terminal
pub struct StdinConfirmation;

impl ConfirmationProvider for StdinConfirmation {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "\n\n{}", prompt)?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

/// Non-interactive confirmation that always gives the same answer
#[derive(Debug, Clone)]
pub struct PresetAnswer {
    answer: String,
    asked: usize,
}

impl PresetAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            asked: 0,
        }
    }

    /// Answer "y" without asking anyone
    pub fn yes() -> Self {
        Self::new("y")
    }

    /// How many times the prompt was shown
    pub fn times_asked(&self) -> usize {
        self.asked
    }
}

impl ConfirmationProvider for PresetAnswer {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.asked += 1;
        tracing::info!(answer = %self.answer, "{}", prompt.trim_end());
        Ok(self.answer.clone())
    }
}

/// Only a case-insensitive "y" counts as yes
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// How the deletion step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Removal set was empty; nobody was asked
    NothingToRemove,
    /// Operator declined; playlist untouched
    Aborted,
    /// Removal request accepted for this many uris
    Removed { count: usize },
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::NothingToRemove => write!(f, "Nothing to remove."),
            ExecutionResult::Aborted => write!(f, "Aborted!"),
            ExecutionResult::Removed { .. } => write!(f, "Playlist has been cleared of old songs."),
        }
    }
}

/// Confirm, then remove every uri in `removal_set` from `playlist`
pub async fn execute(
    service: &dyn PlaylistService,
    playlist: &PlaylistId,
    removal_set: &[String],
    confirmation: &mut dyn ConfirmationProvider,
) -> Result<ExecutionResult> {
    if removal_set.is_empty() {
        tracing::debug!(playlist_id = %playlist, "Removal set empty, skipping confirmation");
        return Ok(ExecutionResult::NothingToRemove);
    }

    let answer = confirmation.ask(CONFIRM_PROMPT)?;
    if !is_affirmative(&answer) {
        tracing::info!(playlist_id = %playlist, "Removal declined");
        return Ok(ExecutionResult::Aborted);
    }

    service.remove_all(playlist, removal_set).await?;

    Ok(ExecutionResult::Removed {
        count: removal_set.len(),
    })
}
