//! Operator-facing summary of a classification

use super::Classification;
use std::fmt;

const RULE: &str = "_____________________________________";

/// Counts plus the fresh entries still waiting to be heard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub stale_count: usize,
    pub fresh_count: usize,
    /// Display names of fresh entries, in playlist order
    pub fresh_names: Vec<String>,
}

/// Build the report for a classification
pub fn summarize(classification: &Classification) -> Report {
    Report {
        stale_count: classification.stale.len(),
        fresh_count: classification.fresh.len(),
        fresh_names: classification
            .fresh
            .iter()
            .map(|entry| entry.name.clone())
            .collect(),
    }
}

impl Report {
    /// e.g. "Found 1 song older than a week"
    pub fn stale_line(&self) -> String {
        if self.stale_count == 1 {
            format!("Found {} song older than a week", self.stale_count)
        } else {
            format!("Found {} songs older than a week", self.stale_count)
        }
    }

    /// e.g. "2 songs are still fresh"
    pub fn fresh_line(&self) -> String {
        if self.fresh_count == 1 {
            format!("{} song is still fresh", self.fresh_count)
        } else {
            format!("{} songs are still fresh", self.fresh_count)
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stale_line())?;
        writeln!(f, "{}", self.fresh_line())?;

        if self.fresh_names.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "You got some songs left to listen to: ")?;
        writeln!(f)?;
        for name in &self.fresh_names {
            writeln!(f, "- {}", name)?;
        }
        writeln!(f, "{}", RULE)
    }
}
