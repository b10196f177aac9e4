//! # splanto
//!
//! Keeps a "plan to hear" playlist short: lists its entries, splits them
//! into stale and fresh by the week they were added, reports the split, and
//! removes the stale ones once the operator confirms.
//!
//! The pipeline runs strictly in sequence:
//! session → playlist id → entries → [`curation::classify`] →
//! [`curation::summarize`] → [`deletion::execute`].

pub mod curation;
pub mod deletion;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod spotify;

pub use error::{Error, Result};
pub use models::{PlaylistId, TrackEntry};
