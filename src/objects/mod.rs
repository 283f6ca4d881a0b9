//! Entities built from API payloads.
//!
//! Every entity may carry a [`VoatHandle`]. Relations (a submission's
//! comments, a subverse's posts, a comment's parent and children) are only
//! fetched through that handle the first time they are asked for, and the
//! answer is kept for every later access.

use crate::client::{VoatApi, VoatError};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub mod comment;
pub mod submission;
pub mod subverse;

pub use comment::Comment;
pub use submission::Submission;
pub use subverse::Subverse;

/// Shared access handle attached to entities for lazy resolution.
pub type VoatHandle = Arc<dyn VoatApi>;

/// Construction of an entity from an arbitrary JSON payload.
///
/// Missing or `null` keys fall back to the entity's defaults and keys the
/// entity does not model are kept in its `extra` map.
pub trait VoatObject: Sized {
    /// Payload shape the entity is decoded from.
    type Raw: DeserializeOwned + Default;

    fn from_raw(raw: Self::Raw, voat: Option<VoatHandle>) -> Self;

    fn from_value(value: serde_json::Value, voat: Option<VoatHandle>) -> Result<Self, VoatError> {
        let raw = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw, voat))
    }

    fn from_json_str(json: &str, voat: Option<VoatHandle>) -> Result<Self, VoatError> {
        let raw = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw, voat))
    }

    /// The handle relations are resolved through, if any.
    fn voat(&self) -> Option<&VoatHandle>;

    fn attach(&mut self, voat: VoatHandle);
}

/// Parse an API timestamp such as `2016-03-19T12:34:56.123` as UTC.
pub(crate) fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let trimmed = raw.trim_end_matches('Z');
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            debug!("Ignoring unparseable date {:?}: {}", raw, e);
            None
        }
    }
}

/// Format an optional timestamp for display in the given zone.
pub fn format_date(date: Option<DateTime<Utc>>, tz: Tz) -> String {
    match date {
        Some(date) => date
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        None => "unknown date".to_string(),
    }
}
