//! Release filtering: drop candidates that are not out yet.
//!
//! The orchestrator only passes candidates through a [`ReleaseChecker`];
//! what "released" means is up to the checker.

use chrono::{DateTime, NaiveDate, Utc};
use discover_search::Candidate;
use serde_json::Value;
use tracing::debug;

use crate::config::DiscoverConfig;
use crate::context::TaskContext;
use crate::error::Result;

/// Field consulted by [`ReleaseDateChecker`].
pub const RELEASE_DATE_FIELD: &str = "release_date";

/// Decides which candidates have been released.
pub trait ReleaseChecker: Send + Sync {
    /// Return the released subset of `candidates`, keeping their order.
    fn filter_released(
        &self,
        ctx: &TaskContext,
        candidates: Vec<Candidate>,
        config: &DiscoverConfig,
    ) -> Result<Vec<Candidate>>;
}

/// Run `checker` over `candidates`.
pub fn filter_released(
    checker: &dyn ReleaseChecker,
    ctx: &TaskContext,
    candidates: Vec<Candidate>,
    config: &DiscoverConfig,
) -> Result<Vec<Candidate>> {
    let before = candidates.len();
    let released = checker.filter_released(ctx, candidates, config)?;
    debug!(before, after = released.len(), "release check done");
    Ok(released)
}

/// Treats everything as released.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReleased;

impl ReleaseChecker for AlwaysReleased {
    fn filter_released(
        &self,
        _ctx: &TaskContext,
        candidates: Vec<Candidate>,
        _config: &DiscoverConfig,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates)
    }
}

/// Drops candidates whose `release_date` field lies in the future.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
/// Candidates without a readable date are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseDateChecker;

impl ReleaseDateChecker {
    /// Keep the candidates released at or before `now`.
    pub fn filter_at(&self, candidates: Vec<Candidate>, now: DateTime<Utc>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| match release_date(candidate) {
                Some(date) if date > now => {
                    debug!(title = %candidate.title, %date, "not released yet");
                    false
                }
                _ => true,
            })
            .collect()
    }
}

impl ReleaseChecker for ReleaseDateChecker {
    fn filter_released(
        &self,
        _ctx: &TaskContext,
        candidates: Vec<Candidate>,
        _config: &DiscoverConfig,
    ) -> Result<Vec<Candidate>> {
        Ok(self.filter_at(candidates, Utc::now()))
    }
}

fn release_date(candidate: &Candidate) -> Option<DateTime<Utc>> {
    let raw = candidate.fields.get(RELEASE_DATE_FIELD).and_then(Value::as_str)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
