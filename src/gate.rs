//! Interval gating of candidates against their execution records.
//!
//! A candidate is due when it has never run, when the run-now override is
//! set, or when its interval has elapsed since the last recorded run.
//! Every due candidate is stamped in the store before it is passed on,
//! whether or not searching later succeeds.

use chrono::{DateTime, Utc};
use discover_search::Candidate;
use tracing::{debug, info};

use crate::error::Result;
use crate::interval::{parse_interval, DEFAULT_INTERVAL};
use crate::store::ExecutionStore;

/// Keep the candidates that are due now and record their run.
///
/// `interval` defaults to [`DEFAULT_INTERVAL`]. Output keeps input order.
///
/// # Errors
///
/// Returns a config error for a malformed interval, or a store error if a
/// record cannot be read or written.
pub fn filter(
    candidates: Vec<Candidate>,
    interval: Option<&str>,
    run_now: bool,
    store: &mut dyn ExecutionStore,
) -> Result<Vec<Candidate>> {
    filter_at(candidates, interval, run_now, store, Utc::now())
}

/// [`filter`] evaluated at a fixed instant.
pub fn filter_at(
    candidates: Vec<Candidate>,
    interval: Option<&str>,
    run_now: bool,
    store: &mut dyn ExecutionStore,
    now: DateTime<Utc>,
) -> Result<Vec<Candidate>> {
    let interval_text = interval.unwrap_or(DEFAULT_INTERVAL);
    let interval = parse_interval(interval_text)?;

    let mut due = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let last_run = store.get(&candidate.title)?;
        match last_run {
            None => info!(
                title = %candidate.title,
                "no previous run recorded, running now"
            ),
            Some(_) if run_now => info!(
                title = %candidate.title,
                "ignoring interval because of run-now override"
            ),
            Some(last) => {
                // An interval past the representable range is never met.
                let next_due = last.checked_add_signed(interval);
                debug!(title = %candidate.title, %last, ?next_due, "checking interval");
                if next_due.is_none_or(|due| now < due) {
                    info!(
                        title = %candidate.title,
                        interval = interval_text,
                        "interval not met, use the run-now override to force"
                    );
                    continue;
                }
            }
        }

        debug!(title = %candidate.title, "interval passed");
        // Never move a record backwards, even if the clock did.
        let stamp = last_run.map_or(now, |last| last.max(now));
        store.set(&candidate.title, stamp)?;
        due.push(candidate);
    }

    Ok(due)
}
