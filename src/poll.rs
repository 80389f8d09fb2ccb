//! Poll configuration and status classification.

use crate::error::{Error, Result};
use crate::types::{JobStatus, StatusResponse};
use serde_json::Value;
use std::time::Duration;

/// Default wait before each status query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of status queries before giving up.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 300;

/// How often and how long to poll a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Sleep before every status query.
    pub interval: Duration,
    /// Maximum number of status queries.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// What one status response means for the poll loop.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PollOutcome {
    Done(Value),
    Continue,
}

/// Classify a status response.
///
/// Terminal failures come back as errors. Unrecognised statuses keep the
/// loop going, same as `processing` and `pending`.
pub(crate) fn classify(response: StatusResponse) -> Result<PollOutcome> {
    match response.status {
        JobStatus::Completed if response.success => match response.data {
            Some(data) if !data.is_null() => Ok(PollOutcome::Done(data)),
            _ => Err(Error::Protocol("job completed without a data payload".into())),
        },
        JobStatus::Completed | JobStatus::Failed => Err(Error::ExtractionFailed(
            response
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Unknown error occurred during extraction".into()),
        )),
        JobStatus::Cancelled => Err(Error::ExtractionCancelled),
        JobStatus::Processing | JobStatus::Pending | JobStatus::Unknown => {
            Ok(PollOutcome::Continue)
        }
    }
}
