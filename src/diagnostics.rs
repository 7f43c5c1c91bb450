//! Diagnostic probe against the jobs service.
//!
//! Deliberately provokes a scheduler-creation failure and reports the
//! resulting status for inspection. The status is caught only to report it,
//! never to recover; transport errors still propagate.

use crate::client::JobsClient;
use crate::error::{Result, StageError};

/// The status a failed probe produced.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub code: tonic::Code,
    pub message: String,
}

/// Attempt to create (and immediately close) a scheduler for `scheme`.
///
/// Returns `Ok(None)` when the scheduler could be created, or
/// `Ok(Some(report))` with the service's status when it could not, e.g. an
/// unknown scheme or cancelled authentication.
pub async fn probe_scheduler(
    jobs: &mut JobsClient,
    scheme: &str,
    location: &str,
) -> Result<Option<ProbeReport>> {
    match jobs.new_scheduler(scheme, location, None).await {
        Ok(scheduler) => {
            jobs.close_scheduler(scheduler).await?;
            tracing::info!(scheme, location, "Scheduler probe succeeded");
            Ok(None)
        }
        Err(StageError::Rpc(status)) => {
            tracing::warn!(
                scheme,
                location,
                code = ?status.code(),
                message = status.message(),
                "Scheduler probe failed"
            );
            Ok(Some(ProbeReport {
                code: status.code(),
                message: status.message().to_string(),
            }))
        }
        Err(other) => Err(other),
    }
}
