//! Routine entry guard.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{AnalysisError, Result};

/// Run a routine, turning a panic into `AnalysisError::Internal`.
///
/// Internal failures, caught or returned, are logged at error level with
/// the routine name.
pub fn guarded<T>(routine: &str, body: impl FnOnce() -> Result<T>) -> Result<T> {
    let outcome = catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(AnalysisError::Internal(message))
    });

    match &outcome {
        Err(AnalysisError::Internal(message)) => {
            tracing::error!(routine, error = %message, "routine failed");
        }
        Err(e) => tracing::debug!(routine, error = %e, "routine rejected input"),
        Ok(_) => {}
    }
    outcome
}
