use crate::domain::auth::models::AuthOperation;
use crate::domain::auth::models::OutcomeStatus;
use crate::domain::auth::ports::OutcomeRecorder;

/// Reports auth outcomes as structured log events.
///
/// Events carry `operation` and `status` fields under this module's target,
/// so a log pipeline can count them without a metrics registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOutcomeRecorder;

impl TracingOutcomeRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl OutcomeRecorder for TracingOutcomeRecorder {
    fn record_outcome(&self, operation: AuthOperation, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Success => tracing::info!(
                operation = operation.as_str(),
                status = status.as_str(),
                "Auth operation completed"
            ),
            OutcomeStatus::Failed | OutcomeStatus::TimedOut => tracing::warn!(
                operation = operation.as_str(),
                status = status.as_str(),
                "Auth operation completed"
            ),
        }
    }
}
