//! Single-row delete confirmation flow
//!
//! `Idle -> PendingConfirm(id) -> Deleting(id) -> Idle`. Only one delete can be pending at
//! a time; requests made while not idle are ignored. Once the request settles the flow
//! returns to `Idle` whatever the outcome.

use crate::api::TransactionsApi;
use crate::async_job::{spawn_job, AsyncJob};
use crate::error::DeleteError;
use std::mem;

pub const DELETE_SUCCESS_MESSAGE: &str = "Transaction deleted successfully";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete transaction. Please try again.";

/// Observable state of the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    PendingConfirm { id: String },
    Deleting { id: String },
}

/// Settled delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub id: String,
    pub result: Result<(), DeleteError>,
}

enum Phase {
    Idle,
    PendingConfirm(String),
    Deleting {
        id: String,
        job: AsyncJob<(), DeleteError>,
    },
}

pub struct DeleteFlow {
    phase: Phase,
}

impl Default for DeleteFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn state(&self) -> DeleteState {
        match &self.phase {
            Phase::Idle => DeleteState::Idle,
            Phase::PendingConfirm(id) => DeleteState::PendingConfirm { id: id.clone() },
            Phase::Deleting { id, .. } => DeleteState::Deleting { id: id.clone() },
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Id of the transaction awaiting confirmation or deletion
    pub fn intent(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::PendingConfirm(id) | Phase::Deleting { id, .. } => Some(id),
        }
    }

    /// Select `id` for deletion and ask for confirmation
    pub fn request(&mut self, id: &str) -> bool {
        if !self.is_idle() {
            tracing::warn!("Ignoring delete request for {} while another delete is pending", id);
            return false;
        }
        self.phase = Phase::PendingConfirm(id.to_string());
        true
    }

    /// Cancel or dismiss the confirmation. No effect once the request is in flight.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, Phase::PendingConfirm(_)) {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Confirm the pending delete and send the request
    pub fn confirm(&mut self, api: &dyn TransactionsApi) -> bool {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::PendingConfirm(id) => {
                tracing::info!("Deleting transaction {}", id);
                let job = spawn_job(api.delete_transaction(&id));
                self.phase = Phase::Deleting { id, job };
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Collect the delete result once it settles. The flow is back to `Idle` afterwards.
    pub fn poll(&mut self) -> Option<DeleteOutcome> {
        let result = match &mut self.phase {
            Phase::Deleting { job, .. } => job.poll()?,
            _ => return None,
        };
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Deleting { id, .. } => {
                match &result {
                    Ok(()) => tracing::info!("Deleted transaction {}", id),
                    Err(e) => tracing::warn!("Failed to delete transaction {}: {}", id, e),
                }
                Some(DeleteOutcome { id, result })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{wait_until, FakeApi};

    fn settle(flow: &mut DeleteFlow) -> DeleteOutcome {
        let mut outcome = None;
        wait_until(|| {
            outcome = flow.poll();
            outcome.is_some()
        });
        outcome.unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let flow = DeleteFlow::new();
        assert_eq!(flow.state(), DeleteState::Idle);
        assert_eq!(flow.intent(), None);
    }

    #[test]
    fn test_request_then_cancel_sends_nothing() {
        let api = FakeApi::new(1);
        let mut flow = DeleteFlow::new();

        assert!(flow.request("tx_42"));
        assert_eq!(flow.state(), DeleteState::PendingConfirm { id: "tx_42".into() });
        assert_eq!(flow.intent(), Some("tx_42"));

        assert!(flow.cancel());
        assert_eq!(flow.state(), DeleteState::Idle);
        assert!(flow.poll().is_none());
        assert!(api.delete_calls().is_empty());
    }

    #[test]
    fn test_confirm_success_returns_to_idle() {
        let api = FakeApi::new(1);
        let mut flow = DeleteFlow::new();
        flow.request("tx_42");

        assert!(flow.confirm(&api));
        assert_eq!(flow.state(), DeleteState::Deleting { id: "tx_42".into() });
        assert_eq!(api.delete_calls(), vec!["tx_42".to_string()]);

        let outcome = settle(&mut flow);
        assert_eq!(outcome, DeleteOutcome { id: "tx_42".into(), result: Ok(()) });
        assert_eq!(flow.state(), DeleteState::Idle);
        assert_eq!(flow.intent(), None);
    }

    #[test]
    fn test_confirm_failure_returns_to_idle() {
        let api = FakeApi::new(1);
        api.fail_deletes(DeleteError::Status(500));
        let mut flow = DeleteFlow::new();
        flow.request("tx_42");
        flow.confirm(&api);

        let outcome = settle(&mut flow);
        assert_eq!(outcome.result, Err(DeleteError::Status(500)));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_second_request_ignored_while_pending_or_deleting() {
        let api = FakeApi::new(1);
        let mut flow = DeleteFlow::new();
        flow.request("tx_1");
        assert!(!flow.request("tx_2"));
        assert_eq!(flow.intent(), Some("tx_1"));

        flow.confirm(&api);
        assert!(!flow.request("tx_2"));
        assert!(!flow.cancel());
        assert_eq!(flow.intent(), Some("tx_1"));
        settle(&mut flow);
        assert_eq!(api.delete_calls(), vec!["tx_1".to_string()]);
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let api = FakeApi::new(1);
        let mut flow = DeleteFlow::new();
        assert!(!flow.confirm(&api));
        assert!(flow.is_idle());
        assert!(api.delete_calls().is_empty());
    }
}
