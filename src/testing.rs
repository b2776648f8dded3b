//! Test doubles shared by the unit tests

use crate::api::{ApiFuture, PageQuery, TransactionsApi};
use crate::error::{DeleteError, FetchError};
use crate::models::{Transaction, TransactionPage, TransactionStatus, User};
use crate::notifier::Notifier;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

pub(crate) fn transaction(id: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: 49.99,
        currency: "USD".to_string(),
        status: TransactionStatus::Completed,
        payment_method: "card".to_string(),
        credit_amount: 500.0,
        created_at: Utc.with_ymd_and_hms(2024, 5, 17, 9, 15, 0).unwrap(),
        user: User {
            id: "u_1".to_string(),
            name: Some("Ada Lovelace".to_string()),
        },
    }
}

/// In-memory API. Rows are numbered globally (`tx_{index * size + n}`) so every page
/// has distinct ids. Each list call is recorded synchronously when it is issued.
pub(crate) struct FakeApi {
    page_count: u32,
    list_calls: Mutex<Vec<PageQuery>>,
    delete_calls: Mutex<Vec<String>>,
    list_failure: Mutex<Option<FetchError>>,
    delete_failure: Mutex<Option<DeleteError>>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeApi {
    pub(crate) fn new(page_count: u32) -> Self {
        Self {
            page_count,
            list_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            list_failure: Mutex::new(None),
            delete_failure: Mutex::new(None),
            gates: Mutex::new(VecDeque::new()),
        }
    }

    /// Hold the next list call until the returned sender fires
    pub(crate) fn push_gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn fail_lists(&self, error: Option<FetchError>) {
        *self.list_failure.lock().unwrap() = error;
    }

    pub(crate) fn fail_deletes(&self, error: DeleteError) {
        *self.delete_failure.lock().unwrap() = Some(error);
    }

    pub(crate) fn list_calls(&self) -> Vec<PageQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    fn page_for(&self, query: PageQuery) -> TransactionPage {
        let first = u64::from(query.page_index) * u64::from(query.page_size);
        let rows = if query.page_index < self.page_count {
            u64::from(query.page_size)
        } else {
            0
        };
        TransactionPage {
            transactions: (first..first + rows)
                .map(|n| transaction(&format!("tx_{}", n)))
                .collect(),
            page_count: self.page_count,
        }
    }
}

impl TransactionsApi for FakeApi {
    fn list_transactions(&self, query: PageQuery) -> ApiFuture<TransactionPage, FetchError> {
        self.list_calls.lock().unwrap().push(query);
        let result = match self.list_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.page_for(query)),
        };
        let gate = self.gates.lock().unwrap().pop_front();
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        })
    }

    fn delete_transaction(&self, id: &str) -> ApiFuture<(), DeleteError> {
        self.delete_calls.lock().unwrap().push(id.to_string());
        let result = match self.delete_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        };
        Box::pin(async move { result })
    }
}

/// Notifier that records every message
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) successes: Vec<String>,
    pub(crate) failures: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify_success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn notify_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

/// Spin on `condition` until it holds, panicking after a few seconds
pub(crate) fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(Duration::from_millis(5));
    }
}
