//! Paged data source for the transactions table
//!
//! [`PagedDataSource`] owns the pagination configuration and keeps exactly one current
//! page. Every configuration change issues a fetch; fetches are tagged with a sequence
//! number and only the response to the most recently issued fetch is applied, so a
//! slow response for a page the user already left can never overwrite a newer one.
//!
//! While a fetch is in flight the previously received page stays available; it is only
//! cleared when a fetch fails.

use crate::api::{PageQuery, TransactionsApi};
use crate::async_job::{spawn_job, AsyncJob};
use crate::error::FetchError;
use crate::models::TransactionPage;
use std::sync::Arc;

/// Fetch state of the data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Error(FetchError),
}

struct InFlightFetch {
    seq: u64,
    query: PageQuery,
    job: AsyncJob<TransactionPage, FetchError>,
}

pub struct PagedDataSource {
    api: Arc<dyn TransactionsApi>,
    query: PageQuery,
    page: Option<TransactionPage>,
    status: FetchStatus,
    /// Sequence number of the most recently issued fetch
    latest_seq: u64,
    in_flight: Vec<InFlightFetch>,
}

impl PagedDataSource {
    /// Create the data source and immediately fetch `query`.
    ///
    /// A zero page size is bumped to 1.
    pub fn new(api: Arc<dyn TransactionsApi>, query: PageQuery) -> Self {
        let query = if query.page_size == 0 {
            tracing::warn!("Page size 0 is not valid, using 1");
            PageQuery::new(query.page_index, 1)
        } else {
            query
        };
        let mut source = Self {
            api,
            query,
            page: None,
            status: FetchStatus::Idle,
            latest_seq: 0,
            in_flight: Vec::new(),
        };
        source.issue_fetch();
        source
    }

    pub fn query(&self) -> PageQuery {
        self.query
    }

    /// The current page, if one has been received and not invalidated by an error
    pub fn page(&self) -> Option<&TransactionPage> {
        self.page.as_ref()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            FetchStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Total page count reported by the server, `None` while unknown
    pub fn page_count(&self) -> Option<u32> {
        self.page.as_ref().map(|p| p.page_count)
    }

    /// Number of fetches issued but not yet resolved, stale ones included
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }

    pub fn can_previous_page(&self) -> bool {
        self.query.page_index > 0
    }

    /// An unknown page count counts as "has more"
    pub fn can_next_page(&self) -> bool {
        match self.page_count() {
            Some(count) => self.query.page_index.saturating_add(1) < count,
            None => true,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.set_page_index(self.query.page_index - 1)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        match self.query.page_index.checked_add(1) {
            Some(next) => self.set_page_index(next),
            None => false,
        }
    }

    /// Move to `page_index`. Returns false (and fetches nothing) if it is already current.
    pub fn set_page_index(&mut self, page_index: u32) -> bool {
        if page_index == self.query.page_index {
            return false;
        }
        self.query.page_index = page_index;
        self.issue_fetch();
        true
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 {
            tracing::warn!("Ignoring page size 0");
            return false;
        }
        if page_size == self.query.page_size {
            return false;
        }
        self.query = PageQuery::new(0, page_size);
        self.issue_fetch();
        true
    }

    /// Fetch the current configuration again without changing it
    pub fn refetch(&mut self) {
        self.issue_fetch();
    }

    fn issue_fetch(&mut self) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        let query = self.query;
        tracing::debug!(
            seq,
            page = query.server_page(),
            limit = query.page_size,
            "Fetching transactions"
        );
        let job = spawn_job(self.api.list_transactions(query));
        self.in_flight.push(InFlightFetch { seq, query, job });
        self.status = FetchStatus::Loading;
    }

    /// Collect finished fetches. Returns true if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut finished = Vec::new();
        self.in_flight.retain_mut(|fetch| match fetch.job.poll() {
            Some(result) => {
                finished.push((fetch.seq, fetch.query, result));
                false
            }
            None => true,
        });

        let mut changed = false;
        for (seq, query, result) in finished {
            changed |= self.apply(seq, query, result);
        }
        changed
    }

    /// Apply the result of fetch `seq`, dropping it if a newer fetch has been issued since
    pub(crate) fn apply(
        &mut self,
        seq: u64,
        query: PageQuery,
        result: Result<TransactionPage, FetchError>,
    ) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                seq,
                latest = self.latest_seq,
                page = query.server_page(),
                "Discarding stale transactions response"
            );
            return false;
        }

        match result {
            Ok(page) => {
                tracing::info!(
                    "Loaded page {} of {} ({} transactions)",
                    query.server_page(),
                    page.page_count,
                    page.transactions.len()
                );
                let page_count = page.page_count;
                self.page = Some(page);
                self.status = FetchStatus::Idle;
                self.clamp_page_index(page_count);
            }
            Err(e) => {
                tracing::warn!("Failed to load transactions page {}: {}", query.server_page(), e);
                self.page = None;
                self.status = FetchStatus::Error(e);
            }
        }
        true
    }

    /// Step back when the server reports fewer pages than the current index needs,
    /// e.g. after the last row of the last page was deleted.
    fn clamp_page_index(&mut self, page_count: u32) {
        let last_index = page_count.saturating_sub(1);
        if self.query.page_index > last_index {
            tracing::info!(
                "Page {} no longer exists ({} pages), moving to page {}",
                self.query.server_page(),
                page_count,
                last_index + 1
            );
            self.set_page_index(last_index);
        }
    }

    #[cfg(test)]
    pub(crate) fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
