//! Client side of the transactions API
//!
//! [`TransactionsApi`] is the seam between the widget and the network. The widget only
//! ever sees futures returned by this trait; [`HttpTransactionsApi`] backs it with reqwest.

use crate::config::Config;
use crate::error::{ConfigError, DeleteError, FetchError};
use crate::models::TransactionPage;
use reqwest::Client as HttpClient;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Boxed future returned by [`TransactionsApi`] calls
pub type ApiFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Pagination configuration: zero-based page index and rows per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageQuery {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// One-based page number as the server expects it
    pub fn server_page(&self) -> u32 {
        self.page_index.saturating_add(1)
    }
}

/// Remote operations the transactions table needs.
///
/// Calls return a `'static` future so the request can be started on the GUI thread and
/// awaited on a worker thread.
pub trait TransactionsApi: Send + Sync {
    /// `GET /transactions?page={page_index + 1}&limit={page_size}`
    fn list_transactions(&self, query: PageQuery) -> ApiFuture<TransactionPage, FetchError>;

    /// `DELETE /transactions/{id}`
    fn delete_transaction(&self, id: &str) -> ApiFuture<(), DeleteError>;
}

/// reqwest implementation of [`TransactionsApi`]
#[derive(Clone)]
pub struct HttpTransactionsApi {
    http_client: HttpClient,
    base_url: Url,
}

impl HttpTransactionsApi {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Base URL with `segments` appended as path segments (each one percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL for listing one page
    pub fn transactions_url(&self, query: PageQuery) -> Url {
        let mut url = self.endpoint(&["transactions"]);
        url.query_pairs_mut()
            .append_pair("page", &query.server_page().to_string())
            .append_pair("limit", &query.page_size.to_string());
        url
    }

    /// URL addressing a single transaction
    pub fn transaction_url(&self, id: &str) -> Url {
        self.endpoint(&["transactions", id])
    }
}

/// Parse a list response body
pub fn decode_page(body: &[u8]) -> Result<TransactionPage, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
}

impl TransactionsApi for HttpTransactionsApi {
    fn list_transactions(&self, query: PageQuery) -> ApiFuture<TransactionPage, FetchError> {
        let client = self.http_client.clone();
        let url = self.transactions_url(query);
        Box::pin(async move {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!("Transactions list returned {}", status);
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            decode_page(&body)
        })
    }

    fn delete_transaction(&self, id: &str) -> ApiFuture<(), DeleteError> {
        let client = self.http_client.clone();
        let url = self.transaction_url(id);
        Box::pin(async move {
            let response = client
                .delete(url)
                .send()
                .await
                .map_err(|e| DeleteError::Network(e.to_string()))?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                tracing::warn!("Transaction delete returned {}", status);
                Err(DeleteError::Status(status.as_u16()))
            }
        })
    }
}
