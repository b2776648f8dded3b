//! Wire models for the transactions API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a transaction.
///
/// Known values are matched case-insensitively; anything else is kept verbatim in `Other`
/// so new server-side statuses still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
    Other(String),
}

impl TransactionStatus {
    /// Human-readable name; the status column shows the wire value instead
    pub fn label(&self) -> &str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
            TransactionStatus::Cancelled => "Cancelled",
            TransactionStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => TransactionStatus::Pending,
            "completed" | "complete" | "succeeded" | "success" => TransactionStatus::Completed,
            "failed" | "failure" => TransactionStatus::Failed,
            "refunded" => TransactionStatus::Refunded,
            "cancelled" | "canceled" => TransactionStatus::Cancelled,
            _ => TransactionStatus::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(raw) => raw,
            known => known.label().to_ascii_uppercase(),
        }
    }
}

/// The user owning a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Name for display, falling back to the id for users without one
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_method: String,
    pub credit_amount: f64,
    pub created_at: DateTime<Utc>,
    pub user: User,
}

/// One page of transactions as returned by `GET /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub page_count: u32,
}

impl TransactionPage {
    pub fn contains(&self, id: &str) -> bool {
        self.transactions.iter().any(|tx| tx.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAGE_JSON: &str = r#"{
        "transactions": [
            {
                "id": "tx_42",
                "amount": 125.5,
                "currency": "USD",
                "status": "COMPLETED",
                "paymentMethod": "card",
                "creditAmount": 1250,
                "createdAt": "2024-03-01T12:30:00.000Z",
                "user": { "id": "u_1", "name": "Ada Lovelace" }
            }
        ],
        "pageCount": 3
    }"#;

    // ==================== deserialization tests ====================

    #[test]
    fn test_page_deserializes_camel_case() {
        let page: TransactionPage = serde_json::from_str(PAGE_JSON).unwrap();
        assert_eq!(page.page_count, 3);
        assert_eq!(page.transactions.len(), 1);

        let tx = &page.transactions[0];
        assert_eq!(tx.id, "tx_42");
        assert_eq!(tx.amount, 125.5);
        assert_eq!(tx.payment_method, "card");
        assert_eq!(tx.credit_amount, 1250.0);
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.created_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(tx.user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_page_missing_page_count_is_rejected() {
        let result = serde_json::from_str::<TransactionPage>(r#"{"transactions": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_contains() {
        let page: TransactionPage = serde_json::from_str(PAGE_JSON).unwrap();
        assert!(page.contains("tx_42"));
        assert!(!page.contains("tx_43"));
    }

    // ==================== status tests ====================

    #[test]
    fn test_status_is_case_insensitive() {
        assert_eq!(TransactionStatus::from("pending".to_string()), TransactionStatus::Pending);
        assert_eq!(TransactionStatus::from("Canceled".to_string()), TransactionStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = TransactionStatus::from("ON_HOLD".to_string());
        assert_eq!(status, TransactionStatus::Other("ON_HOLD".into()));
        assert_eq!(status.label(), "ON_HOLD");
        assert_eq!(String::from(status), "ON_HOLD");
    }

    // ==================== user tests ====================

    #[test]
    fn test_user_without_name_displays_id() {
        let user: User = serde_json::from_str(r#"{"id": "u_9", "name": null}"#).unwrap();
        assert_eq!(user.display_name(), "u_9");
        let user: User = serde_json::from_str(r#"{"id": "u_9"}"#).unwrap();
        assert_eq!(user.display_name(), "u_9");
    }
}
