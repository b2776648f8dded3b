//! Column definitions for the transactions table
//!
//! The column set is fixed. Each [`ColumnDescriptor`] names the field it shows, its header
//! label and an optional formatter; columns without a formatter show the field's raw value.

use crate::models::Transaction;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

/// Time zone used for the "Created At" column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTimezone {
    Local,
    Utc,
}

/// Render-time options passed to cell formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// chrono `strftime` pattern
    pub date_format: String,
    pub timezone: DisplayTimezone,
}

impl DisplayOptions {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            timezone: DisplayTimezone::Local,
        }
    }

    /// Format `ts` with `date_format`, falling back to RFC 3339 if the pattern is invalid
    pub fn format_timestamp(&self, ts: &DateTime<Utc>) -> String {
        let mut out = String::new();
        let written = match self.timezone {
            DisplayTimezone::Local => {
                write!(out, "{}", ts.with_timezone(&Local).format(&self.date_format))
            }
            DisplayTimezone::Utc => write!(out, "{}", ts.format(&self.date_format)),
        };
        match written {
            Ok(()) => out,
            Err(_) => ts.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    UserName,
    Amount,
    Status,
    PaymentMethod,
    CreditAmount,
    CreatedAt,
    Actions,
}

impl ColumnKey {
    /// Unformatted value of this field. The actions column has none.
    pub fn raw_value(&self, tx: &Transaction) -> String {
        match self {
            ColumnKey::UserName => tx.user.display_name().to_string(),
            ColumnKey::Amount => tx.amount.to_string(),
            ColumnKey::Status => String::from(tx.status.clone()),
            ColumnKey::PaymentMethod => tx.payment_method.clone(),
            ColumnKey::CreditAmount => tx.credit_amount.to_string(),
            ColumnKey::CreatedAt => tx.created_at.to_rfc3339(),
            ColumnKey::Actions => String::new(),
        }
    }
}

pub type CellFormatter = fn(&Transaction, &DisplayOptions) -> String;

#[derive(Clone, Copy)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub header: &'static str,
    pub formatter: Option<CellFormatter>,
}

impl ColumnDescriptor {
    /// Text for this column's cell in `tx`'s row
    pub fn render_cell(&self, tx: &Transaction, options: &DisplayOptions) -> String {
        match self.formatter {
            Some(format) => format(tx, options),
            None => self.key.raw_value(tx),
        }
    }

    pub fn is_actions(&self) -> bool {
        self.key == ColumnKey::Actions
    }
}

/// `"<currency> <amount>"`
pub fn format_amount(tx: &Transaction, _options: &DisplayOptions) -> String {
    format!("{} {}", tx.currency, tx.amount)
}

pub fn format_created_at(tx: &Transaction, options: &DisplayOptions) -> String {
    options.format_timestamp(&tx.created_at)
}

pub const TRANSACTION_COLUMNS: &[ColumnDescriptor] = &[
    ColumnDescriptor {
        key: ColumnKey::UserName,
        header: "User Name",
        formatter: None,
    },
    ColumnDescriptor {
        key: ColumnKey::Amount,
        header: "Amount",
        formatter: Some(format_amount),
    },
    ColumnDescriptor {
        key: ColumnKey::Status,
        header: "Status",
        formatter: None,
    },
    ColumnDescriptor {
        key: ColumnKey::PaymentMethod,
        header: "Payment Method",
        formatter: None,
    },
    ColumnDescriptor {
        key: ColumnKey::CreditAmount,
        header: "Credit Amount",
        formatter: None,
    },
    ColumnDescriptor {
        key: ColumnKey::CreatedAt,
        header: "Created At",
        formatter: Some(format_created_at),
    },
    ColumnDescriptor {
        key: ColumnKey::Actions,
        header: "Actions",
        formatter: None,
    },
];
