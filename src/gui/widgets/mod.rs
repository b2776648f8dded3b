//! Widget components for the GUI
//!
//! - `TransactionsView` - Paginated transactions table with row delete

mod transactions_view;

pub use transactions_view::TransactionsView;
