//! GUI module for the transactions admin
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main TxAdminApp struct and window launch
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `notifications` - Notification history and toast timing
//! - `widgets` - Reusable UI widgets (TransactionsView)
//!
//! ## Usage
//!
//! ```no_run
//! use txadmin::config::Config;
//! use txadmin::gui;
//! use txadmin::user_settings::UserSettings;
//!
//! let settings = UserSettings::load();
//! let config = Config::from_env().unwrap().with_settings(&settings).unwrap();
//! gui::launch(config, settings).expect("Failed to launch GUI");
//! ```
//!
//! ## Version
//!
//! The title bar shows the version from `Cargo.toml` via `env!("CARGO_PKG_VERSION")`.

mod app;
pub mod notifications;
pub mod theme;
pub mod widgets;

pub use app::{launch, TxAdminApp};
pub use notifications::{NotificationCenter, NotificationEntry, NotificationLevel};
pub use theme::{configure_style, AppTheme};
pub use widgets::TransactionsView;
