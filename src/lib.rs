pub mod api;
pub mod async_job;
pub mod columns;
pub mod config;
pub mod data_source;
pub mod delete_flow;
pub mod error;
pub mod gui;
pub mod models;
pub mod notifier;
pub mod user_settings;

#[cfg(test)]
mod testing;
