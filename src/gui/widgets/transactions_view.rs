//! Transactions table widget
//!
//! Renders the current page of a [`PagedDataSource`] as a table, drives the pagination
//! controls and runs the delete confirmation flow. Outcome messages of deletes go to the
//! injected [`Notifier`].

use crate::api::{PageQuery, TransactionsApi};
use crate::columns::{ColumnDescriptor, ColumnKey, DisplayOptions, TRANSACTION_COLUMNS};
use crate::config::PAGE_SIZE_OPTIONS;
use crate::data_source::{FetchStatus, PagedDataSource};
use crate::delete_flow::{DeleteFlow, DeleteState, DELETE_FAILURE_MESSAGE, DELETE_SUCCESS_MESSAGE};
use crate::error::FetchError;
use crate::gui::theme::AppTheme;
use crate::notifier::Notifier;
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use std::sync::Arc;

enum PageAction {
    Previous,
    Next,
    PageSize(u32),
}

enum DialogAction {
    Cancel,
    Confirm,
}

/// State for the transactions table widget
pub struct TransactionsView<N: Notifier> {
    api: Arc<dyn TransactionsApi>,
    source: PagedDataSource,
    delete: DeleteFlow,
    notifier: N,
    columns: &'static [ColumnDescriptor],
    display: DisplayOptions,
}

impl<N: Notifier> TransactionsView<N> {
    /// Create the view; the first page is requested immediately
    pub fn new(
        api: Arc<dyn TransactionsApi>,
        query: PageQuery,
        notifier: N,
        display: DisplayOptions,
    ) -> Self {
        let source = PagedDataSource::new(api.clone(), query);
        Self {
            api,
            source,
            delete: DeleteFlow::new(),
            notifier,
            columns: TRANSACTION_COLUMNS,
            display,
        }
    }

    pub fn data_source(&self) -> &PagedDataSource {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete.state()
    }

    /// Paging and reloads are locked while a delete awaits confirmation or is in flight
    pub fn can_change_page(&self) -> bool {
        self.delete.is_idle()
    }

    /// Collect finished background requests. Call once per frame.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.source.poll();
        if let Some(outcome) = self.delete.poll() {
            match outcome.result {
                Ok(()) => {
                    self.notifier.notify_success(DELETE_SUCCESS_MESSAGE);
                    self.source.refetch();
                }
                Err(_) => self.notifier.notify_failure(DELETE_FAILURE_MESSAGE),
            }
            changed = true;
        }
        changed
    }

    pub fn previous_page(&mut self) -> bool {
        self.can_change_page() && self.source.previous_page()
    }

    pub fn next_page(&mut self) -> bool {
        self.can_change_page() && self.source.next_page()
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        self.can_change_page() && self.source.set_page_size(page_size)
    }

    pub fn refetch(&mut self) -> bool {
        if !self.can_change_page() {
            tracing::debug!("Not reloading while a delete is pending");
            return false;
        }
        self.source.refetch();
        true
    }

    /// Open the confirmation for a row of the current page
    pub fn request_delete(&mut self, id: &str) -> bool {
        let on_page = self.source.page().map(|p| p.contains(id)).unwrap_or(false);
        if !on_page {
            tracing::warn!("Ignoring delete request for {}: not on the current page", id);
            return false;
        }
        self.delete.request(id)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.delete.cancel()
    }

    pub fn confirm_delete(&mut self) -> bool {
        let on_page = match (self.delete.intent(), self.source.page()) {
            (Some(id), Some(page)) => page.contains(id),
            _ => false,
        };
        if !on_page {
            tracing::warn!("Delete target is no longer on the current page, cancelling");
            self.delete.cancel();
            return false;
        }
        self.delete.confirm(self.api.as_ref())
    }

    /// "Page 2 of 5", with "?" while the page count is unknown
    pub fn footer_label(&self) -> String {
        let current = self.source.query().server_page();
        match self.source.page_count() {
            Some(count) => format!("Page {} of {}", current, count),
            None => format!("Page {} of ?", current),
        }
    }

    /// Render the view
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &AppTheme) {
        match self.source.status().clone() {
            FetchStatus::Error(error) => self.render_error(ui, theme, &error),
            FetchStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading...").color(theme.text_secondary));
                });
                if self.source.page().is_some() {
                    ui.add_enabled_ui(false, |ui| self.render_table(ui, theme));
                }
            }
            FetchStatus::Idle => {
                if let Some(id) = self.render_table(ui, theme) {
                    self.request_delete(&id);
                }
                ui.add_space(theme.spacing_sm);
                self.render_pagination(ui, theme);
            }
        }

        self.render_delete_dialog(ui.ctx(), theme);
    }

    /// Draw the table; returns the id whose delete button was clicked
    fn render_table(&self, ui: &mut egui::Ui, theme: &AppTheme) -> Option<String> {
        let page = self.source.page()?;
        if page.transactions.is_empty() {
            ui.label(RichText::new("No transactions found.").color(theme.text_secondary));
            return None;
        }

        let can_delete = self.delete.is_idle();
        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(90.0), self.columns.len())
            .header(theme.row_height, |mut header| {
                for column in self.columns {
                    header.col(|ui| {
                        ui.label(
                            RichText::new(column.header.to_uppercase())
                                .small()
                                .strong()
                                .color(theme.text_secondary),
                        );
                    });
                }
            })
            .body(|mut body| {
                for tx in &page.transactions {
                    body.row(theme.row_height, |mut row| {
                        for column in self.columns {
                            row.col(|ui| {
                                if column.is_actions() {
                                    if ui
                                        .add_enabled(can_delete, theme.button_danger("Delete"))
                                        .on_hover_text("Delete this transaction")
                                        .clicked()
                                    {
                                        clicked = Some(tx.id.clone());
                                    }
                                } else if column.key == ColumnKey::Status {
                                    ui.colored_label(
                                        theme.status_color(&tx.status),
                                        column.render_cell(tx, &self.display),
                                    );
                                } else {
                                    ui.label(column.render_cell(tx, &self.display));
                                }
                            });
                        }
                    });
                }
            });

        clicked
    }

    fn render_pagination(&mut self, ui: &mut egui::Ui, theme: &AppTheme) {
        let mut action = None;
        let current_size = self.source.query().page_size;
        let unlocked = self.can_change_page();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    unlocked && self.source.can_previous_page(),
                    theme.button_primary("Previous"),
                )
                .clicked()
            {
                action = Some(PageAction::Previous);
            }
            ui.label(RichText::new(self.footer_label()).strong());
            if ui
                .add_enabled(
                    unlocked && self.source.can_next_page(),
                    theme.button_primary("Next"),
                )
                .clicked()
            {
                action = Some(PageAction::Next);
            }

            ui.add_space(theme.spacing_lg);
            ui.label(RichText::new("Rows per page").color(theme.text_secondary));
            let mut page_size = current_size;
            ui.add_enabled_ui(unlocked, |ui| {
                egui::ComboBox::from_id_source("txadmin_page_size")
                    .selected_text(page_size.to_string())
                    .width(60.0)
                    .show_ui(ui, |ui| {
                        for size in PAGE_SIZE_OPTIONS {
                            ui.selectable_value(&mut page_size, *size, size.to_string());
                        }
                    });
            });
            if page_size != current_size {
                action = Some(PageAction::PageSize(page_size));
            }
        });

        match action {
            Some(PageAction::Previous) => {
                self.previous_page();
            }
            Some(PageAction::Next) => {
                self.next_page();
            }
            Some(PageAction::PageSize(size)) => {
                self.set_page_size(size);
            }
            None => {}
        }
    }

    fn render_error(&mut self, ui: &mut egui::Ui, theme: &AppTheme, error: &FetchError) {
        let mut retry = false;
        let unlocked = self.can_change_page();
        theme.frame_panel().show(ui, |ui| {
            ui.colored_label(theme.error, "Error loading transactions");
            ui.label(RichText::new(error.to_string()).small().color(theme.text_secondary));
            ui.add_space(theme.spacing_sm);
            if ui.add_enabled(unlocked, theme.button_primary("Retry")).clicked() {
                retry = true;
            }
        });
        if retry {
            self.refetch();
        }
    }

    fn render_delete_dialog(&mut self, ctx: &egui::Context, theme: &AppTheme) {
        let (id, deleting) = match self.delete.state() {
            DeleteState::Idle => return,
            DeleteState::PendingConfirm { id } => (id, false),
            DeleteState::Deleting { id } => (id, true),
        };

        let mut open = true;
        let mut action = None;
        egui::Window::new("Are you sure?")
            .id(egui::Id::new("txadmin_delete_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    "This action cannot be undone. This will permanently delete the transaction.",
                );
                ui.label(
                    RichText::new(format!("Transaction {}", id))
                        .small()
                        .color(theme.text_secondary),
                );
                ui.add_space(theme.spacing_sm);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!deleting, theme.button_small("Cancel")).clicked() {
                        action = Some(DialogAction::Cancel);
                    }
                    if ui.add_enabled(!deleting, theme.button_danger("Delete")).clicked() {
                        action = Some(DialogAction::Confirm);
                    }
                    if deleting {
                        ui.spinner();
                    }
                });
            });

        // Closing the window counts as cancel; it has no effect once the request is out
        if !open {
            action = Some(DialogAction::Cancel);
        }
        match action {
            Some(DialogAction::Cancel) => {
                self.cancel_delete();
            }
            Some(DialogAction::Confirm) => {
                self.confirm_delete();
            }
            None => {}
        }
    }
}
