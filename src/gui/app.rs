//! Main GUI application module
//!
//! Contains the TxAdminApp struct: top bar, notification overlay and the transactions view.

use crate::{
    api::{HttpTransactionsApi, PageQuery, TransactionsApi},
    columns::DisplayOptions,
    config::Config,
    user_settings::UserSettings,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::notifications::{NotificationCenter, NotificationLevel};
use super::theme::{configure_style, AppTheme};
use super::widgets::TransactionsView;

const APP_TITLE: &str = "Transactions Admin";

pub struct TxAdminApp {
    config: Config,
    user_settings: UserSettings,
    theme: AppTheme,
    view: TransactionsView<NotificationCenter>,
    show_notifications_popup: bool,
}

impl TxAdminApp {
    pub fn new(
        config: Config,
        user_settings: UserSettings,
        api: Arc<dyn TransactionsApi>,
        ctx: &egui::Context,
    ) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        tracing::info!(
            "Loading transactions from {} ({} per page)",
            config.api_base_url,
            config.page_size
        );

        let notifications = NotificationCenter::new(user_settings.toast_duration());
        let display = DisplayOptions::new(user_settings.date_format.clone());
        let view = TransactionsView::new(
            api,
            PageQuery::new(0, config.page_size),
            notifications,
            display,
        );

        Self {
            config,
            user_settings,
            theme,
            view,
            show_notifications_popup: false,
        }
    }

    /// Remember the selected page size for the next launch
    fn persist_page_size(&mut self) {
        let page_size = self.view.data_source().query().page_size;
        if page_size == self.config.page_size {
            return;
        }
        self.config.page_size = page_size;
        self.user_settings.default_page_size = Some(page_size);
        if let Err(e) = self.user_settings.save() {
            tracing::warn!(
                "Failed to save user settings to {}: {}",
                UserSettings::settings_path_display(),
                e
            );
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let mut refresh = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                ui.heading(RichText::new(APP_TITLE).color(self.theme.text_primary).strong());
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .small()
                        .color(self.theme.text_secondary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let enabled =
                        !self.view.data_source().is_loading() && self.view.can_change_page();
                    if ui
                        .add_enabled(enabled, self.theme.button_small("Refresh"))
                        .on_hover_text("Reload the current page")
                        .clicked()
                    {
                        refresh = true;
                    }
                    ui.label(
                        RichText::new(self.config.api_base_url.as_str())
                            .small()
                            .color(self.theme.text_secondary),
                    );
                });
            });
            ui.add_space(self.theme.spacing_sm);
        });
        if refresh {
            self.view.refetch();
        }
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        let theme = self.theme;
        let notifications = self.view.notifier();
        let count = notifications.len();
        let toast = notifications
            .active_toast(Instant::now())
            .map(|n| (n.level, n.message.clone()));
        let mut toggle_popup = false;

        egui::Area::new(egui::Id::new("notification_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                theme.frame_panel().inner_margin(egui::Margin::symmetric(8.0, 6.0)).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let icon_color = if count > 0 { theme.primary } else { theme.text_secondary };
                        if ui
                            .add(
                                egui::Button::new(RichText::new("[!]").color(icon_color).strong())
                                    .fill(egui::Color32::TRANSPARENT)
                                    .stroke(egui::Stroke::NONE),
                            )
                            .on_hover_text("Click to view notification history")
                            .clicked()
                        {
                            toggle_popup = true;
                        }

                        match &toast {
                            Some((level, message)) => {
                                ui.add_space(theme.spacing_xs);
                                ui.label(RichText::new(message).color(level_color(&theme, *level)));
                            }
                            None if count > 0 => {
                                ui.label(RichText::new(count.to_string()).small().color(theme.warning));
                            }
                            None => {}
                        }
                    });
                });
            });

        if toggle_popup {
            self.show_notifications_popup = !self.show_notifications_popup;
        }
        if !self.show_notifications_popup {
            return;
        }

        let mut open = true;
        let mut clear = false;
        egui::Window::new("Notification History")
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -50.0])
            .open(&mut open)
            .show(ctx, |ui| {
                let notifications = self.view.notifier();
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} notifications", notifications.len()))
                            .color(theme.text_secondary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(theme.button_small("Clear")).clicked() {
                            clear = true;
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(280.0)
                    .show(ui, |ui| {
                        if notifications.is_empty() {
                            ui.label(RichText::new("No notifications yet.").color(theme.text_secondary));
                        }
                        for entry in notifications.entries().rev() {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(format!("[{}]", entry.time_ago()))
                                        .small()
                                        .color(theme.text_secondary),
                                );
                                ui.label(RichText::new(&entry.message).color(level_color(&theme, entry.level)));
                            });
                        }
                    });
            });

        if clear {
            self.view.notifier_mut().clear();
        }
        if !open {
            self.show_notifications_popup = false;
        }
    }
}

fn level_color(theme: &AppTheme, level: NotificationLevel) -> egui::Color32 {
    match level {
        NotificationLevel::Success => theme.success,
        NotificationLevel::Failure => theme.error,
    }
}

impl App for TxAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.view.poll();

        self.render_top_bar(ctx);
        self.render_notifications(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.view.show(ui, &self.theme);
                });
        });

        self.persist_page_size();
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub fn launch(config: Config, user_settings: UserSettings) -> Result<()> {
    let api: Arc<dyn TransactionsApi> = Arc::new(HttpTransactionsApi::new(&config)?);

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(TxAdminApp::new(config, user_settings, api, &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_inner_size([1100.0, 720.0]);

    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    let title = format!("{} v{}", APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(&title, native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
