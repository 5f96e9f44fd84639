// LeadDesk - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels, builds the per-frame clock, and performs
// the side effects panels request (exports, external links, session save).

use crate::app::session::{self, SessionData};
use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::core::export::{export_csv, export_json};
use crate::platform::config::local_offset_at;
use crate::platform::fs::{is_openable, open_external};
use crate::ui;
use chrono::{DateTime, FixedOffset, Utc};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy)]
enum ExportKind {
    Csv,
    Json,
}

/// The LeadDesk application.
pub struct LeadDeskApp {
    pub state: DeskState,
    /// Fixed "now" from --now; None follows the wall clock.
    pinned_now: Option<DateTime<Utc>>,
    /// Configured offset; None re-reads the machine's offset every frame.
    utc_offset: Option<FixedOffset>,
    session_file: PathBuf,
    /// Theme last pushed to egui, so visuals are only set on change.
    applied_dark_mode: Option<bool>,
}

impl LeadDeskApp {
    pub fn new(
        state: DeskState,
        pinned_now: Option<DateTime<Utc>>,
        utc_offset: Option<FixedOffset>,
        session_file: PathBuf,
    ) -> Self {
        Self {
            state,
            pinned_now,
            utc_offset,
            session_file,
            applied_dark_mode: None,
        }
    }

    fn clock(&self) -> Clock {
        let now = self.pinned_now.unwrap_or_else(Utc::now);
        let offset = self.utc_offset.unwrap_or_else(|| local_offset_at(now));
        Clock::new(now, offset)
    }

    fn save_session(&self) {
        if let Err(e) = session::save(&SessionData::capture(&self.state), &self.session_file) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    fn export(&mut self, kind: ExportKind) {
        let (filter_name, ext) = match kind {
            ExportKind::Csv => ("CSV", "csv"),
            ExportKind::Json => ("JSON", "json"),
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, &[ext])
            .set_file_name(format!("leads.{ext}"))
            .save_file()
        else {
            return;
        };
        self.state.status_message = match self.write_export(kind, &dest) {
            Ok(n) => format!("Exported {n} leads to {filter_name}."),
            Err(msg) => msg,
        };
    }

    fn write_export(&self, kind: ExportKind, dest: &Path) -> Result<usize, String> {
        let file = std::fs::File::create(dest)
            .map_err(|e| format!("Cannot create file: {e}"))?;
        let leads = self.state.visible_leads();
        match kind {
            ExportKind::Csv => {
                export_csv(&leads, file, dest).map_err(|e| format!("CSV export failed: {e}"))
            }
            ExportKind::Json => {
                export_json(&leads, file, dest).map_err(|e| format!("JSON export failed: {e}"))
            }
        }
    }

    fn launch_pending_link(&mut self) {
        let Some(url) = self.state.pending_open.take() else {
            return;
        };
        if is_openable(&url) {
            open_external(&url);
        } else {
            self.state.status_message = "Unsupported link type.".to_string();
        }
    }
}

impl eframe::App for LeadDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let clock = self.clock();

        if self.applied_dark_mode != Some(self.state.dark_mode) {
            ui::theme::apply(ctx, self.state.dark_mode);
            self.applied_dark_mode = Some(self.state.dark_mode);
        }

        self.launch_pending_link();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_rows = self.state.table.shown > 0;
                    ui.add_enabled_ui(has_rows, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export CSV\u{2026}").clicked() {
                                self.export(ExportKind::Csv);
                                ui.close_menu();
                            }
                            if ui.button("Export JSON\u{2026}").clicked() {
                                self.export(ExportKind::Json);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    for tab in Tab::all() {
                        if ui
                            .selectable_label(self.state.active_tab == *tab, tab.label())
                            .clicked()
                        {
                            self.state.active_tab = *tab;
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    let theme_label = if self.state.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(theme_label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                if !self.state.warnings.is_empty() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{} warning(s)", self.state.warnings.len()))
                            .color(ui::theme::score_colour(crate::core::model::LeadScore::Warm)),
                    )
                    .on_hover_text(self.state.warnings.join("\n"));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(crate::core::format::date_time(clock.now(), &clock));
                    if self.pinned_now.is_some() {
                        ui.label(egui::RichText::new("pinned").small().weak());
                    }
                });
            });
        });

        egui::SidePanel::left("nav")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui::panels::nav::render(ui, &mut self.state, &clock);
            });

        if self.state.selected_lead.is_some() {
            egui::SidePanel::right("detail_pane")
                .default_width(ui::theme::DETAIL_PANE_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    ui::panels::detail::render(ui, &mut self.state, &clock);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Dashboard => ui::panels::dashboard::render(ui, &mut self.state, &clock),
            Tab::Pipeline => ui::panels::pipeline::render(ui, &mut self.state, &clock),
            Tab::Leads => ui::panels::leads::render(ui, &mut self.state, &clock),
            Tab::FollowUps => ui::panels::follow_ups::render(ui, &mut self.state, &clock),
            Tab::Calls => ui::panels::calls::render(ui, &mut self.state, &clock),
            Tab::Targets => ui::panels::targets::render(ui, &self.state),
            Tab::Analytics => ui::panels::analytics::render(ui, &self.state, &clock),
            Tab::Settings => ui::panels::settings::render(ui, &mut self.state, &clock),
        });

        ui::panels::about::render(ctx, &mut self.state);

        // Relative times and bucket boundaries move with the wall clock.
        if self.pinned_now.is_none() {
            ctx.request_repaint_after(std::time::Duration::from_secs(30));
        }
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_session();
    }
}
