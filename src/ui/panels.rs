use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMapKind;
use crate::data::{export, wavelength};
use crate::settings::{self, BIN_CHOICES, RibbonMode};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – ribbon settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Ribbon");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Mode ----
            ui.strong("Mode");
            let mode = state.settings.mode;
            egui::ComboBox::from_id_salt("mode")
                .selected_text(mode.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for m in [RibbonMode::Samples, RibbonMode::Histogram] {
                        if ui.selectable_label(mode == m, m.to_string()).clicked() && mode != m {
                            state.set_mode(m);
                        }
                    }
                });

            // ---- Colormap ----
            ui.strong("Colormap");
            let cmap = state.settings.colormap;
            egui::ComboBox::from_id_salt("colormap")
                .selected_text(cmap.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for c in ColorMapKind::ALL {
                        if ui.selectable_label(cmap == c, c.to_string()).clicked() {
                            state.set_colormap(c);
                        }
                    }
                });

            // ---- Bins ----
            ui.strong("Bins");
            let bins = state.settings.bins;
            egui::ComboBox::from_id_salt("bins")
                .selected_text(bins.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for b in BIN_CHOICES {
                        if ui.selectable_label(bins == b, b.to_string()).clicked() && bins != b {
                            if let Err(e) = state.set_bins(b) {
                                log::warn!("{e}");
                            }
                        }
                    }
                });
            ui.separator();

            // ---- Y range ----
            ui.strong("Y range");
            let mut low = state.settings.y_low;
            let mut high = state.settings.y_high;
            let mut changed = false;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("low");
                changed |= ui
                    .add(egui::DragValue::new(&mut low).speed(1.0).range(0.0..=1.0e6))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("high");
                changed |= ui
                    .add(egui::DragValue::new(&mut high).speed(1.0).range(1.0..=1.0e6))
                    .changed();
            });
            if changed {
                // Rejection is reported through the status message.
                let _ = state.set_y_range(low, high);
            }
            ui.separator();

            // ---- Channels (collapsible) ----
            let channels = state.settings.channels;
            let n_hidden = state.settings.hidden_channels.len();
            let header = format!("Hide channels  ({n_hidden}/{channels})");
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("hide_channels")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for ch in 0..channels {
                        let mut hidden = state.settings.hidden_channels.contains(&ch);
                        let label = wavelength::label_for(ch, channels)
                            .map(|nm| format!("{nm} nm"))
                            .unwrap_or_default();
                        if ui.checkbox(&mut hidden, label).changed() {
                            if let Err(e) = state.toggle_channel(ch) {
                                log::warn!("{e}");
                            }
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save settings…").clicked() {
                save_settings_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load settings…").clicked() {
                load_settings_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export matrix CSV…").clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("Regenerate").clicked() {
            state.reseed();
        }

        if ui
            .selectable_label(state.settings.log_scale, "Log Scaling")
            .clicked()
        {
            state.toggle_log_scale();
        }

        ui.separator();
        let (rows, cols) = state.display_matrix().shape();
        ui.label(format!("{cols} channels × {rows} bins, seed {}", state.settings.seed));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn save_settings_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save ribbon settings")
        .add_filter("JSON", &["json"])
        .set_file_name("ribbon.json")
        .save_file();

    if let Some(path) = file {
        match settings::save_settings(&path, &state.settings) {
            Ok(()) => {
                log::info!("Saved settings to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save settings: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn load_settings_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load ribbon settings")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match settings::load_settings(&path) {
            Ok(loaded) => {
                if state.apply_settings(loaded).is_ok() {
                    log::info!("Loaded settings from {}", path.display());
                }
            }
            Err(e) => {
                log::error!("Failed to load settings: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export ribbon matrix")
        .add_filter("CSV", &["csv"])
        .set_file_name("ribbon.csv")
        .save_file();

    if let Some(path) = file {
        let matrix = state.display_matrix();
        match export::export_csv(&path, &matrix, &state.visible_labels()) {
            Ok(()) => {
                log::info!("Exported {matrix} to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export matrix: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
