use eframe::egui::{self, Color32, RichText, TextureHandle, Ui};
use egui_plot::{GridMark, Plot, PlotImage, PlotPoint};

use crate::color::{ColorMapKind, Levels};
use crate::data::wavelength;
use crate::state::AppState;

/// Bottom axis title.
pub const X_AXIS_TITLE: &str = "Wavelength";
/// Left axis title.
pub const Y_AXIS_TITLE: &str = "Intensity";

// ---------------------------------------------------------------------------
// Spectral ribbon (central panel)
// ---------------------------------------------------------------------------

/// Label of the tick at `mark`, or empty between channels.
fn channel_tick(mark: &GridMark, ticks: &[(f64, String)]) -> String {
    if (mark.value - mark.value.round()).abs() > 1e-6 {
        return String::new();
    }
    ticks
        .iter()
        .find(|(pos, _)| (*pos - mark.value).abs() < 1e-6)
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

fn intensity_tick(value: f64, log_scale: bool) -> String {
    if log_scale {
        format!("{}", 10f64.powf(value).round())
    } else {
        format!("{value}")
    }
}

/// Render the ribbon image in the central panel.
pub fn ribbon_plot(ui: &mut Ui, state: &AppState, texture: Option<&TextureHandle>) {
    let visible = state.visible_channels();
    let Some(texture) = texture.filter(|_| !visible.is_empty()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No channels to display");
        });
        return;
    };

    let n = visible.len() as f64;
    let (axis_low, axis_high) = state.settings.y_axis_range();
    let (y_low, y_high) = state.settings.image_y_extent();
    let ticks = wavelength::ticks(&visible, state.settings.channels);
    let log_scale = state.settings.log_scale;

    Plot::new("spectral_ribbon")
        .x_axis_label(X_AXIS_TITLE)
        .y_axis_label(Y_AXIS_TITLE)
        .x_axis_formatter(move |mark, _range| channel_tick(&mark, &ticks))
        .y_axis_formatter(move |mark, _range| intensity_tick(mark.value, log_scale))
        .include_x(0.5)
        .include_x(n + 0.5)
        .include_y(axis_low)
        .include_y(axis_high)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One unit per channel, centred on the 1-based tick positions;
            // rows span the first to last bin edge.
            plot_ui.image(PlotImage::new(
                texture,
                PlotPoint::new((n + 1.0) / 2.0, (y_low + y_high) / 2.0),
                [n as f32, (y_high - y_low) as f32],
            ));
        });
}

// ---------------------------------------------------------------------------
// Colorbar (right panel)
// ---------------------------------------------------------------------------

pub fn colorbar(ui: &mut Ui, cmap: ColorMapKind, levels: Levels) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{:.0}", levels.high)).size(10.0));

        let height = (ui.available_height() - 24.0).max(60.0);
        let (_, rect) = ui.allocate_space(egui::vec2(20.0, height));
        let painter = ui.painter();
        let steps = 64;
        let step_height = rect.height() / steps as f32;
        for i in 0..steps {
            // Max at the top.
            let t = 1.0 - i as f32 / steps as f32;
            let top = rect.top() + i as f32 * step_height;
            painter.rect_filled(
                egui::Rect::from_min_size(
                    egui::pos2(rect.left(), top),
                    egui::vec2(rect.width(), step_height + 1.0),
                ),
                0.0,
                cmap.color_at(t),
            );
        }

        ui.label(
            RichText::new(format!("{:.0}", levels.low))
                .size(10.0)
                .color(Color32::GRAY),
        );
    });
}
