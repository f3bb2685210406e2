use eframe::egui::{self, TextureHandle, TextureOptions};

use crate::color::render_image;
use crate::settings::RibbonSettings;
use crate::state::AppState;
use crate::ui::{panels, plot};

/// Title of the top-level window.
pub const WINDOW_TITLE: &str = "Spectral Ribbon Plot";
/// Initial inner size of the window.
pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];
/// Initial top-left position of the window.
pub const WINDOW_POSITION: [f32; 2] = [100.0, 100.0];

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpectralRibbonApp {
    pub state: AppState,
    texture: Option<TextureHandle>,
}

impl Default for SpectralRibbonApp {
    fn default() -> Self {
        Self::new(RibbonSettings::default())
    }
}

impl SpectralRibbonApp {
    pub fn new(settings: RibbonSettings) -> Self {
        Self {
            state: AppState::new(settings),
            texture: None,
        }
    }

    /// Upload the false-colored ribbon if the state changed since the last
    /// frame.
    pub fn ensure_texture(&mut self, ctx: &egui::Context) {
        if !self.state.texture_dirty && self.texture.is_some() {
            return;
        }
        let display = self.state.display_matrix();
        if display.cols() == 0 || display.rows() == 0 {
            self.texture = None;
            self.state.texture_dirty = false;
            return;
        }
        let image = render_image(&display, self.state.settings.colormap, self.state.levels());
        log::debug!("Uploading {display} texture");
        self.texture = Some(ctx.load_texture("spectral_ribbon", image, TextureOptions::NEAREST));
        self.state.texture_dirty = false;
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}

impl eframe::App for SpectralRibbonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: ribbon settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: colorbar ----
        egui::SidePanel::right("colorbar_panel")
            .exact_width(56.0)
            .resizable(false)
            .show(ctx, |ui| {
                plot::colorbar(ui, self.state.settings.colormap, self.state.levels());
            });

        // ---- Central panel: ribbon image ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::ribbon_plot(ui, &self.state, self.texture.as_ref());
        });
    }
}
