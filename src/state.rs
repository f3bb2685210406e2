use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{ColorMapKind, Levels};
use crate::data::generate::{ribbon_histogram, ribbon_samples};
use crate::data::model::Matrix;
use crate::data::wavelength;
use crate::error::{Result, RibbonError};
use crate::settings::{BIN_CHOICES, RibbonMode, RibbonSettings};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Current plot settings.
    pub settings: RibbonSettings,

    /// Rotated ribbon matrix: bins × channels, highest bin first.
    pub matrix: Matrix,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// The displayed image needs re-uploading.
    pub texture_dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RibbonSettings::default())
    }
}

impl AppState {
    pub fn new(settings: RibbonSettings) -> Self {
        let mut state = Self {
            settings,
            matrix: Matrix::default(),
            status_message: None,
            texture_dirty: true,
        };
        state.regenerate();
        state
    }

    fn build_matrix(&self) -> Result<Matrix> {
        let s = &self.settings;
        let mut rng = StdRng::seed_from_u64(s.seed);
        match s.mode {
            RibbonMode::Samples => ribbon_samples(s.channels, s.bins, &mut rng),
            RibbonMode::Histogram => {
                let edges = s.bin_edges()?;
                ribbon_histogram(s.channels, &edges, s.events, &mut rng)
            }
        }
    }

    /// Rebuild the matrix from the settings. On failure the previous matrix
    /// stays on screen and the error is reported in the status bar.
    pub fn regenerate(&mut self) {
        match self.build_matrix() {
            Ok(matrix) => {
                log::info!(
                    "Generated {} ribbon ({} mode, seed {})",
                    matrix,
                    self.settings.mode,
                    self.settings.seed
                );
                self.matrix = matrix;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to generate ribbon: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.texture_dirty = true;
    }

    /// Draw a fresh data set.
    pub fn reseed(&mut self) {
        self.settings.seed = self.settings.seed.wrapping_add(1);
        self.regenerate();
    }

    pub fn toggle_log_scale(&mut self) {
        self.settings.log_scale = !self.settings.log_scale;
        self.regenerate();
    }

    pub fn set_y_range(&mut self, low: f64, high: f64) -> Result<()> {
        let candidate = RibbonSettings {
            y_low: low,
            y_high: high,
            ..self.settings.clone()
        };
        if let Err(err) = candidate.validate() {
            log::warn!("Rejected y range: {err}");
            self.status_message = Some(format!("Error: {err}"));
            return Err(err);
        }
        self.settings = candidate;
        self.regenerate();
        Ok(())
    }

    pub fn set_bins(&mut self, bins: usize) -> Result<()> {
        if !BIN_CHOICES.contains(&bins) {
            log::warn!("Rejected bin count {bins}");
            return Err(RibbonError::InvalidBins(bins));
        }
        self.settings.bins = bins;
        self.regenerate();
        Ok(())
    }

    /// Hide a visible channel or show a hidden one.
    pub fn toggle_channel(&mut self, channel: usize) -> Result<()> {
        let channels = self.settings.channels;
        if channel >= channels {
            return Err(RibbonError::ChannelOutOfRange { channel, channels });
        }
        let hidden = &mut self.settings.hidden_channels;
        if !hidden.remove(&channel) {
            hidden.insert(channel);
        }
        self.texture_dirty = true;
        Ok(())
    }

    pub fn set_colormap(&mut self, colormap: ColorMapKind) {
        self.settings.colormap = colormap;
        self.texture_dirty = true;
    }

    pub fn set_mode(&mut self, mode: RibbonMode) {
        self.settings.mode = mode;
        self.regenerate();
    }

    /// Replace all settings (e.g. loaded from disk). Invalid settings are
    /// rejected and the current ones stay in place.
    pub fn apply_settings(&mut self, mut settings: RibbonSettings) -> Result<()> {
        if let Err(err) = settings.validate() {
            log::warn!("Rejected settings: {err}");
            self.status_message = Some(format!("Error: {err}"));
            return Err(err);
        }
        let channels = settings.channels;
        settings.hidden_channels.retain(|&c| c < channels);
        self.settings = settings;
        self.regenerate();
        Ok(())
    }

    /// Channel indices not hidden, ascending.
    pub fn visible_channels(&self) -> Vec<usize> {
        (0..self.settings.channels)
            .filter(|c| !self.settings.hidden_channels.contains(c))
            .collect()
    }

    /// The matrix as displayed: hidden channel columns removed.
    pub fn display_matrix(&self) -> Matrix {
        self.matrix.select_columns(&self.visible_channels())
    }

    /// Colour levels for the displayed matrix.
    pub fn levels(&self) -> Levels {
        Levels::from_matrix(&self.display_matrix())
    }

    /// Wavelength labels of the visible channels, in display order.
    pub fn visible_labels(&self) -> Vec<String> {
        wavelength::ticks(&self.visible_channels(), self.settings.channels)
            .into_iter()
            .map(|(_, label)| label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_50_by_50_matrix() {
        let state = AppState::default();
        assert_eq!(state.matrix.shape(), (50, 50));
        assert!(state.status_message.is_none());
        assert!(state.texture_dirty);
    }

    #[test]
    fn test_reseed_changes_data() {
        let mut state = AppState::default();
        let before = state.matrix.clone();
        state.reseed();
        assert_eq!(state.settings.seed, 43);
        assert_ne!(state.matrix, before);
        assert_eq!(state.matrix.shape(), before.shape());
    }

    #[test]
    fn test_hidden_channels_removed_from_display() {
        let mut state = AppState::default();
        state.toggle_channel(0).unwrap();
        state.toggle_channel(49).unwrap();
        let shown = state.display_matrix();
        assert_eq!(shown.shape(), (50, 48));
        assert_eq!(shown.get(0, 0), state.matrix.get(0, 1));
        assert_eq!(state.visible_labels().first().map(String::as_str), Some("406"));

        state.toggle_channel(0).unwrap();
        assert_eq!(state.display_matrix().cols(), 49);
        assert!(matches!(
            state.toggle_channel(50),
            Err(RibbonError::ChannelOutOfRange { channel: 50, channels: 50 })
        ));
    }

    #[test]
    fn test_bins_must_be_a_known_choice() {
        let mut state = AppState::default();
        assert_eq!(state.set_bins(7), Err(RibbonError::InvalidBins(7)));
        state.set_bins(128).unwrap();
        assert_eq!(state.matrix.shape(), (128, 50));
    }

    #[test]
    fn test_invalid_y_range_keeps_previous() {
        let mut state = AppState::default();
        assert!(state.set_y_range(100.0, 10.0).is_err());
        assert_eq!(state.settings.y_low, 1.0);
        assert!(state.status_message.is_some());
        state.set_y_range(10.0, 1000.0).unwrap();
        assert_eq!(state.settings.y_axis_range(), (1.0, 3.0));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_histogram_mode_and_log_toggle() {
        let mut state = AppState::default();
        state.set_mode(RibbonMode::Histogram);
        assert_eq!(state.matrix.shape(), (50, 50));
        let log_counts: f64 = state.matrix.values().iter().sum();
        state.toggle_log_scale();
        assert!(!state.settings.log_scale);
        let lin_counts: f64 = state.matrix.values().iter().sum();
        // Same events, same range: every sample is counted either way.
        assert_eq!(log_counts, lin_counts);
    }

    #[test]
    fn test_colormap_change_only_dirties_texture() {
        let mut state = AppState::default();
        let before = state.matrix.clone();
        state.texture_dirty = false;
        state.set_colormap(ColorMapKind::Turbo);
        assert!(state.texture_dirty);
        assert_eq!(state.matrix, before);
    }

    #[test]
    fn test_apply_settings_drops_stale_hidden_channels() {
        let mut state = AppState::default();
        let mut s = RibbonSettings {
            channels: 10,
            ..Default::default()
        };
        s.hidden_channels.extend([2, 40]);
        state.apply_settings(s).unwrap();
        assert_eq!(state.settings.hidden_channels.len(), 1);
        assert_eq!(state.display_matrix().shape(), (50, 9));
    }

    fn assert_rejected_unchanged(settings: RibbonSettings) {
        let mut state = AppState::default();
        let before_settings = state.settings.clone();
        let before_matrix = state.matrix.clone();
        assert!(state.apply_settings(settings).is_err());
        assert_eq!(state.settings, before_settings);
        assert_eq!(state.matrix, before_matrix);
        assert!(state.status_message.as_deref().is_some_and(|m| m.starts_with("Error")));
    }

    #[test]
    fn test_apply_settings_rejects_unknown_bins() {
        assert_rejected_unchanged(RibbonSettings {
            bins: 7,
            ..Default::default()
        });
    }

    #[test]
    fn test_apply_settings_rejects_overflowing_bins() {
        assert_rejected_unchanged(RibbonSettings {
            bins: usize::MAX,
            mode: RibbonMode::Histogram,
            ..Default::default()
        });
        assert_rejected_unchanged(RibbonSettings {
            bins: usize::MAX / 2,
            mode: RibbonMode::Samples,
            ..Default::default()
        });
    }

    #[test]
    fn test_apply_settings_rejects_inverted_y_range() {
        let loaded: RibbonSettings =
            serde_json::from_str(r#"{"bins":7,"y_low":500,"y_high":10,"log_scale":false}"#)
                .unwrap();
        assert_rejected_unchanged(loaded);
        assert_rejected_unchanged(RibbonSettings {
            y_low: 500.0,
            y_high: 10.0,
            log_scale: false,
            ..Default::default()
        });
    }

    #[test]
    fn test_apply_settings_rejects_oversize_channels() {
        assert_rejected_unchanged(RibbonSettings {
            channels: crate::settings::MAX_CHANNELS + 1,
            ..Default::default()
        });
        assert_rejected_unchanged(RibbonSettings {
            channels: usize::MAX,
            ..Default::default()
        });
    }

    #[test]
    fn test_log_range_below_one_is_rejected() {
        let mut state = AppState::default();
        assert!(state.settings.log_scale);
        let before = state.settings.clone();
        assert!(matches!(
            state.set_y_range(0.1, 0.5),
            Err(RibbonError::InvalidRange { .. })
        ));
        assert_eq!(state.settings, before);
    }
}
