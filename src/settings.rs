use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::ColorMapKind;
use crate::data::generate::{DEFAULT_BINS, DEFAULT_CHANNELS};
use crate::data::histogram::{linear_edges, log_edges};
use crate::error::RibbonError;

/// Bin counts offered in the UI.
pub const BIN_CHOICES: [usize; 6] = [50, 64, 128, 256, 512, 1024];
/// Largest channel count; one texture column per channel.
pub const MAX_CHANNELS: usize = 2048;
/// Largest number of events drawn per channel in histogram mode.
pub const MAX_EVENTS: usize = 1_000_000;

/// What the ribbon image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RibbonMode {
    /// Raw Gaussian samples, one row per channel, rotated for display.
    #[default]
    Samples,
    /// Per-channel intensity histograms over the y range.
    Histogram,
}

impl fmt::Display for RibbonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RibbonMode::Samples => write!(f, "Samples"),
            RibbonMode::Histogram => write!(f, "Histogram"),
        }
    }
}

// ---------------------------------------------------------------------------
// RibbonSettings – everything needed to rebuild the plot
// ---------------------------------------------------------------------------

/// Persistable plot settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonSettings {
    pub channels: usize,
    pub bins: usize,
    pub mode: RibbonMode,
    pub log_scale: bool,
    pub y_low: f64,
    pub y_high: f64,
    /// Events drawn per channel in histogram mode.
    pub events: usize,
    pub colormap: ColorMapKind,
    pub hidden_channels: BTreeSet<usize>,
    pub seed: u64,
}

impl Default for RibbonSettings {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            bins: DEFAULT_BINS,
            mode: RibbonMode::Samples,
            log_scale: true,
            y_low: 1.0,
            y_high: 10_000.0,
            events: 2000,
            colormap: ColorMapKind::Rainbow,
            hidden_channels: BTreeSet::new(),
            seed: 42,
        }
    }
}

impl RibbonSettings {
    /// Check the invariants the UI setters enforce, for settings that come
    /// from elsewhere (e.g. a saved file).
    pub fn validate(&self) -> crate::error::Result<()> {
        if !BIN_CHOICES.contains(&self.bins) {
            return Err(RibbonError::InvalidBins(self.bins));
        }
        if !(1..=MAX_CHANNELS).contains(&self.channels) {
            return Err(RibbonError::InvalidChannels(self.channels));
        }
        if !(1..=MAX_EVENTS).contains(&self.events) {
            return Err(RibbonError::InvalidEvents(self.events));
        }
        let (low, high) = (self.y_low, self.y_high);
        if !(low.is_finite() && high.is_finite()) || high <= low {
            return Err(RibbonError::InvalidRange { low, high });
        }
        if self.log_scale && high <= 1.0 {
            return Err(RibbonError::InvalidRange { low: low.max(1.0), high });
        }
        Ok(())
    }

    /// Histogram edges for the current y range and scaling (`bins + 1` edges).
    pub fn bin_edges(&self) -> crate::error::Result<Vec<f64>> {
        let n = self
            .bins
            .checked_add(1)
            .ok_or(RibbonError::InvalidBins(self.bins))?;
        if self.log_scale {
            log_edges(self.y_low, self.y_high, n)
        } else {
            linear_edges(self.y_low, self.y_high, n)
        }
    }

    /// Exact vertical span of the image rows in plot coordinates: the first
    /// and last bin edge, in log10 when log scaling is on.
    pub fn image_y_extent(&self) -> (f64, f64) {
        if self.log_scale {
            let low = self.y_low.max(1.0).log10();
            let high = self.y_high.max(1.0).log10();
            if high > low { (low, high) } else { (low, low + 1.0) }
        } else if self.y_high > self.y_low {
            (self.y_low, self.y_high)
        } else {
            (self.y_low, self.y_low + 1.0)
        }
    }

    /// Vertical axis bounds in plot coordinates. With log scaling the axis
    /// runs over whole decades around [`Self::image_y_extent`].
    pub fn y_axis_range(&self) -> (f64, f64) {
        if self.log_scale {
            let low = if self.y_low > 0.0 {
                self.y_low.log10().floor()
            } else {
                0.0
            };
            let high = self.y_high.max(1.0).log10().ceil();
            if high > low { (low, high) } else { (low, low + 1.0) }
        } else {
            self.image_y_extent()
        }
    }
}

// ---------------------------------------------------------------------------
// JSON persistence
// ---------------------------------------------------------------------------

pub fn load_settings(path: &Path) -> Result<RibbonSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings: RibbonSettings =
        serde_json::from_str(&text).context("parsing settings JSON")?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &RibbonSettings) -> Result<()> {
    let text = serde_json::to_string_pretty(settings).context("serializing settings")?;
    std::fs::write(path, text)
        .with_context(|| format!("writing settings to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let s = RibbonSettings::default();
        assert_eq!((s.channels, s.bins), (50, 50));
        assert_eq!(s.colormap, ColorMapKind::Rainbow);
        assert!(BIN_CHOICES.contains(&s.bins));
    }

    #[test]
    fn test_y_axis_range() {
        let mut s = RibbonSettings::default();
        assert_eq!(s.y_axis_range(), (0.0, 4.0));
        s.y_low = 250.0;
        s.y_high = 3000.0;
        assert_eq!(s.y_axis_range(), (2.0, 4.0));
        s.log_scale = false;
        assert_eq!(s.y_axis_range(), (250.0, 3000.0));
    }

    #[test]
    fn test_image_extent_sits_on_exact_log_edges() {
        let s = RibbonSettings {
            y_low: 250.0,
            y_high: 3000.0,
            ..Default::default()
        };
        let (low, high) = s.image_y_extent();
        assert_relative_eq!(low, 250f64.log10());
        assert_relative_eq!(high, 3000f64.log10());
        let edges = s.bin_edges().unwrap();
        assert_relative_eq!(edges[0].log10(), low);
        assert_relative_eq!(edges[edges.len() - 1].log10(), high);
        // The axis still covers whole decades around the image.
        assert_eq!(s.y_axis_range(), (2.0, 4.0));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(RibbonSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let bad_bins = RibbonSettings { bins: 7, ..Default::default() };
        assert_eq!(bad_bins.validate(), Err(RibbonError::InvalidBins(7)));

        let huge_bins = RibbonSettings { bins: usize::MAX, ..Default::default() };
        assert_eq!(huge_bins.validate(), Err(RibbonError::InvalidBins(usize::MAX)));

        let inverted = RibbonSettings {
            y_low: 500.0,
            y_high: 10.0,
            log_scale: false,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(RibbonError::InvalidRange { .. })));

        let no_channels = RibbonSettings { channels: 0, ..Default::default() };
        assert_eq!(no_channels.validate(), Err(RibbonError::InvalidChannels(0)));

        let many_channels = RibbonSettings { channels: MAX_CHANNELS + 1, ..Default::default() };
        assert_eq!(
            many_channels.validate(),
            Err(RibbonError::InvalidChannels(MAX_CHANNELS + 1))
        );

        let no_events = RibbonSettings { events: 0, ..Default::default() };
        assert_eq!(no_events.validate(), Err(RibbonError::InvalidEvents(0)));

        let sub_decade = RibbonSettings { y_low: 0.1, y_high: 0.5, ..Default::default() };
        assert!(sub_decade.validate().is_err());
    }

    #[test]
    fn test_bin_edges_overflow_is_an_error() {
        let s = RibbonSettings { bins: usize::MAX, ..Default::default() };
        assert_eq!(s.bin_edges(), Err(RibbonError::InvalidBins(usize::MAX)));
    }

    #[test]
    fn test_bin_edges_follow_scaling() {
        let mut s = RibbonSettings {
            bins: 4,
            y_low: 0.0,
            y_high: 8.0,
            log_scale: false,
            ..Default::default()
        };
        assert_eq!(s.bin_edges().unwrap(), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        s.log_scale = true;
        s.y_high = 10_000.0;
        assert_eq!(s.bin_edges().unwrap().len(), 5);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ribbon.json");
        let mut s = RibbonSettings::default();
        s.mode = RibbonMode::Histogram;
        s.colormap = ColorMapKind::Viridis;
        s.hidden_channels.insert(3);
        save_settings(&path, &s).unwrap();
        assert_eq!(load_settings(&path).unwrap(), s);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: RibbonSettings = serde_json::from_str(r#"{"bins": 128, "mode": "histogram"}"#).unwrap();
        assert_eq!(s.bins, 128);
        assert_eq!(s.mode, RibbonMode::Histogram);
        assert_eq!(s.channels, 50);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_settings(Path::new("/nonexistent/ribbon.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading settings"));
    }
}
