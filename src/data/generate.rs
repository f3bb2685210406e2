use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::histogram::histogram;
use super::model::Matrix;
use crate::error::{Result, RibbonError};

/// Default number of channels (wavelength buckets).
pub const DEFAULT_CHANNELS: usize = 50;
/// Default number of bins per channel.
pub const DEFAULT_BINS: usize = 50;
/// Mean of the synthetic intensity samples.
pub const SAMPLE_MEAN: f64 = 50.0;
/// Standard deviation of the synthetic intensity samples.
pub const SAMPLE_STD_DEV: f64 = 10.0;

/// Normal distribution with a finite, non-negative standard deviation.
pub fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !std_dev.is_finite() {
        return Err(RibbonError::InvalidStdDev(std_dev));
    }
    Normal::new(mean, std_dev).map_err(|_| RibbonError::InvalidStdDev(std_dev))
}

/// `channels × bins` matrix, each row filled with independent normal samples.
pub fn gaussian_rows<R: Rng + ?Sized>(
    channels: usize,
    bins: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Matrix> {
    let dist = normal(mean, std_dev)?;
    let len = Matrix::cell_count(channels, bins)?;
    let values = dist.sample_iter(rng).take(len).collect();
    Matrix::from_vec(channels, bins, values)
}

/// Raw-sample ribbon: Gaussian channel rows rotated into display order.
pub fn ribbon_samples<R: Rng + ?Sized>(channels: usize, bins: usize, rng: &mut R) -> Result<Matrix> {
    let rows = gaussian_rows(channels, bins, SAMPLE_MEAN, SAMPLE_STD_DEV, rng)?;
    Ok(rows.rot90())
}

/// Histogram ribbon: every channel draws `events` intensities which are
/// counted against `edges`, then the `channels × bins` counts are rotated
/// into display order.
pub fn ribbon_histogram<R: Rng + ?Sized>(
    channels: usize,
    edges: &[f64],
    events: usize,
    rng: &mut R,
) -> Result<Matrix> {
    if edges.len() < 2 {
        return Err(RibbonError::InvalidBins(edges.len().saturating_sub(1)));
    }
    Matrix::cell_count(channels, edges.len() - 1)?;
    let mut rows = Vec::with_capacity(channels);
    let mut samples = Vec::with_capacity(events);
    for ch in 0..channels {
        // Later channels drift upward so the ribbon is not flat.
        let mean = SAMPLE_MEAN * (1.0 + ch as f64 / channels.max(1) as f64);
        let dist = normal(mean, SAMPLE_STD_DEV)?;
        samples.clear();
        samples.extend(dist.sample_iter(&mut *rng).take(events));
        rows.push(histogram(&samples, edges));
    }
    Ok(Matrix::from_rows(rows)?.rot90())
}
