use crate::error::{Result, RibbonError};

// ---------------------------------------------------------------------------
// Bin edges
// ---------------------------------------------------------------------------

fn check(low: f64, high: f64, n: usize) -> Result<()> {
    if n < 2 {
        return Err(RibbonError::InvalidBins(n));
    }
    if !(low.is_finite() && high.is_finite()) || high <= low {
        return Err(RibbonError::InvalidRange { low, high });
    }
    Ok(())
}

/// `n` evenly spaced edges from `low` to `high` inclusive.
pub fn linear_edges(low: f64, high: f64, n: usize) -> Result<Vec<f64>> {
    check(low, high, n)?;
    let step = (high - low) / (n - 1) as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| low + step * i as f64).collect();
    // Pin the end so accumulated rounding never drops the top sample.
    edges[n - 1] = high;
    Ok(edges)
}

/// `n` edges spaced evenly in log10 between `low` and `high`.
///
/// A non-positive `low` is treated as 1 (decade zero).
pub fn log_edges(low: f64, high: f64, n: usize) -> Result<Vec<f64>> {
    check(low, high, n)?;
    let low = if low > 0.0 { low } else { 1.0 };
    if high <= low {
        return Err(RibbonError::InvalidRange { low, high });
    }
    let (a, b) = (low.log10(), high.log10());
    let step = (b - a) / (n - 1) as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| 10f64.powf(a + step * i as f64)).collect();
    edges[0] = low;
    edges[n - 1] = high;
    Ok(edges)
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count `samples` into `edges.len() - 1` bins.
///
/// Bins are half-open `[e_i, e_{i+1})` except the last, which also includes
/// its right edge. Samples outside the edges are dropped.
pub fn histogram(samples: &[f64], edges: &[f64]) -> Vec<f64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let n_bins = edges.len() - 1;
    let mut counts = vec![0.0; n_bins];
    let (first, last) = (edges[0], edges[n_bins]);

    for &s in samples {
        if !(first..=last).contains(&s) {
            continue;
        }
        // Index of the first edge strictly greater than `s`.
        let upper = edges.partition_point(|&e| e <= s);
        let bin = upper.saturating_sub(1).min(n_bins - 1);
        counts[bin] += 1.0;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_edges() {
        let e = linear_edges(0.0, 10.0, 6).unwrap();
        assert_eq!(e, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_log_edges_decades() {
        let e = log_edges(1.0, 10_000.0, 5).unwrap();
        let expected = [1.0, 10.0, 100.0, 1000.0, 10_000.0];
        for (a, b) in e.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_log_edges_clamps_non_positive_low() {
        let e = log_edges(0.0, 100.0, 3).unwrap();
        assert_relative_eq!(e[0], 1.0);
        assert_relative_eq!(e[1], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_edges_reject_bad_input() {
        assert_eq!(linear_edges(0.0, 1.0, 1), Err(RibbonError::InvalidBins(1)));
        assert!(matches!(
            linear_edges(5.0, 5.0, 4),
            Err(RibbonError::InvalidRange { .. })
        ));
        assert!(matches!(
            log_edges(-3.0, 0.5, 4),
            Err(RibbonError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_histogram_half_open_with_closed_last_bin() {
        let edges = [0.0, 1.0, 2.0, 3.0];
        let samples = [0.0, 0.5, 1.0, 2.999, 3.0, 3.5, -0.1];
        assert_eq!(histogram(&samples, &edges), vec![2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_histogram_degenerate_edges() {
        assert!(histogram(&[1.0], &[0.0]).is_empty());
    }
}
