/// First channel's nominal wavelength in nm.
pub const START_NM: f64 = 400.0;
/// Last channel's nominal wavelength in nm.
pub const END_NM: f64 = 700.0;

/// Nominal wavelength of every channel, evenly spaced over 400–700 nm.
pub fn wavelengths(channels: usize) -> Vec<f64> {
    match channels {
        0 => Vec::new(),
        1 => vec![START_NM],
        n => {
            let step = (END_NM - START_NM) / (n - 1) as f64;
            (0..n).map(|i| START_NM + step * i as f64).collect()
        }
    }
}

/// Tick label for a channel, e.g. `"406"`.
pub fn label_for(channel: usize, channels: usize) -> Option<String> {
    wavelengths(channels)
        .get(channel)
        .map(|w| format!("{}", w.trunc() as i64))
}

/// `(tick position, label)` pairs for the visible channels. Positions run
/// 1..=n after hidden channels are removed.
pub fn ticks(visible: &[usize], channels: usize) -> Vec<(f64, String)> {
    let all = wavelengths(channels);
    visible
        .iter()
        .filter_map(|&ch| all.get(ch))
        .enumerate()
        .map(|(i, w)| ((i + 1) as f64, format!("{}", w.trunc() as i64)))
        .collect()
}
