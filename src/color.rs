use std::fmt;

use eframe::egui::{Color32, ColorImage};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::model::Matrix;

// ---------------------------------------------------------------------------
// Colormaps: scalar in [0, 1] → Color32
// ---------------------------------------------------------------------------

const TURBO: [(u8, u8, u8); 9] = [
    (48, 18, 59),
    (68, 81, 191),
    (62, 155, 254),
    (27, 229, 181),
    (164, 252, 60),
    (251, 185, 56),
    (240, 91, 18),
    (203, 42, 4),
    (122, 4, 3),
];

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const GREYSCALE: [(u8, u8, u8); 2] = [(0, 0, 0), (255, 255, 255)];

/// Named palette used to false-color the ribbon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMapKind {
    /// Violet → red hue sweep.
    #[default]
    Rainbow,
    Turbo,
    Viridis,
    Greyscale,
}

impl ColorMapKind {
    pub const ALL: [ColorMapKind; 4] = [
        ColorMapKind::Rainbow,
        ColorMapKind::Turbo,
        ColorMapKind::Viridis,
        ColorMapKind::Greyscale,
    ];

    /// Colour at position `t` (clamped to `[0, 1]`).
    pub fn color_at(self, t: f32) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            ColorMapKind::Rainbow => {
                let hsl = Hsl::new((1.0 - t) * 270.0, 1.0, 0.5);
                let rgb: Srgb = hsl.into_color();
                to_color32(rgb)
            }
            ColorMapKind::Turbo => interpolate(&TURBO, t),
            ColorMapKind::Viridis => interpolate(&VIRIDIS, t),
            ColorMapKind::Greyscale => interpolate(&GREYSCALE, t),
        }
    }
}

impl fmt::Display for ColorMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMapKind::Rainbow => "rainbow",
            ColorMapKind::Turbo => "turbo",
            ColorMapKind::Viridis => "viridis",
            ColorMapKind::Greyscale => "greyscale",
        };
        f.write_str(name)
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Piecewise-linear interpolation between evenly spaced stops.
fn interpolate(stops: &[(u8, u8, u8)], t: f32) -> Color32 {
    let segments = stops.len() - 1;
    let scaled = t * segments as f32;
    let i = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - i as f32;
    let (a, b) = (stops[i], stops[i + 1]);
    let lerp = |x: u8, y: u8| x as f32 + (y as f32 - x as f32) * local;
    to_color32(Srgb::new(
        lerp(a.0, b.0) / 255.0,
        lerp(a.1, b.1) / 255.0,
        lerp(a.2, b.2) / 255.0,
    ))
}

// ---------------------------------------------------------------------------
// Levels: value range mapped onto the colormap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub low: f64,
    pub high: f64,
}

impl Levels {
    /// Data extrema, or `0..1` for a matrix without finite cells.
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let (low, high) = matrix.min_max().unwrap_or((0.0, 1.0));
        Levels { low, high }
    }

    /// Position of `value` on the colormap. Equal levels map to 0.
    pub fn normalize(&self, value: f64) -> f32 {
        let span = self.high - self.low;
        if span.abs() < f64::EPSILON || !value.is_finite() {
            return 0.0;
        }
        ((value - self.low) / span).clamp(0.0, 1.0) as f32
    }
}

/// False-color the matrix. Row 0 becomes the top row of the image.
pub fn render_image(matrix: &Matrix, cmap: ColorMapKind, levels: Levels) -> ColorImage {
    let mut image = ColorImage::new([matrix.cols(), matrix.rows()], Color32::TRANSPARENT);
    for (pixel, &value) in image.pixels.iter_mut().zip(matrix.values()) {
        *pixel = cmap.color_at(levels.normalize(value));
    }
    image
}
