/// Data layer: the ribbon matrix, synthetic generation, and export.
///
/// Architecture:
/// ```text
///   rand (seeded)
///        │
///        ▼
///   ┌──────────┐
///   │ generate  │  Gaussian rows / per-channel histograms (channels × bins)
///   └──────────┘
///        │  rot90
///        ▼
///   ┌──────────┐
///   │  Matrix   │  bins × channels, highest bin first (image order)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV dump of the displayed matrix
///   └──────────┘
/// ```

pub mod export;
pub mod generate;
pub mod histogram;
pub mod model;
pub mod wavelength;
