use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::Matrix;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the matrix as CSV: one header row of column labels, then one line
/// per matrix row (top bin first).
pub fn write_csv<W: Write>(writer: W, matrix: &Matrix, headers: &[String]) -> Result<()> {
    if headers.len() != matrix.cols() {
        bail!(
            "{} column labels for a matrix with {} columns",
            headers.len(),
            matrix.cols()
        );
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers).context("writing CSV header")?;
    for r in 0..matrix.rows() {
        let row = matrix.row(r).unwrap_or(&[]);
        wtr.write_record(row.iter().map(|v| v.to_string()))
            .with_context(|| format!("writing CSV row {r}"))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

/// Export to a file on disk.
pub fn export_csv(path: &Path, matrix: &Matrix, headers: &[String]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, matrix, headers)
}
