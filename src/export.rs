use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use tracing::info;

use crate::models::bs::OutputField;
use crate::sweep::SweepResult;

/// Write a sweep as CSV: a `spot` column followed by the eight outputs.
pub fn write_csv(sweep: &SweepResult, path: &Path) -> Result<()> {
    let writer = Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_rows(sweep, writer).with_context(|| format!("failed to write {}", path.display()))?;
    info!(rows = sweep.len(), path = %path.display(), "sweep exported");
    Ok(())
}

/// Same as [`write_csv`] but to any writer.
pub fn write_csv_to<W: io::Write>(sweep: &SweepResult, out: W) -> Result<()> {
    write_rows(sweep, Writer::from_writer(out))
}

fn write_rows<W: io::Write>(sweep: &SweepResult, mut writer: Writer<W>) -> Result<()> {
    let header =
        std::iter::once("spot").chain(OutputField::ALL.iter().map(|field| field.key()));
    writer.write_record(header)?;

    for point in &sweep.points {
        let row = std::iter::once(point.spot)
            .chain(point.result.to_array())
            .map(|v| v.to_string());
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
