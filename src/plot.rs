//! SVG line charts of sweep series.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use tracing::{debug, info};

use crate::models::bs::OutputField;
use crate::sweep::{SweepResult, SweepSeries};

pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

const X_LABEL: &str = "Underlying Asset Price";

/// Draw `series` as a single line chart and write it to `path` as SVG.
pub fn render_series(series: &SweepSeries, path: &Path, size: (u32, u32)) -> Result<()> {
    let label = series.field.label();
    if let Some(&(spot, value)) = series
        .points
        .iter()
        .find(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(anyhow!(
            "cannot chart {label}: non-finite value {value} at spot {spot}"
        ));
    }
    let (x_min, x_max) = series
        .x_range()
        .ok_or_else(|| anyhow!("cannot chart {label}: series is empty"))?;
    let (y_min, y_max) = padded(series.y_range().unwrap_or((0.0, 0.0)));
    let (x_min, x_max) = if x_max > x_min {
        (x_min, x_max)
    } else {
        padded((x_min, x_max))
    };

    let draw_err = |e: &dyn std::fmt::Display| anyhow!("failed to draw {label} chart: {e}");

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(label, ("sans-serif", 30))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| draw_err(&e))?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(label)
        .draw()
        .map_err(|e| draw_err(&e))?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            series.points.clone(),
            BLUE.stroke_width(2),
        )))
        .map_err(|e| draw_err(&e))?;

    root.present().map_err(|e| draw_err(&e))?;
    debug!(field = %series.field, path = %path.display(), points = series.points.len(), "chart written");
    Ok(())
}

/// Chart every field in `fields` into `output_dir`, creating the directory
/// when missing. Files are named after [`OutputField::file_stem`].
pub fn render_all(
    sweep: &SweepResult,
    fields: &[OutputField],
    output_dir: &Path,
    size: (u32, u32),
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(fields.len());
    for &field in fields {
        let path = output_dir.join(format!("{}.svg", field.file_stem()));
        render_series(&sweep.series(field), &path, size)?;
        written.push(path);
    }
    info!(count = written.len(), dir = %output_dir.display(), "charts rendered");
    Ok(written)
}

// 5% headroom either side; a flat series gets a fixed band so the axis is
// never empty.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (hi.abs() * 0.05).max(1e-3)
    };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_widens_range() {
        assert_eq!(padded((0.0, 10.0)), (-0.5, 10.5));
        let (lo, hi) = padded((2.0, 2.0));
        assert!(lo < 2.0 && hi > 2.0);
        let (lo, hi) = padded((0.0, 0.0));
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    fn rejects_non_finite_series() {
        let dir = tempfile::tempdir().unwrap();
        let series = SweepSeries {
            field: OutputField::Gamma,
            points: vec![(1.0, 0.5), (2.0, f64::NAN)],
        };
        let err = render_series(&series, &dir.path().join("gamma.svg"), DEFAULT_SIZE).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn writes_line_chart_as_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delta.svg");
        let series = SweepSeries {
            field: OutputField::Delta,
            points: vec![(0.01, 0.0), (100.0, 0.54), (200.0, 1.0)],
        };
        render_series(&series, &path, DEFAULT_SIZE).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("Delta"));
    }

    #[test]
    fn rejects_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let series = SweepSeries {
            field: OutputField::Vega,
            points: Vec::new(),
        };
        assert!(render_series(&series, &dir.path().join("vega.svg"), DEFAULT_SIZE).is_err());
    }
}
