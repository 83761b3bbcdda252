//! Repeated pricing across a grid of underlying prices.
//!
//! A sweep holds every input fixed except the spot, evaluates the engine once
//! per grid point and keeps the full result so that any output can later be
//! pulled out as an ordered `(spot, value)` series for charting or export.

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::models::bs::{OutputField, PricingInputs, PricingResult};
use crate::models::traits::PricingEngine;

/// Lowest spot of the default grid.
pub const DEFAULT_SPOT_MIN: f64 = 0.01;
/// Highest spot of the default grid, as a multiple of the base spot.
pub const DEFAULT_SPOT_MAX_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_SAMPLES: usize = 100;

/// `samples` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Inclusive range of spot prices to sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotGrid {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl SpotGrid {
    pub fn new(start: f64, end: f64, samples: usize) -> Self {
        Self {
            start,
            end,
            samples,
        }
    }

    /// `samples` points over the default range `[0.01, 2 * base_spot]`.
    pub fn around(base_spot: f64, samples: usize) -> Self {
        Self::new(
            DEFAULT_SPOT_MIN,
            DEFAULT_SPOT_MAX_MULTIPLIER * base_spot,
            samples,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(anyhow!("spot grid needs at least one sample"));
        }
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(anyhow!(
                "spot grid bounds must be finite: [{}, {}]",
                self.start,
                self.end
            ));
        }
        if self.start <= 0.0 {
            return Err(anyhow!("spot grid must start above zero, got {}", self.start));
        }
        if self.samples > 1 && self.end <= self.start {
            return Err(anyhow!(
                "spot grid end {} must exceed start {}",
                self.end,
                self.start
            ));
        }
        Ok(())
    }

    pub fn points(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.samples)
    }
}

/// Result of pricing at one grid point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub spot: f64,
    pub result: PricingResult,
}

/// Every grid point of a sweep, ordered by spot.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub base: PricingInputs,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn spots(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spot).collect()
    }

    /// Extract one output as a `(spot, value)` series.
    pub fn series(&self, field: OutputField) -> SweepSeries {
        SweepSeries {
            field,
            points: self
                .points
                .iter()
                .map(|p| (p.spot, p.result.get(field)))
                .collect(),
        }
    }
}

/// One output against spot, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSeries {
    pub field: OutputField,
    pub points: Vec<(f64, f64)>,
}

impl SweepSeries {
    /// `(min, max)` of the x values, `None` when empty.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        min_max(self.points.iter().map(|p| p.0))
    }

    /// `(min, max)` of the y values, `None` when empty.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        min_max(self.points.iter().map(|p| p.1))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Price `base` at every spot of `grid`, leaving the other inputs unchanged.
///
/// The first pricing failure aborts the sweep; the error names the spot at
/// which it happened and still downcasts to
/// [`PricingError`](crate::models::bs::PricingError).
pub fn sweep_spot<E: PricingEngine>(
    engine: &E,
    base: &PricingInputs,
    grid: &SpotGrid,
) -> Result<SweepResult> {
    grid.validate()?;
    debug!(
        engine = engine.name(),
        start = grid.start,
        end = grid.end,
        samples = grid.samples,
        option_type = %base.option_type,
        "sweeping spot"
    );

    let points = grid
        .points()
        .into_iter()
        .map(|spot| {
            engine
                .evaluate(&base.with_spot(spot))
                .map(|result| SweepPoint { spot, result })
                .with_context(|| format!("pricing failed at spot {spot}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepResult {
        base: *base,
        points,
    })
}
