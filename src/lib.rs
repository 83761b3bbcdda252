//! # BSM-Greeks: Black-Scholes-Merton Pricing and Sensitivities
//!
//! `bsm-greeks` prices European calls and puts under the Black-Scholes-Merton
//! model (no dividends) and reports the standard Greeks. Around that core it
//! provides a spot sweep, SVG charts of each output against the underlying
//! price, and CSV export of the swept values.
//!
//! ## Core Features
//!
//! - **Closed-form pricing**: price, d1, d2, delta, gamma, theta, vega and rho in one call
//! - **Strict inputs**: non-positive or non-finite inputs fail with a typed error instead of NaN
//! - **Spot sweeps**: evaluate any [`PricingEngine`] across a grid of underlying prices
//! - **Charts and export**: SVG line charts via `plotters`, CSV via `csv`
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_greeks::{price, OptionType, PricingInputs};
//!
//! // 30 days to expiry, 5% rate, 20% volatility
//! let inputs = PricingInputs::new(100.0, 100.0, 30.0, 0.05, 0.2, OptionType::Call);
//! let result = price(&inputs)?;
//!
//! assert_eq!(result.price, 2.49);
//! assert!(result.delta > 0.5 && result.delta < 0.6);
//! # Ok::<(), bsm_greeks::PricingError>(())
//! ```
//!
//! ## Units
//!
//! - Maturity is given in calendar days and converted with a 365-day year
//! - Theta is per calendar day
//! - Vega and rho are per one percentage point of volatility and rate
//! - [`price`] rounds the price to 2 decimals and everything else to 3;
//!   [`price_unrounded`] returns full precision

// ================================================================================================
// MODULES
// ================================================================================================

#[cfg(feature = "serde")]
pub mod config;
pub mod export;
pub mod models;
pub mod plot;
pub mod sweep;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Pricing engine
pub use models::bs::{
    black_scholes, price, price_unrounded, round_to, OptionType, OutputField, PricingError,
    PricingInputs, PricingResult, DAYS_PER_YEAR,
};
pub use models::traits::PricingEngine;
pub use models::{BlackScholesEngine, Precision};

// Sweep, charts and export
pub use export::{write_csv, write_csv_to};
pub use plot::{render_all, render_series};
pub use sweep::{linspace, sweep_spot, SpotGrid, SweepPoint, SweepResult, SweepSeries};

#[cfg(feature = "serde")]
pub use config::{DriverConfig, PlotConfig, SweepConfig};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured driver settings.
///
/// - [`standard()`]: 100 samples over `[0.01, 2 * spot]`, 800x600 charts, display precision
/// - [`quick()`]: 25 samples, 640x480 charts
/// - [`high_resolution()`]: 500 samples at full precision, 1280x960 charts
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::config::DriverConfig;

    /// Settings matching the reference visualization: 100 samples, charts in `./plots`.
    pub fn standard() -> DriverConfig {
        DriverConfig::default()
    }

    /// Coarse sweep for quick inspection.
    pub fn quick() -> DriverConfig {
        DriverConfig::quick()
    }

    /// Dense sweep with unrounded values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bsm_greeks::{default_configs, Precision};
    ///
    /// let config = default_configs::high_resolution();
    /// assert_eq!(config.sweep.precision, Precision::Full);
    /// ```
    pub fn high_resolution() -> DriverConfig {
        DriverConfig::high_resolution()
    }
}

// ================================================================================================
// VISUALIZATION
// ================================================================================================

/// Sweep the spot of `inputs` over the grid described by `config`, using a
/// [`BlackScholesEngine`] at the configured precision.
///
/// The base inputs are priced first, so invalid inputs fail with a
/// [`PricingError`] (reachable through `downcast_ref`) before the sweep runs.
#[cfg(feature = "serde")]
pub fn sweep_with_config(
    inputs: &PricingInputs,
    config: &SweepConfig,
) -> anyhow::Result<SweepResult> {
    config.validate()?;
    let engine = BlackScholesEngine::new(config.precision);
    engine.evaluate(inputs)?;
    sweep_spot(&engine, inputs, &config.grid(inputs.spot))
}

/// Sweep the spot of `inputs` according to `config` and chart every configured
/// output into `config.output_dir`.
///
/// The grid runs from `config.sweep.spot_min` to
/// `config.sweep.spot_max_multiplier * inputs.spot`. The base inputs are priced
/// first so that invalid inputs fail before any file is written.
///
/// # Returns
///
/// The sweep itself and the paths of the written charts, in the order of
/// `config.plot.fields`.
///
/// # Example
///
/// ```rust,no_run
/// use bsm_greeks::{default_configs, visualize, OptionType, PricingInputs};
///
/// let inputs = PricingInputs::new(100.0, 100.0, 30.0, 0.05, 0.2, OptionType::Put);
/// let (sweep, charts) = visualize(&inputs, &default_configs::standard())?;
/// println!("{} samples, {} charts", sweep.len(), charts.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[cfg(feature = "serde")]
pub fn visualize(
    inputs: &PricingInputs,
    config: &DriverConfig,
) -> anyhow::Result<(SweepResult, Vec<std::path::PathBuf>)> {
    config.validate()?;
    let sweep = sweep_with_config(inputs, &config.sweep)?;
    let charts = render_all(
        &sweep,
        &config.plot.fields,
        &config.output_dir,
        (config.plot.width, config.plot.height),
    )?;
    Ok((sweep, charts))
}
