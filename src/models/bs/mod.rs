// Closed-form Black-Scholes-Merton pricing of European options without
// dividends, together with the first and second order Greeks.

pub mod error;
pub mod types;

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

pub use error::PricingError;
pub use types::{round_to, OptionType, OutputField, PricingInputs, PricingResult, DAYS_PER_YEAR};

fn norm_cdf(normal: &Normal, x: f64) -> f64 {
    normal.cdf(x)
}

fn norm_pdf(normal: &Normal, x: f64) -> f64 {
    normal.pdf(x)
}

/// Terms shared by the price and every Greek, evaluated once per call.
struct Terms {
    t: f64,
    sqrt_t: f64,
    d1: f64,
    d2: f64,
    discount: f64,
    pdf_d1: f64,
    normal: Normal,
}

impl Terms {
    #[allow(non_snake_case)]
    fn new(inputs: &PricingInputs) -> Self {
        let S = inputs.spot;
        let K = inputs.strike;
        let r = inputs.risk_free_rate;
        let sigma = inputs.volatility;

        let t = inputs.years_to_maturity();
        let sqrt_t = t.sqrt();
        let sig_sqrt_t = sigma * sqrt_t;
        let d1 = ((S / K).ln() + (r + 0.5 * sigma * sigma) * t) / sig_sqrt_t;
        let d2 = d1 - sig_sqrt_t;

        let normal = Normal::standard();
        Self {
            t,
            sqrt_t,
            d1,
            d2,
            discount: (-r * t).exp(),
            pdf_d1: norm_pdf(&normal, d1),
            normal,
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        norm_cdf(&self.normal, x)
    }
}

/// Price and Greeks at full precision.
///
/// Use this when the outputs feed further numerical work; [`price`] rounds
/// them for display.
///
/// # Errors
///
/// * [`PricingError::InvalidArgument`] if spot, strike, maturity or volatility
///   is not a finite positive number, or the rate is not finite.
/// * [`PricingError::DomainError`] if valid inputs overflow to a non-finite
///   output.
#[allow(non_snake_case)]
pub fn price_unrounded(inputs: &PricingInputs) -> Result<PricingResult, PricingError> {
    inputs.validate()?;

    let S = inputs.spot;
    let K = inputs.strike;
    let r = inputs.risk_free_rate;
    let sigma = inputs.volatility;
    let terms = Terms::new(inputs);
    let t = terms.t;
    let pv_strike = K * terms.discount;

    // Time decay from the diffusion term, common to calls and puts
    let theta_vol = -(S * sigma * terms.pdf_d1) / (2.0 * terms.sqrt_t);

    let (price, delta, theta_annual, rho) = match inputs.option_type {
        OptionType::Call => {
            let nd1 = terms.cdf(terms.d1);
            let nd2 = terms.cdf(terms.d2);
            (
                S * nd1 - pv_strike * nd2,
                nd1,
                theta_vol - r * pv_strike * nd2,
                pv_strike * t * nd2 / 100.0,
            )
        }
        OptionType::Put => {
            let nd1 = terms.cdf(terms.d1);
            let nmd1 = terms.cdf(-terms.d1);
            let nmd2 = terms.cdf(-terms.d2);
            (
                pv_strike * nmd2 - S * nmd1,
                nd1 - 1.0,
                theta_vol + r * pv_strike * nmd2,
                -pv_strike * t * nmd2 / 100.0,
            )
        }
    };

    let result = PricingResult {
        d1: terms.d1,
        d2: terms.d2,
        price,
        delta,
        gamma: terms.pdf_d1 / (S * sigma * terms.sqrt_t),
        theta: theta_annual / DAYS_PER_YEAR,
        vega: S * terms.pdf_d1 * terms.sqrt_t / 100.0,
        rho,
    };

    if let Some(field) = OutputField::ALL
        .into_iter()
        .find(|field| !result.get(*field).is_finite())
    {
        return Err(PricingError::DomainError { field: field.key() });
    }

    Ok(result)
}

/// Price and Greeks rounded to display precision: price to 2 decimals,
/// everything else to 3.
pub fn price(inputs: &PricingInputs) -> Result<PricingResult, PricingError> {
    price_unrounded(inputs).map(|result| result.rounded())
}

/// Price from raw scalar inputs and a textual option type (`"call"`/`"put"`,
/// any case).
///
/// An unrecognised option type fails with [`PricingError::InvalidArgument`]
/// before any arithmetic is done.
pub fn black_scholes(
    spot: f64,
    strike: f64,
    days_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: &str,
) -> Result<PricingResult, PricingError> {
    let option_type: OptionType = option_type.parse()?;
    price(&PricingInputs::new(
        spot,
        strike,
        days_to_maturity,
        risk_free_rate,
        volatility,
        option_type,
    ))
}
