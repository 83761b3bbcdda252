pub mod bs;

/// Common traits used by pricing engines
pub mod traits {
    use crate::models::bs::{PricingError, PricingInputs, PricingResult};

    /// A model that maps one set of market inputs to a price and its Greeks.
    ///
    /// Implementations must be pure: identical inputs give identical outputs,
    /// so callers are free to evaluate samples in any order.
    pub trait PricingEngine {
        fn name(&self) -> &str;
        fn evaluate(&self, inputs: &PricingInputs) -> Result<PricingResult, PricingError>;
    }
}

/// Output precision of [`BlackScholesEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Precision {
    /// Price to 2 decimals, everything else to 3
    #[default]
    Display,
    Full,
}

/// Closed-form Black-Scholes-Merton engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesEngine {
    pub precision: Precision,
}

impl BlackScholesEngine {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }
}

impl traits::PricingEngine for BlackScholesEngine {
    fn name(&self) -> &str {
        "black-scholes"
    }

    fn evaluate(
        &self,
        inputs: &bs::PricingInputs,
    ) -> Result<bs::PricingResult, bs::PricingError> {
        match self.precision {
            Precision::Display => bs::price(inputs),
            Precision::Full => bs::price_unrounded(inputs),
        }
    }
}
