use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Days per year used to convert a maturity in calendar days to years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// European option payoff direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parses `"call"` or `"put"`, ignoring case and surrounding whitespace.
impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::invalid(
                "option_type",
                s,
                "expected 'call' or 'put'",
            )),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionType> for String {
    fn from(option_type: OptionType) -> Self {
        option_type.as_str().to_string()
    }
}

/// Market inputs for a single Black-Scholes evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingInputs {
    /// Underlying asset price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to maturity in calendar days (T)
    pub days_to_maturity: f64,
    /// Annualized risk-free rate as a decimal (r)
    pub risk_free_rate: f64,
    /// Annualized volatility as a decimal (sigma)
    pub volatility: f64,
    pub option_type: OptionType,
}

impl PricingInputs {
    pub fn new(
        spot: f64,
        strike: f64,
        days_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            days_to_maturity,
            risk_free_rate,
            volatility,
            option_type,
        }
    }

    /// Copy of these inputs with a different underlying price.
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Copy of these inputs with a different option type.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }

    /// Time to maturity in years.
    pub fn years_to_maturity(&self) -> f64 {
        self.days_to_maturity / DAYS_PER_YEAR
    }

    /// Reject inputs for which the closed form is undefined.
    ///
    /// Spot, strike, maturity and volatility must be finite and strictly
    /// positive; the rate may take any finite value.
    pub fn validate(&self) -> Result<(), PricingError> {
        let positive = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("days_to_maturity", self.days_to_maturity),
            ("volatility", self.volatility),
        ];
        for (name, value) in positive {
            if !value.is_finite() {
                return Err(PricingError::invalid(name, value, "must be finite"));
            }
            if value <= 0.0 {
                return Err(PricingError::invalid(name, value, "must be positive"));
            }
        }
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::invalid(
                "risk_free_rate",
                self.risk_free_rate,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Price and sensitivities of a European option.
///
/// Theta is per calendar day, vega per one volatility point and rho per one
/// rate point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    pub d1: f64,
    pub d2: f64,
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl PricingResult {
    /// Outputs in the order `(d1, d2, price, delta, gamma, theta, vega, rho)`.
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.d1, self.d2, self.price, self.delta, self.gamma, self.theta, self.vega, self.rho,
        ]
    }

    pub fn get(&self, field: OutputField) -> f64 {
        self.to_array()[field.index()]
    }

    /// Round every field to its display precision.
    pub fn rounded(&self) -> Self {
        let r = |field: OutputField| round_to(self.get(field), field.decimals());
        Self {
            d1: r(OutputField::D1),
            d2: r(OutputField::D2),
            price: r(OutputField::Price),
            delta: r(OutputField::Delta),
            gamma: r(OutputField::Gamma),
            theta: r(OutputField::Theta),
            vega: r(OutputField::Vega),
            rho: r(OutputField::Rho),
        }
    }
}

/// Round to `decimals` places.
///
/// Goes through the exact decimal expansion of `value`, so the result is the
/// correctly rounded decimal with exact ties going to the even digit.
/// Scaling by a power of ten first would let the multiplication push values
/// just below a tie over it.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// One of the eight pricing outputs, used to select a series out of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OutputField {
    D1,
    D2,
    Price,
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl OutputField {
    pub const ALL: [OutputField; 8] = [
        OutputField::D1,
        OutputField::D2,
        OutputField::Price,
        OutputField::Delta,
        OutputField::Gamma,
        OutputField::Theta,
        OutputField::Vega,
        OutputField::Rho,
    ];

    /// The price followed by the five Greeks.
    pub const CHARTED: [OutputField; 6] = [
        OutputField::Price,
        OutputField::Delta,
        OutputField::Gamma,
        OutputField::Theta,
        OutputField::Vega,
        OutputField::Rho,
    ];

    /// Position in [`PricingResult::to_array`].
    pub fn index(&self) -> usize {
        match self {
            OutputField::D1 => 0,
            OutputField::D2 => 1,
            OutputField::Price => 2,
            OutputField::Delta => 3,
            OutputField::Gamma => 4,
            OutputField::Theta => 5,
            OutputField::Vega => 6,
            OutputField::Rho => 7,
        }
    }

    pub fn decimals(&self) -> u32 {
        match self {
            OutputField::Price => 2,
            _ => 3,
        }
    }

    /// Human readable name used in chart titles and console output.
    pub fn label(&self) -> &'static str {
        match self {
            OutputField::D1 => "d1",
            OutputField::D2 => "d2",
            OutputField::Price => "Option Price",
            OutputField::Delta => "Delta",
            OutputField::Gamma => "Gamma",
            OutputField::Theta => "Theta",
            OutputField::Vega => "Vega",
            OutputField::Rho => "Rho",
        }
    }

    /// Lowercase identifier, used for CSV headers and output file names.
    pub fn key(&self) -> &'static str {
        match self {
            OutputField::D1 => "d1",
            OutputField::D2 => "d2",
            OutputField::Price => "price",
            OutputField::Delta => "delta",
            OutputField::Gamma => "gamma",
            OutputField::Theta => "theta",
            OutputField::Vega => "vega",
            OutputField::Rho => "rho",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            OutputField::Price => "option_price",
            other => other.key(),
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for OutputField {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        OutputField::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| PricingError::invalid("output_field", s, "unknown output field"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_parsing_normalizes_case() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
    }

    #[test]
    fn option_type_parsing_rejects_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidArgument {
                name: "option_type",
                value: "straddle".to_string(),
                reason: "expected 'call' or 'put'",
            }
        );
    }

    #[test]
    fn validate_rejects_non_positive_inputs() {
        let base = PricingInputs::new(100.0, 100.0, 30.0, 0.05, 0.2, OptionType::Call);
        assert!(base.validate().is_ok());

        let cases = [
            ("spot", base.with_spot(0.0)),
            ("strike", PricingInputs { strike: -1.0, ..base }),
            ("days_to_maturity", PricingInputs { days_to_maturity: 0.0, ..base }),
            ("volatility", PricingInputs { volatility: 0.0, ..base }),
            ("risk_free_rate", PricingInputs { risk_free_rate: f64::NAN, ..base }),
            ("spot", base.with_spot(f64::INFINITY)),
        ];
        for (expected, inputs) in cases {
            match inputs.validate() {
                Err(PricingError::InvalidArgument { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidArgument for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn negative_rate_is_allowed() {
        let inputs = PricingInputs::new(100.0, 100.0, 30.0, -0.01, 0.2, OptionType::Put);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn rounding_uses_field_precision() {
        let result = PricingResult {
            d1: 0.100342,
            d2: 0.043004,
            price: 2.493377,
            delta: 0.539964,
            gamma: 0.069228,
            theta: -0.044988,
            vega: 0.113799,
            rho: 0.042331,
        };
        let r = result.rounded();
        assert_eq!(r.to_array(), [0.1, 0.043, 2.49, 0.54, 0.069, -0.045, 0.114, 0.042]);
    }

    #[test]
    fn rounding_near_and_exact_ties() {
        // 2.1854999999999998 sits below the 2.1855 tie
        assert_eq!(round_to(2.1854999999999998, 3), 2.185);
        // exact binary ties go to the even digit
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(-0.0625, 3), -0.062);
        assert_eq!(round_to(2.4933768, 2), 2.49);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn output_field_metadata_is_consistent() {
        for (i, field) in OutputField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(field.key().parse::<OutputField>().unwrap(), *field);
        }
        assert_eq!(OutputField::Price.file_stem(), "option_price");
        assert_eq!(OutputField::Theta.file_stem(), "theta");
    }
}
