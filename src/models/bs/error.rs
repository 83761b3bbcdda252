use thiserror::Error;

/// Errors raised by the Black-Scholes pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// An input was malformed or outside the model's domain.
    ///
    /// Carries the offending value as text so that both numeric inputs and
    /// unparseable option types can be reported the same way.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Inputs passed validation but the closed-form evaluation overflowed.
    #[error("non-finite `{field}` produced by the closed-form evaluation")]
    DomainError { field: &'static str },
}

impl PricingError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        PricingError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PricingError::InvalidArgument { .. })
    }
}
