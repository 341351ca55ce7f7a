use anchor_lang::prelude::*;
use crate::errors::OracleMiddlewareError;
use crate::oracle::BiasDirection;

/// What happens when a downward bias would consume the whole price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceOverflowPolicy {
    /// Fail with `ConfidenceTooHigh`.
    Reject,
    /// Return the smallest positive unit.
    ClampToOne,
}

/// Only consulted for `BiasDirection::Down`; upward and unbiased prices never reject.
pub const CONFIDENCE_OVERFLOW_POLICY: ConfidenceOverflowPolicy = ConfidenceOverflowPolicy::Reject;

/// Moves `price` by `adjustment` against the caller. Shared by the confidence
/// interval of the push source and the fixed penalty of the calldata source.
pub fn apply_bias(
    price: u128,
    adjustment: u128,
    direction: BiasDirection,
    policy: ConfidenceOverflowPolicy,
) -> Result<u128> {
    match direction {
        BiasDirection::None => Ok(price),
        BiasDirection::Up => Ok(price
            .checked_add(adjustment)
            .ok_or(OracleMiddlewareError::MathOverflow)?),
        BiasDirection::Down if adjustment < price => Ok(price - adjustment),
        BiasDirection::Down => match policy {
            ConfidenceOverflowPolicy::Reject => err!(OracleMiddlewareError::ConfidenceTooHigh),
            ConfidenceOverflowPolicy::ClampToOne => Ok(1),
        },
    }
}
