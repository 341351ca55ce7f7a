use anchor_lang::prelude::*;
use crate::constants::MIDDLEWARE_DECIMALS;
use crate::errors::OracleMiddlewareError;

/// Rescales `raw * 10^exponent` to `MIDDLEWARE_DECIMALS` decimals.
/// Sources only ever report fractional (non-positive) exponents.
pub fn normalize(raw: u128, exponent: i32) -> Result<u128> {
    require!(exponent <= 0, OracleMiddlewareError::MalformedExponent);
    scale_decimals(raw, exponent.unsigned_abs())
}

/// Rescales a value carrying `decimals` decimals to `MIDDLEWARE_DECIMALS` decimals.
pub fn scale_decimals(raw: u128, decimals: u32) -> Result<u128> {
    if decimals <= MIDDLEWARE_DECIMALS {
        let factor = 10u128
            .checked_pow(MIDDLEWARE_DECIMALS - decimals)
            .ok_or(OracleMiddlewareError::MathOverflow)?;
        Ok(raw
            .checked_mul(factor)
            .ok_or(OracleMiddlewareError::MathOverflow)?)
    } else {
        let factor = 10u128
            .checked_pow(decimals - MIDDLEWARE_DECIMALS)
            .ok_or(OracleMiddlewareError::MathOverflow)?;
        Ok(raw / factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::test_utils::assert_error;

    #[test]
    fn scales_up_fractional_exponents() {
        assert_eq!(normalize(2_000_00000000, -8).unwrap(), 2_000 * 10u128.pow(18));
        assert_eq!(normalize(5, 0).unwrap(), 5 * 10u128.pow(18));
        assert_eq!(normalize(7, -18).unwrap(), 7);
    }

    #[test]
    fn scales_down_beyond_eighteen_decimals() {
        assert_eq!(normalize(1_234_567, -20).unwrap(), 12_345);
        assert_eq!(scale_decimals(10u128.pow(24), 24).unwrap(), 10u128.pow(18));
    }

    #[test]
    fn positive_exponent_is_malformed() {
        assert_error(normalize(1, 1), OracleMiddlewareError::MalformedExponent);
        assert_error(normalize(1, i32::MAX), OracleMiddlewareError::MalformedExponent);
    }

    #[test]
    fn overflow_is_reported() {
        assert_error(normalize(u128::MAX, -8), OracleMiddlewareError::MathOverflow);
        assert_error(normalize(1, i32::MIN), OracleMiddlewareError::MathOverflow);
    }
}
