use anchor_lang::prelude::*;
use crate::constants::SAFEGUARD_FACTOR;
use crate::errors::OracleMiddlewareError;

/// Whether a price sitting exactly on `reference / 3` or `reference * 3` passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafeguardBound {
    Inclusive,
    Exclusive,
}

pub const SAFEGUARD_BOUND: SafeguardBound = SafeguardBound::Inclusive;

/// Rejects `candidate` when it is outside the band around the trusted `reference`.
pub fn check_divergence(candidate: u128, reference: u128, bound: SafeguardBound) -> Result<()> {
    let lower = reference / SAFEGUARD_FACTOR;
    let upper = reference
        .checked_mul(SAFEGUARD_FACTOR)
        .ok_or(OracleMiddlewareError::MathOverflow)?;

    let within = match bound {
        SafeguardBound::Inclusive => candidate >= lower && candidate <= upper,
        SafeguardBound::Exclusive => candidate > lower && candidate < upper,
    };
    if !within {
        msg!("Safeguard rejected {} against reference {}", candidate, reference);
    }
    require!(within, OracleMiddlewareError::CrossSourceDivergence);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::test_utils::assert_error;

    const REFERENCE: u128 = 2_000 * 10u128.pow(18);

    #[test]
    fn inclusive_band_accepts_its_edges() {
        check_divergence(REFERENCE * 3, REFERENCE, SafeguardBound::Inclusive).unwrap();
        check_divergence(REFERENCE / 3, REFERENCE, SafeguardBound::Inclusive).unwrap();
        check_divergence(REFERENCE, REFERENCE, SafeguardBound::Inclusive).unwrap();
    }

    #[test]
    fn exclusive_band_rejects_its_edges() {
        assert_error(
            check_divergence(REFERENCE * 3, REFERENCE, SafeguardBound::Exclusive),
            OracleMiddlewareError::CrossSourceDivergence,
        );
        assert_error(
            check_divergence(REFERENCE / 3, REFERENCE, SafeguardBound::Exclusive),
            OracleMiddlewareError::CrossSourceDivergence,
        );
        check_divergence(REFERENCE * 3 - 1, REFERENCE, SafeguardBound::Exclusive).unwrap();
        check_divergence(REFERENCE / 3 + 1, REFERENCE, SafeguardBound::Exclusive).unwrap();
    }

    #[test]
    fn one_unit_past_the_band_fails_either_way() {
        for bound in [SafeguardBound::Inclusive, SafeguardBound::Exclusive] {
            assert_error(
                check_divergence(REFERENCE * 3 + 1, REFERENCE, bound),
                OracleMiddlewareError::CrossSourceDivergence,
            );
            assert_error(
                check_divergence(REFERENCE / 3 - 1, REFERENCE, bound),
                OracleMiddlewareError::CrossSourceDivergence,
            );
        }
    }
}
