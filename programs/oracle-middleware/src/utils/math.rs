use anchor_lang::prelude::*;
use crate::constants::BPS_DIVISOR;
use crate::errors::OracleMiddlewareError;

/// `value * bps / 10_000`, rounded down.
pub fn bps_of(value: u128, bps: u16) -> Result<u128> {
    let scaled = value
        .checked_mul(u128::from(bps))
        .ok_or(OracleMiddlewareError::MathOverflow)?;
    Ok(scaled / BPS_DIVISOR)
}

/// Median of a non-empty set; the two middle values are averaged for even counts.
pub fn median(values: &mut [u128]) -> Option<u128> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        // (a + b) / 2 without overflowing
        let (a, b) = (values[mid - 1], values[mid]);
        Some(a / 2 + b / 2 + (a % 2 + b % 2) / 2)
    }
}

pub fn current_timestamp() -> Result<u64> {
    let clock = Clock::get()?;
    u64::try_from(clock.unix_timestamp).map_err(|_| error!(OracleMiddlewareError::MathOverflow))
}
