use anchor_lang::prelude::*;
use solana_program::{keccak, secp256k1_recover::*};
use arrayref::{array_ref, array_refs};
use crate::constants::{CALLDATA_DECIMALS, CALLDATA_MARKER};
use crate::errors::OracleMiddlewareError;
use crate::oracle::normalize::scale_decimals;
use crate::utils::math::median;

/// feed_id | value | timestamp_ms | signature | v
pub const PACKAGE_LEN: usize = 32 + 32 + 6 + SECP256K1_SIGNATURE_LENGTH + 1;
/// Signed portion of a package.
pub const PACKAGE_MESSAGE_LEN: usize = 32 + 32 + 6;
pub const PACKAGE_COUNT_LEN: usize = 2;

/// Aggregated calldata price, 18 decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalldataPrice {
    pub price: u128,
    /// Signed package timestamp, in milliseconds.
    pub timestamp_ms: u64,
}

impl CalldataPrice {
    /// Whole seconds, rounded down.
    pub fn timestamp(&self) -> u64 {
        self.timestamp_ms / 1_000
    }
}

pub fn package_digest(message: &[u8; PACKAGE_MESSAGE_LEN]) -> [u8; 32] {
    keccak::hash(message).to_bytes()
}

/// Ethereum-style address of whoever signed `digest`.
pub fn recover_signer(digest: &[u8; 32], signature: &[u8; 64], v: u8) -> Result<[u8; 20]> {
    let recovery_id = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return err!(OracleMiddlewareError::MalformedPayload),
    };
    let signer = secp256k1_recover(digest, recovery_id, signature).map_err(|err| match err {
        Secp256k1RecoverError::InvalidSignature => error!(OracleMiddlewareError::UnauthorizedSigner),
        _ => error!(OracleMiddlewareError::MalformedPayload),
    })?;

    // convert to a raw 20 byte Ethereum address
    let hash = keccak::hash(&signer.0).to_bytes();
    Ok(*array_ref![hash, 12, 20])
}

/// Verifies every package in `payload` and returns the median of their values.
///
/// Each authorised signer may contribute one package, all packages must be
/// for `feed_id` and carry the same timestamp.
pub fn read_calldata_price(
    payload: &[u8],
    feed_id: &[u8; 32],
    signers: &[[u8; 20]],
    threshold: u8,
) -> Result<CalldataPrice> {
    let body = payload
        .strip_suffix(&CALLDATA_MARKER)
        .ok_or(OracleMiddlewareError::MalformedPayload)?;
    let count_at = body
        .len()
        .checked_sub(PACKAGE_COUNT_LEN)
        .ok_or(OracleMiddlewareError::MalformedPayload)?;
    let (packages, count) = body.split_at(count_at);
    let count = usize::from(u16::from_be_bytes(*array_ref![count, 0, PACKAGE_COUNT_LEN]));

    require!(
        packages.len() == count * PACKAGE_LEN,
        OracleMiddlewareError::MalformedPayload
    );
    require!(
        count >= usize::from(threshold),
        OracleMiddlewareError::InsufficientSigners
    );

    let mut values = Vec::with_capacity(count);
    let mut uniques = 0u16;
    let mut timestamp_ms = None;

    for package in packages.chunks_exact(PACKAGE_LEN) {
        let package = array_ref![package, 0, PACKAGE_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (message, signature, v) = array_refs![package, PACKAGE_MESSAGE_LEN, 64, 1];
        #[allow(clippy::ptr_offset_with_cast)]
        let (package_feed, value, ts) = array_refs![message, 32, 32, 6];

        require!(package_feed == feed_id, OracleMiddlewareError::FeedMismatch);

        let ts = read_u48_be(ts);
        match timestamp_ms {
            None => timestamp_ms = Some(ts),
            Some(first) => require!(first == ts, OracleMiddlewareError::MalformedPayload),
        }

        let signer = recover_signer(&package_digest(message), signature, v[0])?;
        let index = signers
            .iter()
            .position(|authorised| *authorised == signer)
            .ok_or(OracleMiddlewareError::UnauthorizedSigner)?;
        require!(uniques & (1 << index) == 0, OracleMiddlewareError::DuplicateSigner);
        uniques |= 1 << index;

        values.push(read_value(value)?);
    }

    let raw = median(&mut values).ok_or(OracleMiddlewareError::InsufficientSigners)?;
    let price = scale_decimals(raw, CALLDATA_DECIMALS)?;
    let timestamp_ms = timestamp_ms.ok_or(OracleMiddlewareError::InsufficientSigners)?;

    Ok(CalldataPrice { price, timestamp_ms })
}

fn read_u48_be(raw: &[u8; 6]) -> u64 {
    let mut buf = [0u8; 8];
    buf[2..].copy_from_slice(raw);
    u64::from_be_bytes(buf)
}

/// 32-byte big-endian value, which must fit in 128 bits and be non-zero.
fn read_value(raw: &[u8; 32]) -> Result<u128> {
    let (high, low) = array_refs![raw, 16, 16];
    require!(*high == [0u8; 16], OracleMiddlewareError::MathOverflow);
    let value = u128::from_be_bytes(*low);
    require!(value > 0, OracleMiddlewareError::WrongPrice);
    Ok(value)
}
