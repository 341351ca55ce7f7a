//! Price selection and validation, independent of account plumbing.
//!
//! Instructions build the source adapters from accounts and hand them to
//! [`OracleMiddleware`]; everything below is plain computation over the config
//! and the adapters, so it runs the same on-chain and in unit tests.

pub mod action;
pub mod bias;
pub mod middleware;
pub mod normalize;
pub mod payload;
pub mod safeguard;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_utils;

use anchor_lang::prelude::*;

pub use action::*;
pub use middleware::*;
pub use payload::SourcePayload;

/// Price with `MIDDLEWARE_DECIMALS` decimals and the source timestamp it was observed at.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRecord {
    pub price: u128,
    pub timestamp: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    Push,
    OnChainLatest,
    OnChainRound,
    Calldata,
}
