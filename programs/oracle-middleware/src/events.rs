use anchor_lang::prelude::*;
use crate::oracle::{Action, PriceSource};
use crate::state::Role;

#[event]
pub struct MiddlewareInitialized {
    pub authority: Pubkey,
    pub round_feed: Pubkey,
    pub push_feed_id: [u8; 32],
    pub calldata_feed_id: [u8; 32],
    pub version: u8,
}

#[event]
pub struct PriceValidated {
    pub action: Action,
    pub source: PriceSource,
    pub price: u128,
    pub timestamp: u64,
    pub target_timestamp: u64,
    /// Caller-defined correlation id, not interpreted.
    pub action_id: [u8; 32],
    pub fee: u64,
}

#[event]
pub struct PushRecentDelayUpdated {
    pub delay: u64,
}

#[event]
pub struct CalldataRecentDelayUpdated {
    pub delay: u64,
}

#[event]
pub struct LowLatencyDelayUpdated {
    pub delay: u64,
}

#[event]
pub struct ValidationDelayUpdated {
    pub delay: u64,
}

#[event]
pub struct OnChainStalenessLimitUpdated {
    pub limit: u64,
}

#[event]
pub struct ConfRatioUpdated {
    pub bps: u16,
}

#[event]
pub struct PenaltyBpsUpdated {
    pub bps: u16,
}

#[event]
pub struct PushUpdateFeeUpdated {
    pub fee: u64,
}

#[event]
pub struct CalldataSignersUpdated {
    pub signers: Vec<[u8; 20]>,
    pub threshold: u8,
}

#[event]
pub struct MiddlewarePaused {
    pub by: Pubkey,
}

#[event]
pub struct MiddlewareUnpaused {
    pub by: Pubkey,
}

#[event]
pub struct FeesWithdrawn {
    pub destination: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RoleGranted {
    pub role: Role,
    pub member: Pubkey,
    pub by: Pubkey,
}

#[event]
pub struct RoleRevoked {
    pub role: Role,
    pub member: Pubkey,
    pub by: Pubkey,
}

#[event]
pub struct ConfigMigrated {
    pub from_version: u8,
    pub to_version: u8,
}
