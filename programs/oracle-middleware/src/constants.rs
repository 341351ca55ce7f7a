/// PDA seed of the middleware configuration account.
pub const CONFIG_SEED: &[u8] = b"middleware_config";

/// Layout version written by `initialize` and reached by `migrate_config`.
pub const CONFIG_VERSION: u8 = 2;

/// Every price leaves the middleware with this many decimals.
pub const MIDDLEWARE_DECIMALS: u32 = 18;

pub const BPS_DIVISOR: u128 = 10_000;

// Payload markers
pub const PUSH_UPDATE_MAGIC: [u8; 4] = *b"PNAU";
pub const CALLDATA_MARKER: [u8; 9] = [0x00, 0x00, 0x02, 0xed, 0x57, 0x01, 0x1e, 0x00, 0x00];
pub const ROUND_SELECTOR_LEN: usize = 4;

// Calldata packages carry 8 decimal values and millisecond timestamps
pub const CALLDATA_DECIMALS: u32 = 8;
pub const CALLDATA_MAX_FUTURE_SKEW: u64 = 60;
/// Signers publish a fresh package at least this often (seconds).
pub const CALLDATA_HEARTBEAT: u64 = 10;

// Safeguard band: calldata price must stay within [reference / 3, reference * 3]
pub const SAFEGUARD_FACTOR: u128 = 3;

// Parameter bounds (seconds / bps)
pub const MIN_RECENT_PRICE_DELAY: u64 = 10;
pub const MAX_RECENT_PRICE_DELAY: u64 = 10 * 60;
pub const MIN_LOW_LATENCY_DELAY: u64 = 15 * 60;
pub const MAX_LOW_LATENCY_DELAY: u64 = 90 * 60;
pub const MIN_VALIDATION_DELAY: u64 = 1;
pub const MAX_VALIDATION_DELAY: u64 = 90 * 60;
pub const MIN_STALENESS_LIMIT: u64 = 60;
pub const MAX_STALENESS_LIMIT: u64 = 24 * 60 * 60;
pub const MAX_CONF_RATIO_BPS: u16 = 10_000;
pub const MAX_PENALTY_BPS: u16 = 1_000;

// Defaults applied by `initialize` and by migrations
pub const DEFAULT_PUSH_RECENT_DELAY: u64 = 45;
pub const DEFAULT_CALLDATA_RECENT_DELAY: u64 = 45;
pub const DEFAULT_LOW_LATENCY_DELAY: u64 = 20 * 60;
pub const DEFAULT_VALIDATION_DELAY: u64 = 24;
pub const DEFAULT_STALENESS_LIMIT: u64 = 3_720;
pub const DEFAULT_CONF_RATIO_BPS: u16 = 4_000;
pub const DEFAULT_PENALTY_BPS: u16 = 25;

// Storage capacity
pub const MAX_CALLDATA_SIGNERS: usize = 8;
pub const MAX_ROLE_GRANTS: usize = 16;
