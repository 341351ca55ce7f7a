use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::OracleMiddlewareError;
use crate::state::{Role, RoleGrant};

#[account]
#[derive(Default)]
pub struct MiddlewareConfig {
    pub version: u8,                        // 1
    pub bump: u8,                           // 1
    pub paused: bool,                       // 1
    pub push_feed_id: [u8; 32],             // 32
    pub push_update_fee: u64,               // 8 (lamports per update)
    pub round_feed: Pubkey,                 // 32
    pub calldata_feed_id: [u8; 32],         // 32
    pub calldata_signers: Vec<[u8; 20]>,    // 4 + 20 * MAX_CALLDATA_SIGNERS
    pub calldata_signer_threshold: u8,      // 1
    pub on_chain_staleness_limit: u64,      // 8
    pub push_recent_delay: u64,             // 8
    pub calldata_recent_delay: u64,         // 8
    pub low_latency_delay: u64,             // 8
    pub validation_delay: u64,              // 8
    pub conf_ratio_bps: u16,                // 2
    pub penalty_bps: u16,                   // 2
    pub unclaimed_fees: u64,                // 8
    pub roles: Vec<RoleGrant>,              // 4 + 33 * MAX_ROLE_GRANTS
}

impl MiddlewareConfig {
    pub const LEN: usize = 8
        + 1 + 1 + 1
        + 32 + 8
        + 32
        + 32 + (4 + 20 * MAX_CALLDATA_SIGNERS) + 1
        + 8 * 5
        + 2 + 2
        + 8
        + (4 + RoleGrant::LEN * MAX_ROLE_GRANTS);

    pub fn initialize(
        &mut self,
        bump: u8,
        authority: Pubkey,
        round_feed: Pubkey,
        params: &InitializeParams,
    ) -> Result<()> {
        self.version = CONFIG_VERSION;
        self.bump = bump;
        self.paused = false;
        self.push_feed_id = params.push_feed_id;
        self.push_update_fee = params.push_update_fee;
        self.round_feed = round_feed;
        self.calldata_feed_id = params.calldata_feed_id;
        self.on_chain_staleness_limit = DEFAULT_STALENESS_LIMIT;
        self.push_recent_delay = DEFAULT_PUSH_RECENT_DELAY;
        self.calldata_recent_delay = DEFAULT_CALLDATA_RECENT_DELAY;
        self.low_latency_delay = DEFAULT_LOW_LATENCY_DELAY;
        self.validation_delay = DEFAULT_VALIDATION_DELAY;
        self.conf_ratio_bps = DEFAULT_CONF_RATIO_BPS;
        self.penalty_bps = DEFAULT_PENALTY_BPS;
        self.unclaimed_fees = 0;
        self.set_calldata_signers(params.calldata_signers.clone(), params.calldata_signer_threshold)?;

        self.roles = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            self.grant_role(role, authority)?;
        }
        Ok(())
    }

    pub fn set_push_recent_delay(&mut self, delay: u64) -> Result<()> {
        require!(
            (MIN_RECENT_PRICE_DELAY..=MAX_RECENT_PRICE_DELAY).contains(&delay),
            OracleMiddlewareError::InvalidParameter
        );
        self.push_recent_delay = delay;
        Ok(())
    }

    pub fn set_calldata_recent_delay(&mut self, delay: u64) -> Result<()> {
        require!(
            (MIN_RECENT_PRICE_DELAY..=MAX_RECENT_PRICE_DELAY).contains(&delay),
            OracleMiddlewareError::InvalidParameter
        );
        self.calldata_recent_delay = delay;
        Ok(())
    }

    /// The low-latency window must stay open longer than the mandatory validation delay.
    pub fn set_low_latency_delay(&mut self, delay: u64) -> Result<()> {
        require!(
            (MIN_LOW_LATENCY_DELAY..=MAX_LOW_LATENCY_DELAY).contains(&delay),
            OracleMiddlewareError::InvalidParameter
        );
        require!(delay > self.validation_delay, OracleMiddlewareError::InvalidParameter);
        self.low_latency_delay = delay;
        Ok(())
    }

    pub fn set_validation_delay(&mut self, delay: u64) -> Result<()> {
        require!(
            (MIN_VALIDATION_DELAY..=MAX_VALIDATION_DELAY).contains(&delay),
            OracleMiddlewareError::InvalidParameter
        );
        require!(delay < self.low_latency_delay, OracleMiddlewareError::InvalidParameter);
        self.validation_delay = delay;
        Ok(())
    }

    pub fn set_on_chain_staleness_limit(&mut self, limit: u64) -> Result<()> {
        require!(
            (MIN_STALENESS_LIMIT..=MAX_STALENESS_LIMIT).contains(&limit),
            OracleMiddlewareError::InvalidParameter
        );
        self.on_chain_staleness_limit = limit;
        Ok(())
    }

    pub fn set_conf_ratio(&mut self, bps: u16) -> Result<()> {
        require!(bps <= MAX_CONF_RATIO_BPS, OracleMiddlewareError::InvalidParameter);
        self.conf_ratio_bps = bps;
        Ok(())
    }

    pub fn set_penalty_bps(&mut self, bps: u16) -> Result<()> {
        require!(bps <= MAX_PENALTY_BPS, OracleMiddlewareError::InvalidParameter);
        self.penalty_bps = bps;
        Ok(())
    }

    pub fn set_push_update_fee(&mut self, fee: u64) {
        self.push_update_fee = fee;
    }

    pub fn set_calldata_signers(&mut self, signers: Vec<[u8; 20]>, threshold: u8) -> Result<()> {
        require!(
            !signers.is_empty() && signers.len() <= MAX_CALLDATA_SIGNERS,
            OracleMiddlewareError::InvalidParameter
        );
        require!(
            threshold > 0 && usize::from(threshold) <= signers.len(),
            OracleMiddlewareError::InvalidParameter
        );
        for (i, signer) in signers.iter().enumerate() {
            require!(*signer != [0u8; 20], OracleMiddlewareError::ZeroAddress);
            require!(
                !signers[..i].contains(signer),
                OracleMiddlewareError::InvalidParameter
            );
        }
        self.calldata_signers = signers;
        self.calldata_signer_threshold = threshold;
        Ok(())
    }

    /// Brings an account written by an older program version up to `CONFIG_VERSION`.
    /// Returns the version migrated from.
    pub fn migrate(&mut self) -> Result<u8> {
        require!(self.version < CONFIG_VERSION, OracleMiddlewareError::AlreadyMigrated);
        let from = self.version;

        // v1 had no mandatory initiate/validate delay and no calldata penalty
        if self.version < 2 {
            if self.validation_delay == 0 {
                self.validation_delay = DEFAULT_VALIDATION_DELAY;
            }
            if self.penalty_bps == 0 {
                self.penalty_bps = DEFAULT_PENALTY_BPS;
            }
            self.version = 2;
        }

        Ok(from)
    }

    pub fn credit_fees(&mut self, fee: u64) -> Result<()> {
        self.unclaimed_fees = self
            .unclaimed_fees
            .checked_add(fee)
            .ok_or(OracleMiddlewareError::MathOverflow)?;
        Ok(())
    }

    /// Clears the fee balance for payment to `destination` and returns the amount owed.
    /// The config account itself and executable accounts cannot receive fees.
    pub fn take_fees(
        &mut self,
        config_key: &Pubkey,
        destination: &Pubkey,
        destination_executable: bool,
    ) -> Result<u64> {
        require!(*destination != Pubkey::default(), OracleMiddlewareError::ZeroAddress);
        require!(
            !destination_executable && destination != config_key,
            OracleMiddlewareError::RecipientRejected
        );
        require!(self.unclaimed_fees > 0, OracleMiddlewareError::InvalidParameter);

        let amount = self.unclaimed_fees;
        self.unclaimed_fees = 0;
        Ok(amount)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    pub push_feed_id: [u8; 32],
    pub push_update_fee: u64,
    pub calldata_feed_id: [u8; 32],
    pub calldata_signers: Vec<[u8; 20]>,
    pub calldata_signer_threshold: u8,
}
