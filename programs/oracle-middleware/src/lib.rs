use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod state;
pub mod utils;

use instructions::*;
use oracle::PriceRecord;
use state::{InitializeParams, Role};

declare_id!("4DnEeaaaHMtPvnJspuZqDHoLqEZoPdq7vJ7FcoZDxL6R");

#[program]
pub mod oracle_middleware {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::admin::initialize::process_initialize(ctx, params)
    }

    /// `action` is the `Action` discriminant; unknown values fail `UnsupportedAction`.
    pub fn parse_and_validate_price(
        ctx: Context<ValidatePrice>,
        payload: Vec<u8>,
        target_timestamp: u64,
        action: u8,
        action_id: [u8; 32],
        attached_payment: u64,
    ) -> Result<PriceRecord> {
        instructions::oracle::validate_price::process_parse_and_validate_price(
            ctx,
            payload,
            target_timestamp,
            action,
            action_id,
            attached_payment,
        )
    }

    pub fn validation_cost(ctx: Context<ValidationCost>, payload: Vec<u8>, action: u8) -> Result<u64> {
        instructions::oracle::validation_cost::process_validation_cost(ctx, payload, action)
    }

    pub fn set_push_recent_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
        instructions::admin::params::process_set_push_recent_delay(ctx, delay)
    }

    pub fn set_calldata_recent_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
        instructions::admin::params::process_set_calldata_recent_delay(ctx, delay)
    }

    pub fn set_low_latency_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
        instructions::admin::params::process_set_low_latency_delay(ctx, delay)
    }

    pub fn set_validation_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
        instructions::admin::params::process_set_validation_delay(ctx, delay)
    }

    pub fn set_on_chain_staleness_limit(ctx: Context<ConfigAdmin>, limit: u64) -> Result<()> {
        instructions::admin::params::process_set_on_chain_staleness_limit(ctx, limit)
    }

    pub fn set_conf_ratio(ctx: Context<ConfigAdmin>, bps: u16) -> Result<()> {
        instructions::admin::params::process_set_conf_ratio(ctx, bps)
    }

    pub fn set_penalty_bps(ctx: Context<ConfigAdmin>, bps: u16) -> Result<()> {
        instructions::admin::params::process_set_penalty_bps(ctx, bps)
    }

    pub fn set_push_update_fee(ctx: Context<ConfigAdmin>, fee: u64) -> Result<()> {
        instructions::admin::params::process_set_push_update_fee(ctx, fee)
    }

    pub fn set_calldata_signers(ctx: Context<ConfigAdmin>, signers: Vec<[u8; 20]>, threshold: u8) -> Result<()> {
        instructions::admin::params::process_set_calldata_signers(ctx, signers, threshold)
    }

    pub fn pause(ctx: Context<ConfigAdmin>) -> Result<()> {
        instructions::admin::pause::process_pause(ctx)
    }

    pub fn unpause(ctx: Context<ConfigAdmin>) -> Result<()> {
        instructions::admin::pause::process_unpause(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::admin::withdraw::process_withdraw(ctx)
    }

    pub fn grant_role(ctx: Context<ConfigAdmin>, role: Role, member: Pubkey) -> Result<()> {
        instructions::admin::roles::process_grant_role(ctx, role, member)
    }

    pub fn revoke_role(ctx: Context<ConfigAdmin>, role: Role, member: Pubkey) -> Result<()> {
        instructions::admin::roles::process_revoke_role(ctx, role, member)
    }

    pub fn migrate_config(ctx: Context<ConfigAdmin>) -> Result<()> {
        instructions::admin::migrate::process_migrate_config(ctx)
    }
}
