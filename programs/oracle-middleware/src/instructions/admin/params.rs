use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::events::*;
use crate::state::{MiddlewareConfig, Role};

/// Signer acting on the config under one of its roles.
#[derive(Accounts)]
pub struct ConfigAdmin<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, MiddlewareConfig>,
    pub authority: Signer<'info>,
}

impl ConfigAdmin<'_> {
    pub fn params_manager(&mut self) -> Result<&mut MiddlewareConfig> {
        self.config.require_role(&self.authority.key(), Role::ParamsManager)?;
        Ok(&mut *self.config)
    }
}

pub fn process_set_push_recent_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_push_recent_delay(delay)?;
    emit!(PushRecentDelayUpdated { delay });
    Ok(())
}

pub fn process_set_calldata_recent_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_calldata_recent_delay(delay)?;
    emit!(CalldataRecentDelayUpdated { delay });
    Ok(())
}

pub fn process_set_low_latency_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_low_latency_delay(delay)?;
    emit!(LowLatencyDelayUpdated { delay });
    Ok(())
}

pub fn process_set_validation_delay(ctx: Context<ConfigAdmin>, delay: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_validation_delay(delay)?;
    emit!(ValidationDelayUpdated { delay });
    Ok(())
}

pub fn process_set_on_chain_staleness_limit(ctx: Context<ConfigAdmin>, limit: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_on_chain_staleness_limit(limit)?;
    emit!(OnChainStalenessLimitUpdated { limit });
    Ok(())
}

pub fn process_set_conf_ratio(ctx: Context<ConfigAdmin>, bps: u16) -> Result<()> {
    ctx.accounts.params_manager()?.set_conf_ratio(bps)?;
    emit!(ConfRatioUpdated { bps });
    Ok(())
}

pub fn process_set_penalty_bps(ctx: Context<ConfigAdmin>, bps: u16) -> Result<()> {
    ctx.accounts.params_manager()?.set_penalty_bps(bps)?;
    emit!(PenaltyBpsUpdated { bps });
    Ok(())
}

pub fn process_set_push_update_fee(ctx: Context<ConfigAdmin>, fee: u64) -> Result<()> {
    ctx.accounts.params_manager()?.set_push_update_fee(fee);
    emit!(PushUpdateFeeUpdated { fee });
    Ok(())
}

pub fn process_set_calldata_signers(
    ctx: Context<ConfigAdmin>,
    signers: Vec<[u8; 20]>,
    threshold: u8,
) -> Result<()> {
    ctx.accounts
        .params_manager()?
        .set_calldata_signers(signers.clone(), threshold)?;
    emit!(CalldataSignersUpdated { signers, threshold });
    Ok(())
}
