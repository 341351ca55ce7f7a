use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::oracle::sources::PythReceiverSource;
use crate::oracle::validation_cost;
use crate::state::MiddlewareConfig;

#[derive(Accounts)]
pub struct ValidationCost<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, MiddlewareConfig>,
}

/// Read-only quote; simulate the transaction to read the return value.
pub fn process_validation_cost(ctx: Context<ValidationCost>, payload: Vec<u8>, action: u8) -> Result<u64> {
    let push = PythReceiverSource::new(None, ctx.accounts.config.push_update_fee);
    validation_cost(&push, &payload, action)
}
