use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::errors::OracleMiddlewareError;
use crate::events::FeesWithdrawn;
use crate::state::{MiddlewareConfig, Role};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, MiddlewareConfig>,

    pub authority: Signer<'info>,

    /// CHECK: any lamport-holding account; rejected in the handler if executable
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
}

pub fn process_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let destination = &ctx.accounts.destination;
    let config = &mut ctx.accounts.config;
    config.require_role(&ctx.accounts.authority.key(), Role::FeeCollector)?;

    let config_key = config.key();
    let amount = config.take_fees(&config_key, &destination.key(), destination.executable)?;

    // fees sit on top of the config's rent-exempt balance
    let config_info = config.to_account_info();
    **config_info.try_borrow_mut_lamports()? = config_info
        .lamports()
        .checked_sub(amount)
        .ok_or(OracleMiddlewareError::MathOverflow)?;
    **destination.try_borrow_mut_lamports()? = destination
        .lamports()
        .checked_add(amount)
        .ok_or(OracleMiddlewareError::MathOverflow)?;

    emit!(FeesWithdrawn {
        destination: destination.key(),
        amount,
    });

    Ok(())
}
