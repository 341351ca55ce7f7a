use anchor_lang::prelude::*;
use crate::events::{MiddlewarePaused, MiddlewareUnpaused};
use crate::instructions::admin::params::ConfigAdmin;
use crate::state::Role;

pub fn process_pause(ctx: Context<ConfigAdmin>) -> Result<()> {
    let by = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.require_role(&by, Role::Pauser)?;
    config.paused = true;

    msg!("Price validation paused");
    emit!(MiddlewarePaused { by });
    Ok(())
}

pub fn process_unpause(ctx: Context<ConfigAdmin>) -> Result<()> {
    let by = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.require_role(&by, Role::Unpauser)?;
    config.paused = false;

    msg!("Price validation resumed");
    emit!(MiddlewareUnpaused { by });
    Ok(())
}
