use anchor_lang::prelude::*;
use crate::errors::OracleMiddlewareError;
use crate::events::{RoleGranted, RoleRevoked};
use crate::instructions::admin::params::ConfigAdmin;
use crate::state::Role;

pub fn process_grant_role(ctx: Context<ConfigAdmin>, role: Role, member: Pubkey) -> Result<()> {
    let by = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.require_role(&by, Role::Admin)?;

    if config.grant_role(role, member)? {
        emit!(RoleGranted { role, member, by });
    }
    Ok(())
}

pub fn process_revoke_role(ctx: Context<ConfigAdmin>, role: Role, member: Pubkey) -> Result<()> {
    let by = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;
    config.require_role(&by, Role::Admin)?;
    require!(
        !(role == Role::Admin && member == by),
        OracleMiddlewareError::InvalidParameter
    );

    if config.revoke_role(role, member)? {
        emit!(RoleRevoked { role, member, by });
    }
    Ok(())
}
