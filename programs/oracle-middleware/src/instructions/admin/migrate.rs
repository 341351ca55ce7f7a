use anchor_lang::prelude::*;
use crate::events::ConfigMigrated;
use crate::instructions::admin::params::ConfigAdmin;
use crate::state::Role;

/// Run once after an upgrade that bumps `CONFIG_VERSION`.
pub fn process_migrate_config(ctx: Context<ConfigAdmin>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.require_role(&ctx.accounts.authority.key(), Role::Admin)?;

    let from_version = config.migrate()?;
    msg!("Config migrated from v{} to v{}", from_version, config.version);
    emit!(ConfigMigrated {
        from_version,
        to_version: config.version,
    });
    Ok(())
}
