use anchor_lang::prelude::*;
use crate::constants::MAX_ROLE_GRANTS;
use crate::errors::OracleMiddlewareError;
use crate::state::MiddlewareConfig;

/// Capabilities checked before every admin mutation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Role {
    /// Grants and revokes roles, migrates the config.
    Admin,
    /// Changes delays, ratios, fees and the signer set.
    ParamsManager,
    Pauser,
    Unpauser,
    /// Sweeps accumulated validation fees.
    FeeCollector,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::ParamsManager,
        Role::Pauser,
        Role::Unpauser,
        Role::FeeCollector,
    ];
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct RoleGrant {
    pub role: Role,
    pub member: Pubkey,
}

impl RoleGrant {
    pub const LEN: usize = 1 + 32;
}

impl MiddlewareConfig {
    pub fn has_role(&self, member: &Pubkey, role: Role) -> bool {
        self.roles
            .iter()
            .any(|grant| grant.role == role && grant.member == *member)
    }

    pub fn require_role(&self, caller: &Pubkey, role: Role) -> Result<()> {
        require!(self.has_role(caller, role), OracleMiddlewareError::Unauthorized);
        Ok(())
    }

    /// Returns `false` when the member already held the role.
    pub fn grant_role(&mut self, role: Role, member: Pubkey) -> Result<bool> {
        require!(member != Pubkey::default(), OracleMiddlewareError::ZeroAddress);
        if self.has_role(&member, role) {
            return Ok(false);
        }
        require!(
            self.roles.len() < MAX_ROLE_GRANTS,
            OracleMiddlewareError::InvalidParameter
        );
        self.roles.push(RoleGrant { role, member });
        Ok(true)
    }

    /// Returns `false` when the member did not hold the role. The last admin cannot be removed.
    pub fn revoke_role(&mut self, role: Role, member: Pubkey) -> Result<bool> {
        let Some(index) = self
            .roles
            .iter()
            .position(|grant| grant.role == role && grant.member == member)
        else {
            return Ok(false);
        };
        if role == Role::Admin {
            let admins = self.roles.iter().filter(|g| g.role == Role::Admin).count();
            require!(admins > 1, OracleMiddlewareError::InvalidParameter);
        }
        self.roles.swap_remove(index);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_admin(admin: Pubkey) -> MiddlewareConfig {
        let mut config = MiddlewareConfig::default();
        config.grant_role(Role::Admin, admin).unwrap();
        config
    }

    #[test]
    fn require_role_checks_the_exact_capability() {
        let admin = Pubkey::new_unique();
        let pauser = Pubkey::new_unique();
        let mut config = config_with_admin(admin);
        config.grant_role(Role::Pauser, pauser).unwrap();

        assert!(config.require_role(&pauser, Role::Pauser).is_ok());
        assert!(config.require_role(&pauser, Role::Unpauser).is_err());
        assert!(config.require_role(&admin, Role::Pauser).is_err());
        assert!(config.require_role(&admin, Role::Admin).is_ok());
    }

    #[test]
    fn grant_is_idempotent_and_bounded() {
        let admin = Pubkey::new_unique();
        let mut config = config_with_admin(admin);
        assert!(!config.grant_role(Role::Admin, admin).unwrap());
        assert_eq!(config.roles.len(), 1);

        for _ in 1..MAX_ROLE_GRANTS {
            assert!(config.grant_role(Role::Pauser, Pubkey::new_unique()).unwrap());
        }
        assert!(config.grant_role(Role::Pauser, Pubkey::new_unique()).is_err());
        assert!(config.grant_role(Role::Pauser, Pubkey::default()).is_err());
    }

    #[test]
    fn last_admin_cannot_be_revoked() {
        let admin = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let mut config = config_with_admin(admin);

        assert!(config.revoke_role(Role::Admin, admin).is_err());
        config.grant_role(Role::Admin, second).unwrap();
        assert!(config.revoke_role(Role::Admin, admin).unwrap());
        assert!(!config.has_role(&admin, Role::Admin));
        assert!(!config.revoke_role(Role::Admin, admin).unwrap());
    }
}
