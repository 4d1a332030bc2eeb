use std::collections::HashMap;

use parking_lot::RwLock;

use crate::core::errors::{PlatformError, PlatformResult};
use crate::models::models::Role;
use crate::users::Roster;

pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::Owner];
pub const OWNER_ONLY: &[Role] = &[Role::Owner];

/// Role table plus the permission checks built on it.
///
/// A username missing from the table resolves to `Role::User`, registered or
/// not. Entries outlive deleted accounts.
#[derive(Default)]
pub struct AuthorizationGuard {
    roles: RwLock<HashMap<String, Role>>,
}

impl AuthorizationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_role(&self, username: &str) -> Role {
        self.roles.read().get(username).copied().unwrap_or_default()
    }

    /// Fails with `PermissionDenied` unless `username` holds one of `allowed`.
    pub fn require(&self, username: &str, allowed: &[Role]) -> PlatformResult<Role> {
        let role = self.resolve_role(username);
        if allowed.contains(&role) {
            Ok(role)
        } else {
            Err(PlatformError::PermissionDenied(format!(
                "{} ({}) may not perform this action",
                username, role
            )))
        }
    }

    pub(crate) fn assign(&self, username: &str, role: Role) {
        self.roles.write().insert(username.to_string(), role);
    }

    pub fn promote(
        &self,
        roster: &Roster<'_>,
        requester: &str,
        target: &str,
    ) -> PlatformResult<Role> {
        self.set_role(roster, requester, target, Role::Admin)
    }

    pub fn demote(
        &self,
        roster: &Roster<'_>,
        requester: &str,
        target: &str,
    ) -> PlatformResult<Role> {
        self.set_role(roster, requester, target, Role::User)
    }

    fn set_role(
        &self,
        roster: &Roster<'_>,
        requester: &str,
        target: &str,
        role: Role,
    ) -> PlatformResult<Role> {
        // Permission is checked before the target lookup.
        self.require(requester, OWNER_ONLY)?;
        roster.require(target)?;
        self.assign(target, role);
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::IdentityRegistry;

    fn setup() -> (IdentityRegistry, AuthorizationGuard) {
        let registry = IdentityRegistry::new();
        let guard = AuthorizationGuard::new();
        for (name, secret) in [("alice", "p1"), ("bob", "p2")] {
            let account = registry.register(name, secret).unwrap();
            guard.assign(name, account.role);
        }
        (registry, guard)
    }

    #[test]
    fn unknown_usernames_resolve_to_user() {
        let guard = AuthorizationGuard::new();
        assert_eq!(guard.resolve_role("nobody"), Role::User);
        assert!(guard.require("nobody", &[Role::User]).is_ok());
        assert!(matches!(
            guard.require("nobody", ADMIN_ROLES),
            Err(PlatformError::PermissionDenied(_))
        ));
    }

    #[test]
    fn owner_promotes_and_demotes() {
        let (registry, guard) = setup();
        let roster = registry.read();

        assert_eq!(guard.promote(&roster, "alice", "bob"), Ok(Role::Admin));
        assert_eq!(guard.resolve_role("bob"), Role::Admin);
        assert_eq!(guard.demote(&roster, "alice", "bob"), Ok(Role::User));
        assert_eq!(guard.resolve_role("bob"), Role::User);
    }

    #[test]
    fn promote_checks_permission_before_target() {
        let (registry, guard) = setup();
        let roster = registry.read();

        // bob is a plain user; a missing target still reports PermissionDenied.
        assert!(matches!(
            guard.promote(&roster, "bob", "ghost"),
            Err(PlatformError::PermissionDenied(_))
        ));
        assert!(matches!(
            guard.promote(&roster, "alice", "ghost"),
            Err(PlatformError::NotFound(_))
        ));
        assert_eq!(guard.resolve_role("ghost"), Role::User);
    }

    #[test]
    fn admins_cannot_promote() {
        let (registry, guard) = setup();
        registry.register("carol", "p3").unwrap();
        let roster = registry.read();

        guard.promote(&roster, "alice", "bob").unwrap();
        assert!(matches!(
            guard.promote(&roster, "bob", "carol"),
            Err(PlatformError::PermissionDenied(_))
        ));
    }
}
