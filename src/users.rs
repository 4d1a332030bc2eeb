use std::collections::BTreeMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::errors::{PlatformError, PlatformResult};
use crate::models::models::{Account, Role};

#[derive(Default)]
struct Accounts {
    secrets: BTreeMap<String, String>,
    // Counts successful signups ever, deletions included.
    registrations: u64,
}

/// Known accounts and their credential secrets.
///
/// Roles live in the authorization guard; the registry only decides which
/// signup was the first one.
#[derive(Default)]
pub struct IdentityRegistry {
    accounts: RwLock<Accounts>,
}

/// Read view over the registry.
///
/// While a `Roster` is alive no account can be added or removed, so components
/// that take one can check existence and mutate their own state without an
/// account vanishing in between.
pub struct Roster<'a> {
    accounts: RwLockReadGuard<'a, Accounts>,
}

/// Exclusive view over the registry, used for signup and account removal.
pub struct RosterMut<'a> {
    accounts: RwLockWriteGuard<'a, Accounts>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> Roster<'_> {
        Roster {
            accounts: self.accounts.read(),
        }
    }

    pub fn write(&self) -> RosterMut<'_> {
        RosterMut {
            accounts: self.accounts.write(),
        }
    }

    pub fn register(&self, username: &str, secret: &str) -> PlatformResult<Account> {
        self.write().register(username, secret)
    }

    pub fn exists(&self, username: &str) -> bool {
        self.read().exists(username)
    }

    pub fn verify(&self, username: &str, secret: &str) -> bool {
        self.read().verify(username, secret)
    }

    pub fn remove(&self, username: &str) -> PlatformResult<()> {
        self.write().remove(username)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.read().usernames()
    }
}

impl Roster<'_> {
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.secrets.contains_key(username)
    }

    /// Fails with `NotFound` unless the account is registered.
    pub fn require(&self, username: &str) -> PlatformResult<()> {
        if self.exists(username) {
            Ok(())
        } else {
            Err(PlatformError::user_not_found(username))
        }
    }

    pub fn verify(&self, username: &str, secret: &str) -> bool {
        self.accounts
            .secrets
            .get(username)
            .is_some_and(|stored| stored == secret)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.accounts.secrets.keys().cloned().collect()
    }
}

impl RosterMut<'_> {
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.secrets.contains_key(username)
    }

    /// Adds an account. The very first registration ever becomes the owner.
    pub fn register(&mut self, username: &str, secret: &str) -> PlatformResult<Account> {
        if self.exists(username) {
            return Err(PlatformError::Conflict(format!(
                "Username {} already exists",
                username
            )));
        }

        let role = if self.accounts.registrations == 0 {
            Role::Owner
        } else {
            Role::User
        };

        self.accounts
            .secrets
            .insert(username.to_string(), secret.to_string());
        self.accounts.registrations += 1;

        Ok(Account {
            username: username.to_string(),
            secret: secret.to_string(),
            role,
        })
    }

    pub fn remove(&mut self, username: &str) -> PlatformResult<()> {
        match self.accounts.secrets.remove(username) {
            Some(_) => Ok(()),
            None => Err(PlatformError::user_not_found(username)),
        }
    }
}
