use std::collections::HashMap;

use tracing::debug;

use crate::auth::password::{hash_password, verify_password};
use crate::model::RecordCategory;

/// Built-in portal accounts: one administrator per record category.
pub const DEFAULT_ACCOUNTS: &[(&str, &str, RecordCategory)] = &[
    ("salary_admin", "salary@123", RecordCategory::Salaries),
    ("gem_admin", "gem@123", RecordCategory::GemPurchases),
    ("medical_admin", "medical@123", RecordCategory::MedicalClaims),
    ("ltc_admin", "ltc@123", RecordCategory::LtcRecords),
];

struct Account {
    password_hash: String,
    role: RecordCategory,
}

/// Static username → (password, role) table. Passwords are kept as argon2
/// hashes; a login succeeds only on an exact username and password match.
pub struct CredentialStore {
    accounts: HashMap<String, Account>,
}

impl CredentialStore {
    pub fn new(accounts: &[(&str, &str, RecordCategory)]) -> Result<Self, argon2::password_hash::Error> {
        let mut map = HashMap::with_capacity(accounts.len());

        for (username, password, role) in accounts {
            map.insert(
                username.to_string(),
                Account {
                    password_hash: hash_password(password)?,
                    role: *role,
                },
            );
        }

        Ok(Self { accounts: map })
    }

    pub fn with_defaults() -> Result<Self, argon2::password_hash::Error> {
        Self::new(DEFAULT_ACCOUNTS)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<RecordCategory> {
        let Some(account) = self.accounts.get(username) else {
            debug!("Unknown username");
            return None;
        };

        match verify_password(password, &account.password_hash) {
            Ok(()) => Some(account.role),
            Err(e) => {
                debug!(error = %e, "Password mismatch");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static STORE: Lazy<CredentialStore> =
        Lazy::new(|| CredentialStore::with_defaults().expect("hash default accounts"));

    #[test]
    fn every_default_account_maps_to_its_role() {
        assert_eq!(STORE.len(), 4);
        for (username, password, role) in DEFAULT_ACCOUNTS {
            assert_eq!(STORE.authenticate(username, password), Some(*role));
        }
    }

    #[test]
    fn wrong_password_or_user_fails() {
        assert_eq!(STORE.authenticate("salary_admin", "gem@123"), None);
        assert_eq!(STORE.authenticate("salary_admin", "salary@123 "), None);
        assert_eq!(STORE.authenticate("Salary_Admin", "salary@123"), None);
        assert_eq!(STORE.authenticate("root", "salary@123"), None);
        assert_eq!(STORE.authenticate("", ""), None);
    }
}
