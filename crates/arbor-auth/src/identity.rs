use super::*;
use arbor_core::ID;
use arbor_core::Unique;

/// A resolved, authenticated actor. Produced only by the identity
/// resolver after token verification and a live credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    id: ID<Account>,
    email: String,
    name: String,
    admin: bool,
}

impl Identity {
    pub fn new(id: ID<Account>, email: String, name: String, admin: bool) -> Self {
        Self {
            id,
            email,
            name,
            admin,
        }
    }
    pub fn id(&self) -> ID<Account> {
        self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn admin(&self) -> bool {
        self.admin
    }
}

impl From<Account> for Identity {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().to_string(),
            name: account.name().to_string(),
            admin: account.admin(),
        }
    }
}
