use arbor_auth::Account;
use arbor_auth::Identity;
use arbor_core::ID;

/// The ownership-scoped resource guard.
///
/// Admins see and touch everything; everyone else is confined to records
/// whose owner attribute equals their own id. The scope is applied at the
/// query boundary (a WHERE clause), never as a post-filter, so a denied
/// record is indistinguishable from an absent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admin: every record in the collection.
    Any,
    /// Non-admin: records owned by this account only.
    Owned(ID<Account>),
}

impl Scope {
    pub fn of(identity: &Identity) -> Self {
        match identity.admin() {
            true => Self::Any,
            false => Self::Owned(identity.id()),
        }
    }
    /// The owner constraint to fold into a query, if any.
    pub fn owner(&self) -> Option<ID<Account>> {
        match self {
            Self::Any => None,
            Self::Owned(id) => Some(*id),
        }
    }
    /// The decision function itself: ALLOW iff admin or owner.
    pub fn permits(&self, owner: ID<Account>) -> bool {
        match self {
            Self::Any => true,
            Self::Owned(id) => *id == owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(admin: bool) -> Identity {
        Identity::new(ID::default(), "u@x.com".to_string(), "U".to_string(), admin)
    }

    #[test]
    fn admin_scope_permits_every_owner() {
        let scope = Scope::of(&identity(true));
        assert_eq!(scope, Scope::Any);
        assert!(scope.permits(ID::default()));
        assert!(scope.owner().is_none());
    }

    #[test]
    fn owner_permits_self_only() {
        let me = identity(false);
        let scope = Scope::of(&me);
        assert!(scope.permits(me.id()));
        assert_eq!(scope.owner(), Some(me.id()));
    }

    #[test]
    fn stranger_is_denied() {
        let a = identity(false);
        let b = identity(false);
        assert!(!Scope::of(&b).permits(a.id()));
        assert!(!Scope::of(&a).permits(b.id()));
    }
}
