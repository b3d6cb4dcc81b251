use arbor_core::ID;
use arbor_core::Unique;

/// Registered user credential record. Created once at registration and
/// never deleted; the admin flag is assigned only at creation, from the
/// deployment's [`super::Admins`] allow-list. Email is stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
    id: ID<Self>,
    email: String,
    name: String,
    admin: bool,
    created: String,
}

impl Account {
    pub fn new(id: ID<Self>, email: String, name: String, admin: bool) -> Self {
        Self {
            id,
            email,
            name,
            admin,
            created: arbor_core::timestamp(),
        }
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
    pub fn created(&self) -> &str {
        &self.created
    }
    pub(crate) fn restore(
        id: ID<Self>,
        email: String,
        name: String,
        admin: bool,
        created: String,
    ) -> Self {
        Self {
            id,
            email,
            name,
            admin,
            created,
        }
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use arbor_pg::*;

    /// Schema implementation for Account (users table).
    /// Note: hashword is a database-only field, not part of the Account
    /// domain type.
    impl Schema for Account {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    name        VARCHAR(255) NOT NULL,
                    hashword    TEXT NOT NULL,
                    admin       BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at  TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
