use super::*;
use arbor_core::ID;
use arbor_core::Unique;
use arbor_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Repository trait for credential store operations.
/// Abstracts SQL from domain modules. Emails are matched exactly as
/// stored; callers normalize to lowercase before lookup.
#[allow(async_fn_in_trait)]
pub trait AccountRepository {
    async fn taken(&self, email: &str) -> Result<bool, PgErr>;
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), PgErr>;
    async fn by_email(&self, email: &str) -> Result<Option<(Account, String)>, PgErr>;
    async fn by_id(&self, id: ID<Account>) -> Result<Option<Account>, PgErr>;
}

fn restore(row: &tokio_postgres::Row) -> Account {
    Account::restore(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, bool>(3),
        row.get::<_, String>(4),
    )
}

impl AccountRepository for Arc<Client> {
    async fn taken(&self, email: &str) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn create(&self, account: &Account, hashword: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, email, name, hashword, admin, created_at) VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            &[
                &account.id().inner(),
                &account.email(),
                &account.name(),
                &hashword,
                &account.admin(),
                &account.created(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn by_email(&self, email: &str) -> Result<Option<(Account, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, email, name, admin, created_at, hashword FROM ",
                USERS,
                " WHERE email = $1"
            ),
            &[&email],
        )
        .await
        .map(|opt| opt.map(|row| (restore(&row), row.get::<_, String>(5))))
    }

    async fn by_id(&self, id: ID<Account>) -> Result<Option<Account>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, email, name, admin, created_at FROM ",
                USERS,
                " WHERE id = $1"
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.map(|row| restore(&row)))
    }
}
