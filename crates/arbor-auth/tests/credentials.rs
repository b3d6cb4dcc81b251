//! Credential-store checks against a live PostgreSQL. Each test returns
//! early when `DB_URL` is unset.

use arbor_auth::Account;
use arbor_auth::AccountRepository;
use arbor_core::ID;

#[tokio::test]
async fn duplicate_email_insert_reports_unique_violation() {
    if std::env::var("DB_URL").is_err() {
        return;
    }
    let client = arbor_pg::db().await;
    arbor_pg::prepare::<Account>(&client).await.unwrap();

    let email = format!("{}@register.test", uuid::Uuid::now_v7());
    let first = Account::new(ID::default(), email.clone(), "First".to_string(), false);
    let second = Account::new(ID::default(), email, "Second".to_string(), false);
    client.create(&first, "hashword-1").await.unwrap();

    // two registrations racing past the availability check settle here;
    // registration maps this code to the email-taken response
    let err = client.create(&second, "hashword-2").await.unwrap_err();
    assert_eq!(
        err.code(),
        Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION)
    );
}
