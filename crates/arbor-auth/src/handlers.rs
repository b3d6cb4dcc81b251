use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use arbor_core::ID;
use arbor_core::Unique;
use std::sync::Arc;
use tokio_postgres::Client;

/// Creates an account and returns a fresh token. Email is lowercased
/// before the uniqueness check, the insert, and the admin allow-list
/// match, so lookups behave case-insensitively everywhere.
pub async fn register(
    db: web::Data<Arc<Client>>,
    crypto: web::Data<Crypto>,
    admins: web::Data<Admins>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, Fault> {
    let email = req.email.trim().to_lowercase();
    if db.taken(&email).await? {
        return Err(Fault::EmailTaken);
    }
    let hashword = password::hash(&req.password).map_err(|e| Fault::Internal(e.to_string()))?;
    let account = Account::new(
        ID::default(),
        email.clone(),
        req.name.clone(),
        admins.allows(&email),
    );
    // two registrations can race past the taken() check; the unique
    // constraint on email settles it, and the loser gets the same 400
    db.create(&account, &hashword).await.map_err(|e| {
        match e.code() == Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION) {
            true => Fault::EmailTaken,
            false => Fault::Database(e),
        }
    })?;
    let claims = Claims::new(account.id(), email);
    let token = crypto
        .encode(&claims)
        .map_err(|e| Fault::Internal(e.to_string()))?;
    log::info!("registered account {}", account.id());
    Ok(HttpResponse::Ok().json(TokenResponse::new(token, UserInfo::from(&account))))
}

pub async fn login(
    db: web::Data<Arc<Client>>,
    crypto: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Fault> {
    let email = req.email.trim().to_lowercase();
    let (account, hashword) = db.by_email(&email).await?.ok_or(Fault::BadCredentials)?;
    if !password::verify(&req.password, &hashword) {
        return Err(Fault::BadCredentials);
    }
    let claims = Claims::new(account.id(), email);
    let token = crypto
        .encode(&claims)
        .map_err(|e| Fault::Internal(e.to_string()))?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token, UserInfo::from(&account))))
}

pub async fn me(auth: Auth) -> HttpResponse {
    HttpResponse::Ok().json(UserInfo::from(auth.identity()))
}
