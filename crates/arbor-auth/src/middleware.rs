use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use arbor_core::ID;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_postgres::Client;

/// Extractor for authenticated requests: the identity resolver.
///
/// Verifies the bearer token, then resolves its subject against the
/// credential store. Verification strictly precedes the lookup; both
/// failure kinds (and a subject that no longer resolves) collapse into a
/// single 401 outcome. Accounts are never deleted today, but the
/// resolution check stays regardless.
pub struct Auth(pub Identity);

impl Auth {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
    pub fn user(&self) -> ID<Account> {
        self.0.id()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let crypto = req.app_data::<web::Data<Crypto>>().cloned();
        let db = req.app_data::<web::Data<Arc<Client>>>().cloned();
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_owned());
        Box::pin(async move {
            let header = header.ok_or(Fault::Unauthenticated)?;
            let token = header
                .strip_prefix("Bearer ")
                .ok_or(Fault::Unauthenticated)?;
            let crypto = crypto.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("token service not configured")
            })?;
            let claims = crypto.decode(token).map_err(|_| Fault::Unauthenticated)?;
            let db = db.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("database not configured")
            })?;
            let account = db
                .by_id(claims.user())
                .await
                .map_err(Fault::Database)?
                .ok_or(Fault::Unauthenticated)?;
            Ok(Auth(Identity::from(account)))
        })
    }
}
