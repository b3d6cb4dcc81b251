use super::*;
use arbor_core::ID;

/// Signed, self-contained claim set: subject, email, issuance, expiry.
/// Never persisted and never revoked server-side; expiry alone ends
/// validity.
#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: ID<Account>, email: String) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_secs() as i64;
        Self {
            sub: user.inner(),
            email,
            iat: now,
            exp: now + Crypto::duration().as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp
            <= std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time")
                .as_secs() as i64
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_claims_are_not_expired() {
        let claims = Claims::new(ID::default(), "a@x.com".to_string());
        assert!(!claims.expired());
        assert_eq!(claims.exp - claims.iat, Crypto::duration().as_secs() as i64);
    }

    #[test]
    fn claims_past_expiry_report_expired() {
        let mut claims = Claims::new(ID::default(), "a@x.com".to_string());
        claims.exp = claims.iat - 1;
        assert!(claims.expired());
    }
}
