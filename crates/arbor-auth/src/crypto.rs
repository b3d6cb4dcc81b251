use super::*;

const ACCESS_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Token verification failure. Expiry is distinguished from every other
/// defect (bad signature, malformed structure, missing claims) so callers
/// can log precisely, though both collapse to 401 at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    Expired,
    Invalid,
}

/// JWT signing and verification over a process-wide symmetric secret.
/// Constructed once at startup and injected; never rebuilt per request.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = jsonwebtoken::Validation::default();
        // default leeway is 60s; expiry must be exact
        validation.leeway = 0;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
        }
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, TokenFault> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenFault::Expired,
                _ => TokenFault::Invalid,
            })?;
        // the library's exp check is exclusive; validity ends AT expiry
        match claims.expired() {
            true => Err(TokenFault::Expired),
            false => Ok(claims),
        }
    }
    pub const fn duration() -> std::time::Duration {
        ACCESS_TOKEN_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::ID;

    fn crypto() -> Crypto {
        Crypto::new(b"unit-test-secret")
    }

    #[test]
    fn issued_token_verifies_to_same_subject() {
        let crypto = crypto();
        let user = ID::default();
        let token = crypto
            .encode(&Claims::new(user, "a@x.com".to_string()))
            .unwrap();
        let claims = crypto.decode(&token).unwrap();
        assert_eq!(claims.user(), user);
        assert_eq!(claims.email(), "a@x.com");
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let crypto = crypto();
        let mut claims = Claims::new(ID::default(), "a@x.com".to_string());
        claims.iat -= 48 * 60 * 60;
        claims.exp -= 48 * 60 * 60;
        let token = crypto.encode(&claims).unwrap();
        assert_eq!(crypto.decode(&token), Err(TokenFault::Expired));
    }

    #[test]
    fn garbage_token_fails_with_invalid() {
        assert_eq!(crypto().decode("not.a.jwt"), Err(TokenFault::Invalid));
        assert_eq!(crypto().decode(""), Err(TokenFault::Invalid));
    }

    #[test]
    fn wrong_secret_fails_with_invalid() {
        let token = crypto()
            .encode(&Claims::new(ID::default(), "a@x.com".to_string()))
            .unwrap();
        let other = Crypto::new(b"a-different-secret");
        assert_eq!(other.decode(&token), Err(TokenFault::Invalid));
    }

    #[test]
    fn token_at_exact_expiry_instant_is_expired() {
        let crypto = crypto();
        let mut claims = Claims::new(ID::default(), "a@x.com".to_string());
        // expiry equal to the present instant: already invalid
        claims.exp = claims.iat;
        let token = crypto.encode(&claims).unwrap();
        assert_eq!(crypto.decode(&token), Err(TokenFault::Expired));
    }

    #[test]
    fn token_missing_expiry_fails_with_invalid() {
        #[derive(serde::Serialize)]
        struct Bare {
            sub: uuid::Uuid,
        }
        let bare = Bare {
            sub: uuid::Uuid::now_v7(),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &bare,
            &jsonwebtoken::EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert_eq!(crypto().decode(&token), Err(TokenFault::Invalid));
    }
}
