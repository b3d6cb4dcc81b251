use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use arbor_pg::PgErr;
use std::fmt::Display;
use std::fmt::Formatter;

/// Every client-visible failure in the service, with its status mapping.
///
/// `NotFound` deliberately covers both true absence and present-but-not-
/// owned: ownership mismatches are indistinguishable from missing records
/// in status code and message, for every resource kind.
#[derive(Debug)]
pub enum Fault {
    /// Missing, malformed, expired, or unresolvable bearer token.
    Unauthenticated,
    /// Login email/password mismatch.
    BadCredentials,
    /// Resource absent or not owned by the caller. Carries the resource
    /// noun for the detail string ("Member", "Photo", ...).
    NotFound(&'static str),
    /// Registration with an email that already has an account.
    EmailTaken,
    /// Update request carrying no recognized updatable field.
    NoFields,
    /// Upload rejected before storage (content type or size).
    BadUpload(&'static str),
    /// Store-level failure, logged and masked.
    Database(PgErr),
    /// Anything else that should surface as a 500, logged and masked.
    Internal(String),
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Not authenticated"),
            Self::BadCredentials => write!(f, "Invalid credentials"),
            Self::NotFound(what) => write!(f, "{} not found", what),
            Self::EmailTaken => write!(f, "Email already registered"),
            Self::NoFields => write!(f, "No fields to update"),
            Self::BadUpload(why) => write!(f, "{}", why),
            Self::Database(_) | Self::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl ResponseError for Fault {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::BadCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::NoFields | Self::BadUpload(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Database(e) => log::error!("database error: {}", e),
            Self::Internal(e) => log::error!("internal error: {}", e),
            _ => {}
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "detail": self.to_string() }))
    }
}

impl From<PgErr> for Fault {
    fn from(e: PgErr) -> Self {
        Self::Database(e)
    }
}

impl From<std::io::Error> for Fault {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(Fault::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Fault::BadCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Fault::NotFound("Member").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Fault::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Fault::NoFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Fault::BadUpload("too big").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_owned_is_not_found_never_forbidden() {
        // ownership mismatch surfaces exactly like absence
        let fault = Fault::NotFound("Member");
        assert_eq!(fault.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(fault.to_string(), "Member not found");
    }

    #[test]
    fn detail_strings_do_not_leak_internals() {
        let fault = Fault::Internal("secret stack trace".to_string());
        assert_eq!(fault.to_string(), "Internal server error");
    }
}
