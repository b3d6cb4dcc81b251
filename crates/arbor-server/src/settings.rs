use arbor_auth::Admins;
use std::path::PathBuf;

/// Shipped for local development only; a deployment that reaches
/// production with this secret has misconfigured its environment, and
/// startup says so loudly.
const FALLBACK_SECRET: &str = "family-tree-secret-key-2024";

/// Process configuration, read from the environment exactly once at
/// startup and injected from there. Request handlers never touch env.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub secret: String,
    pub admins: Admins,
    pub uploads: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, signing tokens with the insecure default");
            FALLBACK_SECRET.to_string()
        });
        Self {
            bind: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            secret,
            admins: Admins::from_env(),
            uploads: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
        }
    }
}
