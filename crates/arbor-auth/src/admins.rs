/// Seed-admin allow-list, loaded once at startup and injected into the
/// registration handler. An account registered with a listed email gets
/// the admin flag; nothing grants or revokes it afterwards.
#[derive(Debug, Clone, Default)]
pub struct Admins(std::collections::HashSet<String>);

impl Admins {
    /// Emails are normalized to lowercase, matching the normalization
    /// applied at registration and login.
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }
    /// Parses the comma-separated `ADMIN_EMAILS` environment variable.
    /// Unset or empty means no admins.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("ADMIN_EMAILS")
                .unwrap_or_default()
                .split(','),
        )
    }
    pub fn allows(&self, email: &str) -> bool {
        self.0.contains(&email.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_email_is_admin_case_insensitively() {
        let admins = Admins::new(["Root@Family.example", " aunt@family.example "]);
        assert!(admins.allows("root@family.example"));
        assert!(admins.allows("ROOT@FAMILY.EXAMPLE"));
        assert!(admins.allows("aunt@family.example"));
    }

    #[test]
    fn unlisted_email_is_not_admin() {
        let admins = Admins::new(["root@family.example"]);
        assert!(!admins.allows("guest@family.example"));
    }

    #[test]
    fn empty_list_grants_nobody() {
        let admins = Admins::new(Vec::<String>::new());
        assert!(!admins.allows("root@family.example"));
        let admins = Admins::new([""]);
        assert!(!admins.allows(""));
    }
}
