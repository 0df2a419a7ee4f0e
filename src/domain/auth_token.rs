use secrecy::{ExposeSecret, Secret};

/// Bearer token issued by the login endpoint, valid for the whole session.
#[derive(Debug, Clone)]
pub struct AuthToken(Secret<String>);

impl AuthToken {
    /// Rejects empty tokens.
    pub fn parse(s: String) -> Result<AuthToken, String> {
        if s.trim().is_empty() {
            Err("The auth token is empty.".to_string())
        } else {
            Ok(Self(Secret::new(s)))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
