use crate::domain::identity::{DEFAULT_IDENTITY_LENGTH, generate_random_string};
use secrecy::{ExposeSecret, Secret};

pub const EMAIL_DOMAIN: &str = "@gmail.com";
pub const PASSWORD_SUFFIX: &str = "1234567";

/// Identity of the single user registered for a suite run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

#[derive(serde::Serialize)]
pub(crate) struct RegistrationRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(serde::Serialize)]
pub(crate) struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl Credentials {
    pub fn generate() -> Self {
        Self::from_name(generate_random_string(DEFAULT_IDENTITY_LENGTH))
    }

    /// Derives email and password from `name`.
    pub fn from_name(name: String) -> Self {
        let email = format!("{}{}", name, EMAIL_DOMAIN);
        let password = Secret::new(format!("{}{}", name, PASSWORD_SUFFIX));
        Self {
            name,
            email,
            password,
        }
    }

    pub(crate) fn registration_request(&self) -> RegistrationRequest<'_> {
        RegistrationRequest {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }

    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}
