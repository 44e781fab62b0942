//! Authentication types
//!
//! [`AuthToken`] is the bearer credential a session holds once the OAuth
//! exchange succeeded (or that the caller supplied up front). It has no
//! expiry: a token is used until the session clears it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::redacted;

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Wrap a token value, treating an empty string as "no token"
    pub fn from_optional(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&redacted(&self.0)).finish()
    }
}

/// OAuth grant selected from the session credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant<'a> {
    /// `grant_type=authorization_code`
    AuthorizationCode { code: &'a str },
    /// `grant_type=password`
    Password { username: &'a str, password: &'a str },
}

impl Grant<'_> {
    /// Value of the `grant_type` form parameter
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::Password { .. } => "password",
        }
    }
}

/// Credentials held by a session for the OAuth exchange
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth application identifier (may be empty)
    pub client_id: String,
    /// Account login
    pub username: String,
    /// Account password
    pub password: String,
    /// Authorization code
    pub code: String,
}

impl Credentials {
    /// Select the grant: a non-empty code wins over username/password
    pub fn grant(&self) -> Grant<'_> {
        if self.code.is_empty() {
            Grant::Password { username: &self.username, password: &self.password }
        } else {
            Grant::AuthorizationCode { code: &self.code }
        }
    }

    /// Form parameters of the token request, in wire order
    pub fn form_params(&self) -> Vec<(&'static str, &str)> {
        let grant = self.grant();
        let mut params = vec![("grant_type", grant.grant_type()), ("client_id", self.client_id.as_str())];
        match grant {
            Grant::AuthorizationCode { code } => params.push(("code", code)),
            Grant::Password { username, password } => {
                params.push(("username", username));
                params.push(("password", password));
            }
        }
        params
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("code", &redacted(&self.code))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(code: &str) -> Credentials {
        Credentials {
            client_id: "app".into(),
            username: "user".into(),
            password: "pw".into(),
            code: code.into(),
        }
    }

    #[test]
    fn test_code_takes_precedence() {
        let creds = credentials("4242");
        assert_eq!(creds.grant(), Grant::AuthorizationCode { code: "4242" });
        assert_eq!(
            creds.form_params(),
            vec![("grant_type", "authorization_code"), ("client_id", "app"), ("code", "4242")]
        );
    }

    #[test]
    fn test_password_grant_without_code() {
        let creds = credentials("");
        assert_eq!(creds.grant().grant_type(), "password");
        assert_eq!(
            creds.form_params(),
            vec![
                ("grant_type", "password"),
                ("client_id", "app"),
                ("username", "user"),
                ("password", "pw"),
            ]
        );
    }

    #[test]
    fn test_empty_token_is_absent() {
        assert!(AuthToken::from_optional("").is_none());
        assert_eq!(AuthToken::from_optional("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", AuthToken::new("very-secret"));
        assert!(!rendered.contains("very-secret"));
    }
}
