//! Session configuration
//!
//! A [`SessionConfig`] describes one client session: who authenticates, how
//! the client identifies itself and which hosts it talks to. Every field has a
//! default so partial JSON/TOML files deserialize cleanly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BETA_API_HOST, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, OAUTH_TOKEN_URL, STABLE_API_HOST,
};
use crate::errors::{MetrikaError, Result};
use crate::types::{AuthToken, Credentials};

/// Service endpoints used by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// OAuth token endpoint
    pub oauth_url: String,
    /// Stable API host
    pub stable_host: String,
    /// Beta API host
    pub beta_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            oauth_url: OAUTH_TOKEN_URL.to_string(),
            stable_host: STABLE_API_HOST.to_string(),
            beta_host: BETA_API_HOST.to_string(),
        }
    }
}

/// Configuration for one client session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// OAuth application identifier (may be empty)
    pub client_id: String,
    /// Account login for the password grant
    pub username: String,
    /// Account password for the password grant
    pub password: String,
    /// Authorization code; takes precedence over username/password
    pub code: String,
    /// Pre-obtained bearer token; skips the OAuth exchange when set
    pub token: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Timeout applied by the HTTP client to each request
    pub timeout_secs: u64,
    /// Service endpoints
    pub endpoints: Endpoints,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            username: String::new(),
            password: String::new(),
            code: String::new(),
            token: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl SessionConfig {
    /// Configuration for a password grant
    pub fn with_password(
        client_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Configuration for an authorization-code grant
    pub fn with_code(client_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), code: code.into(), ..Self::default() }
    }

    /// Configuration for an externally supplied token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Self::default() }
    }

    /// Credentials used by the OAuth exchange
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            code: self.code.clone(),
        }
    }

    /// Token supplied at construction, if any
    pub fn initial_token(&self) -> Option<AuthToken> {
        AuthToken::from_optional(&self.token)
    }

    /// Check that the session can obtain or already holds a token
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when neither a token nor any grant
    /// credentials are present, or when the user agent is empty.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(MetrikaError::Config("user agent must not be empty".into()));
        }
        let has_grant = !self.code.is_empty() || !self.username.is_empty();
        if self.token.is_empty() && !has_grant {
            return Err(MetrikaError::Config(
                "either a token, an authorization code or username/password is required".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("code", &redacted(&self.code))
            .field("token", &redacted(&self.token))
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

pub(crate) fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
