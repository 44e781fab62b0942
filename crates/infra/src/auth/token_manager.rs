//! OAuth token management
//!
//! The manager holds the session's bearer token and runs the OAuth exchange
//! when no token is present. Tokens never expire on this side; a token stays
//! in use until [`TokenManager::clear`] is called.

use tracing::{debug, info, instrument, warn};
use yametrika_core::params::encode_form;
use yametrika_core::{decode_envelope, HttpMethod, RequestBody, Transport, TransportRequest};
use yametrika_domain::constants::OAUTH_TOKEN_URL;
use yametrika_domain::{ApiGeneration, AuthToken, Credentials, Result};

/// Holds the session token and performs the OAuth exchange
///
/// Mutating methods take `&mut self`, so a shared session must be wrapped
/// in a lock by the caller.
#[derive(Debug, Clone)]
pub struct TokenManager {
    credentials: Credentials,
    oauth_url: String,
    generation: ApiGeneration,
    token: Option<AuthToken>,
}

impl TokenManager {
    /// Manager for the fixed OAuth endpoint
    pub fn new(credentials: Credentials, generation: ApiGeneration) -> Self {
        Self {
            credentials,
            oauth_url: OAUTH_TOKEN_URL.to_string(),
            generation,
            token: None,
        }
    }

    /// Override the OAuth token endpoint
    #[must_use]
    pub fn with_oauth_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_url = url.into();
        self
    }

    /// Start with an externally supplied token
    #[must_use]
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    /// Current token, if one is held
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Whether a token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the held token; an empty string clears it
    pub fn set_token(&mut self, token: &str) {
        self.token = AuthToken::from_optional(token);
    }

    /// Forget the held token; the next authenticated call exchanges again
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Run the OAuth exchange unless a token is already held
    ///
    /// # Errors
    /// Propagates the failure of [`TokenManager::authenticate`].
    pub async fn ensure_authenticated<T>(&mut self, transport: &T, user_agent: &str) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        if self.token.is_some() {
            return Ok(());
        }
        self.authenticate(transport, user_agent).await
    }

    /// Exchange the credentials for a token
    ///
    /// Only the body envelope is classified; the token endpoint reports
    /// failures in the body. On failure the held token is left unchanged.
    ///
    /// # Errors
    /// - `MetrikaError::Unauthorized` when the endpoint answers
    ///   `invalid_client`
    /// - `MetrikaError::Service` for any other error envelope
    /// - `MetrikaError::Network` / `MetrikaError::Decode` from the transport
    ///   and body decoding
    #[instrument(skip_all, fields(grant = self.credentials.grant().grant_type(), url = %self.oauth_url))]
    pub async fn authenticate<T>(&mut self, transport: &T, user_agent: &str) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        let mut request = TransportRequest::new(HttpMethod::Post, self.oauth_url.clone());
        request.headers.push(("User-Agent".to_string(), user_agent.to_string()));
        request.body = RequestBody::Form(encode_form(&self.credentials.form_params()));

        debug!("requesting OAuth token");
        let response = transport.send(request).await?;
        let obj = decode_envelope(self.generation, &response.body)?;

        match obj.get_str("access_token").and_then(AuthToken::from_optional) {
            Some(token) => {
                self.token = Some(token);
                info!("OAuth token obtained");
            }
            None => warn!(status = response.status, "OAuth response carried no access token"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use yametrika_core::TransportResponse;
    use yametrika_domain::MetrikaError;

    use super::*;
    use crate::testing::ScriptedTransport;

    fn credentials(code: &str) -> Credentials {
        Credentials {
            client_id: "app-id".into(),
            username: "user".into(),
            password: "pw".into(),
            code: code.into(),
        }
    }

    #[tokio::test]
    async fn test_password_grant_stores_token() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, r#"{"access_token": "tok-1", "token_type": "bearer"}"#);

        let mut manager = TokenManager::new(credentials(""), ApiGeneration::Stable);
        manager.ensure_authenticated(&transport, "ua").await.unwrap();

        assert_eq!(manager.token().map(AuthToken::as_str), Some("tok-1"));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, OAUTH_TOKEN_URL);
        assert_eq!(
            requests[0].body,
            RequestBody::Form("grant_type=password&client_id=app-id&username=user&password=pw".into())
        );
    }

    #[tokio::test]
    async fn test_code_grant() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, r#"{"access_token": "tok-2"}"#);

        let mut manager = TokenManager::new(credentials("777"), ApiGeneration::Stable);
        manager.authenticate(&transport, "ua").await.unwrap();

        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Form("grant_type=authorization_code&client_id=app-id&code=777".into())
        );
    }

    #[tokio::test]
    async fn test_held_token_skips_exchange() {
        let transport = ScriptedTransport::new();
        let mut manager = TokenManager::new(credentials(""), ApiGeneration::Stable)
            .with_token(AuthToken::from_optional("given"));

        manager.ensure_authenticated(&transport, "ua").await.unwrap();
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_client_leaves_token_absent() {
        let transport = ScriptedTransport::new();
        transport.push_json(400, r#"{"error": "invalid_client"}"#);

        let mut manager = TokenManager::new(credentials(""), ApiGeneration::Stable);
        let err = manager.ensure_authenticated(&transport, "ua").await.unwrap_err();

        assert!(matches!(err, MetrikaError::Unauthorized(_)));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_exchange_keeps_prior_token() {
        let transport = ScriptedTransport::new();
        transport.push_json(400, r#"{"error": "invalid_grant", "code": 400}"#);

        let mut manager = TokenManager::new(credentials(""), ApiGeneration::Stable)
            .with_token(AuthToken::from_optional("old"));
        let err = manager.authenticate(&transport, "ua").await.unwrap_err();

        assert_eq!(err.service_error().map(|e| e.message.as_str()), Some("invalid_grant"));
        assert_eq!(manager.token().map(AuthToken::as_str), Some("old"));
    }

    #[tokio::test]
    async fn test_response_without_token_is_silent() {
        let transport = ScriptedTransport::new();
        transport.push(TransportResponse::new(200, r#"{"token_type": "bearer"}"#));

        let mut manager = TokenManager::new(credentials(""), ApiGeneration::Stable);
        manager.authenticate(&transport, "ua").await.unwrap();
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_clear_and_set() {
        let mut manager = TokenManager::new(Credentials::default(), ApiGeneration::Beta);
        manager.set_token("abc");
        assert!(manager.is_authenticated());
        manager.clear();
        assert!(manager.token().is_none());
        manager.set_token("");
        assert!(!manager.is_authenticated());
    }
}
