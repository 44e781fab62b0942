//! Authenticated request pipeline
//!
//! Every call to the service runs through [`RequestPipeline::execute`] as a
//! fixed sequence of stages:
//!
//! 1. ensure a token is held (when the request needs one)
//! 2. compose the standard headers
//! 3. serialize parameters (query string or JSON body) and send
//! 4. classify the HTTP status
//! 5. decode the body and classify the error envelope
//!
//! Errors from any stage propagate immediately; nothing is retried.

use tracing::{debug, instrument};
use yametrika_core::params::{append_query, json_body, Params};
use yametrika_core::{
    classify_status, decode_envelope, HttpMethod, RequestBody, Transport, TransportRequest,
};
use yametrika_domain::constants::{
    ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE, ALLOWED_HEADER, AUTHORIZATION_SCHEME,
    CONNECTION, DEFAULT_USER_AGENT, KEEP_ALIVE,
};
use yametrika_domain::{ApiGeneration, ApiObject, AuthToken, Result};

use crate::auth::TokenManager;

/// Description of one request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// Absolute URL; may already carry a query string
    pub url: String,
    pub params: Params,
    pub requires_auth: bool,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), params: Params::new(), requires_auth: true }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Send without running the OAuth exchange first
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

/// Composes authentication, dispatch and classification for one session
#[derive(Debug)]
pub struct RequestPipeline<T> {
    transport: T,
    tokens: TokenManager,
    generation: ApiGeneration,
    host: String,
    user_agent: String,
}

impl<T: Transport> RequestPipeline<T> {
    /// Pipeline for `generation`, resolving relative references against `host`
    pub fn new(transport: T, tokens: TokenManager, generation: ApiGeneration, host: impl Into<String>) -> Self {
        Self {
            transport,
            tokens,
            generation,
            host: host.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    /// Host the session talks to, without a trailing slash
    pub fn host(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenManager {
        &mut self.tokens
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Standard headers of an API request
    ///
    /// `Authorization` carries the bare scheme while no token is held.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept".to_string(), ACCEPT.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
            ("Accept-Encoding".to_string(), ACCEPT_ENCODING.to_string()),
            ("Accept-Charset".to_string(), ACCEPT_CHARSET.to_string()),
            ("Keep-Alive".to_string(), KEEP_ALIVE.to_string()),
            ("Connection".to_string(), CONNECTION.to_string()),
        ];
        let token = self.tokens.token().map(AuthToken::as_str).unwrap_or_default();
        headers.push(("Authorization".to_string(), format!("{AUTHORIZATION_SCHEME} {token}")));
        headers
    }

    /// Run a request through every stage
    ///
    /// # Errors
    /// - authentication failures from [`TokenManager::authenticate`]
    /// - `BadRequest`, `Unauthorized`, `Forbidden`, `MethodNotAllowed` for
    ///   400/401/403/405 responses
    /// - `Service` when the body carries an error envelope
    /// - `Network` / `Decode` from the transport and body decoding
    #[instrument(skip(self, spec), fields(method = %spec.method, url = %spec.url))]
    pub async fn execute(&mut self, spec: RequestSpec) -> Result<ApiObject> {
        if spec.requires_auth {
            self.tokens.ensure_authenticated(&self.transport, &self.user_agent).await?;
        }

        let (url, body) = if spec.method.sends_body() {
            (spec.url, RequestBody::Json(json_body(&spec.params)))
        } else {
            (append_query(&spec.url, &spec.params), RequestBody::Empty)
        };

        let request = TransportRequest { method: spec.method, url, headers: self.headers(), body };
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "response received");

        if let Some(err) = classify_status(response.status, response.header(ALLOWED_HEADER)) {
            debug!(error = %err, "response rejected by status");
            return Err(err);
        }

        decode_envelope(self.generation, &response.body)
    }
}
