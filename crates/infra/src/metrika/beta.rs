//! Beta API session
//!
//! The beta host serves `management/v1` and `stat/v1` resources without the
//! `.json` suffix and reports errors with the `error_type`/`message` envelope.
//! Sessions are token-only.

use serde_json::Value;
use tracing::info;
use yametrika_core::params::Params;
use yametrika_core::Transport;
use yametrika_domain::{ApiGeneration, ApiObject, AuthToken, MetrikaError, Result, SessionConfig};

use crate::api::{RequestPipeline, RequestSpec};
use crate::auth::TokenManager;
use crate::http::HttpClient;

/// Client for the beta statistics and management API
#[derive(Debug)]
pub struct MetrikaV1<T = HttpClient> {
    pipeline: RequestPipeline<T>,
}

impl MetrikaV1<HttpClient> {
    /// Session with default endpoints and the given token
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when `token` is empty or the HTTP client
    /// cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::from_config(&SessionConfig::with_token(token))
    }

    /// Session over the reqwest transport
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when the configuration holds no token.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let transport = HttpClient::from_config(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> MetrikaV1<T> {
    /// Session over a caller-provided transport
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when the configuration holds no token.
    pub fn with_transport(config: &SessionConfig, transport: T) -> Result<Self> {
        let Some(token) = config.initial_token() else {
            return Err(MetrikaError::Config("the beta API requires a token".into()));
        };
        config.validate()?;
        let tokens = TokenManager::new(config.credentials(), ApiGeneration::Beta)
            .with_oauth_url(config.endpoints.oauth_url.clone())
            .with_token(Some(token));
        let pipeline = RequestPipeline::new(
            transport,
            tokens,
            ApiGeneration::Beta,
            config.endpoints.beta_host.clone(),
        )
        .with_user_agent(config.user_agent.clone());
        info!(host = %config.endpoints.beta_host, "beta API session created");
        Ok(Self { pipeline })
    }

    pub fn user_agent(&self) -> &str {
        self.pipeline.user_agent()
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.pipeline.set_user_agent(user_agent);
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.pipeline.tokens().token()
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.pipeline.host())
    }

    /// Statistics data query (`stat/v1/data`)
    pub async fn data(&mut self, params: Params) -> Result<ApiObject> {
        let spec = RequestSpec::get(self.url("stat/v1/data")).params(params);
        self.pipeline.execute(spec).await
    }

    /// Counters of the user; empty when the response reports no rows
    pub async fn counter_list(&mut self, params: Params) -> Result<Vec<Value>> {
        let spec = RequestSpec::get(self.url("management/v1/counters")).params(params);
        let mut obj = self.pipeline.execute(spec).await?;
        if obj.get_i64("rows").unwrap_or(0) <= 0 {
            return Ok(Vec::new());
        }
        match obj.take("counters") {
            Some(Value::Array(counters)) => Ok(counters),
            _ => Ok(Vec::new()),
        }
    }

    /// One counter; `field` lists extra sections, e.g. `goals,mirrors`
    ///
    /// # Errors
    /// Returns `MetrikaError::Decode` when the response carries no `counter`
    /// object.
    pub async fn counter(&mut self, counter_id: i64, field: &str) -> Result<ApiObject> {
        let mut params = Params::new();
        params.insert("field".into(), Value::from(field));
        let url = self.url(&format!("management/v1/counter/{counter_id}"));
        let mut obj = self.pipeline.execute(RequestSpec::get(url).params(params)).await?;
        match obj.take("counter") {
            Some(Value::Object(counter)) => Ok(ApiObject::from(counter)),
            _ => Err(MetrikaError::Decode("response has no 'counter' object".into())),
        }
    }
}
