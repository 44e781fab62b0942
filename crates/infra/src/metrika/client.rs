//! Stable API session
//!
//! Resources live at `<host>/<resource>.json`. Each method builds one
//! [`RequestSpec`] and hands it to the session's [`RequestPipeline`]; only the
//! counter list walks several pages.

use serde_json::Value;
use tracing::info;
use yametrika_core::params::{to_params, wrapped, Params};
use yametrika_core::Transport;
use yametrika_domain::{
    ApiGeneration, ApiObject, AuthToken, CounterListQuery, Result, ResultPage, SessionConfig,
};

use crate::api::{PaginationWalker, RequestPipeline, RequestSpec};
use crate::auth::TokenManager;
use crate::http::HttpClient;

/// Client for the stable management and statistics API
///
/// Methods take `&mut self` because the first authenticated call may store
/// a freshly obtained token.
#[derive(Debug)]
pub struct Metrika<T = HttpClient> {
    pub(crate) pipeline: RequestPipeline<T>,
}

impl Metrika<HttpClient> {
    /// Session over the reqwest transport
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` for an invalid configuration or when the
    /// HTTP client cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let transport = HttpClient::from_config(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Metrika<T> {
    /// Session over a caller-provided transport
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when the configuration holds neither a
    /// token nor credentials.
    pub fn with_transport(config: &SessionConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let tokens = TokenManager::new(config.credentials(), ApiGeneration::Stable)
            .with_oauth_url(config.endpoints.oauth_url.clone())
            .with_token(config.initial_token());
        let pipeline = RequestPipeline::new(
            transport,
            tokens,
            ApiGeneration::Stable,
            config.endpoints.stable_host.clone(),
        )
        .with_user_agent(config.user_agent.clone());
        info!(host = %config.endpoints.stable_host, "stable API session created");
        Ok(Self { pipeline })
    }

    pub fn user_agent(&self) -> &str {
        self.pipeline.user_agent()
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.pipeline.set_user_agent(user_agent);
    }

    /// Token currently held by the session
    pub fn token(&self) -> Option<&AuthToken> {
        self.pipeline.tokens().token()
    }

    /// Drop the held token; the next call runs the OAuth exchange again
    pub fn clear_token(&mut self) {
        self.pipeline.tokens_mut().clear();
    }

    /// Underlying pipeline, for requests this client has no method for
    pub fn pipeline(&mut self) -> &mut RequestPipeline<T> {
        &mut self.pipeline
    }

    pub(crate) fn url(&self, resource: &str) -> String {
        format!("{}/{resource}.json", self.pipeline.host())
    }

    pub(crate) async fn get(&mut self, resource: &str) -> Result<ApiObject> {
        let url = self.url(resource);
        self.pipeline.execute(RequestSpec::get(url)).await
    }

    pub(crate) async fn send_body(&mut self, spec: RequestSpec, body: Params) -> Result<ApiObject> {
        self.pipeline.execute(spec.params(body)).await
    }

    pub(crate) async fn delete(&mut self, resource: &str) -> Result<ApiObject> {
        let url = self.url(resource);
        self.pipeline.execute(RequestSpec::delete(url)).await
    }

    /* ---------------------------------------------------------------------- */
    /* Counters */
    /* ---------------------------------------------------------------------- */

    /// All counters available to the user, across every page
    ///
    /// The four filters are always sent, empty ones included.
    pub async fn counter_list(&mut self, query: &CounterListQuery) -> Result<ResultPage> {
        let spec = RequestSpec::get(self.url("counters")).params(to_params(query)?);
        PaginationWalker::new(&mut self.pipeline).fetch_all(spec, "counters").await
    }

    /// One counter; `field` lists extra sections, e.g. `goals,grants`
    pub async fn counter(&mut self, counter_id: i64, field: &str) -> Result<ApiObject> {
        let mut params = Params::new();
        params.insert("field".into(), Value::from(field));
        let spec = RequestSpec::get(self.url(&format!("counter/{counter_id}"))).params(params);
        self.pipeline.execute(spec).await
    }

    /// Create a counter; `extra` holds any further counter attributes
    pub async fn add_counter(&mut self, name: &str, site: &str, extra: Params) -> Result<ApiObject> {
        let mut counter = extra;
        counter.insert("name".into(), Value::from(name));
        counter.insert("site".into(), Value::from(site));
        let spec = RequestSpec::post(self.url("counters"));
        self.send_body(spec, wrapped("counter", &counter)?).await
    }

    /// Change the given attributes of a counter
    pub async fn edit_counter(&mut self, counter_id: i64, fields: Params) -> Result<ApiObject> {
        let spec = RequestSpec::put(self.url(&format!("counter/{counter_id}")));
        self.send_body(spec, wrapped("counter", &fields)?).await
    }

    pub async fn delete_counter(&mut self, counter_id: i64) -> Result<ApiObject> {
        self.delete(&format!("counter/{counter_id}")).await
    }
}
