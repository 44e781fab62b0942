use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method};
use tracing::debug;
use yametrika_core::{HttpMethod, Transport, TransportRequest, TransportResponse};
use yametrika_domain::constants::DEFAULT_TIMEOUT_SECS;
use yametrika_domain::{MetrikaError, Result, SessionConfig};

use crate::errors::InfraError;

/// HTTP transport backed by reqwest.
///
/// Sends each request exactly once. Any status code is returned to the
/// caller; only failures to complete the exchange become errors.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client honouring the session's timeout.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Self::builder().timeout(Duration::from_secs(config.timeout_secs)).build()
    }

    fn to_reqwest(&self, request: TransportRequest) -> Result<reqwest::Request> {
        let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(InfraError::from)?;
            let value = HeaderValue::from_str(value).map_err(InfraError::from)?;
            headers.append(name, value);
        }
        if let Some(content_type) = request.body.content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        let mut builder = self.client.request(method_of(request.method), &request.url).headers(headers);
        if request.method.sends_body() || !request.body.as_str().is_empty() {
            builder = builder.body(request.body.as_str().to_string());
        }

        builder.build().map_err(|err| MetrikaError::from(InfraError::from(err)))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = request.method;
        let request = self.to_reqwest(request)?;
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            MetrikaError::from(InfraError::from(err))
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.text().await.map_err(|err| MetrikaError::from(InfraError::from(err)))?;
        debug!(%method, %url, status, body_len = body.len(), "received HTTP response");

        Ok(TransportResponse { status, headers, body })
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder for [`HttpClient`].
///
/// Proxies configured through the environment (`HTTP_PROXY`, `HTTPS_PROXY`)
/// are honoured unless [`HttpClientBuilder::no_proxy`] is called.
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    no_proxy: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS), no_proxy: false }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect directly, ignoring any proxy from the environment
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if self.no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            MetrikaError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use yametrika_core::RequestBody;

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).no_proxy().build().expect("http client")
    }

    #[tokio::test]
    async fn sends_once_and_returns_server_errors_as_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client()
            .send(TransportRequest::new(HttpMethod::Get, server.uri()))
            .await
            .expect("response");

        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn forwards_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/counters.json"))
            .and(header("Authorization", "OAuth abc"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(r#"{"counter":{}}"#))
            .respond_with(ResponseTemplate::new(200).insert_header("Allowed", "GET").set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let mut request =
            TransportRequest::new(HttpMethod::Post, format!("{}/counters.json", server.uri()));
        request.headers.push(("Authorization".into(), "OAuth abc".into()));
        request.body = RequestBody::Json(r#"{"counter":{}}"#.into());

        let response = client().send(request).await.expect("response");
        assert_eq!(response.status, 200);
        assert_eq!(response.header("allowed"), Some("GET"));
    }

    #[tokio::test]
    async fn rejects_header_values_with_newlines() {
        let mut request = TransportRequest::new(HttpMethod::Get, "http://127.0.0.1:1/");
        request.headers.push(("Authorization".into(), "OAuth a\nb".into()));

        let err = client().send(request).await.unwrap_err();
        assert!(matches!(err, MetrikaError::Config(_)));
    }

    #[tokio::test]
    async fn network_failure_is_not_retried() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client().send(TransportRequest::new(HttpMethod::Get, format!("http://{addr}"))).await;
        match result {
            Err(MetrikaError::Network(msg)) => assert!(msg.to_lowercase().contains("http")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[test]
    fn environment_proxies_are_honoured_by_default() {
        let builder = HttpClient::builder();
        assert!(!builder.no_proxy);
        assert_eq!(builder.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(builder.no_proxy().no_proxy);
    }

    #[tokio::test]
    async fn slow_response_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = HttpClient::builder()
            .timeout(Duration::from_millis(200))
            .no_proxy()
            .build()
            .expect("http client");
        let err = client.send(TransportRequest::new(HttpMethod::Get, server.uri())).await.unwrap_err();
        assert_eq!(err, MetrikaError::Network("HTTP request timed out".into()));
    }
}
