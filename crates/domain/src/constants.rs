//! Service constants
//!
//! Fixed endpoints and header values of the Metrika API.

/// OAuth token endpoint used for both grant types
pub const OAUTH_TOKEN_URL: &str = "https://oauth.yandex.ru/token";

/// Host of the stable management/statistics API (paths carry `.json`)
pub const STABLE_API_HOST: &str = "https://api-metrika.yandex.ru/";

/// Host of the beta API (paths carry no suffix)
pub const BETA_API_HOST: &str = "https://beta.api-metrika.yandex.ru";

/// User agent sent when the session does not override it
pub const DEFAULT_USER_AGENT: &str = "yametrika";

/// Request timeout handed to the HTTP client
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Standard request headers
pub const ACCEPT: &str = "application/x-yametrika+json";
pub const ACCEPT_LANGUAGE: &str = "ru,en-us;q=0.7,en;q=0.3";
pub const ACCEPT_ENCODING: &str = "gzip,deflate";
pub const ACCEPT_CHARSET: &str = "utf-8;q=0.7,*;q=0.7";
pub const KEEP_ALIVE: &str = "300";
pub const CONNECTION: &str = "keep-alive";

/// Prefix of the `Authorization` header value
pub const AUTHORIZATION_SCHEME: &str = "OAuth";

/// Response header consulted for 405 responses
pub const ALLOWED_HEADER: &str = "Allowed";

/// Envelope value that signals an unknown OAuth client
pub const INVALID_CLIENT: &str = "invalid_client";
