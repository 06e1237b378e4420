use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::Client;
use crate::config::Config;
use crate::endpoint::{activity_history_path, build_url, profile_path, search_player_path};
use crate::envelope::interpret;
use crate::error::{ApiError, Error, ErrorDetails};
use crate::request::RequestSpec;
use crate::throttle::Throttle;
use crate::types::{ActivityQuery, Platform};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

/// A session against the Bungie API.
///
/// Owns the connection pool and the throttle state. Calls made through one
/// session are spaced at least [`crate::throttle::MIN_INTERVAL`] apart.
#[derive(Debug)]
pub struct BungieClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    throttle: Throttle,
}

struct RawResponse {
    status: StatusCode,
    retry_after: Option<u64>,
    body: String,
}

impl BungieClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            timeout: config.timeout,
            throttle: Throttle::default(),
        })
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::new(Config::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Releases the connection pool.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "closing bungie client");
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.execute(RequestSpec::get(endpoint)).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.execute(RequestSpec::post(endpoint).body(body)).await
    }

    /// Sends one request and returns the unwrapped `Response` payload.
    pub async fn execute(&self, request: RequestSpec) -> Result<Value, ApiError> {
        let url = build_url(&self.base_url, &request.endpoint);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let guard = self.throttle.acquire().await;
        debug!(method = %request.method, url = %url, "sending request");
        let started = Instant::now();
        let result = Self::send(builder).await;
        guard.record();

        let response = result.map_err(|e| {
            warn!(url = %url, error = %e, "request failed");
            ApiError::generic(ErrorDetails::new(format!("Request error occurred: {e}")))
        })?;

        debug!(
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!(url = %url, retry_after, "rate limited");
            return Err(ApiError::rate_limit(
                Duration::from_secs(retry_after),
                Some(raw_body(response.body)),
            ));
        }

        if response.status.as_u16() >= 400 {
            return Err(ApiError::generic(
                ErrorDetails::new(format!(
                    "HTTP error occurred: {} for url {url}",
                    response.status
                ))
                .with_code(response.status.as_u16().into())
                .with_response(raw_body(response.body)),
            ));
        }

        let envelope = serde_json::from_str::<Value>(&response.body).map_err(|e| {
            ApiError::generic(
                ErrorDetails::new(format!("Failed to decode response body: {e}"))
                    .with_response(Value::String(response.body.clone())),
            )
        })?;

        interpret(envelope)
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<RawResponse, reqwest::Error> {
        let response = builder.send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

// error bodies are kept as JSON when they parse, as a string otherwise
fn raw_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[async_trait]
impl Client for BungieClient {
    async fn search_destiny_player(
        &self,
        display_name: &str,
        platform: Option<&str>,
    ) -> Result<Value, ApiError> {
        let membership_type = Platform::resolve(platform);
        self.get(&search_player_path(&membership_type, display_name)?)
            .await
    }

    async fn get_profile(
        &self,
        membership_type: i32,
        membership_id: &str,
        components: &[&str],
    ) -> Result<Value, ApiError> {
        let request = RequestSpec::get(profile_path(membership_type, membership_id)?)
            .param("components", components.join(","));
        self.execute(request).await
    }

    async fn get_activity_history(
        &self,
        membership_type: i32,
        membership_id: &str,
        character_id: &str,
        query: ActivityQuery,
    ) -> Result<Value, ApiError> {
        let mut request = RequestSpec::get(activity_history_path(
            membership_type,
            membership_id,
            character_id,
        )?)
        .param("page", query.page)
        .param("count", query.count);
        if let Some(mode) = query.mode {
            request = request.param("mode", mode);
        }
        self.execute(request).await
    }
}
