//! Timed HTTP client for the booking API

use crate::api::endpoints;
use crate::api::request::{ApiRequest, Method, APPLICATION_JSON};
use crate::config::{ms, ApiOptions};
use crate::result::{VitrinaError, VitrinaResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A response with its wall-clock duration.
///
/// Header names are lower-cased. `body` is the parsed JSON, or `Null` when
/// the body is empty or not JSON; `text` always holds the raw body.
#[derive(Debug, Clone)]
pub struct TimedResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub duration: Duration,
    pub body: Value,
    pub text: String,
}

impl TimedResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// `application/json`, optionally followed by parameters
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(|ct| {
            ct == APPLICATION_JSON || ct.starts_with(&format!("{APPLICATION_JSON};"))
        })
    }

    /// Strictly faster than `max`
    #[must_use]
    pub fn within(&self, max: Duration) -> bool {
        self.duration < max
    }

    /// Fail with the status and raw body unless the status is `expected`
    pub fn expect_status(&self, expected: u16) -> VitrinaResult<&Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(VitrinaError::Api {
                status: self.status,
                body: self.text.clone(),
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> VitrinaResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Sends [`ApiRequest`]s against one base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Client for `options.base_url` with its per-request timeout
    pub fn new(options: &ApiOptions) -> VitrinaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(ms(options.request_timeout_ms))
            .build()?;
        Ok(Self::with_client(&options.base_url, client))
    }

    /// Use a preconfigured reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `request` and time it up to the last body byte
    pub async fn send(&self, request: &ApiRequest) -> VitrinaResult<TimedResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let text = resp.text().await?;
        let duration = start.elapsed();

        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        debug!(
            request = %request,
            status,
            elapsed_ms = duration.as_millis() as u64,
            "api response"
        );
        Ok(TimedResponse {
            status,
            headers,
            duration,
            body,
            text,
        })
    }

    /// `GET /ping` must answer 201
    pub async fn health_check(&self) -> VitrinaResult<()> {
        let response = self.send(&ApiRequest::get(endpoints::PING)).await?;
        response.expect_status(201).map(|_| ()).map_err(|e| {
            VitrinaError::assertion(format!(
                "API health check failed: {} did not return 201 ({e})",
                endpoints::PING
            ))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn response(content_type: &str, status: u16) -> TimedResponse {
        TimedResponse {
            status,
            headers: BTreeMap::from([("content-type".to_string(), content_type.to_string())]),
            duration: Duration::from_millis(120),
            body: serde_json::json!({"bookingid": 1}),
            text: r#"{"bookingid":1}"#.to_string(),
        }
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = ApiClient::with_client("http://localhost:3001/", reqwest::Client::new());
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_json_content_type_matching() {
        assert!(response("application/json; charset=utf-8", 200).is_json());
        assert!(response("application/json", 200).is_json());
        assert!(!response("application/jsonp", 200).is_json());
        assert!(!response("text/html", 200).is_json());
    }

    #[test]
    fn test_expect_status_carries_body() {
        let ok = response("application/json", 200);
        assert!(ok.expect_status(200).is_ok());
        let err = ok.expect_status(201).unwrap_err();
        assert!(matches!(err, VitrinaError::Api { status: 200, .. }));
        assert_eq!(ok.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_within_is_strict() {
        let r = response("application/json", 200);
        assert!(r.within(Duration::from_millis(1500)));
        assert!(!r.within(Duration::from_millis(120)));
    }
}
