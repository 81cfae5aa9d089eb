use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
    model: &'a str,
    length: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    roadmap: String,
}

#[derive(Serialize)]
struct SalaryRequest<'a> {
    tech: &'a str,
    experience: &'a str,
}

/// Salary payload for a topic and experience tier.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryData {
    pub tech: String,
    pub experience: String,
    pub median: i64,
    pub demand_index: DemandIndex,
}

/// The server reports the demand index as either a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DemandIndex {
    Number(f64),
    Text(String),
}

impl fmt::Display for DemandIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandIndex::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            DemandIndex::Number(n) => write!(f, "{n}"),
            DemandIndex::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Structured error body returned by the server on a non-OK status.
/// `details` and `content_preview` may be plain strings or arbitrary JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub content_preview: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ApiFailure {
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or("Request failed")
    }

    pub fn details_text(&self) -> Option<String> {
        stringify_field(self.details.as_ref())
    }

    pub fn preview_text(&self) -> Option<String> {
        stringify_field(self.content_preview.as_ref())
    }
}

fn stringify_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-OK status and a decodable error body.
    #[error("{}", .0.message())]
    Api(ApiFailure),
    /// Network failure, or a body that did not decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the roadmap generation and salary endpoints.
#[derive(Clone)]
pub struct RoadmapClient {
    client: Client,
    base_url: String,
}

impl RoadmapClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a roadmap for a topic. A non-OK status with a JSON body maps
    /// to `ApiError::Api`; everything else is a transport error.
    pub async fn generate(&self, topic: &str, model: &str, length: &str) -> Result<String, ApiError> {
        let url = format!("{}/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { topic, model, length })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let failure: ApiFailure = response.json().await?;
            tracing::warn!(%status, error = failure.message(), "generate failed");
            return Err(ApiError::Api(failure));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.roadmap)
    }

    /// Fetch salary figures for a topic and experience tier.
    pub async fn salary(&self, tech: &str, experience: &str) -> Result<SalaryData, ApiError> {
        let url = format!("{}/api/salary", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SalaryRequest { tech, experience })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let failure: ApiFailure = response.json().await.unwrap_or_default();
            tracing::warn!(%status, error = failure.message(), "salary fetch failed");
            return Err(ApiError::Api(failure));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_returns_roadmap_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(json!({
                "topic": "aws", "model": "auto", "length": "medium"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"roadmap": "# AWS\n## Basics"})),
            )
            .mount(&server)
            .await;

        let client = RoadmapClient::new(&server.uri());
        let roadmap = client.generate("aws", "auto", "medium").await.unwrap();
        assert_eq!(roadmap, "# AWS\n## Basics");
    }

    #[tokio::test]
    async fn generate_surfaces_structured_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Topic not allowed",
                "details": {"reason": "restricted"},
                "url": "https://upstream.example/v1"
            })))
            .mount(&server)
            .await;

        let client = RoadmapClient::new(&server.uri());
        let err = client.generate("nope", "auto", "short").await.unwrap_err();
        match err {
            ApiError::Api(failure) => {
                assert_eq!(failure.message(), "Topic not allowed");
                assert!(failure.details_text().unwrap().contains("restricted"));
                assert_eq!(failure.url.as_deref(), Some("https://upstream.example/v1"));
                assert!(failure.preview_text().is_none());
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_maps_undecodable_error_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = RoadmapClient::new(&server.uri());
        let err = client.generate("aws", "auto", "medium").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn salary_decodes_numeric_and_string_demand_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/salary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tech": "python",
                "experience": "mid",
                "median": 1_450_000,
                "demand_index": 83
            })))
            .mount(&server)
            .await;

        let client = RoadmapClient::new(&server.uri());
        let data = client.salary("python", "mid").await.unwrap();
        assert_eq!(data.median, 1_450_000);
        assert_eq!(data.demand_index.to_string(), "83");

        let text: DemandIndex = serde_json::from_value(json!("very high")).unwrap();
        assert_eq!(text.to_string(), "very high");
    }

    #[tokio::test]
    async fn salary_failure_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/salary"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "Missing required parameter: tech"})),
            )
            .mount(&server)
            .await;

        let client = RoadmapClient::new(&server.uri());
        let err = client.salary("", "mid").await.unwrap_err();
        match err {
            ApiError::Api(failure) => {
                assert_eq!(failure.message(), "Missing required parameter: tech")
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
