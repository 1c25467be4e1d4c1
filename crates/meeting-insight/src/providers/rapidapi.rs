//! RapidAPI LinkedIn scraper client

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ProfileConfig;
use crate::error::{Error, Result};

use super::profile::ProfileProvider;

/// Profile enrichment via the RapidAPI LinkedIn data scraper
pub struct RapidApiProfileClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_host: String,
}

impl RapidApiProfileClient {
    /// Create a new client from configuration
    pub fn new(config: &ProfileConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("RAPIDAPI_KEY is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            api_host: config.api_host.clone(),
        })
    }
}

#[async_trait]
impl ProfileProvider for RapidApiProfileClient {
    async fn fetch_profile(&self, profile_url: &str) -> Result<serde_json::Value> {
        tracing::info!("Fetching profile data for {}", profile_url);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .form(&[("username_or_url", profile_url)])
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Profile request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProfileFailed(format!(
                "Profile API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::ProfileFailed(format!("Profile response is not JSON: {}", e)))
    }

    fn name(&self) -> &str {
        "rapidapi-linkedin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RapidApiProfileClient {
        RapidApiProfileClient::new(&ProfileConfig {
            endpoint: format!("{}/get_user_data.php", server.uri()),
            api_key: Some("rapid-key".to_string()),
            api_host: "scraper.p.rapidapi.com".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_profile() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_user_data.php"))
            .and(header("x-rapidapi-key", "rapid-key"))
            .and(header("x-rapidapi-host", "scraper.p.rapidapi.com"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("username_or_url=https%3A%2F%2Flinkedin.com%2Fin%2Fjane"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"firstName": "Jane", "headline": "VP Sales"}
            })))
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch_profile("https://linkedin.com/in/jane")
            .await
            .unwrap();
        assert_eq!(profile["data"]["firstName"], "Jane");
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_profile("https://linkedin.com/in/jane")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProfileFailed(_)));
    }

    #[test]
    fn test_requires_api_key() {
        let err = RapidApiProfileClient::new(&ProfileConfig::default()).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
