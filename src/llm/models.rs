//! Model list status and the HTTP fetcher that produces it

use std::time::Duration;

use reqwest::Client;

use super::host::to_host;
use super::types::{LLMError, ModelsResponse};
use crate::config::OpenAiSettings;

const REQUEST_TIMEOUT_SECS: u32 = 30;

/// Status of the remote model list, as shown by the model dropdown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelsState {
    /// Not requested yet
    #[default]
    None,
    /// Request in flight
    Loading,
    /// Model identifiers, possibly empty
    Success(Vec<String>),
    /// Human-readable failure message
    Error(String),
}

impl ModelsState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ModelsState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ModelsState::Success(_))
    }

    pub fn ids(&self) -> &[String] {
        match self {
            ModelsState::Success(ids) => ids,
            _ => &[],
        }
    }
}

impl From<Result<Vec<String>, LLMError>> for ModelsState {
    fn from(result: Result<Vec<String>, LLMError>) -> Self {
        match result {
            Ok(ids) => ModelsState::Success(ids),
            Err(e) => ModelsState::Error(e.to_string()),
        }
    }
}

/// Lists model ids from an OpenAI-compatible `/models` endpoint
#[derive(Debug, Clone)]
pub struct ModelFetcher {
    http_client: Client,
}

impl ModelFetcher {
    /// Build the HTTP client. Fails when the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, LLMError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(u64::from(REQUEST_TIMEOUT_SECS)))
            .build()
            .map_err(|e| LLMError::NetworkError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { http_client })
    }

    /// Fetch model ids for `settings`, sorted and de-duplicated
    pub async fn list_model_ids(&self, settings: &OpenAiSettings) -> Result<Vec<String>, LLMError> {
        let key = settings.key.trim();
        if key.is_empty() {
            return Err(LLMError::MissingApiKey);
        }

        let host = to_host(settings, false).map_err(|e| LLMError::InvalidRequest {
            message: e.to_string(),
        })?;
        let url = host.endpoint("models").map_err(|e| LLMError::InvalidRequest {
            message: e.to_string(),
        })?;

        tracing::debug!("Fetching model list from {}", url);

        let request = self.http_client.get(url);
        let request = if host.is_azure() {
            request.header("api-key", key)
        } else {
            request.header("Authorization", format!("Bearer {}", key))
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout {
                    timeout_secs: REQUEST_TIMEOUT_SECS,
                }
            } else {
                LLMError::NetworkError {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error_response(status.as_u16(), &text));
        }

        let text = response.text().await.map_err(|e| LLMError::NetworkError {
            message: e.to_string(),
        })?;
        let ids = parse_models_response(&text)?;

        tracing::info!("Loaded {} models", ids.len());
        Ok(ids)
    }
}

fn parse_models_response(body: &str) -> Result<Vec<String>, LLMError> {
    let resp: ModelsResponse = serde_json::from_str(body).map_err(|e| LLMError::ParseError {
        message: e.to_string(),
    })?;

    let mut ids: Vec<String> = resp.data.into_iter().map(|m| m.id).collect();
    ids.sort();
    ids.dedup();
    Ok(ids)
}

fn parse_error_response(status: u16, body: &str) -> LLMError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let message = json["error"]["message"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string();
        let error_code = json["error"]["code"].as_str().unwrap_or("");

        match (status, error_code) {
            (401, _) | (_, "invalid_api_key") => LLMError::AuthError { message },
            (429, _) | (_, "rate_limit_exceeded") => LLMError::RateLimit {
                retry_after_secs: 60,
            },
            (404, _) | (_, "DeploymentNotFound") => LLMError::NotFound { message },
            (400, _) => LLMError::InvalidRequest { message },
            _ => LLMError::ProviderError { status, message },
        }
    } else {
        LLMError::ProviderError {
            status,
            message: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsField;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_models_state_default_is_none() {
        assert_eq!(ModelsState::default(), ModelsState::None);
        assert!(ModelsState::default().ids().is_empty());
    }

    #[test]
    fn test_models_state_from_result() {
        let ok: ModelsState = Ok(vec!["a".to_string()]).into();
        assert_eq!(ok, ModelsState::Success(vec!["a".to_string()]));

        let err: ModelsState = Err(LLMError::Timeout { timeout_secs: 30 }).into();
        assert_eq!(err, ModelsState::Error("Timeout after 30s".to_string()));
    }

    #[test]
    fn test_parse_models_response_sorts_and_dedups() {
        let body = r#"{"object":"list","data":[{"id":"gpt-4o"},{"id":"dall-e-3"},{"id":"gpt-4o"}]}"#;
        let ids = parse_models_response(body).unwrap();
        assert_eq!(ids, vec!["dall-e-3".to_string(), "gpt-4o".to_string()]);
    }

    #[test]
    fn test_parse_models_response_empty_data() {
        assert!(parse_models_response(r#"{"data":[]}"#).unwrap().is_empty());
        assert!(parse_models_response(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_models_response_invalid_json() {
        assert!(matches!(
            parse_models_response("<html>"),
            Err(LLMError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
        assert_eq!(
            parse_error_response(401, body),
            LLMError::AuthError {
                message: "Incorrect API key provided".to_string()
            }
        );

        assert_eq!(
            parse_error_response(502, "bad gateway"),
            LLMError::ProviderError {
                status: 502,
                message: "bad gateway".to_string()
            }
        );
    }

    #[test]
    fn test_fetcher_builds_with_timeout_client() {
        assert!(ModelFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let fetcher = ModelFetcher::new().unwrap();
        let result = fetcher.list_model_ids(&OpenAiSettings::default()).await;
        assert_eq!(result, Err(LLMError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_list_model_ids_from_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"id":"b"},{"id":"a"}]}"#)
            .create_async()
            .await;

        let settings = OpenAiSettings::default()
            .with_field(SettingsField::Key, "sk-test")
            .with_field(SettingsField::BaseUrl, format!("{}/v1", server.url()));

        let ids = ModelFetcher::new().unwrap().list_model_ids(&settings).await.unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_model_ids_auth_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/models")
            .with_status(401)
            .with_body(r#"{"error":{"message":"bad key"}}"#)
            .create_async()
            .await;

        let settings = OpenAiSettings::default()
            .with_field(SettingsField::Key, "sk-wrong")
            .with_field(SettingsField::BaseUrl, server.url());

        let result = ModelFetcher::new().unwrap().list_model_ids(&settings).await;
        assert_eq!(
            result,
            Err(LLMError::AuthError {
                message: "bad key".to_string()
            })
        );
    }
}
