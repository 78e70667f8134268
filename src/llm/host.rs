//! Settings-to-host conversion for OpenAI and Azure OpenAI endpoints

use thiserror::Error;
use url::Url;

use crate::config::OpenAiSettings;

/// Public OpenAI endpoint used when no base URL is configured
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";

const AZURE_HOST_SUFFIX: &str = "openai.azure.com";
const AZURE_API_VERSION_PARAM: &str = "api-version";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A resolved API host: base URL (always ending in `/`) plus fixed query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiHost {
    pub base_url: String,
    pub query_params: Vec<(String, String)>,
}

impl OpenAiHost {
    pub fn openai() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            query_params: Vec::new(),
        }
    }

    /// Whether requests to this host authenticate with the Azure `api-key` header
    pub fn is_azure(&self) -> bool {
        Url::parse(&self.base_url)
            .map(|url| is_azure_url(&url))
            .unwrap_or(false)
    }

    /// Base URL with query parameters applied
    pub fn to_url(&self) -> Result<Url, HostError> {
        self.endpoint("")
    }

    /// URL for `path` relative to the base, with query parameters applied
    pub fn endpoint(&self, path: &str) -> Result<Url, HostError> {
        let mut url = parse(&self.base_url)?
            .join(path)
            .map_err(|source| HostError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })?;

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query_params {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

fn parse(raw: &str) -> Result<Url, HostError> {
    Url::parse(raw).map_err(|source| HostError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn is_azure_url(url: &Url) -> bool {
    url.host_str()
        .map(|host| host.to_ascii_lowercase().ends_with(AZURE_HOST_SUFFIX))
        .unwrap_or(false)
}

/// Resolve the host for `settings`.
///
/// Azure hosts get the `openai/` path (or `openai/deployments/{id}/` when
/// `with_azure_deployment_id` is set) and an `api-version` query parameter.
/// Other base URLs are kept as-is with a trailing slash.
pub fn to_host(
    settings: &OpenAiSettings,
    with_azure_deployment_id: bool,
) -> Result<OpenAiHost, HostError> {
    let base = settings.base_url.trim();
    if base.is_empty() {
        return Ok(OpenAiHost::openai());
    }

    let mut url = parse(base)?;

    if is_azure_url(&url) {
        let path = if with_azure_deployment_id {
            format!("/openai/deployments/{}/", settings.azure_deployment_id.trim())
        } else {
            "/openai/".to_string()
        };
        url.set_path(&path);
        url.set_query(None);

        return Ok(OpenAiHost {
            base_url: url.to_string(),
            query_params: vec![(
                AZURE_API_VERSION_PARAM.to_string(),
                settings.azure_api_version.clone(),
            )],
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(OpenAiHost {
        base_url: url.to_string(),
        query_params: Vec::new(),
    })
}

/// URL text for read-only display; falls back to the raw base URL when it does not parse.
pub fn display_url(settings: &OpenAiSettings) -> String {
    match to_host(settings, true).and_then(|host| host.to_url()) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Cannot resolve display URL: {}", e);
            settings.base_url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsField;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn azure_settings() -> OpenAiSettings {
        OpenAiSettings::default()
            .with_field(SettingsField::BaseUrl, "https://myres.openai.azure.com")
            .with_field(SettingsField::AzureDeploymentId, "gpt4o")
            .with_field(SettingsField::AzureApiVersion, "2024-02-01")
    }

    #[test]
    fn test_blank_base_url_uses_openai() {
        let host = to_host(&OpenAiSettings::default(), true).unwrap();
        assert_eq!(host, OpenAiHost::openai());
        assert_eq!(display_url(&OpenAiSettings::default()), "https://api.openai.com/v1/");
    }

    #[test]
    fn test_whitespace_base_url_is_blank() {
        let settings = OpenAiSettings::default().with_field(SettingsField::BaseUrl, "   ");
        assert_eq!(to_host(&settings, false).unwrap(), OpenAiHost::openai());
    }

    #[rstest]
    #[case("http://localhost:11434/v1", "http://localhost:11434/v1/")]
    #[case("http://localhost:11434/v1/", "http://localhost:11434/v1/")]
    #[case("https://example.com", "https://example.com/")]
    fn test_custom_base_url_gets_trailing_slash(#[case] base: &str, #[case] expected: &str) {
        let settings = OpenAiSettings::default().with_field(SettingsField::BaseUrl, base);
        let host = to_host(&settings, true).unwrap();
        assert_eq!(host.base_url, expected);
        assert!(host.query_params.is_empty());
        assert!(!host.is_azure());
    }

    #[test]
    fn test_azure_with_deployment() {
        let host = to_host(&azure_settings(), true).unwrap();
        assert_eq!(
            host.base_url,
            "https://myres.openai.azure.com/openai/deployments/gpt4o/"
        );
        assert!(host.is_azure());
        assert_eq!(
            display_url(&azure_settings()),
            "https://myres.openai.azure.com/openai/deployments/gpt4o/?api-version=2024-02-01"
        );
    }

    #[test]
    fn test_azure_without_deployment() {
        let host = to_host(&azure_settings(), false).unwrap();
        assert_eq!(host.base_url, "https://myres.openai.azure.com/openai/");
        assert_eq!(
            host.query_params,
            vec![("api-version".to_string(), "2024-02-01".to_string())]
        );
    }

    #[test]
    fn test_endpoint_joins_path_and_keeps_query() {
        let host = to_host(&azure_settings(), false).unwrap();
        let url = host.endpoint("models").unwrap();
        assert_eq!(
            url.as_str(),
            "https://myres.openai.azure.com/openai/models?api-version=2024-02-01"
        );

        let url = OpenAiHost::openai().endpoint("models").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models");
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = OpenAiSettings::default().with_field(SettingsField::BaseUrl, "not a url");
        assert!(matches!(
            to_host(&settings, true),
            Err(HostError::InvalidUrl { .. })
        ));
        assert_eq!(display_url(&settings), "not a url");
    }
}
