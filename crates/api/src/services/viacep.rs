//! ViaCEP client for postal code lookups.
//!
//! One `GET {base}/{zip}/json/` per call. No retries and no caching; the
//! request timeout comes from [`ViaCepConfig`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use profile_registry_core::ZipCode;

use crate::config::ViaCepConfig;

/// Errors that can occur when looking up a postal code.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The lookup did not answer within the configured timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// API returned a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service does not know this postal code.
    #[error("zipCode {0} not found in ViaCEP database")]
    NotFound(String),
}

/// Address data returned for a postal code.
///
/// Fields the service left out are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Resolves a postal code to an address.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Look up `zip_code`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` if the service is unreachable, times out,
    /// answers with an unusable body, or does not know the postal code.
    async fn resolve(&self, zip_code: &ZipCode) -> Result<ResolvedAddress, LookupError>;
}

/// Raw ViaCEP response body.
#[derive(Debug, Deserialize)]
struct ViaCepBody {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<ErroFlag>,
}

/// ViaCEP has sent both `"erro": true` and `"erro": "true"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErroFlag {
    Bool(bool),
    Text(String),
}

impl ErroFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// ViaCEP API client.
#[derive(Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ViaCepClient {
    /// Create a new ViaCEP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ViaCepConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    fn lookup_url(&self, zip_code: &ZipCode) -> String {
        format!("{}/{}/json/", self.base_url, zip_code.as_str())
    }
}

#[async_trait]
impl AddressResolver for ViaCepClient {
    #[tracing::instrument(skip(self), fields(zip_code = %zip_code))]
    async fn resolve(&self, zip_code: &ZipCode) -> Result<ResolvedAddress, LookupError> {
        let url = self.lookup_url(zip_code);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.timeout)
            } else {
                LookupError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.timeout)
            } else {
                LookupError::Http(e)
            }
        })?;

        let body: ViaCepBody =
            serde_json::from_slice(&bytes).map_err(|e| LookupError::Parse(e.to_string()))?;

        if body.erro.as_ref().is_some_and(ErroFlag::is_set) {
            return Err(LookupError::NotFound(zip_code.to_string()));
        }

        tracing::debug!(city = %body.localidade, state = %body.uf, "postal code resolved");

        Ok(ResolvedAddress {
            street: body.logradouro,
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> ViaCepClient {
        let config = ViaCepConfig {
            base_url: Url::parse(&format!("{}/ws", server.uri())).unwrap(),
            timeout,
        };
        ViaCepClient::new(&config).unwrap()
    }

    fn zip() -> ZipCode {
        ZipCode::parse("01310-100").unwrap()
    }

    #[test]
    fn test_lookup_url() {
        let config = ViaCepConfig::default();
        let client = ViaCepClient::new(&config).unwrap();
        assert_eq!(
            client.lookup_url(&zip()),
            "https://viacep.com.br/ws/01310100/json/"
        );
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "complemento": "de 612 a 1510 - lado par",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        let resolved = client.resolve(&zip()).await.unwrap();

        assert_eq!(
            resolved,
            ResolvedAddress {
                street: "Avenida Paulista".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_keys_are_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localidade": "São Paulo",
                "uf": "SP"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        let resolved = client.resolve(&zip()).await.unwrap();

        assert!(resolved.street.is_empty());
        assert!(resolved.neighborhood.is_empty());
        assert_eq!(resolved.city, "São Paulo");
    }

    #[tokio::test]
    async fn test_resolve_not_found_bool() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        let err = client.resolve(&zip()).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(ref zip) if zip == "01310100"));
    }

    #[tokio::test]
    async fn test_resolve_not_found_string() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": "true" })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        assert!(matches!(
            client.resolve(&zip()).await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_erro_false_is_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localidade": "São Paulo",
                "uf": "SP",
                "erro": false
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        assert_eq!(client.resolve(&zip()).await.unwrap().state, "SP");
    }

    #[tokio::test]
    async fn test_resolve_bad_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        assert!(matches!(
            client.resolve(&zip()).await,
            Err(LookupError::Status(502))
        ));
    }

    #[tokio::test]
    async fn test_resolve_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(2));
        assert!(matches!(
            client.resolve(&zip()).await,
            Err(LookupError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ws/01310100/json/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "uf": "SP" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_millis(100));
        let err = client.resolve(&zip()).await.unwrap_err();
        assert!(matches!(err, LookupError::Timeout(_)), "got {err:?}");
    }
}
