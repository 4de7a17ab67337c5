//! HTTP plumbing for the E-utilities endpoints.
//!
//! Requests are built from ordered key/value pairs and percent-encoded by
//! [`url::Url`], so search terms containing reserved characters (`&`, `#`,
//! `[`, quotes) cannot corrupt the query string.

use crate::config::EutilsConfig;
use crate::error::{PubmedError, Result};
use tracing::debug;
use url::Url;

/// Search endpoint
pub const ESEARCH_ENDPOINT: &str = "esearch.fcgi";

/// Fetch endpoint
pub const EFETCH_ENDPOINT: &str = "efetch.fcgi";

/// Thin wrapper around a reqwest client bound to one configuration
pub struct EutilsClient {
    client: reqwest::Client,
    config: EutilsConfig,
}

impl EutilsClient {
    /// Create a new EutilsClient
    pub fn new(config: EutilsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PubmedError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &EutilsConfig {
        &self.config
    }

    /// Build `<base_url>/<endpoint>?k1=v1&k2=v2...` preserving parameter order.
    pub fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.config.base_url, endpoint))
            .map_err(|e| PubmedError::Config(format!("Invalid base URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Issue a GET and return the full body as text.
    ///
    /// Any non-success status is reported as [`PubmedError::Api`].
    pub async fn get_text(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = self.build_url(endpoint, params)?;
        debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PubmedError::Api {
                code: status.as_u16() as i32,
                message: format!("E-utilities error on {}: {}", endpoint, status),
            });
        }

        response.text().await.map_err(PubmedError::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_reserved_characters() {
        let client = EutilsClient::new(EutilsConfig::default()).expect("client");
        let url = client
            .build_url(
                ESEARCH_ENDPOINT,
                &[("db", "pubmed"), ("term", "cancer & \"gene therapy\"[ti]#1")],
            )
            .expect("url");

        assert_eq!(url.path(), "/entrez/eutils/esearch.fcgi");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("db".to_string(), "pubmed".to_string()));
        assert_eq!(pairs[1].1, "cancer & \"gene therapy\"[ti]#1");
        assert!(!url.as_str().contains("& \""));
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_build_url_keeps_parameter_order() {
        let client = EutilsClient::new(EutilsConfig::default()).expect("client");
        let url = client
            .build_url(EFETCH_ENDPOINT, &[("b", "2"), ("a", "1"), ("c", "3")])
            .expect("url");
        assert_eq!(url.query(), Some("b=2&a=1&c=3"));
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        let config = EutilsConfig::default().with_base_url("not a url");
        let client = EutilsClient::new(config).expect("client");
        let err = client.build_url(ESEARCH_ENDPOINT, &[]).unwrap_err();
        assert!(matches!(err, PubmedError::Config(_)));
    }
}
