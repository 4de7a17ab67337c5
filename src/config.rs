//! E-utilities connection and paging settings.
//!
//! All URL pieces live here as named fields instead of being glued together
//! at call sites.

use crate::error::{PubmedError, Result};
use std::time::Duration;
use tracing::warn;

/// Default E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Maximum `retmax` accepted by efetch
pub const MAX_PAGE_SIZE: usize = 500;

/// Courtesy pause between consecutive efetch calls
pub const DEFAULT_INTER_CALL_DELAY: Duration = Duration::from_secs(2);

/// Per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Convert a user-supplied number of seconds into a delay.
///
/// Rejects negative, NaN, infinite and out-of-range values instead of panicking.
pub fn delay_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| PubmedError::Validation(format!("Invalid delay '{}' seconds: {}", secs, e)))
}

/// Settings shared by the search and fetch steps
#[derive(Debug, Clone)]
pub struct EutilsConfig {
    /// Base URL the `esearch.fcgi` / `efetch.fcgi` endpoints hang off
    pub base_url: String,
    /// Entrez database name
    pub database: String,
    /// `rettype` sent with the search request
    pub search_rettype: String,
    /// Records requested per efetch call (`retmax`)
    pub page_size: usize,
    /// efetch `retmode`
    pub retrieval_mode: String,
    /// efetch `rettype`
    pub record_type: String,
    /// Pause between efetch calls
    pub inter_call_delay: Duration,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for EutilsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database: "pubmed".to_string(),
            search_rettype: "uilist".to_string(),
            page_size: MAX_PAGE_SIZE,
            retrieval_mode: "text".to_string(),
            record_type: "abstract".to_string(),
            inter_call_delay: DEFAULT_INTER_CALL_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("rustpubmed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl EutilsConfig {
    /// Configuration pointed at a mock server, with no inter-call pause.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            inter_call_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(5),
            ..Self::default()
        }
    }

    /// Set the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        let clamped = page_size.clamp(1, MAX_PAGE_SIZE);
        if clamped != page_size {
            warn!(
                requested = page_size,
                used = clamped,
                "Page size out of range, clamping"
            );
        }
        self.page_size = clamped;
        self
    }

    /// Override the base URL (mirrors, proxies, mock servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the inter-call delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_call_delay = delay;
        self
    }

    /// Override the database name
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }
}
