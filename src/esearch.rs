//! Query session initiation via ESearch.
//!
//! One search call with `usehistory=y` yields the total hit count and the
//! history-server tokens (`WebEnv`, `query_key`) that every subsequent efetch
//! page is addressed by.

use crate::client::{EutilsClient, ESEARCH_ENDPOINT};
use crate::error::{OptionExt, PubmedError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Server-side result set handle produced by one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    /// Total number of hits reported by `<Count>`
    pub total_count: usize,
    /// Opaque `WebEnv` token
    pub session_handle: String,
    /// Opaque `QueryKey` token
    pub query_key: String,
}

/// Run the search for `term` and return its session tokens.
///
/// # Errors
///
/// Transport failures surface as [`PubmedError::Network`] / [`PubmedError::Api`];
/// a body without the expected tags surfaces as [`PubmedError::Parse`].
pub async fn initiate(client: &EutilsClient, term: &str) -> Result<SearchSession> {
    if term.trim().is_empty() {
        return Err(PubmedError::Validation("Search term is empty".to_string()));
    }

    let config = client.config();
    info!(term = term, database = %config.database, "Starting ESearch");

    let body = client
        .get_text(
            ESEARCH_ENDPOINT,
            &[
                ("db", config.database.as_str()),
                ("term", term),
                ("usehistory", "y"),
                ("rettype", config.search_rettype.as_str()),
            ],
        )
        .await?;

    debug!(bytes = body.len(), "ESearch response received");

    let session = extract_session_tokens(&body)?;
    info!(
        total_count = session.total_count,
        query_key = %session.query_key,
        "Search session established"
    );
    Ok(session)
}

/// Pull `<Count>`, `<WebEnv>` and `<QueryKey>` out of an ESearch body.
///
/// The first occurrence of each tag wins; ESearch repeats `<Count>` inside
/// its translation stack, and the top-level one always comes first.
pub fn extract_session_tokens(text: &str) -> Result<SearchSession> {
    let count = first_tag_value(text, "Count")?.ok_or_parse("Missing <Count> in search response")?;
    let session_handle =
        first_tag_value(text, "WebEnv")?.ok_or_parse("Missing <WebEnv> in search response")?;
    let query_key =
        first_tag_value(text, "QueryKey")?.ok_or_parse("Missing <QueryKey> in search response")?;

    let total_count = count
        .parse::<usize>()
        .map_err(|e| PubmedError::Parse(format!("Invalid <Count> value '{}': {}", count, e)))?;

    Ok(SearchSession {
        total_count,
        session_handle,
        query_key,
    })
}

/// Text between the first `<tag>` / `</tag>` pair, trimmed
fn first_tag_value(text: &str, tag: &str) -> Result<Option<String>> {
    let re = Regex::new(&format!(r"<{tag}>\s*([^<]*?)\s*</{tag}>"))
        .map_err(|e| PubmedError::Parse(e.to_string()))?;

    Ok(re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult><Count>56</Count><RetMax>20</RetMax><RetStart>0</RetStart><QueryKey>1</QueryKey><WebEnv>MCID_65f1a2b3c4d5e6f7a8b9c0d1</WebEnv><IdList>
<Id>38000001</Id>
</IdList><TranslationSet/><TranslationStack>   <TermSet>    <Term>zebrafish[All Fields]</Term>    <Field>All Fields</Field>    <Count>9999</Count>    <Explode>N</Explode>   </TermSet>   <OP>GROUP</OP>  </TranslationStack><QueryTranslation>zebrafish[All Fields]</QueryTranslation></eSearchResult>"#;

    #[test]
    fn test_extract_session_tokens() {
        let session = extract_session_tokens(SAMPLE).unwrap();
        assert_eq!(session.total_count, 56);
        assert_eq!(session.query_key, "1");
        assert_eq!(session.session_handle, "MCID_65f1a2b3c4d5e6f7a8b9c0d1");
    }

    #[test]
    fn test_missing_count_is_parse_failure() {
        let body = "<eSearchResult><QueryKey>1</QueryKey><WebEnv>X</WebEnv></eSearchResult>";
        let err = extract_session_tokens(body).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("Count"));
    }

    #[test]
    fn test_missing_webenv_is_parse_failure() {
        let body = "<eSearchResult><Count>3</Count><QueryKey>1</QueryKey></eSearchResult>";
        assert!(extract_session_tokens(body).unwrap_err().is_parse());
    }

    #[test]
    fn test_error_page_is_parse_failure() {
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert!(extract_session_tokens(body).unwrap_err().is_parse());
    }

    #[test]
    fn test_non_numeric_count() {
        let body = "<Count>many</Count><WebEnv>X</WebEnv><QueryKey>1</QueryKey>";
        assert!(extract_session_tokens(body).unwrap_err().is_parse());
    }

    #[test]
    fn test_zero_count() {
        let body = "<Count>0</Count><RetMax>0</RetMax><QueryKey>1</QueryKey><WebEnv>E</WebEnv>";
        let session = extract_session_tokens(body).unwrap();
        assert_eq!(session.total_count, 0);
    }
}
