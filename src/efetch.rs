//! Paginated batch retrieval via EFetch.
//!
//! Pages are requested strictly one after another with a fixed pause in
//! between; the service rate-limits clients that hammer it, and parallel
//! page requests would defeat the pause.

use crate::client::{EutilsClient, EFETCH_ENDPOINT};
use crate::error::{PubmedError, Result};
use crate::esearch::SearchSession;
use crate::segment::RecordSegmenter;
use tracing::{debug, info};

/// Number of efetch calls `retrieve_all` issues for a given total.
///
/// The loop stops once the offset passes the total, so an exact multiple
/// (and a zero total) costs one extra, empty call.
pub fn planned_calls(total_count: usize, page_size: usize) -> usize {
    total_count / page_size.max(1) + 1
}

/// Fetch one page of plaintext abstracts starting at `offset`.
pub async fn fetch_batch(
    client: &EutilsClient,
    session: &SearchSession,
    offset: usize,
) -> Result<String> {
    let config = client.config();
    let retstart = offset.to_string();
    let retmax = config.page_size.to_string();

    client
        .get_text(
            EFETCH_ENDPOINT,
            &[
                ("db", config.database.as_str()),
                ("query_key", session.query_key.as_str()),
                ("WebEnv", session.session_handle.as_str()),
                ("retstart", retstart.as_str()),
                ("retmax", retmax.as_str()),
                ("retmode", config.retrieval_mode.as_str()),
                ("rettype", config.record_type.as_str()),
            ],
        )
        .await
}

/// Records collected by one retrieval run
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    /// Raw records in service order
    pub records: Vec<String>,
    /// EFetch calls actually issued
    pub calls: usize,
}

/// Retrieve every page of `session` and return the records in service order.
///
/// Any failed call aborts the whole retrieval; nothing collected so far is
/// returned. Whitespace-only fragments (an empty final page) are dropped.
pub async fn retrieve_all<S: RecordSegmenter + ?Sized>(
    client: &EutilsClient,
    session: &SearchSession,
    segmenter: &S,
) -> Result<Retrieval> {
    let page_size = client.config().page_size;
    if page_size == 0 {
        return Err(PubmedError::Validation(
            "Page size must be positive".to_string(),
        ));
    }

    let delay = client.config().inter_call_delay;
    let expected_calls = planned_calls(session.total_count, page_size);
    info!(
        total_count = session.total_count,
        page_size = page_size,
        calls = expected_calls,
        "Starting EFetch retrieval"
    );

    let mut records: Vec<String> = Vec::new();
    let mut offset = 0;
    let mut call = 0;

    loop {
        call += 1;
        let batch = fetch_batch(client, session, offset).await?;

        let before = records.len();
        records.extend(
            segmenter
                .split_into_records(&batch)
                .into_iter()
                .filter(|r| !r.trim().is_empty()),
        );
        info!(
            call = call,
            offset = offset,
            received = records.len() - before,
            collected = records.len(),
            "Fetched batch"
        );

        offset += page_size;
        if offset > session.total_count {
            break;
        }

        debug!(delay_ms = delay.as_millis() as u64, "Pausing before next batch");
        tokio::time::sleep(delay).await;
    }

    info!(records = records.len(), calls = call, "EFetch retrieval complete");
    Ok(Retrieval {
        records,
        calls: call,
    })
}
