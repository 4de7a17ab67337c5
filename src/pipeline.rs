//! Search → fetch → segment, end to end.

use crate::client::EutilsClient;
use crate::efetch;
use crate::error::Result;
use crate::esearch::{self, SearchSession};
use crate::segment::{self, OutputTable, RecordSegmenter};
use tracing::info;

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub session: SearchSession,
    /// Raw records in retrieval order
    pub records: Vec<String>,
    pub table: OutputTable,
    /// EFetch calls actually issued
    pub retrieval_calls: usize,
}

/// Run the full pipeline for `term`.
///
/// Fails fast: a search that cannot be parsed issues no fetch calls.
pub async fn run<S: RecordSegmenter + ?Sized>(
    client: &EutilsClient,
    term: &str,
    segmenter: &S,
) -> Result<PipelineOutcome> {
    let session = esearch::initiate(client, term).await?;
    let retrieval = efetch::retrieve_all(client, &session, segmenter).await?;
    let records = retrieval.records;
    let table = segment::partition(segmenter, &records);

    info!(
        records = records.len(),
        complete = table.complete.len(),
        partial = table.partial.len(),
        "Segmentation complete"
    );

    Ok(PipelineOutcome {
        retrieval_calls: retrieval.calls,
        session,
        records,
        table,
    })
}
