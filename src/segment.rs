//! Plaintext record segmentation.
//!
//! efetch `retmode=text&rettype=abstract` renders each citation as a block of
//! paragraphs. Citations are separated by a blank-line pair (three newlines),
//! paragraphs inside a citation by a single blank line (two newlines). These
//! delimiters reflect the current rendering of the service, not a published
//! format; if PubMed changes its text layout, swap in another
//! [`RecordSegmenter`] rather than touching the retrieval loop.
//!
//! Canonical paragraph order of a full citation:
//! journal line, title, authors, affiliations, abstract, identifiers, misc.
//! Missing paragraphs shift the rest left rather than leaving a gap.

use tracing::debug;

/// Separator between consecutive citations in one efetch body
pub const RECORD_DELIMITER: &str = "\n\n\n";

/// Separator between paragraphs of one citation
pub const FIELD_DELIMITER: &str = "\n\n";

/// A FieldSet is complete when it has more fields than this
pub const COMPLETENESS_THRESHOLD: usize = 5;

/// Header of the complete-records table
pub const COMPLETE_COLUMNS: &[&str] = &[
    "Journal",
    "Title",
    "Authors",
    "Author_Information",
    "Abstract",
    "DOI",
    "Misc",
];

/// Ordered paragraphs of one citation
pub type FieldSet = Vec<String>;

/// Which output partition a FieldSet is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Partial,
}

/// Classify a FieldSet by field count against [`COMPLETENESS_THRESHOLD`].
pub fn classify(fields: &[String]) -> Completeness {
    if fields.len() > COMPLETENESS_THRESHOLD {
        Completeness::Complete
    } else {
        Completeness::Partial
    }
}

/// Split a batch body into raw citation strings.
///
/// Pure split: joining the result with [`RECORD_DELIMITER`] reproduces the
/// input exactly, including any leading newline on the first record.
pub fn split_into_records(batch_text: &str) -> Vec<String> {
    batch_text
        .split(RECORD_DELIMITER)
        .map(str::to_string)
        .collect()
}

/// Split one citation into its paragraphs, untrimmed.
pub fn split_into_fields(record: &str) -> FieldSet {
    record.split(FIELD_DELIMITER).map(str::to_string).collect()
}

/// Strategy for turning efetch text into records and fields
pub trait RecordSegmenter {
    /// Split a batch body into raw records
    fn split_into_records(&self, batch_text: &str) -> Vec<String>;

    /// Split one record into ordered fields
    fn split_into_fields(&self, record: &str) -> FieldSet;
}

/// Delimiter-based segmenter for the PubMed abstract text rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterSegmenter;

impl RecordSegmenter for DelimiterSegmenter {
    fn split_into_records(&self, batch_text: &str) -> Vec<String> {
        split_into_records(batch_text)
    }

    fn split_into_fields(&self, record: &str) -> FieldSet {
        split_into_fields(record)
    }
}

/// Records routed into the complete and partial partitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    /// FieldSets with more than [`COMPLETENESS_THRESHOLD`] fields
    pub complete: Vec<FieldSet>,
    /// Everything else
    pub partial: Vec<FieldSet>,
}

impl OutputTable {
    /// Total rows across both partitions
    pub fn len(&self) -> usize {
        self.complete.len() + self.partial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complete.is_empty() && self.partial.is_empty()
    }

    /// Route one FieldSet
    pub fn push(&mut self, fields: FieldSet) {
        match classify(&fields) {
            Completeness::Complete => self.complete.push(fields),
            Completeness::Partial => {
                debug!(fields = fields.len(), "Record below completeness threshold");
                self.partial.push(fields);
            }
        }
    }
}

/// Split every record into fields and route it, preserving input order
/// within each partition.
pub fn partition<S: RecordSegmenter + ?Sized>(segmenter: &S, records: &[String]) -> OutputTable {
    let mut table = OutputTable::default();
    for record in records {
        table.push(segmenter.split_into_fields(record));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_fields(n: usize, tag: &str) -> String {
        (1..=n)
            .map(|i| format!("{tag} field {i}"))
            .collect::<Vec<_>>()
            .join(FIELD_DELIMITER)
    }

    #[test]
    fn test_split_into_records_round_trip() {
        let inputs = [
            "\n1. Nature. 2023;1:1.\n\nTitle\n\n\n2. Cell. 2022;2:2.\n\nOther\n",
            "",
            "single record, no delimiter",
            "\n\n\n",
            "a\n\n\n\nb",
        ];
        for input in inputs {
            let records = split_into_records(input);
            assert_eq!(records.join(RECORD_DELIMITER), input);
        }
    }

    #[test]
    fn test_split_into_records_keeps_leading_newline() {
        let records = split_into_records("\n1. Journal A\n\n\n2. Journal B\n");
        assert_eq!(records, vec!["\n1. Journal A", "2. Journal B\n"]);
    }

    #[test]
    fn test_six_separators_give_seven_fields() {
        let record = "J\n\nT\n\nA\n\nI\n\nAb\n\nDOI\n\nM";
        let fields = split_into_fields(record);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], "J");
        assert_eq!(fields[6], "M");
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        let fields = split_into_fields("\n1. Journal \n\n Title\nwraps ");
        assert_eq!(fields, vec!["\n1. Journal ", " Title\nwraps "]);
    }

    #[test]
    fn test_classification_boundary() {
        let six: FieldSet = (0..6).map(|i| i.to_string()).collect();
        let five: FieldSet = (0..5).map(|i| i.to_string()).collect();
        assert_eq!(classify(&six), Completeness::Complete);
        assert_eq!(classify(&five), Completeness::Partial);
        assert_eq!(classify(&[]), Completeness::Partial);
    }

    #[test]
    fn test_partition_routes_by_field_count() {
        let records = vec![
            record_with_fields(7, "a"),
            record_with_fields(5, "b"),
            record_with_fields(6, "c"),
            record_with_fields(1, "d"),
        ];
        let table = partition(&DelimiterSegmenter, &records);

        assert_eq!(table.len(), 4);
        assert_eq!(table.complete.len(), 2);
        assert_eq!(table.partial.len(), 2);
        assert_eq!(table.complete[0][0], "a field 1");
        assert_eq!(table.complete[1][0], "c field 1");
        assert_eq!(table.partial[0].len(), 5);
        assert_eq!(table.partial[1], vec!["d field 1".to_string()]);
    }

    #[test]
    fn test_complete_columns_match_canonical_order() {
        assert_eq!(COMPLETE_COLUMNS.len(), 7);
        assert_eq!(COMPLETE_COLUMNS[3], "Author_Information");
    }
}
