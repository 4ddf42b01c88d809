// ============================================================
// Layer 4 — Review CSV Loader
// ============================================================
// Reads a review CSV fully into memory using the csv crate.
//
// Expected layout: a header row containing at least the columns
// `review` and `score` (any order, extra columns ignored):
//
//   id,review,score
//   1,"Lovely hotel, friendly staff",5
//   2,"Room was dirty",1
//
// Failure modes:
//   - file missing / unreadable       → PrepError::Io
//   - header lacks review or score    → PrepError::Schema
//   - a record cannot be parsed       → PrepError::Csv
//
// A header with no data rows is valid and yields zero rows.

use std::{fs::File, path::PathBuf};

use crate::domain::error::PrepError;
use crate::domain::review::RawReview;
use crate::domain::traits::ReviewSource;

pub const REVIEW_COLUMN: &str = "review";
pub const SCORE_COLUMN:  &str = "score";

/// Loads review rows from a CSV file.
/// Implements the ReviewSource trait from Layer 3.
pub struct CsvReviewLoader {
    path: PathBuf,
}

impl CsvReviewLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn csv_error(&self, source: csv::Error) -> PrepError {
        PrepError::Csv { path: self.path.clone(), source }
    }

    /// Position of `name` in the header row
    fn column(&self, headers: &csv::StringRecord, name: &str) -> Result<usize, PrepError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| PrepError::Schema {
                path:   self.path.clone(),
                column: name.to_string(),
            })
    }
}

impl ReviewSource for CsvReviewLoader {
    fn load_all(&self) -> Result<Vec<RawReview>, PrepError> {
        let file = File::open(&self.path).map_err(|e| PrepError::io(&self.path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .clone();

        let review_idx = self.column(&headers, REVIEW_COLUMN)?;
        let score_idx  = self.column(&headers, SCORE_COLUMN)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.csv_error(e))?;
            rows.push(RawReview::new(
                i + 1,
                record.get(review_idx).unwrap_or_default(),
                record.get(score_idx).unwrap_or_default(),
            ));
        }

        tracing::debug!("Read {} rows from '{}'", rows.len(), self.path.display());
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    /// Fresh per-test scratch directory under the system temp dir
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("review_prep_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub(crate) fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_in_order() {
        let dir  = scratch_dir("loader_order");
        let path = write_file(
            &dir,
            "train.csv",
            "id,review,score\n1,\"I wasn't happy!!\",2\n2,\"Great, really great.\",5\n",
        );

        let rows = CsvReviewLoader::new(&path).load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawReview::new(1, "I wasn't happy!!", "2"));
        assert_eq!(rows[1].review, "Great, really great.");
        assert_eq!(rows[1].score, "5");
    }

    #[test]
    fn test_multiline_review_is_one_row() {
        let dir  = scratch_dir("loader_multiline");
        let path = write_file(&dir, "t.csv", "review,score\n\"line one\nline two\",4\n");

        let rows = CsvReviewLoader::new(&path).load_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].flattened_text(), "line one line two");
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let dir  = scratch_dir("loader_empty");
        let path = write_file(&dir, "empty.csv", "review,score\n");
        assert!(CsvReviewLoader::new(&path).load_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir  = scratch_dir("loader_schema");
        let path = write_file(&dir, "bad.csv", "review,rating\nnice,5\n");

        let err = CsvReviewLoader::new(&path).load_all().unwrap_err();
        match err {
            PrepError::Schema { column, .. } => assert_eq!(column, "score"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = scratch_dir("loader_missing");
        let err = CsvReviewLoader::new(dir.join("nope.csv")).load_all().unwrap_err();
        assert!(matches!(err, PrepError::Io { .. }));
    }
}
