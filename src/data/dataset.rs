// ============================================================
// Layer 4 — Review Dataset
// ============================================================
// Turns raw rows into Examples and exposes them through burn's
// Dataset trait.
//
// Per row, in source order:
//   1. collapse embedded newlines in the review to spaces
//   2. extract the label (Train parses score, Test skips it)
//   3. run the text field: tokenise, lowercase, truncate
//
// The split mode is a type parameter, so ReviewDataset<Train>
// yields LabeledExample and ReviewDataset<Test> yields
// UnlabeledExample.

use burn::data::dataset::Dataset;
use std::marker::PhantomData;

use crate::data::field::TextField;
use crate::domain::error::PrepError;
use crate::domain::example::{Example, SplitMode};
use crate::domain::review::RawReview;
use crate::domain::traits::ReviewSource;

pub struct ReviewDataset<M: SplitMode> {
    examples: Vec<Example<M::Label>>,
    _mode:    PhantomData<M>,
}

impl<M: SplitMode> ReviewDataset<M> {
    /// Load every row from `source` and process it with `field`.
    pub fn build(source: &impl ReviewSource, field: &TextField) -> Result<Self, PrepError> {
        tracing::info!("Preparing {} examples from {}", M::NAME, source.describe());
        let records = source.load_all()?;
        let dataset = Self::from_records(&records, field)?;
        tracing::info!("Prepared {} {} examples", dataset.example_count(), M::NAME);
        Ok(dataset)
    }

    /// Process rows that are already in memory.
    pub fn from_records(records: &[RawReview], field: &TextField) -> Result<Self, PrepError> {
        let examples = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let label  = M::label(r)?;
                let tokens = field.process(&r.flattened_text());
                Ok(Example::new(tokens, label).at(i))
            })
            .collect::<Result<Vec<_>, PrepError>>()?;

        Ok(Self { examples, _mode: PhantomData })
    }

    pub fn examples(&self) -> &[Example<M::Label>] {
        &self.examples
    }

    pub fn example_count(&self) -> usize {
        self.examples.len()
    }
}

impl<M: SplitMode> Dataset<Example<M::Label>> for ReviewDataset<M> {
    fn get(&self, index: usize) -> Option<Example<M::Label>> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::field::Truncation;
    use crate::data::loader::{tests::{scratch_dir, write_file}, CsvReviewLoader};
    use crate::data::tokenizer::ReviewTokenizer;
    use crate::domain::example::{Test, Train};

    fn field() -> TextField {
        TextField::new(ReviewTokenizer::new().unwrap(), 100, Truncation::Front)
    }

    #[test]
    fn test_toy_csv_train_examples() {
        let rows = vec![
            RawReview::new(1, "I wasn't happy!!", "2"),
            RawReview::new(2, "Great, really great.", "5"),
        ];
        let ds = ReviewDataset::<Train>::build(&rows, &field()).unwrap();

        assert_eq!(Dataset::len(&ds), 2);
        let first = ds.get(0).unwrap();
        assert_eq!(first.tokens, vec!["i", "be", "not", "happy"]);
        assert_eq!(first.label, 2.0);
        assert_eq!(ds.get(1).unwrap().tokens, vec!["great", "really", "great"]);
        assert_eq!(ds.get(1).unwrap().label, 5.0);
    }

    #[test]
    fn test_test_split_has_no_labels() {
        let rows = vec![RawReview::new(1, "Fine stay", "")];
        let ds   = ReviewDataset::<Test>::build(&rows, &field()).unwrap();
        assert_eq!(ds.get(0).unwrap().label, ());
    }

    #[test]
    fn test_examples_carry_their_position() {
        let rows: Vec<RawReview> = (1..=3).map(|n| RawReview::new(n, "nice", "4")).collect();
        let ds   = ReviewDataset::<Train>::from_records(&rows, &field()).unwrap();
        let positions: Vec<usize> = (0..3).map(|i| ds.get(i).unwrap().index).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_long_reviews_keep_last_tokens() {
        let text: Vec<String> = (0..130).map(|i| format!("t{i}")).collect();
        let rows = vec![RawReview::new(1, text.join("\n"), "3")];
        let ds   = ReviewDataset::<Train>::from_records(&rows, &field()).unwrap();

        let ex = ds.get(0).unwrap();
        assert_eq!(ex.tokens.len(), 100);
        assert_eq!(ex.tokens.first().unwrap(), "t30");
        assert_eq!(ex.tokens.last().unwrap(), "t129");
    }

    #[test]
    fn test_every_example_within_fixed_length() {
        let rows: Vec<RawReview> = (1..20)
            .map(|n| RawReview::new(n, "word ".repeat(n * 11), "1"))
            .collect();
        let ds = ReviewDataset::<Train>::from_records(&rows, &field()).unwrap();
        assert!(ds.examples().iter().all(|e| e.tokens.len() <= 100));
    }

    #[test]
    fn test_bad_label_propagates() {
        let rows = vec![RawReview::new(4, "ok", "n/a")];
        let err  = ReviewDataset::<Train>::from_records(&rows, &field()).err().unwrap();
        assert!(matches!(err, PrepError::InvalidLabel { row: 4, .. }));
    }

    #[test]
    fn test_empty_csv_gives_empty_dataset() {
        let dir  = scratch_dir("dataset_empty");
        let path = write_file(&dir, "train.csv", "review,score\n");
        let ds   = ReviewDataset::<Train>::build(&CsvReviewLoader::new(path), &field()).unwrap();
        assert!(Dataset::is_empty(&ds));
    }
}
