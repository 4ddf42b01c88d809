// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the preparation pipeline in order:
//
//   Step 1: Build the tokenizer and text field  (Layer 4 - data)
//   Step 2: Build train and test datasets       (Layer 4 - data)
//   Step 3: Load pretrained vectors             (Layer 6 - infra)
//   Step 4: Build the vocabulary from train     (Layer 4 - data)
//   Step 5: Build train/test batch loaders      (Layer 4 - data)
//
// The config is validated before Step 1, so a zero batch size or
// sequence length is reported as an error instead of reaching burn.
//
// prepare() stops there and hands the loaders to the caller.
// execute() additionally saves artifacts and runs one pass over
// each loader so the CLI can report batch counts.
//
// Every failure aborts the run; the context added here names the
// step so the error chain reads "Cannot build the training
// dataset: 'x.csv' is missing required column 'score'".

use anyhow::{ensure, Context, Result};
use burn::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};

use crate::data::{
    batcher::ReviewBatcher,
    dataset::ReviewDataset,
    field::{TextField, Truncation},
    iterator::{review_loader, BatchOrder, ReviewLoader},
    loader::CsvReviewLoader,
    tokenizer::ReviewTokenizer,
    vocab::Vocabulary,
};
use crate::domain::example::{Test, Train};
use crate::infra::{artifact_store::ArtifactStore, vector_store::VectorStore};
use crate::ml::embedding::embedding_weights;

// ─── Preparation Configuration ───────────────────────────────────────────────
// Every knob of a run. Serialisable so the run can be recorded
// next to its outputs and reproduced later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub train_path:      String,
    pub test_path:       String,
    pub vectors_path:    String,
    pub cache_dir:       Option<String>,
    pub output_dir:      String,
    pub fixed_length:    usize,
    pub truncation:      Truncation,
    pub batch_size:      usize,
    pub max_vocab:       usize,
    pub embedding_dim:   usize,
    pub use_accelerator: bool,
    pub seed:            Option<u64>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            train_path:      "data/tripadvisor_train_dataset.csv".to_string(),
            test_path:       "data/tripadvisor_test_dataset.csv".to_string(),
            vectors_path:    "data/glove/glove.6B.50d.txt".to_string(),
            cache_dir:       Some(".vector_cache".to_string()),
            output_dir:      "prepared".to_string(),
            fixed_length:    100,
            truncation:      Truncation::Front,
            batch_size:      32,
            max_vocab:       30_000,
            embedding_dim:   50,
            use_accelerator: false,
            seed:            None,
        }
    }
}

impl PrepareConfig {
    /// Reject knobs no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size >= 1, "batch_size must be at least 1, got {}", self.batch_size);
        ensure!(self.fixed_length >= 1, "fixed_length must be at least 1, got {}", self.fixed_length);
        ensure!(self.embedding_dim >= 1, "embedding_dim must be at least 1, got {}", self.embedding_dim);
        Ok(())
    }
}

// ─── Outputs ─────────────────────────────────────────────────────────────────
/// Everything a training driver needs, on backend B.
pub struct PreparedData<B: Backend> {
    /// Shared by both loaders, built from train only
    pub vocab:           Arc<Vocabulary>,
    pub train:           ReviewLoader<B>,
    pub test:            ReviewLoader<B>,
    pub train_examples:  usize,
    pub test_examples:   usize,
    pub pretrained_hits: usize,
}

/// Summary of an execute() run
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareReport {
    pub train_examples:  usize,
    pub test_examples:   usize,
    pub vocab_size:      usize,
    pub pretrained_hits: usize,
    pub train_batches:   usize,
    pub test_batches:    usize,
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrepareConfig {
        &self.config
    }

    /// Run the pipeline and write artifacts, on the configured device.
    pub fn execute(&self) -> Result<PrepareReport> {
        if self.config.use_accelerator {
            let device = burn::backend::wgpu::WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            self.run::<burn::backend::Wgpu>(device)
        } else {
            tracing::info!("Using CPU (ndarray) device");
            self.run::<burn::backend::NdArray>(burn::backend::ndarray::NdArrayDevice::Cpu)
        }
    }

    fn run<B: Backend>(&self, device: B::Device) -> Result<PrepareReport> {
        let cfg  = &self.config;
        let data = self.prepare::<B>(device.clone())?;

        if let Some(weights) = embedding_weights::<B>(&data.vocab, &device) {
            tracing::info!("Embedding weights ready: {:?}", weights.dims());
        }

        let store = ArtifactStore::new(&cfg.output_dir)?;
        store.save_config(cfg)?;
        store.save_vocab(&data.vocab)?;
        store.save_freqs(&data.vocab)?;

        // One pass each: confirms every example batches cleanly
        let train_batches = one_pass("train", &data.train);
        let test_batches  = one_pass("test", &data.test);

        Ok(PrepareReport {
            train_examples:  data.train_examples,
            test_examples:   data.test_examples,
            vocab_size:      data.vocab.len(),
            pretrained_hits: data.pretrained_hits,
            train_batches,
            test_batches,
        })
    }

    /// Build datasets, vocabulary and loaders on `device`.
    pub fn prepare<B: Backend>(&self, device: B::Device) -> Result<PreparedData<B>> {
        let cfg = &self.config;
        cfg.validate().context("Invalid preparation config")?;

        // ── Step 1: Tokenizer and field ───────────────────────────────────────
        let tokenizer = ReviewTokenizer::new().context("Cannot compile tokenizer patterns")?;
        let field     = TextField::new(tokenizer, cfg.fixed_length, cfg.truncation);

        // ── Step 2: Datasets ──────────────────────────────────────────────────
        let train = ReviewDataset::<Train>::build(&CsvReviewLoader::new(&cfg.train_path), &field)
            .context("Cannot build the training dataset")?;
        let test  = ReviewDataset::<Test>::build(&CsvReviewLoader::new(&cfg.test_path), &field)
            .context("Cannot build the test dataset")?;

        if let Some(first) = train.examples().first() {
            tracing::info!("First train example: label={} tokens={:?}", first.label, first.tokens);
        }

        // ── Step 3: Pretrained vectors ────────────────────────────────────────
        let vector_store = match &cfg.cache_dir {
            Some(dir) => VectorStore::with_cache(dir),
            None      => VectorStore::new(),
        };
        let vectors = vector_store
            .load(Path::new(&cfg.vectors_path), cfg.embedding_dim)
            .context("Cannot load pretrained vectors")?;
        if vectors.is_empty() {
            tracing::warn!("'{}' holds no vectors; every row will be randomly initialised", cfg.vectors_path);
        }

        // ── Step 4: Vocabulary (train split only) ─────────────────────────────
        // One seed drives both the Xavier draws and the shuffle
        let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
        B::seed(seed);
        tracing::debug!("Run seed: {}", seed);

        let mut vocab       = Vocabulary::build(&train, cfg.max_vocab);
        let pretrained_hits = vocab.attach_vectors::<B>(&vectors, &device);
        let vocab           = Arc::new(vocab);

        // ── Step 5: Loaders ───────────────────────────────────────────────────
        let train_examples = train.example_count();
        let test_examples  = test.example_count();

        let train = review_loader(
            train,
            ReviewBatcher::new(device.clone(), Arc::clone(&vocab), cfg.fixed_length),
            cfg.batch_size,
            BatchOrder::Shuffled { seed },
        );
        let test = review_loader(
            test,
            ReviewBatcher::new(device, Arc::clone(&vocab), cfg.fixed_length),
            cfg.batch_size,
            BatchOrder::Sequential,
        );

        Ok(PreparedData { vocab, train, test, train_examples, test_examples, pretrained_hits })
    }

    /// Tokens the configured text field produces for `text`.
    pub fn preview_tokens(&self, text: &str) -> Result<Vec<String>> {
        let tokenizer = ReviewTokenizer::new().context("Cannot compile tokenizer patterns")?;
        let field     = TextField::new(tokenizer, self.config.fixed_length, self.config.truncation);
        Ok(field.process(text))
    }
}

/// Iterate one pass, returning the batch count.
fn one_pass<B: Backend>(split: &str, loader: &ReviewLoader<B>) -> usize {
    let (batches, rows) = loader
        .iter()
        .fold((0, 0), |(batches, rows), b| (batches + 1, rows + b.batch_size()));
    tracing::info!("One {} pass: {} batches, {} rows", split, batches, rows);
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::{scratch_dir, write_file};
    use crate::data::vocab::UNK_INDEX;
    use crate::domain::error::PrepError;
    use burn::backend::NdArray;

    const TRAIN: &str = "review,score\n\
        \"I wasn't happy!!\",2\n\
        \"Great, really great.\",5\n\
        \"The pool is great\",4\n";
    const TEST: &str = "review,score\n\"Spotless lobby, great pool\",\n";
    const GLOVE: &str = "great 1 1\npool 2 2\nlobby 3 3\n";

    fn config(name: &str) -> PrepareConfig {
        let dir = scratch_dir(name);
        PrepareConfig {
            train_path:    write_file(&dir, "train.csv", TRAIN).display().to_string(),
            test_path:     write_file(&dir, "test.csv", TEST).display().to_string(),
            vectors_path:  write_file(&dir, "glove.txt", GLOVE).display().to_string(),
            cache_dir:     Some(dir.join("cache").display().to_string()),
            output_dir:    dir.join("out").display().to_string(),
            batch_size:    2,
            embedding_dim: 2,
            seed:          Some(11),
            ..PrepareConfig::default()
        }
    }

    #[test]
    fn test_prepare_builds_shared_train_vocab() {
        let uc   = PrepareUseCase::new(config("usecase_prepare"));
        let data = uc.prepare::<NdArray>(Default::default()).unwrap();

        assert_eq!(data.train_examples, 3);
        assert_eq!(data.test_examples, 1);

        // Test-only words never enter the vocabulary
        assert_ne!(data.vocab.index_of("great"), UNK_INDEX);
        assert_eq!(data.vocab.index_of("spotless"), UNK_INDEX);
        assert_eq!(data.vocab.index_of("lobby"), UNK_INDEX);
        assert_eq!(data.pretrained_hits, 2);

        let train_batches: Vec<_> = data.train.iter().collect();
        assert_eq!(train_batches.len(), 2);
        assert!(train_batches.iter().all(|b| b.labels.is_some()));
        assert_eq!(train_batches[0].tokens.dims(), [2, 100]);

        let test_batches: Vec<_> = data.test.iter().collect();
        assert_eq!(test_batches.len(), 1);
        assert!(test_batches[0].labels.is_none());
        assert_eq!(test_batches[0].indices, vec![0]);
    }

    #[test]
    fn test_zero_batch_size_is_an_error() {
        let mut cfg = config("usecase_zero_batch");
        cfg.batch_size = 0;

        let err = PrepareUseCase::new(cfg).prepare::<NdArray>(Default::default()).err().unwrap();
        assert!(format!("{err:#}").contains("batch_size must be at least 1"));
    }

    #[test]
    fn test_validate_rejects_zero_lengths() {
        let cfg = PrepareConfig { fixed_length: 0, ..PrepareConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = PrepareConfig { embedding_dim: 0, ..PrepareConfig::default() };
        assert!(cfg.validate().is_err());

        assert!(PrepareConfig::default().validate().is_ok());
    }

    #[test]
    fn test_saved_config_reads_back() {
        let cfg = config("usecase_saved_config");
        let out = cfg.output_dir.clone();
        PrepareUseCase::new(cfg.clone()).execute().unwrap();

        let text   = std::fs::read_to_string(Path::new(&out).join("prepare_config.json")).unwrap();
        let loaded: PrepareConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.batch_size, cfg.batch_size);
        assert_eq!(loaded.seed, Some(11));
        assert_eq!(loaded.truncation, cfg.truncation);
    }

    #[test]
    fn test_execute_writes_artifacts() {
        let cfg    = config("usecase_execute");
        let out    = cfg.output_dir.clone();
        let report = PrepareUseCase::new(cfg).execute().unwrap();

        assert_eq!(report.train_examples, 3);
        assert_eq!(report.train_batches, 2);
        assert_eq!(report.test_batches, 1);
        assert!(Path::new(&out).join("tokenizer.json").exists());
        assert!(Path::new(&out).join("prepare_config.json").exists());
    }

    #[test]
    fn test_missing_vectors_propagate() {
        let mut cfg = config("usecase_no_vectors");
        cfg.vectors_path = "does/not/exist.txt".to_string();

        let err = PrepareUseCase::new(cfg).prepare::<NdArray>(Default::default()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_train_file_propagates() {
        let mut cfg = config("usecase_no_train");
        cfg.train_path = "does/not/exist.csv".to_string();

        let err = PrepareUseCase::new(cfg).prepare::<NdArray>(Default::default()).err().unwrap();
        assert!(matches!(err.downcast_ref::<PrepError>(), Some(PrepError::Io { .. })));
    }

    #[test]
    fn test_preview_tokens() {
        let uc = PrepareUseCase::new(PrepareConfig::default());
        assert_eq!(uc.preview_tokens("I wasn't happy!!").unwrap(), vec!["i", "be", "not", "happy"]);
    }
}
