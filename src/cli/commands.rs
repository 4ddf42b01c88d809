// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `tokenize`, and
// all their flags. Defaults match the standard TripAdvisor +
// GloVe 6B 50d setup.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{builder::RangedU64ValueParser, Args, Subcommand, ValueEnum};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::field::Truncation;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build datasets, vocabulary and batch iterators from review CSVs
    Prepare(PrepareArgs),

    /// Print the normalised tokens for a piece of review text
    Tokenize(TokenizeArgs),
}

/// Sizes and lengths: zero is rejected at parse time
fn at_least_one() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

/// Which end of an over-long review to drop
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TruncateSide {
    /// Drop leading tokens, keep the last ones
    Front,
    /// Drop trailing tokens, keep the first ones
    Back,
}

impl From<TruncateSide> for Truncation {
    fn from(s: TruncateSide) -> Self {
        match s {
            TruncateSide::Front => Truncation::Front,
            TruncateSide::Back  => Truncation::Back,
        }
    }
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Labeled training CSV (columns: review, score)
    #[arg(long, default_value = "data/tripadvisor_train_dataset.csv")]
    pub train_path: String,

    /// Test CSV; the score column may be empty
    #[arg(long, default_value = "data/tripadvisor_test_dataset.csv")]
    pub test_path: String,

    /// Pretrained word vectors, one "word f1 .. fN" per line
    #[arg(long, default_value = "data/glove/glove.6B.50d.txt")]
    pub vectors_path: String,

    /// Directory for the parsed-vector cache
    #[arg(long, default_value = ".vector_cache")]
    pub cache_dir: String,

    /// Parse the vector file every time instead of using the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Where prepare_config.json and tokenizer.json are written
    #[arg(long, default_value = "prepared")]
    pub output_dir: String,

    /// Every review is cut or padded to this many tokens
    #[arg(long, default_value_t = 100, value_parser = at_least_one())]
    pub fixed_length: usize,

    /// Which end of a long review is dropped
    #[arg(long, value_enum, default_value_t = TruncateSide::Front)]
    pub truncate: TruncateSide,

    /// Reviews per batch
    #[arg(long, default_value_t = 32, value_parser = at_least_one())]
    pub batch_size: usize,

    /// Maximum number of corpus tokens in the vocabulary
    #[arg(long, default_value_t = 30_000)]
    pub max_vocab: usize,

    /// Dimension of the pretrained vectors
    #[arg(long, default_value_t = 50, value_parser = at_least_one())]
    pub embedding_dim: usize,

    /// Tag batches for the WGPU device instead of the CPU
    #[arg(long)]
    pub use_accelerator: bool,

    /// Seed for shuffling and vector initialisation
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            train_path:      a.train_path,
            test_path:       a.test_path,
            vectors_path:    a.vectors_path,
            cache_dir:       (!a.no_cache).then_some(a.cache_dir),
            output_dir:      a.output_dir,
            fixed_length:    a.fixed_length,
            truncation:      a.truncate.into(),
            batch_size:      a.batch_size,
            max_vocab:       a.max_vocab,
            embedding_dim:   a.embedding_dim,
            use_accelerator: a.use_accelerator,
            seed:            a.seed,
        }
    }
}

/// All arguments for the `tokenize` command
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// The review text to tokenise
    #[arg(long)]
    pub text: String,

    #[arg(long, default_value_t = 100, value_parser = at_least_one())]
    pub fixed_length: usize,

    #[arg(long, value_enum, default_value_t = TruncateSide::Front)]
    pub truncate: TruncateSide,

    /// Reuse the field settings saved by an earlier `prepare` run,
    /// overriding --fixed-length and --truncate
    #[arg(long)]
    pub run_dir: Option<String>,
}

impl From<TokenizeArgs> for PrepareConfig {
    fn from(a: TokenizeArgs) -> Self {
        PrepareConfig {
            fixed_length: a.fixed_length,
            truncation:   a.truncate.into(),
            ..PrepareConfig::default()
        }
    }
}
