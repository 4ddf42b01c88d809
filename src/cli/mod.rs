// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to Layer 2.
//
//   1. `prepare`  — runs the full pipeline and writes artifacts
//   2. `tokenize` — shows what the tokenizer does to some text,
//                   optionally with the settings of a saved run
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrepareArgs, TokenizeArgs};

use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase};
use crate::infra::artifact_store::ArtifactStore;

#[derive(Parser, Debug)]
#[command(
    name = "review-prep",
    version = "0.1.0",
    about = "Tokenise hotel reviews, build a GloVe-backed vocabulary, and batch them for training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)  => run_prepare(args),
            Commands::Tokenize(args) => run_tokenize(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    tracing::info!("Preparing reviews from '{}' and '{}'", args.train_path, args.test_path);

    let use_case = PrepareUseCase::new(args.into());
    let report   = use_case.execute()?;

    println!(
        "Prepared {} train / {} test examples, vocabulary {} ({} with pretrained vectors).",
        report.train_examples, report.test_examples, report.vocab_size, report.pretrained_hits,
    );
    println!(
        "Batches per pass: {} train, {} test. Artifacts in '{}'.",
        report.train_batches,
        report.test_batches,
        use_case.config().output_dir,
    );
    Ok(())
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    let text     = args.text.clone();
    let use_case = PrepareUseCase::new(tokenize_config(args)?);
    for token in use_case.preview_tokens(&text)? {
        println!("{token}");
    }
    Ok(())
}

/// Field settings for `tokenize`: a saved run's config, or the flags.
fn tokenize_config(mut args: TokenizeArgs) -> Result<PrepareConfig> {
    match args.run_dir.take() {
        Some(dir) => {
            tracing::info!("Using field settings saved in '{}'", dir);
            ArtifactStore::open(dir).load_config()
        }
        None => Ok(args.into()),
    }
}
