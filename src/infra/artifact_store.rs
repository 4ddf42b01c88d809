// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Persists what a training driver needs from a prepare run:
//
//   output/
//     prepare_config.json  ← the knobs used for this run
//     tokenizer.json       ← the vocabulary as a HuggingFace
//                            WordLevel tokenizer
//     vocab_freqs.json     ← train-split token frequencies
//
// tokenizer.json is written by hand in the format that
// tokenizers::Tokenizer::from_file() expects, then loaded back
// so a malformed file fails here instead of in the driver.
// Its vocab is exactly the Vocabulary's itos, so index i in a
// batch tensor is token i in the tokenizer.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tokenizers::Tokenizer;

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::vocab::{Vocabulary, PAD_INDEX, PAD_TOKEN, UNK_INDEX, UNK_TOKEN};

const CONFIG_FILE:    &str = "prepare_config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const FREQS_FILE:     &str = "vocab_freqs.json";

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the outputs of an earlier run; nothing is created.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save the run configuration as pretty JSON.
    pub fn save_config(&self, cfg: &PrepareConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved prepare config to '{}'", path.display());
        Ok(())
    }

    /// Load a previously saved run configuration.
    pub fn load_config(&self) -> Result<PrepareConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the vocabulary as tokenizer.json and load it back.
    pub fn save_vocab(&self, vocab: &Vocabulary) -> Result<Tokenizer> {
        let mut map = serde_json::Map::with_capacity(vocab.len());
        for (i, token) in vocab.itos().iter().enumerate() {
            map.insert(token.clone(), serde_json::json!(i));
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": UNK_INDEX, "content": UNK_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": PAD_INDEX, "content": PAD_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": { "type": "Lowercase" },
            "pre_tokenizer": { "type": "WhitespaceSplit" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": map,
                "unk_token": UNK_TOKEN
            }
        });

        let path = self.dir.join(TOKENIZER_FILE);
        fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer to '{}'", path.display()))?;

        tracing::info!("Vocabulary of {} entries saved to '{}'", vocab.len(), path.display());
        self.load_tokenizer()
    }

    /// Load tokenizer.json written by save_vocab
    pub fn load_tokenizer(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
    }

    /// Save train-split token frequencies, most frequent first.
    pub fn save_freqs(&self, vocab: &Vocabulary) -> Result<()> {
        let mut freqs: Vec<(&String, &usize)> = vocab.freqs().iter().collect();
        freqs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let path = self.dir.join(FREQS_FILE);
        fs::write(&path, serde_json::to_string_pretty(&freqs)?)
            .with_context(|| format!("Cannot write frequencies to '{}'", path.display()))?;
        Ok(())
    }
}
