// ============================================================
// Layer 6 — Pretrained Vector Store
// ============================================================
// Loads a GloVe-style text file of word vectors:
//
//   the 0.418 0.24968 -0.41242 ...
//   ,   0.013441 0.23682 -0.16899 ...
//
// One word, then `dim` floats, separated by single spaces.
// A word2vec-style header line ("400000 50") is skipped.
//
// Parsing a 400k-word file takes a while, so the parsed table
// can be memoised as JSON in a cache directory:
//
//   .vector_cache/
//     glove.6B.50d.txt.json
//
// The cache records the source file size and the dimension; a
// cache that does not match either, or that fails to decode,
// is rebuilt from the text file.

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::domain::error::PrepError;
use crate::domain::traits::WordVectors;

// ─── PretrainedVectors ────────────────────────────────────────────────────────
/// An in-memory word → vector table.
#[derive(Debug, Clone)]
pub struct PretrainedVectors {
    dim:   usize,
    words: Vec<String>,
    data:  Vec<f32>,
    index: HashMap<String, usize>,
}

impl PretrainedVectors {
    /// Build from a word list and a row-major [words, dim] float buffer.
    pub fn from_parts(dim: usize, words: Vec<String>, data: Vec<f32>) -> Self {
        let mut index = HashMap::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            index.entry(w.clone()).or_insert(i);
        }
        Self { dim, words, data, index }
    }

    /// Parse a text vector file, expecting `dim` floats per line.
    pub fn parse_file(path: &Path, dim: usize) -> Result<Self, PrepError> {
        let file   = File::open(path).map_err(|e| PrepError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut words = Vec::new();
        let mut data  = Vec::new();
        let mut index = HashMap::new();
        let mut first = true;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line    = line.map_err(|e| PrepError::io(path, e))?;
            let line    = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split(' ');
            let word      = parts.next().unwrap_or_default();
            let values: Vec<&str> = parts.collect();

            if std::mem::take(&mut first) && is_header(word, &values) {
                tracing::debug!("Skipping header line in '{}'", path.display());
                continue;
            }

            if values.len() != dim {
                return Err(PrepError::InvalidVectors {
                    path:   path.to_path_buf(),
                    line:   line_no,
                    reason: format!("expected {dim} values, found {}", values.len()),
                });
            }

            // Keep the first occurrence of a repeated word
            if index.contains_key(word) {
                continue;
            }

            for v in values {
                let x = v.parse::<f32>().map_err(|_| PrepError::InvalidVectors {
                    path:   path.to_path_buf(),
                    line:   line_no,
                    reason: format!("'{v}' is not a number"),
                })?;
                data.push(x);
            }
            index.insert(word.to_string(), words.len());
            words.push(word.to_string());
        }

        Ok(Self { dim, words, data, index })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordVectors for PretrainedVectors {
    fn dim(&self) -> usize {
        self.dim
    }

    fn vector(&self, token: &str) -> Option<&[f32]> {
        let i = *self.index.get(token)?;
        self.data.get(i * self.dim..(i + 1) * self.dim)
    }
}

/// "count dim" on the first line, as written by word2vec tools
fn is_header(word: &str, values: &[&str]) -> bool {
    values.len() == 1 && word.parse::<usize>().is_ok() && values[0].parse::<usize>().is_ok()
}

// ─── Cache Record ─────────────────────────────────────────────────────────────
#[derive(Serialize, Deserialize)]
struct CacheRecord {
    source_len: u64,
    dim:        usize,
    words:      Vec<String>,
    data:       Vec<f32>,
}

// ─── VectorStore ──────────────────────────────────────────────────────────────
/// Loads pretrained vectors, going through the cache when one is set.
pub struct VectorStore {
    cache_dir: Option<PathBuf>,
}

impl VectorStore {
    /// A store that always parses the text file
    pub fn new() -> Self {
        Self { cache_dir: None }
    }

    /// A store that memoises parsed tables under `dir`
    pub fn with_cache(dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: Some(dir.into()) }
    }

    /// Load `path`, expecting `dim`-dimensional vectors.
    pub fn load(&self, path: &Path, dim: usize) -> Result<PretrainedVectors, PrepError> {
        // Checked before the cache so a missing file is always reported
        let meta = fs::metadata(path).map_err(|_| PrepError::ResourceNotFound {
            path: path.to_path_buf(),
        })?;

        let cache_path = self.cache_path(path);

        if let Some(cp) = &cache_path {
            if let Some(vectors) = read_cache(cp, meta.len(), dim) {
                tracing::info!("Loaded {} vectors from cache '{}'", vectors.len(), cp.display());
                return Ok(vectors);
            }
        }

        tracing::info!("Parsing pretrained vectors from '{}'", path.display());
        let vectors = PretrainedVectors::parse_file(path, dim)?;
        tracing::info!("Parsed {} {}-d vectors", vectors.len(), dim);

        if let Some(cp) = &cache_path {
            write_cache(cp, meta.len(), &vectors)?;
            tracing::debug!("Cached vectors to '{}'", cp.display());
        }

        Ok(vectors)
    }

    fn cache_path(&self, source: &Path) -> Option<PathBuf> {
        let dir  = self.cache_dir.as_ref()?;
        let name = source.file_name()?.to_string_lossy();
        Some(dir.join(format!("{name}.json")))
    }
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

/// None when the cache is absent, stale or unreadable
fn read_cache(path: &Path, source_len: u64, dim: usize) -> Option<PretrainedVectors> {
    let file = File::open(path).ok()?;
    let record: CacheRecord = match serde_json::from_reader(BufReader::new(file)) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Ignoring unreadable vector cache '{}': {}", path.display(), e);
            return None;
        }
    };

    if record.source_len != source_len || record.dim != dim {
        tracing::debug!("Vector cache '{}' is stale, rebuilding", path.display());
        return None;
    }

    Some(PretrainedVectors::from_parts(record.dim, record.words, record.data))
}

fn write_cache(path: &Path, source_len: u64, vectors: &PretrainedVectors) -> Result<(), PrepError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| PrepError::io(dir, e))?;
    }

    let record = CacheRecord {
        source_len,
        dim:   vectors.dim,
        words: vectors.words.clone(),
        data:  vectors.data.clone(),
    };

    let file = File::create(path).map_err(|e| PrepError::io(path, e))?;
    serde_json::to_writer(BufWriter::new(file), &record).map_err(|source| PrepError::Cache {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::{scratch_dir, write_file};

    const GLOVE: &str = "hotel 0.1 0.2 0.3\nclean -1 0 1\nhotel 9 9 9\n";

    #[test]
    fn test_parses_words_and_vectors() {
        let dir  = scratch_dir("vectors_parse");
        let path = write_file(&dir, "glove.txt", GLOVE);

        let v = VectorStore::new().load(&path, 3).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.dim(), 3);
        assert_eq!(v.vector("clean").unwrap(), &[-1.0, 0.0, 1.0]);
        // First occurrence wins
        assert_eq!(v.vector("hotel").unwrap(), &[0.1, 0.2, 0.3]);
        assert!(v.vector("motel").is_none());
    }

    #[test]
    fn test_skips_word2vec_header() {
        let dir  = scratch_dir("vectors_header");
        let path = write_file(&dir, "w2v.txt", "2 2\ngood 1 2\nbad 3 4\n");

        let v = PretrainedVectors::parse_file(&path, 2).unwrap();
        assert_eq!(v.words(), &["good", "bad"]);
    }

    #[test]
    fn test_wrong_dimension_is_an_error() {
        let dir  = scratch_dir("vectors_dim");
        let path = write_file(&dir, "glove.txt", "good 1 2\nbad 3\n");

        let err = PretrainedVectors::parse_file(&path, 2).unwrap_err();
        assert!(matches!(err, PrepError::InvalidVectors { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_is_resource_not_found() {
        let dir = scratch_dir("vectors_missing");
        let err = VectorStore::with_cache(dir.join("cache"))
            .load(&dir.join("glove.6B.50d.txt"), 50)
            .unwrap_err();
        assert!(matches!(err, PrepError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_cache_is_written_and_reused() {
        let dir   = scratch_dir("vectors_cache");
        let path  = write_file(&dir, "glove.txt", GLOVE);
        let cache = dir.join(".vector_cache");
        let store = VectorStore::with_cache(&cache);

        let first = store.load(&path, 3).unwrap();
        assert!(cache.join("glove.txt.json").exists());

        let second = store.load(&path, 3).unwrap();
        assert_eq!(first.words(), second.words());
        assert_eq!(second.vector("clean").unwrap(), &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_corrupt_cache_is_rebuilt() {
        let dir   = scratch_dir("vectors_corrupt");
        let path  = write_file(&dir, "glove.txt", GLOVE);
        let cache = dir.join("cache");
        fs::create_dir_all(&cache).unwrap();
        write_file(&cache, "glove.txt.json", "{ not json");

        let v = VectorStore::with_cache(&cache).load(&path, 3).unwrap();
        assert_eq!(v.len(), 2);
    }
}
