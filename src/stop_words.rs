// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stop-word vocabulary.
//!
//! Stop words are excluded from both sides of the probe: they never get a
//! posting list in the index and they never pull candidates out of it.
//! Matching on "the" or "and" would make nearly every row of A a candidate
//! for every probe, which is the same as not having an index at all.
//!
//! The default list lives in `data/stop_words.txt`, one word per line, and is
//! embedded at compile time. It is parsed once per process. A custom list can
//! be loaded from disk with [`StopWords::from_file`]; that path fails fast if
//! the file is missing or unreadable. There is no silent fallback to an empty
//! list.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ResourceError;

static BUNDLED: LazyLock<StopWords> =
    LazyLock::new(|| StopWords::parse(include_str!("../data/stop_words.txt")));

/// A read-only set of words to exclude from indexing and probing.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The bundled English list, parsed on first use.
    pub fn bundled() -> &'static StopWords {
        &BUNDLED
    }

    /// Load a newline-delimited list from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ResourceError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                ResourceError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let words = Self::parse(&text);
        log::debug!("loaded {} stop words from {}", words.len(), path.display());
        Ok(words)
    }

    /// Build from an explicit word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse one word per line. Trailing whitespace and blank lines are ignored.
    ///
    /// Words are lower-cased so they line up with tokenizer output.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
