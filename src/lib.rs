// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Coverage-aware down-sampling of table pairs for entity matching.
//!
//! Given two large tables A and B, produce a much smaller pair A' ⊆ A and
//! B' ⊆ B that still contains many likely matching rows, so that interactive
//! blocking and matching work can be iterated on quickly.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ stop_words.rs│────▶│ tokenizer.rs │────▶│  inverted.rs │
//! │ (StopWords)  │     │ (tokenize)   │     │ (token→rows) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!                                                  ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  catalog.rs  │◀────│ downsample.rs│────▶│  sampler.rs  │
//! │ (properties) │     │ (DownSampler)│     │ (per probe)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                    │                    │
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                      contracts.rs                        │
//! │   (well-formed index, distinct in-range selections)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use downsample::catalog::MemoryCatalog;
//! use downsample::{down_sample, Column, Table, Value};
//!
//! let rows = |n: i64| -> Vec<Vec<Value>> {
//!     (0..n)
//!         .map(|i| vec![Value::from(i), Value::from(format!("kw{}", i % 5))])
//!         .collect()
//! };
//! let columns = || vec![Column::numeric("id"), Column::textual("tag")];
//! let a = Table::new(columns(), rows(40)).unwrap();
//! let b = Table::new(columns(), rows(20)).unwrap();
//!
//! let catalog = MemoryCatalog::new();
//! let (a_sample, b_sample) = down_sample(&a, &b, 5, 4, &catalog).unwrap();
//! assert_eq!(b_sample.len(), 5);
//! assert!(a_sample.len() >= 4 && a_sample.len() <= 20);
//! ```

pub mod catalog;
pub mod config;
pub mod contracts;
pub mod downsample;
pub mod error;
pub mod inverted;
pub mod io;
pub mod sampler;
pub mod stop_words;
pub mod tokenizer;
pub mod types;

#[doc(hidden)]
pub mod testing;

pub use catalog::{Catalog, MemoryCatalog, Properties, PropertyValue};
pub use config::{ProbeStrategy, SamplerConfig};
pub use downsample::{down_sample, DownSampler, SampleResult, SampleStats};
pub use error::{CatalogError, ResourceError, SampleError, TableError};
#[cfg(feature = "parallel")]
pub use inverted::build_inverted_index_parallel;
pub use inverted::{build_inverted_index, InvertedIndex};
pub use sampler::{probe_and_select, CoverageAccumulator, CoverageSampler, Probe};
pub use stop_words::StopWords;
pub use tokenizer::{textual_columns, tokenize, TokenSet, Tokenizer};
pub use types::{Column, ColumnKind, Row, Table, TableId, Value};
