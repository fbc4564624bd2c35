//! # treechunk
//!
//! Structure-aware source-code chunking on tree-sitter parse trees.
//!
//! ## Philosophy
//!
//! The chunker partitions a source file into contiguous byte-range windows
//! bounded by a size budget, and it never splits a syntactically meaningful
//! unit (a function together with its attached decorators, attributes, or
//! doc comments) across two windows unless that unit alone exceeds the
//! budget. Oversized units are subdivided recursively along their own
//! children, so every window is as large as the budget allows while still
//! ending on a syntactic boundary.
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Tree-sitter Parsing → AST
//!     │
//!     ├──> Sibling Grouping (per-language rules)
//!     │    └─> decorators/attributes/comments fuse with
//!     │        the definition they annotate (GroupedNode)
//!     │
//!     └──> Recursive Splitting (Splitter)
//!          ├─> greedy left-to-right window packing
//!          ├─> descend into units larger than the budget
//!          └─> emit CodeChunk[] tiling the input exactly
//! ```
//!
//! Real nodes and fused groups are handled uniformly through the
//! [`Chunkable`] trait, so the splitting algorithm is written once and works
//! at every tree depth. The whole pipeline is a pure function of
//! (tree, budget, measure, rules): no shared state, deterministic output,
//! and independent files can be chunked in parallel by independent callers.
//!
//! ## Example
//!
//! ```rust
//! use treechunk::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::default());
//! let code = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
//!
//! let chunks = chunker.chunk_str(code, Some("example.rs")).unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert!(!chunks[0].metadata.over_budget);
//! ```

mod chunkable;
mod chunker;
mod config;
mod error;
mod group;
mod language;
mod measure;
mod node;
mod rules;
mod splitter;
mod types;

pub use chunkable::Chunkable;
pub use chunker::{Chunker, ChunkingStats};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use group::GroupedNode;
pub use language::Language;
pub use measure::{Measure, SizeMetric};
pub use node::SourceUnit;
pub use rules::{GroupingRule, GroupingRules, SiblingGrouping};
pub use splitter::{Splitter, Window};
pub use types::{ChunkMetadata, CodeChunk};
