use serde::{Deserialize, Serialize};

/// One output chunk with metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeChunk {
    /// Source file path
    pub file_path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// The actual code content
    pub content: String,

    /// Metadata about this chunk
    pub metadata: ChunkMetadata,
}

impl CodeChunk {
    /// Create a new code chunk
    #[must_use]
    pub const fn new(
        file_path: String,
        start_line: usize,
        end_line: usize,
        content: String,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            file_path,
            start_line,
            end_line,
            content,
            metadata,
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Measured size of the chunk's window span
    #[must_use]
    pub const fn size(&self) -> usize {
        self.metadata.size
    }

    /// Check if chunk contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Metadata about a code chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Programming language
    pub language: Option<String>,

    /// Kinds of the top-level units packed into this chunk's window. A
    /// fused group reports its primary member's kind.
    #[serde(default)]
    pub item_kinds: Vec<String>,

    /// Measured size of the window span under the configured metric. The
    /// emitted content may additionally carry absorbed whitespace between
    /// windows.
    pub size: usize,

    /// Whether this chunk holds a single indivisible unit larger than the
    /// window budget
    #[serde(default)]
    pub over_budget: bool,
}

impl ChunkMetadata {
    /// Create metadata with language only
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Default::default()
        }
    }

    /// Builder: set measured size
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Builder: mark the chunk as over budget
    #[must_use]
    pub const fn over_budget(mut self, over: bool) -> Self {
        self.over_budget = over;
        self
    }

    /// Builder: add a top-level item kind
    #[must_use]
    pub fn add_item_kind(mut self, kind: impl Into<String>) -> Self {
        self.item_kinds.push(kind.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_line_count() {
        let chunk = CodeChunk::new(
            "test.rs".to_string(),
            10,
            15,
            "code".to_string(),
            ChunkMetadata::default(),
        );
        assert_eq!(chunk.line_count(), 6);
    }

    #[test]
    fn test_chunk_contains_line() {
        let chunk = CodeChunk::new(
            "test.rs".to_string(),
            10,
            15,
            "code".to_string(),
            ChunkMetadata::default(),
        );
        assert!(chunk.contains_line(10));
        assert!(chunk.contains_line(12));
        assert!(chunk.contains_line(15));
        assert!(!chunk.contains_line(9));
        assert!(!chunk.contains_line(16));
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = ChunkMetadata::with_language("rust")
            .add_item_kind("function_item")
            .add_item_kind("struct_item")
            .size(120)
            .over_budget(false);

        assert_eq!(metadata.language.as_deref(), Some("rust"));
        assert_eq!(metadata.item_kinds.len(), 2);
        assert_eq!(metadata.size, 120);
        assert!(!metadata.over_budget);
    }

    #[test]
    fn test_chunk_serializes() {
        let chunk = CodeChunk::new(
            "test.py".to_string(),
            1,
            3,
            "def f():\n    pass\n".to_string(),
            ChunkMetadata::with_language("python").size(12),
        );
        let json = serde_json::to_string(&chunk).unwrap();
        let back: CodeChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
