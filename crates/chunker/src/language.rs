use crate::error::{ChunkerError, Result};
use crate::rules::GroupingRules;
use std::path::Path;

/// Supported programming language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is supported for AST parsing
    pub fn supports_ast(self) -> bool {
        matches!(
            self,
            Language::Rust | Language::Python | Language::JavaScript | Language::TypeScript
        )
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::Rust => Ok(tree_sitter_rust::LANGUAGE.into()),
            Language::Python => Ok(tree_sitter_python::LANGUAGE.into()),
            Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            _ => Err(ChunkerError::unsupported_language(self.as_str())),
        }
    }

    /// Default sibling grouping rules for this language
    pub fn grouping_rules(self) -> GroupingRules {
        match self {
            Language::Rust => GroupingRules::rust(),
            Language::Python => GroupingRules::python(),
            Language::JavaScript => GroupingRules::javascript(),
            Language::TypeScript => GroupingRules::typescript(),
            _ => GroupingRules::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("js"), Language::JavaScript);
        assert_eq!(Language::from_extension("ts"), Language::TypeScript);
        assert_eq!(Language::from_extension("unknown"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("test.rs"), Language::Rust);
        assert_eq!(Language::from_path("src/main.py"), Language::Python);
        assert_eq!(Language::from_path("index.ts"), Language::TypeScript);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn test_supports_ast() {
        assert!(Language::Rust.supports_ast());
        assert!(Language::Python.supports_ast());
        assert!(Language::JavaScript.supports_ast());
        assert!(Language::TypeScript.supports_ast());
        assert!(!Language::Go.supports_ast());
        assert!(!Language::Unknown.supports_ast());
    }

    #[test]
    fn test_tree_sitter_language() {
        assert!(Language::Rust.tree_sitter_language().is_ok());
        assert!(Language::Python.tree_sitter_language().is_ok());
        assert!(Language::JavaScript.tree_sitter_language().is_ok());
        assert!(Language::TypeScript.tree_sitter_language().is_ok());
        assert!(Language::Go.tree_sitter_language().is_err());
    }

    #[test]
    fn test_grouping_rules() {
        assert!(!Language::Rust.grouping_rules().is_empty());
        assert!(!Language::Python.grouping_rules().is_empty());
        assert!(Language::Go.grouping_rules().is_empty());
        assert!(Language::Unknown.grouping_rules().is_empty());
    }
}
