use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Size function used to decide window packing.
///
/// Implementations must be monotonic under concatenation (a longer slice
/// never measures smaller than its prefix) or the greedy packing guarantee
/// does not hold.
pub trait Measure {
    fn size(&self, text: &str) -> usize;
}

/// Built-in size metrics, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeMetric {
    /// Count of non-whitespace characters (default). Indentation-heavy and
    /// compact code measure the same for the same amount of syntax.
    #[default]
    NonWhitespaceChars,

    /// Raw byte length of the slice
    Bytes,

    /// Rough token estimate: 4 bytes per token on average for code
    ApproxTokens,

    /// Unicode word count
    Words,
}

impl Measure for SizeMetric {
    fn size(&self, text: &str) -> usize {
        match self {
            Self::NonWhitespaceChars => text.chars().filter(|c| !c.is_whitespace()).count(),
            Self::Bytes => text.len(),
            Self::ApproxTokens => (text.len() / 4).max(1),
            Self::Words => text.unicode_words().count(),
        }
    }
}

impl<F> Measure for F
where
    F: Fn(&str) -> usize,
{
    fn size(&self, text: &str) -> usize {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_whitespace_ignores_indentation() {
        let compact = "fn f(){}";
        let spread = "fn f ( ) {\n    }\n";
        let metric = SizeMetric::NonWhitespaceChars;
        assert_eq!(metric.size(compact), metric.size(spread));
    }

    #[test]
    fn bytes_is_exact_length() {
        assert_eq!(SizeMetric::Bytes.size("abcd"), 4);
        assert_eq!(SizeMetric::Bytes.size(""), 0);
    }

    #[test]
    fn approx_tokens_matches_heuristic() {
        let content = "fn main() { println!(\"Hello\"); }";
        let tokens = SizeMetric::ApproxTokens.size(content);
        assert!(tokens > 0);
        assert!(tokens < 100);
    }

    #[test]
    fn words_counts_unicode_words() {
        assert_eq!(SizeMetric::Words.size("let answer = 42;"), 3);
    }

    #[test]
    fn closures_are_measures() {
        let by_lines = |text: &str| text.lines().count();
        assert_eq!(by_lines.size("a\nb\nc"), 3);
    }
}
