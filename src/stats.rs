use serde::{Deserialize, Serialize};

/// Per-input text statistics shown alongside comparison results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Number of characters (Unicode scalar values)
    pub characters: usize,
    /// Number of whitespace-separated words; 0 for whitespace-only input
    pub words: usize,
    /// Number of newline-separated segments; a trailing newline counts one more
    pub lines: usize,
}

impl TextStats {
    pub fn measure(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: text.split('\n').count(),
        }
    }
}
