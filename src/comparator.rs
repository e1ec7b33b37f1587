use serde::{Deserialize, Serialize};
use tracing::debug;

/// Classification of a single span of comparison output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Added,
    Removed,
    Unchanged,
}

/// A classified run of text produced by [`compare`]
///
/// In strict mode the content is one whitespace-delimited token (whitespace
/// runs are tokens of their own); in loose mode it is a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    pub content: String,
}

impl Span {
    fn new(kind: SpanKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Added/removed totals derived from a comparison result
///
/// Presentation aggregate: computed on demand by filtering the span
/// sequence, never cached alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
}

impl ChangeCounts {
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut counts = Self::default();
        for span in spans {
            match span.kind {
                SpanKind::Added => counts.added += 1,
                SpanKind::Removed => counts.removed += 1,
                SpanKind::Unchanged => {}
            }
        }
        counts
    }
}

/// Compare two texts and classify every region as added, removed, or unchanged.
///
/// Pure function: no I/O, no hidden state, never fails. Identical inputs and
/// mode always produce the identical span sequence.
///
/// Strict mode (`ignore_formatting = false`) aligns whitespace-delimited
/// tokens by position. Loose mode (`ignore_formatting = true`) strips all
/// whitespace, lowercases, and aligns the normalized text character by
/// character.
///
/// The alignment is positional, not a minimal edit script: in strict mode a
/// single inserted token shifts every later position and reports the rest of
/// the text as removed+added pairs even where the content still matches.
pub fn compare(original: &str, modified: &str, ignore_formatting: bool) -> Vec<Span> {
    debug!(
        original_len = original.len(),
        modified_len = modified.len(),
        ignore_formatting,
        "Starting comparison"
    );

    let spans = if ignore_formatting {
        compare_loose(original, modified)
    } else {
        compare_strict(original, modified)
    };

    debug!("Comparison produced {} spans", spans.len());
    spans
}

/// Tokenwise positional alignment preserving case and whitespace
fn compare_strict(original: &str, modified: &str) -> Vec<Span> {
    let tokens1 = split_keep_whitespace(original);
    let tokens2 = split_keep_whitespace(modified);
    let max_len = tokens1.len().max(tokens2.len());

    let mut spans = Vec::new();
    for i in 0..max_len {
        let t1 = tokens1.get(i).copied().unwrap_or("");
        let t2 = tokens2.get(i).copied().unwrap_or("");

        if t1 == t2 {
            // Two empty tokens (past the shorter list's end) emit nothing
            if !t1.is_empty() {
                spans.push(Span::new(SpanKind::Unchanged, t1));
            }
        } else if !t1.is_empty() && t2.is_empty() {
            spans.push(Span::new(SpanKind::Removed, t1));
        } else if t1.is_empty() && !t2.is_empty() {
            spans.push(Span::new(SpanKind::Added, t2));
        } else {
            // Removed precedes added at the same position, fixed tie-break
            spans.push(Span::new(SpanKind::Removed, t1));
            spans.push(Span::new(SpanKind::Added, t2));
        }
    }
    spans
}

/// Character-wise alignment of whitespace-stripped, lowercased text
fn compare_loose(original: &str, modified: &str) -> Vec<Span> {
    let norm1: Vec<char> = normalize(original).chars().collect();
    let norm2: Vec<char> = normalize(modified).chars().collect();
    let raw1: Vec<char> = original.chars().collect();
    let raw2: Vec<char> = modified.chars().collect();
    let max_len = norm1.len().max(norm2.len());

    let mut spans = Vec::new();
    for i in 0..max_len {
        let c1 = norm1.get(i).copied();
        let c2 = norm2.get(i).copied();

        if c1 == c2 {
            if let Some(c) = c1 {
                // Display content is read at the raw index of the original
                // inputs, which no longer lines up with the compared
                // character once whitespace has been stripped ahead of it.
                // Kept as-is for parity with the shipped behavior.
                let display = raw1.get(i).or_else(|| raw2.get(i)).copied().unwrap_or(c);
                spans.push(Span::new(SpanKind::Unchanged, display.to_string()));
            }
        } else {
            if let Some(c) = c1 {
                let display = raw1.get(i).copied().unwrap_or(c);
                spans.push(Span::new(SpanKind::Removed, display.to_string()));
            }
            if let Some(c) = c2 {
                let display = raw2.get(i).copied().unwrap_or(c);
                spans.push(Span::new(SpanKind::Added, display.to_string()));
            }
        }
    }
    spans
}

/// Split text at whitespace-run boundaries, keeping each run as its own token.
///
/// Concatenating the tokens reconstructs the input exactly. Mirrors a
/// capturing split: a leading or trailing whitespace run gets an empty token
/// on its outer side, and the empty string splits into one empty token. The
/// empty tokens take part in positional alignment.
fn split_keep_whitespace(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut seg_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        if c.is_whitespace() {
            tokens.push(&text[seg_start..i]);
            while let Some(&(_, run_char)) = chars.peek() {
                if !run_char.is_whitespace() {
                    break;
                }
                chars.next();
            }
            let run_end = chars.peek().map(|&(j, _)| j).unwrap_or(text.len());
            tokens.push(&text[i..run_end]);
            seg_start = run_end;
        } else {
            chars.next();
        }
    }

    tokens.push(&text[seg_start..]);
    tokens
}

/// Remove all whitespace and lowercase the remainder
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if !c.is_whitespace() {
            out.extend(c.to_lowercase());
        }
    }
    out
}
