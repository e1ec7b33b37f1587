use crate::comparator::{ChangeCounts, Span, SpanKind};
use anyhow::Result;

// Highlighting mirrors the usual diff presentation: additions green,
// removals red with strikethrough.
const ANSI_ADDED: &str = "\x1b[32m";
const ANSI_REMOVED: &str = "\x1b[31;9m";
const ANSI_RESET: &str = "\x1b[0m";

/// Configuration for rendering comparison output
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Highlight changes with ANSI escape sequences
    pub color: bool,
    /// Wrap changes in `[-...-]` / `{+...+}` markers (used when color is off)
    pub markers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            markers: false,
        }
    }
}

/// Render the span sequence as display text, in order, with no filtering.
///
/// Every span's content appears exactly once, so stripping the decoration
/// gives back both inputs interleaved per the comparator's alignment.
pub fn render_spans(spans: &[Span], config: &RenderConfig) -> String {
    let mut out = String::with_capacity(spans.iter().map(|s| s.content.len()).sum());

    for span in spans {
        match span.kind {
            SpanKind::Unchanged => out.push_str(&span.content),
            SpanKind::Removed => {
                if config.color {
                    out.push_str(ANSI_REMOVED);
                    out.push_str(&span.content);
                    out.push_str(ANSI_RESET);
                } else if config.markers {
                    out.push_str("[-");
                    out.push_str(&span.content);
                    out.push_str("-]");
                } else {
                    out.push_str(&span.content);
                }
            }
            SpanKind::Added => {
                if config.color {
                    out.push_str(ANSI_ADDED);
                    out.push_str(&span.content);
                    out.push_str(ANSI_RESET);
                } else if config.markers {
                    out.push_str("{+");
                    out.push_str(&span.content);
                    out.push_str("+}");
                } else {
                    out.push_str(&span.content);
                }
            }
        }
    }
    out
}

/// Render the span sequence as a JSON array of `{kind, content}` objects
pub fn render_json(spans: &[Span]) -> Result<String> {
    Ok(serde_json::to_string_pretty(spans)?)
}

/// One-line change summary, e.g. "2 removals, 1 addition"
pub fn render_summary(counts: &ChangeCounts) -> String {
    let removals = if counts.removed == 1 {
        "removal"
    } else {
        "removals"
    };
    let additions = if counts.added == 1 {
        "addition"
    } else {
        "additions"
    };
    format!(
        "{} {removals}, {} {additions}",
        counts.removed, counts.added
    )
}
