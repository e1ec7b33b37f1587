pub mod comparator;
pub mod render;
pub mod source;
pub mod stats;

// Re-export main types for convenient access
pub use comparator::{compare, ChangeCounts, Span, SpanKind};

// Re-export collaborator types used around the core
pub use source::{load_file, validate_matching_types, ComparisonInput, SourceConfig, SourceKind};

pub use render::{render_json, render_spans, render_summary, RenderConfig};

pub use stats::TextStats;
