//! Human-readable rendering of envelopes: envelope notation (the
//! tree-shaped `"Alice" [ "knows": "Bob" ]` form), a digest-annotated
//! structural tree dump, CBOR diagnostic notation, and hex dumps.
//! Every `_opt` entry point takes an explicit [`FormatContext`] rather
//! than reaching for a process-wide registry.

mod envelope_summary;
mod format_context;
mod hex;
mod notation;
mod tree;

pub use envelope_summary::EnvelopeSummary;
pub use format_context::FormatContext;
