//! Response cleanup for generated code

/// Fence marker bounding a code block in generated text
pub const FENCE_MARKER: &str = "```";

/// Strip one fence marker from each end of `raw`.
///
/// Only the three marker characters are removed, so a language tag after the
/// opening fence (```` ```python ````) stays in the output. Interior markers are kept.
pub fn sanitize(raw: &str) -> String {
    let text = raw.strip_prefix(FENCE_MARKER).unwrap_or(raw);
    let text = text.strip_suffix(FENCE_MARKER).unwrap_or(text);
    text.to_string()
}
