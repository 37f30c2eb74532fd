//! Context builder for RAG-augmented prompts
//!
//! Renders search hits into the plain-text block injected ahead of the user's
//! turn, and wraps that block into the hidden system instruction.

use crate::search::SearchHit;

/// Sentence placed ahead of the rendered hits in the system instruction
pub const CONTEXT_PREAMBLE: &str =
    "Here is some relevant information that might help answer the query:";

/// Instruction prefix for the transient system turn
pub const INSTRUCTION_PREFIX: &str = "Use the following information to help answer the user's question, but don't explicitly mention that you're using this retrieved information: ";

/// Render hits in received order.
///
/// Per hit: a `Title:` line if the title is present, a `Content:` line if the
/// content is present, then one blank line. A hit with neither field still
/// yields its blank line.
pub fn format_hits(hits: &[SearchHit]) -> String {
    let mut context = String::new();

    for hit in hits {
        if let Some(title) = hit.title() {
            context.push_str("Title: ");
            context.push_str(&title);
            context.push('\n');
        }
        if let Some(content) = hit.content() {
            context.push_str("Content: ");
            context.push_str(&content);
            context.push('\n');
        }
        context.push('\n');
    }

    context
}

/// Wrap a rendered block into the transient system instruction
pub fn build_instruction(context: &str) -> String {
    format!("{}{}\n{}", INSTRUCTION_PREFIX, CONTEXT_PREAMBLE, context)
}
