// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds cross-cutting pieces.

/// Keeps generated questions anchored to the supplied article text.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts stated in the provided article text. \
    Do NOT draw on outside knowledge, and do NOT invent names, dates, or numbers. \
    If the text does not support a question, do not ask it.";
