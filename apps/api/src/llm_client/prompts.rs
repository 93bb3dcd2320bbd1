// Cross-cutting prompt fragments.
// Each domain module that needs generation defines its own prompts.rs; this
// file holds only the fragments they share.

/// Instruction appended to every prompt that expects a structured payload.
pub const JSON_ONLY_INSTRUCTION: &str =
    "IMPORTANT: Return ONLY the JSON. No additional text, notes, or markdown formatting.";
