//! The persistent system prompt that opens every session.

/// Support persona for a company selling monitors, printers, and accessories.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, precise customer support assistant for a company \
that sells computer products like monitors, printers, and accessories. \
Use tools when needed to look up product details, order status, or warranty info. \
Always explain things clearly and keep answers concise.";

/// Pick the configured prompt, falling back to the default when blank.
pub fn resolve_system_prompt(configured: &str) -> &str {
    if configured.trim().is_empty() {
        DEFAULT_SYSTEM_PROMPT
    } else {
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_falls_back_to_default() {
        assert_eq!(resolve_system_prompt("  "), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(resolve_system_prompt("Be terse."), "Be terse.");
    }
}
