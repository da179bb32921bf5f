//! Telegram linking vocabulary: the `/link` command text and code normalization.

/// Bot command the user sends to redeem a one-time code.
pub const LINK_COMMAND: &str = "/link";

/// Render the instruction shown to the user after login, e.g. `/link A1B2C3`.
pub fn link_instruction(code: &str) -> String {
    format!("{LINK_COMMAND} {code}")
}

/// Normalize a code typed by a user: surrounding whitespace removed, uppercased.
///
/// Codes are always issued uppercase, so `a1b2c3` and ` A1B2C3 ` redeem the same
/// binding.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
