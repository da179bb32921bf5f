//! Helpers for loading service configuration from environment variables.
//!
//! Services call these from their own `from_env()` constructors at startup.

use std::str::FromStr;

/// Read a required env var.
///
/// # Panics
///
/// Panics with the variable name if it is unset or not valid unicode.
pub fn required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("missing required env var {name}"))
}

/// Read an optional env var and parse it, falling back to `default` when unset or
/// unparseable.
pub fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    parse_value(std::env::var(name).ok().as_deref(), default)
}

fn parse_value<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
