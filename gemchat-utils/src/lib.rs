/// Environment variable parsing helpers.
pub mod env;
/// Message sanitization and markdown-to-markup formatting.
pub mod formatting;
