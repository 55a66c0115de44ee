/// Environment variable helpers used during startup.
pub mod env;
/// Shared formatting helpers (token gallons, log previews).
pub mod formatting;
/// Pure parser helpers.
pub mod parse;
