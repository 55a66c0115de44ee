pub mod claude;
pub mod client;
pub mod parse;
pub mod persona;
pub mod prompt;
pub mod usage;

pub use claude::ClaudeClient;
pub use client::{Generation, LlmService};
pub use persona::Persona;
pub use usage::TokenUsage;
