use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide count of LLM tokens spent, shared by every clone.
#[derive(Clone, Debug, Default)]
pub struct TokenUsage {
    total: Arc<AtomicU64>,
}

impl TokenUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, input_tokens: u64, output_tokens: u64) {
        self.total
            .fetch_add(input_tokens.saturating_add(output_tokens), Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
