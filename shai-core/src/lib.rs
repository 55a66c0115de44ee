use shai_history::HistoryStore;
use shai_llm::LlmService;

/// Shared state handed to every HTTP handler.
#[derive(Clone, Debug)]
pub struct Data {
    pub history: HistoryStore,
    pub llm: LlmService,
}

impl Data {
    pub fn new(history: HistoryStore, llm: LlmService) -> Self {
        Self { history, llm }
    }
}
