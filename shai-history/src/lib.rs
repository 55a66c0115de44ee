pub mod error;
pub mod history_store;
pub mod model;
pub mod storage;

pub use error::HistoryError;
pub use history_store::{DEFAULT_SCOPE, HistoryStore, MAX_HISTORY_RECORDS};
pub use model::history::HistoryRecord;
pub use storage::StorageService;
