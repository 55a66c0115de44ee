use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed generation as persisted in the history log.
///
/// Field names are camelCase on the wire so the persisted array stays
/// readable by the browser client that writes the same shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub user_input: String,
    pub pickup_lines: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub using_local: bool,
}
