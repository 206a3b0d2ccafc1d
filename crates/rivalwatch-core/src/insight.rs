use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;

/// A classified content change, ready to be appended to the insight store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInsight {
    pub competitor_id: i64,
    pub target_id: i64,
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub source_url: String,
    pub event_date: DateTime<Utc>,
}

/// Fingerprint transition committed alongside a [`NewInsight`].
///
/// `previous` is the value observed when the page was read; the store only
/// applies `current` if the target still carries `previous`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintUpdate {
    pub target_id: i64,
    pub previous: Option<String>,
    pub current: String,
}
