use serde::{Deserialize, Serialize};

/// Aggregate counts over the feature list.
///
/// `total` counts every feature regardless of status; the three breakout
/// fields cover only the statuses the summary view surfaces, so features in
/// `testing` or `on_hold` contribute to `total` alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub planning: usize,
}
