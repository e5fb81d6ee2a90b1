//! Per-river result envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::River;

/// Outcome of one upstream fetch. Serialized as either a `data` or an
/// `error` key, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiverOutcome {
    /// Parsed upstream JSON body, passed through untouched.
    Data(Value),
    /// Description of why the fetch failed.
    Error(String),
}

/// Result record returned for each river.
///
/// Field order is alphabetical so serialized keys come out sorted:
/// `color`, `data`/`error`, `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverResult {
    /// River display color.
    pub color: String,
    /// Fetched data or error.
    #[serde(flatten)]
    pub outcome: RiverOutcome,
    /// River display name.
    pub name: String,
}

impl RiverResult {
    /// Successful result for `river`.
    pub fn data(river: &River, data: Value) -> Self {
        Self::with_outcome(river, RiverOutcome::Data(data))
    }

    /// Failed result for `river`.
    pub fn error(river: &River, error: impl Into<String>) -> Self {
        Self::with_outcome(river, RiverOutcome::Error(error.into()))
    }

    fn with_outcome(river: &River, outcome: RiverOutcome) -> Self {
        Self {
            color: river.color.clone(),
            outcome,
            name: river.name.clone(),
        }
    }

    /// Whether the fetch succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, RiverOutcome::Data(_))
    }

    /// Error text, if the fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            RiverOutcome::Error(e) => Some(e),
            RiverOutcome::Data(_) => None,
        }
    }
}
