use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::SwipeAction;

/// Payload forwarded to the host bot for every committed action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionReport {
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub action: SwipeAction,
    #[serde(rename = "profileId")]
    pub profile_id: u64,
}

impl ActionReport {
    pub fn new(action: SwipeAction, profile_id: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            action,
            profile_id,
        }
    }
}

/// Toast severity levels understood by the notification sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ActionReport::new(SwipeAction::Superlike, 42);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""profileId":42"#));
        assert!(json.contains(r#""action":"superlike""#));
        assert!(json.contains("eventId"));
    }
}
