//! The escaped batch envelope: outer result decoded, inner bodies kept as text.

use serde::{Deserialize, Serialize};

/// Overall state of a batch on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Queued,
    InProgress,
    Completed,
    PartiallyCompleted,
    #[serde(other)]
    Unknown,
}

/// Coarse outcome of one sub-request, independent of how its body decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubResponseStatus {
    Completed,
    Failed,
    NotExecuted,
    /// A tag this client does not know; the slot still decodes, as `NotExecuted`.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SubResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
            Self::NotExecuted => write!(f, "NOT_EXECUTED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One sub-response with its body still encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapedSubResponse {
    pub id: String,
    /// Raw body text; absent when the sub-request never ran.
    #[serde(default, alias = "escapedHttpBody", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub http_status_code: u16,
    #[serde(default)]
    pub http_status_line: String,
    pub status: SubResponseStatus,
}

/// Outer result of a batch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapedBatchResult {
    pub status: BatchStatus,
    pub total_requests: u32,
    pub completed_requests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<EscapedSubResponse>>,
}

impl EscapedBatchResult {
    /// Sub-responses in server order; empty when the server sent none.
    pub fn responses(&self) -> &[EscapedSubResponse] {
        self.responses.as_deref().unwrap_or_default()
    }

    /// Look up a sub-response by the id assigned at encode time.
    pub fn response(&self, id: &str) -> Option<&EscapedSubResponse> {
        self.responses().iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_envelope_without_touching_bodies() {
        let text = r#"{
            "status": "COMPLETED",
            "totalRequests": 2,
            "completedRequests": 2,
            "responses": [
                {"id": "1", "httpStatusCode": 404, "httpStatusLine": "HTTP/1.1 404 Not Found",
                 "status": "FAILED", "body": "{\"errorMessage\":\"nope\"}"},
                {"id": "0", "httpStatusCode": 200, "httpStatusLine": "HTTP/1.1 200 OK",
                 "status": "COMPLETED", "escapedHttpBody": "not even json"}
            ]
        }"#;
        let result: EscapedBatchResult = serde_json::from_str(text).unwrap();
        assert_eq!(result.status, BatchStatus::Completed);
        assert_eq!(result.responses().len(), 2);

        let first = result.response("0").unwrap();
        assert_eq!(first.body.as_deref(), Some("not even json"));
        assert_eq!(first.status, SubResponseStatus::Completed);

        let second = result.response("1").unwrap();
        assert_eq!(second.http_status_code, 404);
        assert!(result.response("2").is_none());
    }

    #[test]
    fn not_executed_entries_may_omit_status_fields() {
        let text = r#"{"status":"PARTIALLY_COMPLETED","totalRequests":1,"completedRequests":0,
                       "responses":[{"id":"0","status":"NOT_EXECUTED"}]}"#;
        let result: EscapedBatchResult = serde_json::from_str(text).unwrap();
        let slot = result.response("0").unwrap();
        assert_eq!(slot.body, None);
        assert_eq!(slot.http_status_code, 0);
        assert_eq!(slot.status, SubResponseStatus::NotExecuted);
    }

    #[test]
    fn unknown_slot_status_keeps_siblings_readable() {
        let text = r#"{"status":"COMPLETED","totalRequests":2,"completedRequests":1,"responses":[
            {"id":"0","httpStatusCode":200,"status":"COMPLETED","body":"{\"id\":1}"},
            {"id":"1","status":"SKIPPED"}
        ]}"#;
        let result: EscapedBatchResult = serde_json::from_str(text).unwrap();
        assert_eq!(result.response("0").unwrap().status, SubResponseStatus::Completed);
        assert_eq!(result.response("1").unwrap().status, SubResponseStatus::Unknown);
    }

    #[test]
    fn absent_responses_and_unknown_status() {
        let text = r#"{"status":"ARCHIVED","totalRequests":0,"completedRequests":0}"#;
        let result: EscapedBatchResult = serde_json::from_str(text).unwrap();
        assert_eq!(result.status, BatchStatus::Unknown);
        assert!(result.responses.is_none());
        assert!(result.responses().is_empty());
    }
}
