//! `storeapi batch`: run a file of requests as one batch call.
//!
//! The file holds `{"stopOnFirstFailure": bool?, "requests": [...]}` or a
//! bare array of requests, each `{method, endpoint, params?, body?}`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use storeapi_core::batch::{BatchRequest, TypedBatchResult, TypedResult};
use storeapi_core::client::ApiClient;
use storeapi_core::request::{HttpMethod, RequestBody, RequestInfo};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Wrapped {
        #[serde(default, rename = "stopOnFirstFailure")]
        stop_on_first_failure: bool,
        requests: Vec<FileRequest>,
    },
    Bare(Vec<FileRequest>),
}

#[derive(Debug, Deserialize)]
struct FileRequest {
    method: HttpMethod,
    endpoint: String,
    #[serde(default)]
    params: BTreeMap<String, Value>,
    #[serde(default)]
    body: Option<Value>,
}

impl FileRequest {
    fn into_request_info(self) -> RequestInfo {
        let body = match self.body {
            Some(value) => RequestBody::Json(value),
            None => RequestBody::Empty,
        };
        let mut info = match self.method {
            HttpMethod::Get => RequestInfo::get(self.endpoint),
            HttpMethod::Delete => RequestInfo::delete(self.endpoint),
            HttpMethod::Post => RequestInfo::post(self.endpoint, body),
            HttpMethod::Put => RequestInfo::put(self.endpoint, body),
        };
        for (name, value) in self.params {
            info = match value {
                Value::String(s) => info.param(name, s),
                other => info.param(name, other),
            };
        }
        info
    }
}

/// Per-slot line of the command's output.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SlotReport {
    Ok { id: String, value: Value },
    ApiError { id: String, error: String },
    ParseError { id: String, error: String },
    NotExecuted { id: String },
    Missing { id: String },
}

fn load(path: &Path, stop_flag: bool) -> Result<BatchRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading batch file {}", path.display()))?;
    build(&text, stop_flag).with_context(|| format!("parsing batch file {}", path.display()))
}

fn build(text: &str, stop_flag: bool) -> Result<BatchRequest> {
    let (stop_in_file, requests) = match serde_json::from_str::<BatchFile>(text)? {
        BatchFile::Wrapped {
            stop_on_first_failure,
            requests,
        } => (stop_on_first_failure, requests),
        BatchFile::Bare(requests) => (false, requests),
    };

    let mut batch = BatchRequest::new().stop_on_first_failure(stop_flag || stop_in_file);
    for request in requests {
        batch.add_info(request.into_request_info());
    }
    Ok(batch)
}

pub fn report(result: &TypedBatchResult, ids: &[String]) -> Vec<SlotReport> {
    ids.iter()
        .map(|id| {
            let id = id.clone();
            match result.typed::<Value>(&id) {
                None => SlotReport::Missing { id },
                Some(TypedResult::Ok(value)) => SlotReport::Ok { id, value },
                Some(TypedResult::ApiError(err)) => SlotReport::ApiError {
                    id,
                    error: err.to_string(),
                },
                Some(TypedResult::ParseError(err)) => SlotReport::ParseError {
                    id,
                    error: err.to_string(),
                },
                Some(TypedResult::NotExecuted) => SlotReport::NotExecuted { id },
            }
        })
        .collect()
}

pub async fn run(client: &ApiClient, file: &Path, stop_on_first_failure: bool) -> Result<()> {
    let batch = load(file, stop_on_first_failure)?;
    let ids: Vec<String> = (0..batch.len()).map(|i| i.to_string()).collect();
    tracing::info!(requests = ids.len(), file = %file.display(), "running batch");

    let result = client
        .execute_typed_batch(batch)
        .await
        .context("batch call failed")?;

    eprintln!(
        "batch {:?}: {}/{} completed",
        result.status(),
        result.completed_requests(),
        result.total_requests()
    );
    for line in report(&result, &ids) {
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeapi_core::batch::EscapedBatchResult;
    use storeapi_core::codec::JsonCodec;

    #[test]
    fn wrapped_file_with_params_and_body() {
        let batch = build(
            r#"{"stopOnFirstFailure": true, "requests": [
                {"method": "GET", "endpoint": "products", "params": {"limit": 5, "keyword": "hat"}},
                {"method": "PUT", "endpoint": "products/7", "body": {"price": 9.5}}
            ]}"#,
            false,
        )
        .unwrap();
        assert!(batch.stops_on_first_failure());

        let payload = batch.encode(&JsonCodec).unwrap();
        assert_eq!(payload.requests[0].params["limit"], "5");
        assert_eq!(payload.requests[0].params["keyword"], "hat");
        assert_eq!(payload.requests[1].body, Some(serde_json::json!({"price": 9.5})));
    }

    #[test]
    fn bare_array_and_flag() {
        let batch = build(r#"[{"method": "DELETE", "endpoint": "products/3"}]"#, true).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch.stops_on_first_failure());
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(build(r#"[{"method": "PATCH", "endpoint": "x"}]"#, false).is_err());
    }

    #[test]
    fn report_covers_every_outcome() {
        let escaped: EscapedBatchResult = serde_json::from_str(
            r#"{"status":"COMPLETED","totalRequests":4,"completedRequests":2,"responses":[
                {"id":"0","status":"COMPLETED","body":"{\"id\":1}"},
                {"id":"1","status":"FAILED","body":"{\"errorMessage\":\"nope\"}"},
                {"id":"2","status":"COMPLETED","body":"<html>"},
                {"id":"3","status":"NOT_EXECUTED"}
            ]}"#,
        )
        .unwrap();
        let result = TypedBatchResult::new(escaped, JsonCodec);
        let ids: Vec<String> = (0..5).map(|i| i.to_string()).collect();

        let lines = report(&result, &ids);
        assert_eq!(
            lines[0],
            SlotReport::Ok {
                id: "0".into(),
                value: serde_json::json!({"id": 1})
            }
        );
        assert_eq!(
            lines[1],
            SlotReport::ApiError {
                id: "1".into(),
                error: "nope".into()
            }
        );
        assert!(matches!(lines[2], SlotReport::ParseError { .. }));
        assert_eq!(lines[3], SlotReport::NotExecuted { id: "3".into() });
        assert_eq!(lines[4], SlotReport::Missing { id: "4".into() });

        let json = serde_json::to_value(&lines[3]).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "not_executed", "id": "3"}));
    }
}
