//! Uniform response wrapper returned by every admin operation.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{ success, messages, data?, <named results>... }`
///
/// Named results are flattened into the top-level object, so
/// `with_result("totalSent", 2)` serializes as `"totalSent": 2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminResponse {
    pub success: bool,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub results: Map<String, Value>,
}

impl AdminResponse {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            messages: Vec::new(),
            data: None,
            results: Map::new(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(true).with_message(message)
    }

    /// A failure always carries a message describing it.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_data<T: Serialize>(mut self, data: T) -> Self {
        self.data = Some(to_value(&data));
        self
    }

    pub fn with_result<T: Serialize>(mut self, name: &str, value: T) -> Self {
        self.results.insert(name.to_string(), to_value(&value));
        self
    }

    pub fn result(&self, name: &str) -> Option<&Value> {
        self.results.get(name)
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize envelope value");
        Value::Null
    })
}

impl IntoResponse for AdminResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_results_are_flattened() {
        let response = AdminResponse::ok("Role-based notification sent to 2 role(s)")
            .with_result("sentToRoles", vec!["Admin", "Student"])
            .with_result("totalSent", 2);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "messages": ["Role-based notification sent to 2 role(s)"],
                "sentToRoles": ["Admin", "Student"],
                "totalSent": 2
            })
        );
    }

    #[test]
    fn test_data_is_included_when_present() {
        let response = AdminResponse::ok("done").with_data("receipt-1");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"], "receipt-1");
    }

    #[test]
    fn test_failure_has_message() {
        let response = AdminResponse::failure("Failed to send test notification");
        assert!(!response.success);
        assert_eq!(response.messages.len(), 1);
        assert!(response.result("totalSent").is_none());
    }
}
