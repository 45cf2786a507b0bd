use serde::Deserialize;
use serde_json::Value;

/// Query of `GET /AdminNotification/sendTest`
#[derive(Debug, Default, Deserialize)]
pub struct SendTestQuery {
    /// Device registration token
    #[serde(rename = "fcmToken")]
    pub fcm_token: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Query of `GET /AdminNotification/broadcast`
#[derive(Debug, Default, Deserialize)]
pub struct BroadcastQuery {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Body of `POST /AdminNotification/sendToRoles`
#[derive(Debug, Default, Deserialize)]
pub struct SendToRolesRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Role ids as strings (`"3"`) or integers (`3`)
    #[serde(rename = "selectedRoles")]
    pub selected_roles: Option<Vec<Value>>,
}

/// Read a role id from a request entry. `None` when it is not an integer.
pub fn parse_role_id(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_role_id() {
        assert_eq!(parse_role_id(&json!("3")), Some(3));
        assert_eq!(parse_role_id(&json!("12")), Some(12));
        assert_eq!(parse_role_id(&json!(" 12 ")), None);
        assert_eq!(parse_role_id(&json!(7)), Some(7));
        assert_eq!(parse_role_id(&json!("abc")), None);
        assert_eq!(parse_role_id(&json!("1.5")), None);
        assert_eq!(parse_role_id(&json!(1.5)), None);
        assert_eq!(parse_role_id(&json!(null)), None);
        assert_eq!(parse_role_id(&json!(["1"])), None);
    }

    #[test]
    fn test_request_field_names() {
        let request: SendToRolesRequest = serde_json::from_value(json!({
            "title": "Exam Alert",
            "body": "New exam posted",
            "selectedRoles": ["1", "abc", 3]
        }))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Exam Alert"));
        assert_eq!(request.selected_roles.unwrap().len(), 3);

        let query: SendTestQuery =
            serde_json::from_value(json!({"fcmToken": "t", "title": "a"})).unwrap();
        assert_eq!(query.fcm_token.as_deref(), Some("t"));
        assert!(query.body.is_none());
    }
}
