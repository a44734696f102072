//! HTTP-shaped response envelope
//!
//! `{statusCode, headers, body}` where body is already JSON text, the shape
//! API Gateway expects back from a proxy integration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// JSON response with only a `Content-Type` header.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|e| {
            tracing::error!("response serialization failed: {}", e);
            serde_json::json!({ "error": e.to_string() }).to_string()
        });

        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned());

        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Allow any origin.
    pub fn with_cors(mut self) -> Self {
        self.headers.insert(ALLOW_ORIGIN.to_owned(), "*".to_owned());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Build a JSON response with permissive cross-origin headers.
pub fn build<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> ResponseEnvelope {
    ResponseEnvelope::json(status_code, payload).with_cors()
}

/// 400 body
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub success: bool,
    pub message: String,
}

/// 404 body
#[derive(Debug, Serialize)]
pub struct Missing {
    pub message: &'static str,
    pub data: Option<()>,
}

/// 500 body
#[derive(Debug, Serialize)]
pub struct Failure {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_sets_json_and_cors_headers() {
        let response = build(200, &json!({ "message": "Success" }));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(response.header(ALLOW_ORIGIN), Some("*"));
        assert_eq!(response.body, r#"{"message":"Success"}"#);
    }

    #[test]
    fn plain_json_has_no_cors() {
        let response = ResponseEnvelope::json(500, &Failure { error: "boom".into() });
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.body, r#"{"error":"boom"}"#);
    }

    #[test]
    fn envelope_serializes_for_api_gateway() {
        let response = build(404, &Missing {
            message: "Book record not found",
            data: None,
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 404,
                "headers": {
                    "Access-Control-Allow-Origin": "*",
                    "Content-Type": "application/json"
                },
                "body": r#"{"message":"Book record not found","data":null}"#
            })
        );
    }
}
