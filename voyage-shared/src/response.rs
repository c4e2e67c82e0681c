use serde::{Deserialize, Serialize};

/// Uniform `{ success, data, error?, message? }` envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_data() {
        let body = serde_json::to_value(ApiResponse::failure("Client not found: C999")).unwrap();
        assert_eq!(body, serde_json::json!({ "success": false, "error": "Client not found: C999" }));
    }

    #[test]
    fn test_success_with_message() {
        let body = serde_json::to_value(ApiResponse::ok(3).with_message("deleted")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 3);
        assert_eq!(body["message"], "deleted");
        assert!(body.get("error").is_none());
    }
}
