use serde::{Deserialize, Serialize};

/// Envelope shared by every task endpoint and every error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// A successful response with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_is_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::message("Task deleted successfully")).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Task deleted successfully" })
        );

        let value = serde_json::to_value(ApiResponse::ok("ok", vec![1, 2])).unwrap();
        assert_eq!(value["data"], json!([1, 2]));
    }
}
