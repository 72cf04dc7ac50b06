//! The success/failure envelope every remote call returns.

use serde::{Deserialize, Serialize};

/// Standard remote response wrapper.
///
/// `success == false` means the remote could not carry out the operation
/// (unknown id, rejected mutation). `data` may still be present in that case,
/// e.g. an [`ActionResult`](crate::ActionResult) describing the refusal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A failed response with no payload.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Build a response whose success flag follows the presence of `data`.
    pub fn from_option(data: Option<T>) -> Self {
        Self {
            success: data.is_some(),
            data,
            message: None,
        }
    }

    /// Returns the payload only when the call succeeded and carried one.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_response_drops_payload() {
        let response = ApiResponse {
            success: false,
            data: Some(5),
            message: None,
        };
        assert_eq!(response.into_data(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(ApiResponse::from_option(Some("x")).success);
        assert!(!ApiResponse::<&str>::from_option(None).success);
    }

    #[test]
    fn test_message_is_optional_on_the_wire() {
        let parsed: ApiResponse<u32> =
            serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(parsed, ApiResponse::ok(7));
    }
}
