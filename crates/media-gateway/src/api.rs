//! Typed accessors for backend resources
//!
//! The backend wraps every body in its own `{code, message, data}` envelope.
//! The gateway strips the HTTP envelope only; the service envelope is the
//! body and is returned intact.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gateway::Gateway;
use crate::request::RequestDescriptor;

const TOOL_TREE_PATH: &str = "/tool/tree";

/// Service response code signalling success
pub const CODE_SUCCESS: i32 = 200;

/// The service's own response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Service response code (200 on success)
    pub code: i32,
    /// Human-readable response message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload, absent on failure responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the service reported success
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

/// One node of the tool category tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCategory {
    /// Category identifier
    pub tool_id: i64,
    /// Display name
    pub tool_name: String,
    /// Navigation path for the category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Description text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort weight among siblings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i32>,
    /// Parent category identifier, absent on roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Creation timestamp (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    /// Child categories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ToolCategory>,
}

impl Gateway {
    /// Fetch the tool category tree
    ///
    /// # Errors
    ///
    /// Propagates every gateway failure; see [`Gateway::send`].
    pub async fn tool_category_tree(&self) -> Result<ApiResponse<Vec<ToolCategory>>> {
        self.send(RequestDescriptor::get(TOOL_TREE_PATH)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success_code() {
        let response: ApiResponse<()> = ApiResponse {
            code: CODE_SUCCESS,
            message: Some("ok".to_string()),
            data: None,
        };
        assert!(response.is_success());

        let response: ApiResponse<()> = ApiResponse {
            code: 401,
            message: None,
            data: None,
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_tool_category_tree_deserializes() {
        let body = r#"{
            "code": 200,
            "message": "ok",
            "data": [
                {
                    "toolId": 1,
                    "toolName": "Video",
                    "sort": 1,
                    "children": [
                        { "toolId": 2, "toolName": "Transcode", "parentId": 1 }
                    ]
                }
            ]
        }"#;

        let response: ApiResponse<Vec<ToolCategory>> =
            serde_json::from_str(body).expect("Envelope should deserialize");
        assert!(response.is_success());

        let roots = response.data.expect("Data should be present");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].tool_name, "Video");
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].parent_id, Some(1));
        assert!(roots[0].children[0].children.is_empty());
    }
}
