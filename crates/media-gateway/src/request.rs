//! Request descriptors

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// HTTP method of a gateway request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// The method as its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one outbound call: relative path, method, headers, and an
/// optional JSON body
///
/// Constructing a descriptor never fails; a body that cannot be serialized
/// is carried as a deferred error and surfaced when the descriptor is sent.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    headers: BTreeMap<String, String>,
    body: Option<Value>,
    body_error: Option<String>,
}

impl RequestDescriptor {
    /// Create a descriptor for the given method and relative path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
            body_error: None,
        }
    }

    /// GET descriptor
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// POST descriptor
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// PUT descriptor
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// PATCH descriptor
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// DELETE descriptor
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(err) => self.body_error = Some(err.to_string()),
        }
        self
    }

    /// The request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// The relative path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The caller-supplied headers
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub(crate) fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub(crate) fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
        assert_eq!(format!("{}", Method::Post), "POST");
    }

    #[test]
    fn test_descriptor_constructors() {
        let descriptor = RequestDescriptor::get("/tool/tree");
        assert_eq!(descriptor.method(), Method::Get);
        assert_eq!(descriptor.path(), "/tool/tree");
        assert!(descriptor.headers().is_empty());
        assert!(descriptor.body().is_none());
    }

    #[test]
    fn test_descriptor_headers_and_body() {
        let descriptor = RequestDescriptor::post("/user/login")
            .header("X-Request-Id", "1")
            .json(&serde_json::json!({ "username": "admin" }));

        assert_eq!(
            descriptor.headers().get("X-Request-Id").map(String::as_str),
            Some("1")
        );
        assert_eq!(
            descriptor.body().and_then(|b| b["username"].as_str()),
            Some("admin")
        );
        assert!(descriptor.body_error().is_none());
    }

    #[test]
    fn test_descriptor_defers_body_serialization_error() {
        // Maps with non-string keys cannot become JSON objects.
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], "value");

        let descriptor = RequestDescriptor::post("/user/login").json(&bad);
        assert!(descriptor.body().is_none());
        assert!(descriptor.body_error().is_some());
    }
}
