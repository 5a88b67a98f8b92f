//! Remote endpoints in `METHOD /path` notation.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment such as a frame name or job key.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// HTTP method of a remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A remote endpoint: method plus path relative to the service root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Append one encoded path segment, e.g. a resource name under a collection.
    pub fn with_segment(mut self, segment: &str) -> Self {
        if !self.path.ends_with('/') {
            self.path.push('/');
        }
        self.path.push_str(&encode_segment(segment));
        self
    }

    /// Parse a route such as `"GET /3/TargetEncoderTransform"`.
    pub fn parse(route: &str) -> Result<Self> {
        let mut parts = route.split_whitespace();
        let (method, path) = match (parts.next(), parts.next(), parts.next()) {
            (Some(method), Some(path), None) => (method, path),
            _ => {
                return Err(EstimatorError::protocol(format!(
                    "Expected `METHOD /path`, got: {}",
                    route
                )))
            }
        };

        let method = match method {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "DELETE" => Method::Delete,
            other => {
                return Err(EstimatorError::protocol(format!(
                    "Unsupported method: {}",
                    other
                )))
            }
        };

        if !path.starts_with('/') {
            return Err(EstimatorError::protocol(format!(
                "Path must be absolute: {}",
                path
            )));
        }

        Ok(Self::new(method, path))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let endpoint = Endpoint::parse("GET /3/TargetEncoderTransform").unwrap();
        assert_eq!(endpoint.method, Method::Get);
        assert_eq!(endpoint.path, "/3/TargetEncoderTransform");
        assert_eq!(endpoint.to_string(), "GET /3/TargetEncoderTransform");
    }

    #[test]
    fn test_parse_post_route() {
        let endpoint = Endpoint::parse("POST /3/ModelBuilders/targetencoder").unwrap();
        assert_eq!(endpoint, Endpoint::post("/3/ModelBuilders/targetencoder"));
    }

    #[test]
    fn test_with_segment_encodes_reserved_characters() {
        let endpoint = Endpoint::get("/3/Frames").with_segment("a#b");
        assert_eq!(endpoint.path, "/3/Frames/a%23b");

        let endpoint = Endpoint::get("/3/Jobs/").with_segment("$03017f00000132d4ffffffff$_job 1");
        assert_eq!(endpoint.path, "/3/Jobs/%2403017f00000132d4ffffffff%24_job%201");
    }

    #[test]
    fn test_with_segment_keeps_unreserved_characters() {
        let endpoint = Endpoint::get("/3/Frames").with_segment("train-set_v1.hex~");
        assert_eq!(endpoint.path, "/3/Frames/train-set_v1.hex~");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn test_parse_rejects_unknown_method() {
        assert!(matches!(
            Endpoint::parse("PATCH /3/Frames"),
            Err(EstimatorError::ProtocolError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_route() {
        assert!(Endpoint::parse("GET").is_err());
        assert!(Endpoint::parse("GET /a /b").is_err());
        assert!(Endpoint::parse("GET 3/Frames").is_err());
    }
}
