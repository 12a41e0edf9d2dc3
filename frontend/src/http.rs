//! HTTP seam.
//!
//! `HttpClient` is the only thing that touches the network. The browser
//! implementation lives in `web::http`; tests script a `MockHttpClient`.

use crate::error::NetworkError;
use serde::{Serialize, de::DeserializeOwned};

pub use listaria_shared::protocol::HttpMethod;

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap};

// =========================================================
// Request / Response
// =========================================================

/// One file of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Json(String),
    /// Every file is appended under the same form field.
    Multipart { field: String, files: Vec<FilePart> },
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_query<K, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, String)>,
    {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(HttpBody::Json(serde_json::to_string(body)?));
        Ok(self)
    }

    pub fn with_files(mut self, field: &str, files: Vec<FilePart>) -> Self {
        self.body = Some(HttpBody::Multipart {
            field: field.to_string(),
            files,
        });
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body; an empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let body = self.body.trim();
        serde_json::from_str(if body.is_empty() { "null" } else { body })
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// Fails only when no response was received; HTTP errors come back as
    /// responses.
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, NetworkError>;
}

// =========================================================
// Test double: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD url", (status, body)); `None` simulates an unreachable host
    responses: RefCell<HashMap<String, Option<(u16, String)>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Some((status, body.to_string())));
    }

    pub fn mock_unreachable(&self, method: HttpMethod, url: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), None);
    }

    /// `"METHOD url"` of every request sent so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| Self::key(r.method, &r.url))
            .collect()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        match self.responses.borrow().get(&key) {
            Some(Some((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(None) => Err(NetworkError::unreachable("connection refused")),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_decodes_as_null() {
        let res = HttpResponse {
            status: 204,
            body: "  ".into(),
        };
        let value: Option<u32> = res.json().unwrap();
        assert_eq!(value, None);
        assert!(res.is_success());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = HttpRequest::new("/x", HttpMethod::Get).with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("X-Other"), None);
    }

    #[tokio::test]
    async fn test_mock_records_and_replies() {
        let mock = MockHttpClient::new();
        mock.mock_response(HttpMethod::Get, "/api/ads", 200, json!({"ads": []}));
        mock.mock_unreachable(HttpMethod::Delete, "/api/ads/1");

        let ok = mock
            .send(HttpRequest::new("/api/ads", HttpMethod::Get))
            .await
            .unwrap();
        assert_eq!(ok.status, 200);

        let missing = mock
            .send(HttpRequest::new("/api/nothing", HttpMethod::Get))
            .await
            .unwrap();
        assert_eq!(missing.status, 404);

        let err = mock
            .send(HttpRequest::new("/api/ads/1", HttpMethod::Delete))
            .await
            .unwrap_err();
        assert_eq!(err.status, None);

        assert_eq!(
            mock.calls(),
            vec!["GET /api/ads", "GET /api/nothing", "DELETE /api/ads/1"]
        );
    }
}
