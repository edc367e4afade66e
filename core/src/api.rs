//! Transport wrapper: the single funnel every remote call goes through.
//!
//! # Design
//! `Api` holds a base URL and a shared [`Transport`]. Each call joins the
//! path suffix onto the base URL, attaches the JSON content-type header
//! merged with any caller-supplied headers, executes the request, and
//! normalizes the outcome:
//! - non-success status: the JSON error body's `detail` message, or the
//!   generic `Error {status}` text, becomes an [`ApiError::Http`];
//! - 204: no body, `Ok(None)`;
//! - otherwise the JSON body is deserialized into the caller's type.
//!
//! Every failure is logged and propagated unchanged. There is no retry, no
//! backoff and no timeout handling here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Shape of the backend's error bodies: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Thin, clonable handle to the remote backend.
#[derive(Clone)]
pub struct Api {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Api {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and normalize its outcome.
    ///
    /// `Ok(None)` means the server answered 204 No Content. Caller-supplied
    /// headers override the default JSON content-type on name collision.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<Option<T>, ApiError> {
        let req = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers: merge_headers(headers),
            body,
        };
        tracing::debug!(url = %req.url, method = ?req.method, "dispatching request");

        let response = self.transport.execute(&req).map_err(|e| {
            tracing::error!(url = %req.url, error = %e, "request failed");
            e
        })?;

        self.normalize(&req.url, response)
    }

    fn normalize<T: DeserializeOwned>(
        &self,
        url: &str,
        response: HttpResponse,
    ) -> Result<Option<T>, ApiError> {
        if !(200..300).contains(&response.status) {
            let detail = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| format!("Error {}", response.status));
            let err = ApiError::Http {
                status: response.status,
                detail,
            };
            tracing::error!(url, status = response.status, error = %err, "request rejected");
            return Err(err);
        }

        if response.status == 204 {
            return Ok(None);
        }

        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let err = ApiError::Deserialization(e.to_string());
                tracing::error!(url, error = %err, "response body rejected");
                Err(err)
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, &[], None)?
            .ok_or_else(|| ApiError::Deserialization("empty response body".to_string()))
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_body(body)?;
        self.request(HttpMethod::Post, path, &[], Some(body))?
            .ok_or_else(|| ApiError::Deserialization("empty response body".to_string()))
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_body(body)?;
        self.request(HttpMethod::Put, path, &[], Some(body))?
            .ok_or_else(|| ApiError::Deserialization("empty response body".to_string()))
    }

    /// DELETE; the backend answers 204 with no body.
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request::<serde_json::Value>(HttpMethod::Delete, path, &[], None)?;
        Ok(())
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn merge_headers(extra: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in extra {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.to_string(), value.to_string()));
    }
    headers
}

/// Percent-encode a query-string component. Unreserved characters pass
/// through, everything else (including UTF-8 continuation bytes) is escaped.
pub(crate) fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Transport returning a canned response and recording the request.
    struct CannedTransport {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                },
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(req.clone());
            Ok(self.response.clone())
        }
    }

    fn api(transport: Arc<CannedTransport>) -> Api {
        Api::new("http://localhost:8000/api/", transport)
    }

    #[test]
    fn trailing_slash_is_stripped_and_path_joined() {
        let transport = Arc::new(CannedTransport::new(200, "{}"));
        let _: Option<serde_json::Value> = api(transport.clone())
            .request(HttpMethod::Get, "/usuarios/", &[], None)
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://localhost:8000/api/usuarios/");
    }

    #[test]
    fn json_content_type_is_attached() {
        let transport = Arc::new(CannedTransport::new(200, "{}"));
        let _: Option<serde_json::Value> = api(transport.clone())
            .request(HttpMethod::Get, "/usuarios/", &[], None)
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0].headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn caller_headers_override_defaults() {
        let merged = merge_headers(&[("content-type", "text/plain"), ("X-Extra", "1")]);
        assert_eq!(
            merged,
            vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("X-Extra".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn error_body_detail_becomes_the_message() {
        let transport = Arc::new(CannedTransport::new(404, r#"{"detail":"No encontrado"}"#));
        let err = api(transport).get::<serde_json::Value>("/usuarios/9/").unwrap_err();
        assert_eq!(err.to_string(), "No encontrado");
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
    }

    #[test]
    fn non_json_error_body_falls_back_to_status_message() {
        let transport = Arc::new(CannedTransport::new(500, "<html>boom</html>"));
        let err = api(transport).get::<serde_json::Value>("/usuarios/").unwrap_err();
        assert_eq!(err.to_string(), "Error 500");
    }

    #[test]
    fn no_content_yields_none() {
        let transport = Arc::new(CannedTransport::new(204, ""));
        let result: Option<serde_json::Value> = api(transport)
            .request(HttpMethod::Delete, "/usuarios/1/", &[], None)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn success_body_is_deserialized() {
        let transport = Arc::new(CannedTransport::new(200, r#"{"id_usuario":7}"#));
        let value: serde_json::Value = api(transport).get("/usuarios/7/").unwrap();
        assert_eq!(value["id_usuario"], 7);
    }

    #[test]
    fn bad_success_body_is_a_deserialization_error() {
        let transport = Arc::new(CannedTransport::new(200, "not json"));
        let err = api(transport).get::<serde_json::Value>("/usuarios/").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn encode_query_escapes_reserved_and_utf8() {
        assert_eq!(encode_query("ana perez"), "ana%20perez");
        assert_eq!(encode_query("q&a=1"), "q%26a%3D1");
        assert_eq!(encode_query("Pérez"), "P%C3%A9rez");
        assert_eq!(encode_query("simple-._~"), "simple-._~");
    }
}
