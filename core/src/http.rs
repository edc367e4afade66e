//! HTTP transport types and the executor port.
//!
//! # Design
//! Requests and responses are plain data, so everything above this module is
//! deterministic and testable without a network. The `Transport` trait is the
//! single I/O seam: production code plugs in `UreqTransport`, tests plug in
//! an in-memory impl that returns canned responses.
//!
//! All fields use owned types (`String`, `Vec`) so values can be built once
//! and handed across threads without lifetime concerns.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by [`Api`](crate::api::Api); executed by a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes an [`HttpRequest`] against the real world.
///
/// Implementations must return non-2xx responses as data, not as errors;
/// status interpretation belongs to the transport wrapper. `Err` is reserved
/// for failures of the round-trip itself.
pub trait Transport: Send + Sync {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by a ureq agent.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data, letting the wrapper handle status
/// interpretation.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => {
                let mut r = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Delete, _) => {
                let mut r = self.agent.delete(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Post, body) => {
                let mut r = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                match body {
                    Some(body) => r.send(body.as_bytes()),
                    None => r.send_empty(),
                }
            }
            (HttpMethod::Put, body) => {
                let mut r = self.agent.put(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                match body {
                    Some(body) => r.send(body.as_bytes()),
                    None => r.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
