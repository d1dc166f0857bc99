//! `tiny_http` server adapter
//!
//! Handles routing, body parsing, and response conversion for `tiny_http`.
//! Requests are served one at a time. Each one starts from the stored
//! ledger, so records written by other processes are visible.

use std::io::{Cursor, Read};

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{self, ApiError, ApiResponse, BatchVerifyRequest, VerifyRequest};
use crate::core::ports::LedgerStore;
use crate::core::services::ContentVerifier;

/// Largest accepted request body, in bytes
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// A serialized API answer before it is bound to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: String,
}

/// HTTP front end over a verifier and its ledger store
pub struct ApiServer {
    verifier: ContentVerifier,
    store: Box<dyn LedgerStore>,
}

impl std::fmt::Debug for ApiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiServer")
            .field("verifier", &self.verifier)
            .field("ledger", &self.store.location())
            .finish()
    }
}

impl ApiServer {
    /// Serve `verifier`, persisting writes to `store`
    #[must_use]
    pub fn new(verifier: ContentVerifier, store: Box<dyn LedgerStore>) -> Self {
        Self { verifier, store }
    }

    /// The verifier being served
    #[must_use]
    pub const fn verifier(&self) -> &ContentVerifier {
        &self.verifier
    }

    /// Listen on `0.0.0.0:port` until the process is stopped
    pub fn serve(mut self, port: u16) -> anyhow::Result<()> {
        let addr = format!("0.0.0.0:{port}");
        let server =
            Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
        log::info!("listening on http://{addr}/api/v1");

        for mut request in server.incoming_requests() {
            let response = self.handle_api_request(&mut request);
            if let Err(e) = request.respond(response) {
                log::warn!("failed to send response: {e}");
            }
        }

        Ok(())
    }

    /// Handle an API request and return a response
    pub fn handle_api_request(&mut self, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
        let method = request.method().clone();
        let url = request.url().to_string();
        log::info!("{method} {url}");

        let reply = self.route(&method, &url, request.as_reader());
        if reply.status >= 400 {
            log::debug!("{method} {url} -> {}", reply.status);
        }
        json_response(reply)
    }

    /// Map a method and path to a handler
    ///
    /// Accepts paths with or without the `/api/v1` (or `/api`) prefix. The
    /// body is only read by routes that take one.
    pub fn route(&mut self, method: &Method, url: &str, body: impl Read) -> ApiReply {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        let api_path = path
            .strip_prefix("/api/v1")
            .or_else(|| path.strip_prefix("/api"))
            .unwrap_or(path);
        let api_path = match api_path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if let Err(e) = self.verifier.reload(self.store.as_ref()) {
            log::warn!("serving the cached ledger, reload failed: {e:#}");
        }

        match (method, api_path) {
            (&Method::Get, "/status") => {
                handle_result(api::get_status(&self.verifier, self.store.as_ref()))
            },
            (&Method::Get, "/verifications") => {
                handle_result(api::list_verifications(&self.verifier))
            },
            (&Method::Get, "/verifications/count") => {
                handle_result(api::count_verifications(&self.verifier))
            },

            // POST /verifications - verify one URL
            (&Method::Post, "/verifications") => match read_json_body::<VerifyRequest>(body) {
                Ok(req) => handle_result(api::create_verification(
                    &mut self.verifier,
                    self.store.as_ref(),
                    &req,
                )),
                Err(e) => error_reply(&e),
            },

            // POST /verifications/batch - verify up to ten URLs
            (&Method::Post, "/verifications/batch") => {
                match read_json_body::<BatchVerifyRequest>(body) {
                    Ok(req) => handle_result(api::batch_verify(
                        &mut self.verifier,
                        self.store.as_ref(),
                        &req,
                    )),
                    Err(e) => error_reply(&e),
                }
            },

            // Verification detail: GET /verifications/{id}
            _ if method == &Method::Get && api_path.starts_with("/verifications/") => {
                let id = api_path.strip_prefix("/verifications/").unwrap_or("");
                if id.contains('/') {
                    not_found_reply(method, api_path)
                } else {
                    handle_result(api::get_verification(&self.verifier, id))
                }
            },

            _ => not_found_reply(method, api_path),
        }
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse a JSON body of at most [`MAX_BODY_BYTES`]
fn read_json_body<T: DeserializeOwned>(body: impl Read) -> Result<T, ApiError> {
    let mut limited = body.take(MAX_BODY_BYTES + 1);
    let mut content = String::new();
    limited
        .read_to_string(&mut content)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;
    if limited.limit() == 0 {
        return Err(ApiError::bad_request(format!(
            "Request body exceeds {MAX_BODY_BYTES} bytes"
        )));
    }

    serde_json::from_str(&content).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> ApiReply {
    match result {
        Ok(data) => serialize_reply(&ApiResponse::success(data), 200),
        Err(e) => error_reply(&e),
    }
}

/// An error reply with the matching status code
fn error_reply(error: &ApiError) -> ApiReply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    serialize_reply(&response, error.status_code())
}

fn not_found_reply(method: &Method, path: &str) -> ApiReply {
    error_reply(&ApiError::not_found(format!("API endpoint not found: {method} {path}")))
}

fn serialize_reply<T: Serialize>(data: &T, status: u16) -> ApiReply {
    let body = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    ApiReply { status, body }
}

/// Bind a reply to a `tiny_http` response
fn json_response(reply: ApiReply) -> Response<Cursor<Vec<u8>>> {
    let response =
        Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
