//! Request pipeline module
//!
//! The fixed, ordered sequence every inbound request passes through
//! exactly once: body decoding, access logging, route dispatch, error
//! shaping. Failures anywhere in the chain are shaped into a uniform
//! JSON body at this boundary; no handler writes its own error response.

mod error;

pub use error::RequestError;

use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

use crate::api::{self, JsonReply};
use crate::app::App;
use crate::http;
use crate::logger;

/// Read-only view of one request, owned by the pipeline invocation that
/// created it and never observed by another request
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: DecodedBody,
}

/// Request body after the decoding step
#[derive(Debug)]
pub enum DecodedBody {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Raw(Bytes),
}

/// Handler output
///
/// JSON replies carry their payload alongside the response so the
/// access-logging step can record a snapshot without re-reading the
/// serialized body; the snapshot is discarded once the log line is out.
#[derive(Debug)]
pub enum Reply {
    Json(JsonReply),
    Raw(Response<Full<Bytes>>),
}

/// Decode a collected request body by content type
///
/// Malformed JSON surfaces the parser's own error as a `BadRequest`;
/// URL-encoded decoding is lossy and never fails. Other content types
/// pass through untouched.
pub fn decode_body(
    content_type: Option<&str>,
    bytes: &Bytes,
) -> Result<DecodedBody, RequestError> {
    if bytes.is_empty() {
        return Ok(DecodedBody::Empty);
    }

    match content_type {
        Some(ct) if ct.starts_with("application/json") => {
            let value = serde_json::from_slice(bytes)
                .map_err(|e| RequestError::BadRequest(format!("Invalid JSON body: {e}")))?;
            Ok(DecodedBody::Json(value))
        }
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            let pairs = url::form_urlencoded::parse(bytes).into_owned().collect();
            Ok(DecodedBody::Form(pairs))
        }
        _ => Ok(DecodedBody::Raw(bytes.clone())),
    }
}

/// Run one decoded request through dispatch, error shaping, and access
/// logging, producing exactly one response
pub async fn process(app: &App, ctx: RequestContext) -> Response<Full<Bytes>> {
    let started = Instant::now();

    let (response, snapshot) = match api::route_request(&ctx, app.assets()).await {
        Ok(Reply::Json(reply)) => {
            let snapshot = reply.body.clone();
            (reply.into_response(), Some(snapshot))
        }
        Ok(Reply::Raw(response)) => (response, None),
        Err(err) => shape_error(&err, app.production()),
    };

    // Side effect only: the log line never alters the outgoing response
    if app.access_log_enabled() && ctx.path.starts_with("/api") {
        let line = logger::access_line(
            ctx.method.as_str(),
            &ctx.path,
            response.status().as_u16(),
            started.elapsed().as_millis(),
            snapshot.as_ref(),
        );
        logger::access(app.log_source(), &line);
    }

    let mut slot = ResponseSlot::new();
    slot.send(response);
    slot.finish()
}

/// Shape a failure into the client-visible response
pub fn error_response(err: &RequestError, production: bool) -> Response<Full<Bytes>> {
    shape_error(err, production).0
}

fn shape_error(
    err: &RequestError,
    production: bool,
) -> (Response<Full<Bytes>>, Option<serde_json::Value>) {
    // Full detail stays server-side
    if err.is_client_error() {
        logger::warn(&err.to_string());
    } else {
        logger::error(&format!("{err:?}"));
    }

    let body = err.body(production);
    let response = http::build_json_response(err.status(), &body);
    (response, Some(body))
}

/// Enforces the one-response-per-request guarantee
///
/// The slot accepts exactly one response; a later send attempt is
/// logged and suppressed rather than propagated.
pub struct ResponseSlot {
    response: Option<Response<Full<Bytes>>>,
}

impl ResponseSlot {
    pub fn new() -> Self {
        Self { response: None }
    }

    pub fn send(&mut self, response: Response<Full<Bytes>>) {
        if self.response.is_some() {
            logger::warn("Response already sent; suppressing duplicate send");
            return;
        }
        self.response = Some(response);
    }

    pub fn is_sent(&self) -> bool {
        self.response.is_some()
    }

    pub fn finish(self) -> Response<Full<Bytes>> {
        self.response.unwrap_or_else(|| {
            http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({ "message": "Internal Server Error" }),
            )
        })
    }
}

impl Default for ResponseSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_decodes_to_empty() {
        let body = decode_body(Some("application/json"), &Bytes::new()).unwrap();
        assert!(matches!(body, DecodedBody::Empty));
    }

    #[test]
    fn test_json_body_is_parsed() {
        let bytes = Bytes::from(r#"{"name":"value"}"#);
        let body = decode_body(Some("application/json"), &bytes).unwrap();
        match body {
            DecodedBody::Json(v) => assert_eq!(v["name"], "value"),
            _ => panic!("expected JSON body"),
        }
    }

    #[test]
    fn test_malformed_json_is_a_bad_request() {
        let bytes = Bytes::from("{not json");
        let err = decode_body(Some("application/json"), &bytes).unwrap_err();
        assert!(matches!(err, RequestError::BadRequest(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_urlencoded_body_is_parsed() {
        let bytes = Bytes::from("name=contact&email=a%40b.c");
        let body = decode_body(Some("application/x-www-form-urlencoded"), &bytes).unwrap();
        match body {
            DecodedBody::Form(pairs) => {
                assert_eq!(pairs[0], ("name".to_string(), "contact".to_string()));
                assert_eq!(pairs[1], ("email".to_string(), "a@b.c".to_string()));
            }
            _ => panic!("expected form body"),
        }
    }

    #[test]
    fn test_unknown_content_type_passes_through() {
        let bytes = Bytes::from("raw payload");
        let body = decode_body(Some("text/plain"), &bytes).unwrap();
        assert!(matches!(body, DecodedBody::Raw(_)));
    }

    #[test]
    fn test_second_send_is_suppressed() {
        let mut slot = ResponseSlot::new();
        slot.send(
            Response::builder()
                .status(200)
                .body(Full::new(Bytes::from("first")))
                .unwrap(),
        );
        assert!(slot.is_sent());

        slot.send(
            Response::builder()
                .status(500)
                .body(Full::new(Bytes::from("second")))
                .unwrap(),
        );

        // The first response wins
        let resp = slot.finish();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_unsent_slot_degrades_to_500() {
        let slot = ResponseSlot::new();
        assert!(!slot.is_sent());
        let resp = slot.finish();
        assert_eq!(resp.status(), 500);
    }
}
