// API response utility module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http;

/// A JSON reply plus the snapshot the access log consumes
///
/// Handlers construct this instead of a raw response so the pipeline can
/// record the outgoing payload for the log line without re-reading the
/// serialized body. The snapshot lives for the duration of one log line
/// and is dropped with the reply.
#[derive(Debug, Clone)]
pub struct JsonReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl JsonReply {
    /// 200 reply
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn with_status(status: StatusCode, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        http::build_json_response(self.status, &self.body)
    }
}
