//! Serverless hosting adapter
//!
//! A thin translator for restricted hosts that invoke the application
//! per-request instead of owning a listening socket. The core pipeline
//! stays the single implementation; this wrapper only adds the CORS
//! surface the host requires and answers preflight requests directly.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Request, Response};

use crate::app::App;
use crate::logger;

const ALLOW_CREDENTIALS: &str = "true";
const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
     Content-Length, Content-MD5, Content-Type, Date, X-Api-V, Authorization";

/// Per-invocation wrapper around the assembled application
pub struct ServerlessAdapter {
    app: Arc<App>,
}

impl ServerlessAdapter {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    /// Translate one host invocation through the core pipeline
    pub async fn handle<B>(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        if req.method() == Method::OPTIONS {
            logger::info("Handling OPTIONS preflight request");
            return Ok(preflight_response());
        }

        let mut response = self.app.handle(req).await?;
        apply_cors(response.headers_mut());
        Ok(response)
    }
}

/// 200, empty body, CORS headers only
fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = Response::builder()
        .status(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())));
    apply_cors(response.headers_mut());
    response
}

fn apply_cors(headers: &mut HeaderMap) {
    insert_static(headers, "access-control-allow-credentials", ALLOW_CREDENTIALS);
    insert_static(headers, "access-control-allow-origin", ALLOW_ORIGIN);
    insert_static(headers, "access-control-allow-methods", ALLOW_METHODS);
    insert_static(headers, "access-control-allow-headers", ALLOW_HEADERS);
}

fn insert_static(headers: &mut HeaderMap, name: &'static str, value: &'static str) {
    headers.insert(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    );
}
