//! Application bootstrapper
//!
//! `build_app` assembles the request pipeline and route table into a
//! runnable application. It is invoked once by the process entry point
//! and the returned handle is passed by reference to whichever adapter
//! needs it: the long-running listener or the serverless wrapper.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::assets::{AssetMode, AssetStore, Bundler};
use crate::config::Config;
use crate::logger;
use crate::pipeline::{self, RequestContext, RequestError};

/// The assembled application
pub struct App {
    config: Config,
    assets: AssetStore,
}

/// Assemble the pipeline and route table; resolve the asset-serving
/// mode exactly once for the process lifetime
pub fn build_app(config: Config, bundler: Option<Arc<dyn Bundler>>) -> App {
    let assets = AssetStore::new(&config, bundler);

    match assets.mode() {
        AssetMode::DevWithBundler => {
            logger::info("Serving assets through the development bundler");
        }
        AssetMode::DevStaticFallback => {
            logger::info("Bundler unavailable; serving pre-built static files");
        }
        AssetMode::ProdStatic => {
            logger::info(&format!(
                "Serving static files from {}",
                config.assets.dist_dir
            ));
        }
        AssetMode::ProdMissingBuild => {
            logger::error(&format!(
                "Public directory not found at {}",
                config.assets.dist_dir
            ));
        }
    }

    App { config, assets }
}

impl App {
    /// Run one request through the pipeline: decode the body, dispatch,
    /// shape errors, emit the access-log line
    pub async fn handle<B>(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();

        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                let err = RequestError::BadRequest(format!("Failed to read request body: {e}"));
                return Ok(pipeline::error_response(&err, self.production()));
            }
        };

        let content_type = parts
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let decoded = match pipeline::decode_body(content_type.as_deref(), &bytes) {
            Ok(d) => d,
            Err(err) => return Ok(pipeline::error_response(&err, self.production())),
        };

        let ctx = RequestContext {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_owned),
            body: decoded,
        };

        Ok(pipeline::process(self, ctx).await)
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn production(&self) -> bool {
        self.config.is_production()
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }

    pub fn log_source(&self) -> &str {
        &self.config.logging.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    fn request(method: &str, path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app_with_dist(dir: &std::path::Path, production: bool) -> App {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.assets.dist_dir = dir.to_str().unwrap().to_string();
        if production {
            cfg.server.mode = Mode::Production;
        }
        build_app(cfg, None)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "app").unwrap();
        let app = app_with_dist(dir.path(), true);

        let resp = app.handle(request("GET", "/api/health")).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        let ts = body["timestamp"].as_str().expect("timestamp present");
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn test_example_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_dist(dir.path(), true);

        let resp = app.handle(request("GET", "/api/example")).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Hello from the API!");
    }

    #[tokio::test]
    async fn test_unregistered_api_route_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_dist(dir.path(), true);

        let resp = app
            .handle(request("GET", "/api/does-not-exist"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let body = body_json(resp).await;
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_post_to_api_namespace_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_dist(dir.path(), true);

        let resp = app.handle(request("POST", "/api/health")).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_deep_client_route_serves_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>portfolio</html>").unwrap();
        let app = app_with_dist(dir.path(), true);

        let resp = app
            .handle(request("GET", "/some/deep/client/route"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, Bytes::from("<html>portfolio</html>"));
    }

    #[tokio::test]
    async fn test_missing_build_returns_500_json() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.assets.dist_dir = "/nonexistent/build/output".to_string();
        cfg.server.mode = Mode::Production;
        let app = build_app(cfg, None);

        let resp = app.handle(request("GET", "/")).await.unwrap();
        assert_eq!(resp.status(), 500);

        let body = body_json(resp).await;
        assert_eq!(body["error"], "Frontend build not found");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_dist(dir.path(), true);

        let req = Request::builder()
            .method("POST")
            .uri("/api/example")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from("{not json")))
            .unwrap();

        let resp = app.handle(req).await.unwrap();
        assert_eq!(resp.status(), 400);

        let body = body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Invalid JSON body"));
    }
}
