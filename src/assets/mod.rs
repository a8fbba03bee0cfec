//! Static asset serving module
//!
//! Serves the pre-built client files with content-type detection and a
//! long cache lifetime, falling back to the root document for unmatched
//! client-side routes. The serving mode is resolved exactly once at
//! startup and never switches at runtime.

mod bundler;

pub use bundler::Bundler;

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use hyper::body::Bytes;
use hyper::Method;
use tokio::fs;

use crate::config::Config;
use crate::http::{self, mime};
use crate::logger;
use crate::pipeline::{Reply, RequestContext, RequestError};

/// Built assets are content-hashed, so anything under the directory is
/// immutable between deploys
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// Asset-serving state, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    /// Non-API requests rendered through the bundler; local development only
    DevWithBundler,
    /// Bundler unavailable; behaves like `ProdStatic`
    DevStaticFallback,
    /// Serve pre-built files, SPA fallback for everything else
    ProdStatic,
    /// Asset directory absent in production: every non-API request fails loudly
    ProdMissingBuild,
}

impl AssetMode {
    /// Resolve the serving mode from environment and filesystem state
    pub fn resolve(production: bool, bundler_available: bool, dist_exists: bool) -> Self {
        if production {
            if dist_exists {
                Self::ProdStatic
            } else {
                Self::ProdMissingBuild
            }
        } else if bundler_available {
            Self::DevWithBundler
        } else {
            Self::DevStaticFallback
        }
    }
}

/// The static asset store and its serving policy
pub struct AssetStore {
    dist_dir: PathBuf,
    index_file: String,
    mode: AssetMode,
    bundler: Option<Arc<dyn Bundler>>,
}

impl AssetStore {
    pub fn new(config: &Config, bundler: Option<Arc<dyn Bundler>>) -> Self {
        let dist_dir = PathBuf::from(&config.assets.dist_dir);
        // Restricted hosts never get a live bundler
        let bundler_available = bundler.is_some() && !config.server.serverless;
        let mode = AssetMode::resolve(
            config.is_production(),
            bundler_available,
            dist_dir.is_dir(),
        );

        Self {
            dist_dir,
            index_file: config.assets.index_file.clone(),
            mode,
            bundler,
        }
    }

    pub fn mode(&self) -> AssetMode {
        self.mode
    }

    /// Serve one non-API request according to the resolved mode
    pub async fn serve(&self, ctx: &RequestContext) -> Result<Reply, RequestError> {
        if ctx.method != Method::GET && ctx.method != Method::HEAD {
            return Ok(Reply::Raw(http::build_405_response()));
        }
        let is_head = ctx.method == Method::HEAD;

        match self.mode {
            AssetMode::ProdMissingBuild => Err(RequestError::BuildMissing),
            AssetMode::DevWithBundler => self.serve_bundled(&ctx.path, is_head),
            AssetMode::ProdStatic | AssetMode::DevStaticFallback => {
                self.serve_static(&ctx.path, is_head).await
            }
        }
    }

    fn serve_bundled(&self, path: &str, is_head: bool) -> Result<Reply, RequestError> {
        let Some(bundler) = self.bundler.as_deref() else {
            return Err(RequestError::Internal(io::Error::other(
                "bundler mode resolved without a bundler",
            )));
        };
        let html = bundler.render_index(path)?;
        Ok(Reply::Raw(http::build_html_response(html, is_head)))
    }

    async fn serve_static(&self, path: &str, is_head: bool) -> Result<Reply, RequestError> {
        // Development without a build output: tell the operator what to do
        if !self.dist_dir.is_dir() {
            return Ok(Reply::Raw(http::build_html_response(
                development_placeholder(),
                is_head,
            )));
        }

        if let Some(file_path) = self.resolve_file(path) {
            let content = match fs::read(&file_path).await {
                Ok(c) => c,
                Err(e) => {
                    logger::error(&format!(
                        "Failed to read asset '{}': {e}",
                        file_path.display()
                    ));
                    return Err(RequestError::Internal(e));
                }
            };
            let content_type =
                mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
            return Ok(Reply::Raw(http::build_file_response(
                Bytes::from(content),
                content_type,
                Some(IMMUTABLE_CACHE),
                is_head,
            )));
        }

        // SPA fallback: unmatched client-side routes get the root
        // document with a 200 so browser-side routing can take over
        let index_path = self.dist_dir.join(&self.index_file);
        let content = match fs::read(&index_path).await {
            Ok(c) => c,
            Err(e) => {
                logger::error(&format!(
                    "Failed to read '{}': {e}",
                    index_path.display()
                ));
                return Err(RequestError::Internal(e));
            }
        };

        Ok(Reply::Raw(http::build_file_response(
            Bytes::from(content),
            "text/html",
            None,
            is_head,
        )))
    }

    /// Map a request path to a file under the asset directory
    ///
    /// Any component that could step outside the directory rejects the
    /// lookup, which then resolves through the SPA fallback instead.
    fn resolve_file(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            logger::warn(&format!("Path traversal attempt blocked: {path}"));
            return None;
        }
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let candidate = self.dist_dir.join(relative);
        candidate.is_file().then_some(candidate)
    }
}

/// Placeholder page for development runs without a client build
fn development_placeholder() -> String {
    String::from(
        r"<!DOCTYPE html>
<html>
  <head>
    <title>Development Server</title>
  </head>
  <body>
    <h1>Development Server Running</h1>
    <p>The server is running in development mode, but no frontend build was found.</p>
    <p>Build the client application, or start its dev server separately.</p>
  </body>
</html>
",
    )
}
