//! Development bundler hookup
//!
//! The on-demand asset transform used only for local interactive
//! development. The crate ships no implementation; a development harness
//! constructs one and passes it to `build_app`. Deployed services never
//! see this seam — restricted hosts resolve to static serving.

use std::io;

/// On-demand compile step for the application document
pub trait Bundler: Send + Sync {
    /// Render the root document for the given request path
    fn render_index(&self, path: &str) -> io::Result<String>;
}
