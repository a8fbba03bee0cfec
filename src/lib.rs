//! Thin HTTP layer for a pre-built single-page portfolio site
//!
//! Static-asset delivery with SPA fallback routing, a handful of
//! placeholder API endpoints, and adapters for both long-running and
//! serverless hosting. The client application itself is produced by an
//! external build step; this crate serves its output.

pub mod api;
pub mod app;
pub mod assets;
pub mod config;
pub mod http;
pub mod logger;
pub mod pipeline;
pub mod server;
pub mod serverless;
