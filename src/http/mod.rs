//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from routing and
//! asset-store logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_405_response, build_file_response, build_html_response, build_json_response};
