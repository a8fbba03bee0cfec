//! MIME type detection module
//!
//! Returns the Content-Type for a built asset based on its file extension.

/// Get MIME Content-Type based on file extension
///
/// Unknown extensions fall back to `text/html` so that extensionless
/// client-side route paths render as the application document.
///
/// # Examples
/// ```
/// use portfolio_server::http::mime::content_type_for;
/// assert_eq!(content_type_for(Some("js")), "application/javascript");
/// assert_eq!(content_type_for(Some("svg")), "image/svg+xml");
/// assert_eq!(content_type_for(None), "text/html");
/// ```
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("js" | "mjs") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts shipped by the client build
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("txt") => "text/plain; charset=utf-8",

        // Default: the application document
        _ => "text/html",
    }
}
