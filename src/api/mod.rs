// API module entry
// The route table: fixed path patterns evaluated in registration order

mod handlers;
mod response;

use hyper::Method;

// Re-export public types
pub use response::JsonReply;

use crate::assets::AssetStore;
use crate::pipeline::{Reply, RequestContext, RequestError};

/// Dispatch one request to the first matching route
///
/// Registration order: health, example, the API catch-all, then the
/// static asset store with its SPA-fallback policy.
pub async fn route_request(
    ctx: &RequestContext,
    assets: &AssetStore,
) -> Result<Reply, RequestError> {
    if is_api_path(&ctx.path) {
        return match (ctx.method.clone(), ctx.path.as_str()) {
            (Method::GET, "/api/health") => Ok(Reply::Json(handlers::health())),
            (Method::GET, "/api/example") => Ok(Reply::Json(handlers::example())),
            // Any other method/path under the API namespace
            _ => Err(RequestError::ApiNotFound),
        };
    }

    assets.serve(ctx).await
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}
