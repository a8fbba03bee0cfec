// API endpoint handlers module

use chrono::{SecondsFormat, Utc};

use super::response::JsonReply;

/// Current wall-clock time as an ISO-8601 string
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `GET /api/health`
pub fn health() -> JsonReply {
    JsonReply::ok(serde_json::json!({
        "status": "ok",
        "timestamp": now_iso(),
    }))
}

/// `GET /api/example` — placeholder payload, no business logic
pub fn example() -> JsonReply {
    JsonReply::ok(serde_json::json!({
        "message": "Hello from the API!",
        "timestamp": now_iso(),
    }))
}
