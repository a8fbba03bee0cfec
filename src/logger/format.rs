//! Access log format module
//!
//! Builds the one-line-per-API-request summary: method, path, status,
//! elapsed time, and (when the handler produced one) the JSON payload,
//! capped at 80 characters.

/// Maximum access-log line length before truncation
const MAX_LINE_LEN: usize = 80;

/// Build an access-log line for one API request
///
/// The payload, when present, is appended as ` :: {json}`. Lines longer
/// than 80 characters are cut at 79 and terminated with an ellipsis so
/// large payloads never flood the log.
pub fn access_line(
    method: &str,
    path: &str,
    status: u16,
    elapsed_ms: u128,
    json_body: Option<&serde_json::Value>,
) -> String {
    let mut line = format!("{method} {path} {status} in {elapsed_ms}ms");

    if let Some(body) = json_body {
        line.push_str(" :: ");
        line.push_str(&body.to_string());
    }

    truncate_line(line)
}

/// Cap a line at 80 characters, replacing the tail with an ellipsis
fn truncate_line(line: String) -> String {
    if line.chars().count() <= MAX_LINE_LEN {
        return line;
    }
    let mut truncated: String = line.chars().take(MAX_LINE_LEN - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_without_payload() {
        let line = access_line("GET", "/api/health", 200, 3, None);
        assert_eq!(line, "GET /api/health 200 in 3ms");
    }

    #[test]
    fn test_line_with_payload() {
        let body = serde_json::json!({"status": "ok"});
        let line = access_line("GET", "/api/health", 200, 1, Some(&body));
        assert!(line.contains("GET /api/health 200 in 1ms :: "));
        assert!(line.contains(r#""status":"ok""#));
    }

    #[test]
    fn test_long_line_is_truncated_with_ellipsis() {
        let body = serde_json::json!({"message": "x".repeat(200)});
        let line = access_line("GET", "/api/example", 200, 12, Some(&body));
        assert_eq!(line.chars().count(), 80);
        assert!(line.ends_with('…'));
    }

    #[test]
    fn test_short_line_is_untouched() {
        let line = access_line("GET", "/api/example", 404, 0, None);
        assert!(!line.contains('…'));
        assert!(line.chars().count() <= 80);
    }

    #[test]
    fn test_line_contains_method_path_and_status() {
        let body = serde_json::json!({"message": "Hello from the API!"});
        let line = access_line("GET", "/api/example", 200, 5, Some(&body));
        assert!(line.contains("GET"));
        assert!(line.contains("/api/example"));
        assert!(line.contains("200"));
    }
}
