use serde::Serialize;

pub const BODY_PREVIEW_CHARS: usize = 300;

pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}

/// First [`BODY_PREVIEW_CHARS`] characters of a body, for log lines.
pub(crate) fn preview(body: &str) -> String {
    format!("{:.len$}", body, len = BODY_PREVIEW_CHARS)
}
