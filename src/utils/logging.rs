use serde::Serialize;

/// Logged bodies longer than this are cut before they reach the log.
const MAX_LOGGED_BODY_CHARS: usize = 2048;

/// Pretty-prints `value` and hands it to `log_action`, only when DEBUG is enabled.
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
    log_action(truncate_chars(&pretty_json, MAX_LOGGED_BODY_CHARS).as_ref());
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> std::borrow::Cow<'_, str> {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...<truncated>", &s[..idx]).into(),
        None => s.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("héllo", 2), "hé...<truncated>");
    }
}
