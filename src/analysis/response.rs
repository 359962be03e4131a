use serde_json::Value;

const CODE_FENCE: &str = "```";

#[derive(Debug, thiserror::Error)]
pub enum ResponseFormatError {
    #[error("AI returned an invalid response format")]
    InvalidResponseFormat {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResponseFormatError {
    /// The unmodified reply text, kept for diagnostics.
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidResponseFormat { raw, .. } => raw,
        }
    }
}

/// Parses a model reply as JSON after removing an optional markdown fence.
///
/// Only syntax is checked. Shape checking against a schema is up to the caller.
pub fn parse_json_response(raw: &str) -> Result<Value, ResponseFormatError> {
    serde_json::from_str::<Value>(strip_code_fence(raw)).map_err(|source| {
        ResponseFormatError::InvalidResponseFormat {
            raw: raw.to_owned(),
            source,
        }
    })
}

/// Removes a leading "```lang" line and a trailing "```" line. Either marker
/// may be absent.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(CODE_FENCE)
        && let Some((tag, after)) = rest.split_once('\n')
        && is_language_tag(tag)
    {
        body = after;
    }

    if let Some(before) = body.strip_suffix(CODE_FENCE)
        && (before.is_empty() || before.ends_with('\n'))
    {
        body = before;
    }

    body.trim()
}

fn is_language_tag(tag: &str) -> bool {
    tag.trim()
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '+'))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ResponseFormatError, parse_json_response, strip_code_fence};

    #[test]
    fn fenced_json_is_unwrapped() {
        let value = parse_json_response("```json\n{\"a\":1}\n```").expect("fenced json parses");
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn bare_json_is_parsed_as_is() {
        let value = parse_json_response("{\"a\":1}").expect("bare json parses");
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn invalid_json_keeps_raw_text() {
        let error = parse_json_response("not json").expect_err("invalid json should fail");
        let ResponseFormatError::InvalidResponseFormat { raw, .. } = &error;
        assert_eq!(raw, "not json");
        assert_eq!(error.raw(), "not json");
    }

    #[test]
    fn fence_without_language_tag_and_crlf_is_unwrapped() {
        assert_eq!(strip_code_fence("```\r\n[1, 2]\r\n```\r\n"), "[1, 2]");
    }

    #[test]
    fn trailing_fence_alone_is_removed() {
        let value = parse_json_response("{\"b\":true}\n```").expect("json parses");
        assert_eq!(value, json!({"b": true}));
    }

    #[test]
    fn fence_inside_json_string_is_not_touched() {
        let raw = "{\"code\":\"```\"}";
        assert_eq!(strip_code_fence(raw), raw);
        assert_eq!(
            parse_json_response(raw).expect("json parses"),
            json!({"code": "```"})
        );
    }

    #[test]
    fn truncated_fenced_payload_is_rejected() {
        let error = parse_json_response("```json\n{\"a\":\n```").expect_err("should fail");
        assert_eq!(error.raw(), "```json\n{\"a\":\n```");
    }
}
