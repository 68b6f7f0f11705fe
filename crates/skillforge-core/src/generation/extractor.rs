//! JSON extraction from raw provider text.
//!
//! Providers wrap the requested JSON in prose, markdown fences, or both.
//! `extract_json` isolates the most plausible JSON object and parses it
//! strictly; nothing is repaired.

use serde_json::Value;

use skillforge_types::error::ExtractionError;

const FENCE: &str = "```";

/// Isolate and parse the JSON object embedded in `raw`.
///
/// 1. Trim surrounding whitespace; empty text is [`ExtractionError::Empty`].
/// 2. Prefer a fenced block tagged `json` (any case), else the first fenced
///    block, else the whole text. An unterminated fence runs to end of text.
/// 3. Slice from the first `{` to the last `}` inclusive.
/// 4. Parse with `serde_json`.
pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let blocks = fenced_blocks(text);
    let candidate = blocks
        .iter()
        .find(|block| block.tag.eq_ignore_ascii_case("json"))
        .or_else(|| blocks.first())
        .map(|block| block.body)
        .unwrap_or(text);

    let start = candidate.find('{').ok_or(ExtractionError::NoJsonObject)?;
    let end = candidate.rfind('}').ok_or(ExtractionError::NoJsonObject)?;
    if end < start {
        return Err(ExtractionError::NoJsonObject);
    }

    serde_json::from_str(&candidate[start..=end])
        .map_err(|e| ExtractionError::Malformed(e.to_string()))
}

/// A markdown code fence: its info-string tag and body.
#[derive(Debug)]
struct FencedBlock<'a> {
    tag: &'a str,
    body: &'a str,
}

/// Every fenced block in `text`, in order of appearance.
fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after = &rest[open + FENCE.len()..];

        // The tag is the rest of the opening line, unless that line already
        // holds content (```{"name": ...}```).
        let (tag, body_start) = match after.find('\n') {
            Some(nl) if !after[..nl].contains('{') => (after[..nl].trim(), nl + 1),
            _ => ("", 0),
        };
        let body_area = &after[body_start..];

        match body_area.find(FENCE) {
            Some(close) => {
                blocks.push(FencedBlock {
                    tag,
                    body: &body_area[..close],
                });
                rest = &body_area[close + FENCE.len()..];
            }
            None => {
                blocks.push(FencedBlock {
                    tag,
                    body: body_area,
                });
                break;
            }
        }
    }

    blocks
}

/// First `max_chars` characters of `text`, for debug logging.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let value = extract_json(r#"{"name": "Rust", "description": "lang"}"#).unwrap();
        assert_eq!(value["name"], "Rust");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(matches!(extract_json(""), Err(ExtractionError::Empty)));
        assert!(matches!(extract_json("  \n\t "), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_json_fence_inside_prose() {
        let raw = "Here is your tree:\n```json\n{\"name\": \"Go\", \"description\": \"d\"}\n```\nEnjoy!";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["name"], "Go");
    }

    #[test]
    fn test_json_tag_is_case_insensitive() {
        let raw = "```JSON\n{\"name\": \"Go\"}\n```";
        assert_eq!(extract_json(raw).unwrap()["name"], "Go");
    }

    #[test]
    fn test_json_fence_preferred_over_earlier_fence() {
        let raw = "```text\nnot { json }\n```\nthen\n```json\n{\"name\": \"Kotlin\"}\n```";
        assert_eq!(extract_json(raw).unwrap()["name"], "Kotlin");
    }

    #[test]
    fn test_untagged_fence() {
        let raw = "```\n{\"name\": \"C\"}\n```";
        assert_eq!(extract_json(raw).unwrap()["name"], "C");
    }

    #[test]
    fn test_inline_fence_without_newline() {
        let raw = "```{\"name\": \"Zig\"}```";
        assert_eq!(extract_json(raw).unwrap()["name"], "Zig");
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let raw = "```json\n{\"name\": \"Elm\", \"description\": \"x\"}";
        assert_eq!(extract_json(raw).unwrap()["name"], "Elm");
    }

    #[test]
    fn test_prose_around_bare_object() {
        let raw = "Sure! {\"name\": \"Lua\"} Hope that helps.";
        assert_eq!(extract_json(raw).unwrap()["name"], "Lua");
    }

    #[test]
    fn test_no_braces() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn test_close_before_open() {
        assert!(matches!(
            extract_json("} oops {"),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn test_malformed_is_not_repaired() {
        let err = extract_json("{\"name\": \"Rust\",}").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("前端开发", 2), "前端");
        assert_eq!(preview("abc", 10), "abc");
    }
}
