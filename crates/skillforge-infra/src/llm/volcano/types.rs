//! Ark responses API types.
//!
//! The response `output` is a list of heterogeneous items discriminated by
//! `type`. Items and content parts this adapter does not read decode as
//! `Other` instead of failing the whole envelope.

use serde::{Deserialize, Serialize};

/// Request body for `POST {base}/responses`.
#[derive(Debug, Clone, Serialize)]
pub struct VolcanoRequest {
    pub model: String,
    pub input: Vec<VolcanoInputMessage>,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolcanoInputMessage {
    pub role: String,
    pub content: Vec<VolcanoInputContent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VolcanoInputContent {
    InputText { text: String },
}

/// Full response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    /// `completed`, `incomplete`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Vec<VolcanoOutputItem>,
    #[serde(default)]
    pub usage: Option<VolcanoUsage>,
}

/// One entry of the response `output` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VolcanoOutputItem {
    Message {
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        content: Vec<VolcanoMessagePart>,
    },
    Reasoning {
        #[serde(default)]
        summary: Vec<VolcanoSummaryPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VolcanoMessagePart {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VolcanoSummaryPart {
    SummaryText { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolcanoUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Where the answer text was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Message,
    ReasoningSummary,
}

impl VolcanoResponse {
    /// Answer text, checked in priority order: the assistant message's
    /// `output_text`, then the reasoning item's `summary_text`.
    pub fn answer(&self) -> Option<(&str, AnswerSource)> {
        self.message_text()
            .map(|text| (text, AnswerSource::Message))
            .or_else(|| {
                self.reasoning_summary()
                    .map(|text| (text, AnswerSource::ReasoningSummary))
            })
    }

    /// Whether the provider flagged the response or its message as incomplete.
    pub fn is_incomplete(&self) -> bool {
        self.status.as_deref() == Some("incomplete")
            || self.output.iter().any(|item| {
                matches!(
                    item,
                    VolcanoOutputItem::Message { status: Some(s), .. } if s == "incomplete"
                )
            })
    }

    fn message_text(&self) -> Option<&str> {
        self.output.iter().find_map(|item| match item {
            VolcanoOutputItem::Message { role, content, .. }
                if role.as_deref().unwrap_or("assistant") == "assistant" =>
            {
                content.iter().find_map(|part| match part {
                    VolcanoMessagePart::OutputText { text } if !text.trim().is_empty() => {
                        Some(text.as_str())
                    }
                    _ => None,
                })
            }
            _ => None,
        })
    }

    fn reasoning_summary(&self) -> Option<&str> {
        self.output.iter().find_map(|item| match item {
            VolcanoOutputItem::Reasoning { summary } => summary.iter().find_map(|part| match part {
                VolcanoSummaryPart::SummaryText { text } if !text.trim().is_empty() => {
                    Some(text.as_str())
                }
                _ => None,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> VolcanoResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let request = VolcanoRequest {
            model: "doubao-seed-1-8-251228".to_string(),
            input: vec![VolcanoInputMessage {
                role: "user".to_string(),
                content: vec![VolcanoInputContent::InputText {
                    text: "hello".to_string(),
                }],
            }],
            max_output_tokens: 2000,
            temperature: Some(0.7),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"][0]["role"], "user");
        assert_eq!(json["input"][0]["content"][0]["type"], "input_text");
        assert_eq!(json["input"][0]["content"][0]["text"], "hello");
        assert_eq!(json["max_output_tokens"], 2000);
    }

    #[test]
    fn test_message_preferred_over_reasoning() {
        let response = parse(
            r#"{
                "id": "resp_1",
                "model": "doubao",
                "status": "completed",
                "output": [
                    {"type": "reasoning", "summary": [{"type": "summary_text", "text": "thinking"}]},
                    {"type": "message", "role": "assistant", "status": "completed",
                     "content": [{"type": "output_text", "text": "{\"name\": \"Rust\"}"}]}
                ]
            }"#,
        );
        assert_eq!(
            response.answer(),
            Some(("{\"name\": \"Rust\"}", AnswerSource::Message))
        );
        assert!(!response.is_incomplete());
    }

    #[test]
    fn test_reasoning_summary_when_message_missing() {
        let response = parse(
            r#"{
                "status": "incomplete",
                "output": [
                    {"type": "reasoning", "summary": [
                        {"type": "summary_text", "text": "```json\n{\"name\": \"Go\"}\n```"}
                    ]}
                ]
            }"#,
        );
        let (text, source) = response.answer().unwrap();
        assert_eq!(source, AnswerSource::ReasoningSummary);
        assert!(text.contains("\"Go\""));
        assert!(response.is_incomplete());
    }

    #[test]
    fn test_reasoning_summary_when_message_empty() {
        let response = parse(
            r#"{
                "output": [
                    {"type": "message", "role": "assistant", "status": "incomplete", "content": []},
                    {"type": "reasoning", "summary": [{"type": "summary_text", "text": "{}"}]}
                ]
            }"#,
        );
        assert_eq!(response.answer(), Some(("{}", AnswerSource::ReasoningSummary)));
        assert!(response.is_incomplete());
    }

    #[test]
    fn test_unknown_items_are_ignored() {
        let response = parse(
            r#"{
                "output": [
                    {"type": "web_search_call", "id": "ws_1"},
                    {"type": "message", "role": "assistant",
                     "content": [{"type": "refusal", "refusal": "no"}, {"type": "output_text", "text": "ok"}]}
                ]
            }"#,
        );
        assert_eq!(response.answer(), Some(("ok", AnswerSource::Message)));
    }

    #[test]
    fn test_no_answer() {
        let response = parse(r#"{"output": []}"#);
        assert!(response.answer().is_none());
    }
}
