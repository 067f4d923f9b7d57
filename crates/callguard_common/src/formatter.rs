//! Backend chat reply formatter.
//!
//! The chat endpoint returns whatever the answering service produced: a
//! bare string, an object with one of several answer keys, or something
//! else entirely. Nothing is dropped: when no known key is present the
//! whole payload is shown pretty-printed.

use serde_json::Value;

use crate::response::AssistantResponse;

/// Answer-bearing keys, tried in order. Empty strings count as absent.
const ANSWER_KEYS: [&str; 5] = ["answer", "response", "message", "text", "output"];

/// Title of the section appended when the reply cites sources.
pub const SOURCES_TITLE: &str = "Sources";

/// Convert an arbitrary chat-endpoint payload into a displayable response.
pub fn format_backend_reply(payload: &Value) -> AssistantResponse {
    if let Some(text) = payload.as_str() {
        return AssistantResponse::plain(text);
    }

    let answer = ANSWER_KEYS
        .iter()
        .find_map(|key| payload.get(key)?.as_str().filter(|text| !text.is_empty()));

    let Some(answer) = answer else {
        // No recognized answer key: show the whole payload rather than
        // losing information.
        let dump = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        return AssistantResponse::structured(dump);
    };

    let mut response = AssistantResponse::structured(answer);

    if let Some(sources) = payload.get("sources").filter(|v| !v.is_null()) {
        let items = match sources.as_array() {
            Some(entries) => entries.iter().map(source_label).collect(),
            None => vec![source_label(sources)],
        };
        response = response.with_section(SOURCES_TITLE, items);
    }

    if let Some(follow_up) = payload.get("follow_up").filter(|v| !v.is_null()) {
        let text = match follow_up.as_str() {
            Some(s) => s.to_string(),
            None => follow_up.to_string(),
        };
        response = response.with_recommendation(text);
    }

    response
}

/// Reduce one source entry to a display string: the string itself, a
/// `title` or `name` field, or a dump of the entry.
fn source_label(entry: &Value) -> String {
    if let Some(s) = entry.as_str() {
        return s.to_string();
    }
    entry
        .get("title")
        .or_else(|| entry.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| entry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseKind;
    use serde_json::json;

    #[test]
    fn bare_string_is_plain_text() {
        let response = format_backend_reply(&json!("All good."));
        assert_eq!(response.kind, ResponseKind::PlainText);
        assert_eq!(response.content, "All good.");
    }

    #[test]
    fn answer_keys_are_tried_in_order() {
        let response = format_backend_reply(&json!({
            "message": "from message",
            "response": "from response"
        }));
        assert_eq!(response.content, "from response");
    }

    #[test]
    fn empty_answer_falls_through() {
        let response = format_backend_reply(&json!({
            "answer": "",
            "text": "actual text"
        }));
        assert_eq!(response.content, "actual text");
    }

    #[test]
    fn unknown_shape_is_dumped_verbatim() {
        let payload = json!({ "verdict": "ok", "score": 3 });
        let response = format_backend_reply(&payload);
        assert_eq!(response.kind, ResponseKind::Structured);
        assert!(response.content.contains("\"verdict\""));
        assert!(response.sections.is_empty());
    }

    #[test]
    fn sources_mix_strings_and_objects() {
        let response = format_backend_reply(&json!({
            "answer": "42",
            "sources": ["doc1", { "title": "doc2" }, { "name": "doc3" }, { "id": 9 }]
        }));
        assert_eq!(response.content, "42");
        assert_eq!(response.sections.len(), 1);
        assert_eq!(response.sections[0].title, SOURCES_TITLE);
        assert_eq!(
            response.sections[0].items[..3],
            ["doc1".to_string(), "doc2".to_string(), "doc3".to_string()]
        );
        assert!(response.sections[0].items[3].contains("9"));
    }

    #[test]
    fn scalar_sources_become_one_item() {
        let response = format_backend_reply(&json!({
            "answer": "ok",
            "sources": "policy handbook"
        }));
        assert_eq!(response.sections[0].items, vec!["policy handbook"]);
    }

    #[test]
    fn follow_up_maps_to_recommendation() {
        let response = format_backend_reply(&json!({
            "answer": "ok",
            "follow_up": "Want a breakdown by pattern?"
        }));
        assert_eq!(
            response.recommendation.as_deref(),
            Some("Want a breakdown by pattern?")
        );
    }
}
