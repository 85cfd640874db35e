//! JSON shapes for the `generateContent` endpoint.

use gemchat_store::Message;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, PartialEq)]
pub struct GenerateRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    /// Every turn, in order, as one single-part content entry.
    pub fn from_history(history: &'a [Message]) -> Self {
        let contents = history
            .iter()
            .map(|message| Content {
                role: message.role().as_str(),
                parts: vec![Part {
                    text: message.text(),
                }],
            })
            .collect();

        Self { contents }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate's first part, if the payload has one.
    pub fn into_reply_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[cfg(test)]
mod tests {
    use gemchat_store::Message;
    use serde_json::json;

    use super::{GenerateRequest, GenerateResponse};

    #[test]
    fn request_body_carries_roles_and_parts_in_order() {
        let history = vec![Message::model("Do you have any question?"), Message::user("Hello")];
        let body = serde_json::to_value(GenerateRequest::from_history(&history)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [
                    {"role": "model", "parts": [{"text": "Do you have any question?"}]},
                    {"role": "user", "parts": [{"text": "Hello"}]}
                ]
            })
        );
    }

    #[test]
    fn extracts_first_candidate_first_part() {
        let payload = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        });
        let response: GenerateResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.into_reply_text().as_deref(), Some("first"));
    }

    #[test]
    fn missing_fields_yield_none() {
        for payload in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}),
        ] {
            let response: GenerateResponse = serde_json::from_value(payload.clone()).unwrap();
            assert_eq!(response.into_reply_text(), None, "payload: {payload}");
        }
    }
}
