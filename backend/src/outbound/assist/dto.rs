//! Wire types for the Gemini generateContent API.
//!
//! Only the fields this adapter reads or writes are modelled; everything
//! else in the provider's payload is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub contents: Vec<ContentDto>,
}

impl GenerateContentRequest {
    /// Single-turn request wrapping one prompt.
    pub(super) fn single_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![ContentDto {
                parts: vec![PartDto {
                    text: prompt.to_owned(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ContentDto {
    #[serde(default)]
    pub parts: Vec<PartDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PartDto {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateDto {
    pub content: Option<ContentDto>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub(super) fn first_candidate_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let content = candidate.content?;
        let text: String = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn request_shape_matches_the_provider_contract() {
        let request = GenerateContentRequest::single_prompt("hello");
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[rstest]
    fn response_concatenates_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .expect("decodable");
        assert_eq!(
            response.first_candidate_text().as_deref(),
            Some("Hello world")
        );
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "candidates": [] }))]
    #[case(json!({ "candidates": [{ "content": null }] }))]
    #[case(json!({ "candidates": [{ "content": { "parts": [] } }] }))]
    fn empty_responses_yield_no_text(#[case] payload: serde_json::Value) {
        let response: GenerateContentResponse =
            serde_json::from_value(payload).expect("decodable");
        assert_eq!(response.first_candidate_text(), None);
    }
}
