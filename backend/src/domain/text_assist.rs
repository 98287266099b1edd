//! AI-assisted text transformations.
//!
//! Each action fully determines its prompt; the service owns the templates
//! and the generator port owns the transport. Failures from the provider are
//! surfaced unchanged, without retries or caching.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ports::{TextAssist, TextGenerationError, TextGenerator};

/// The title prompt only looks at this many leading characters of the
/// document.
pub const TITLE_INPUT_LIMIT: usize = 2000;

/// Actions accepted by the generate endpoint.
///
/// The grammar fix has its own entrypoint and is not an action value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateAction {
    /// A one-to-two sentence professional summary.
    Summarize,
    /// A three-to-five word continuation of the input.
    Continue,
    /// A three-to-six word document title.
    Title,
}

/// Parse error raised for unknown action values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid action type")]
pub struct GenerateActionError;

impl GenerateAction {
    /// Wire representation of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Continue => "continue",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for GenerateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GenerateAction {
    type Err = GenerateActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(Self::Summarize),
            "continue" => Ok(Self::Continue),
            "title" => Ok(Self::Title),
            _ => Err(GenerateActionError),
        }
    }
}

fn fix_grammar_prompt(text: &str) -> String {
    format!(
        "You are an expert editor. Fix the grammar, spelling, and improve the \
         clarity of the following text.\n\n\
         CRITICAL INSTRUCTION:\n\
         - Preserve ALL Markdown formatting.\n\
         - Do NOT add filler or explanations.\n\
         - Return ONLY the improved Markdown text.\n\n\
         Original Text:\n{text}"
    )
}

fn summarize_prompt(text: &str) -> String {
    format!(
        "Provide a short, professional 1-2 sentence summary of this text.\n\
         Do NOT include markdown or filler.\n\n\
         Text:\n{text}"
    )
}

fn continue_prompt(text: &str) -> String {
    format!(
        "Complete the following text with ONLY 3-5 words.\n\
         Do NOT repeat input.\n\n\
         Input: {text}\n\
         Completion:"
    )
}

fn title_prompt(text: &str) -> String {
    let excerpt: String = text.chars().take(TITLE_INPUT_LIMIT).collect();
    format!(
        "Generate a short, catchy 3-6 word title.\n\
         No quotes. No prefixes.\n\n\
         Text:\n{excerpt}"
    )
}

/// Text-assist service: template selection over a generator port.
#[derive(Clone)]
pub struct TextAssistService {
    generator: Arc<dyn TextGenerator>,
}

impl TextAssistService {
    /// Create a service over the given generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn run(&self, prompt: String) -> Result<String, Error> {
        self.generator
            .generate(&prompt)
            .await
            .map_err(map_generation_error)
    }
}

// Provider failures keep their message; the HTTP layer reports them as 500s.
fn map_generation_error(error: TextGenerationError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl TextAssist for TextAssistService {
    async fn fix_grammar(&self, text: &str) -> Result<String, Error> {
        self.run(fix_grammar_prompt(text)).await
    }

    async fn generate(&self, text: &str, action: GenerateAction) -> Result<String, Error> {
        let prompt = match action {
            GenerateAction::Summarize => summarize_prompt(text),
            GenerateAction::Continue => continue_prompt(text),
            GenerateAction::Title => title_prompt(text),
        };
        self.run(prompt).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTextGenerator;
    use rstest::rstest;

    fn service_capturing_prompt(
        captured: std::sync::Arc<std::sync::Mutex<String>>,
    ) -> TextAssistService {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(move |prompt| {
            *captured.lock().expect("prompt capture lock") = prompt.to_owned();
            Ok("generated".to_owned())
        });
        TextAssistService::new(Arc::new(generator))
    }

    #[rstest]
    #[case("summarize", GenerateAction::Summarize)]
    #[case("continue", GenerateAction::Continue)]
    #[case("title", GenerateAction::Title)]
    fn action_parses_known_values(#[case] raw: &str, #[case] expected: GenerateAction) {
        assert_eq!(raw.parse::<GenerateAction>().expect("known action"), expected);
    }

    #[rstest]
    #[case("bogus")]
    #[case("Summarize")]
    #[case("fix-grammar")]
    #[case("")]
    fn action_rejects_unknown_values(#[case] raw: &str) {
        raw.parse::<GenerateAction>().expect_err("unknown action must fail");
    }

    #[tokio::test]
    async fn each_action_selects_its_template() {
        let captured = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
        let service = service_capturing_prompt(captured.clone());

        service
            .generate("the quick brown fox", GenerateAction::Summarize)
            .await
            .expect("generation succeeds");
        {
            let prompt = captured.lock().expect("prompt capture lock");
            assert!(prompt.contains("summary"));
            assert!(prompt.contains("the quick brown fox"));
        }

        service
            .generate("the quick brown", GenerateAction::Continue)
            .await
            .expect("generation succeeds");
        {
            let prompt = captured.lock().expect("prompt capture lock");
            assert!(prompt.contains("3-5 words"));
            assert!(prompt.contains("Completion:"));
        }

        service
            .fix_grammar("teh text")
            .await
            .expect("generation succeeds");
        let prompt = captured.lock().expect("prompt capture lock");
        assert!(prompt.contains("Markdown"));
        assert!(prompt.contains("teh text"));
    }

    #[tokio::test]
    async fn title_prompt_truncates_long_input() {
        let captured = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
        let service = service_capturing_prompt(captured.clone());

        let long_input = "z".repeat(TITLE_INPUT_LIMIT + 500);
        service
            .generate(&long_input, GenerateAction::Title)
            .await
            .expect("generation succeeds");

        let prompt = captured.lock().expect("prompt capture lock");
        let embedded = prompt.chars().filter(|c| *c == 'z').count();
        assert_eq!(embedded, TITLE_INPUT_LIMIT);
    }

    #[tokio::test]
    async fn provider_failures_surface_as_internal_errors() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(TextGenerationError::provider("model overloaded")));
        let service = TextAssistService::new(Arc::new(generator));

        let err = service
            .fix_grammar("text")
            .await
            .expect_err("provider failure surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("model overloaded"));
    }
}
