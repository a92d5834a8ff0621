//! Slide text generation with the static fallback deck.

use agencia_core::carousel::{content_messages, fallback_slides, parse_slides, Slide, MAX_SLIDES};
use agencia_providers::{ChatCompletion, ChatModel, ChatRequest};

/// Generated slide texts.
#[derive(Debug, Clone)]
pub struct SlideContent {
    pub slides: Vec<Slide>,
    /// `true` when the deck is the static fallback.
    pub fallback: bool,
    /// The model reply, present only when the model call succeeded. Used to
    /// record token usage even if its text was unusable.
    pub completion: Option<ChatCompletion>,
}

/// Ask the chat model for `count` slides about `topic`.
///
/// Never fails: a provider error or an unparseable reply yields
/// [`fallback_slides`] with `fallback: true`.
pub async fn generate_slides(
    chat: &dyn ChatModel,
    topic: &str,
    count: usize,
    tone: Option<&str>,
    language: &str,
) -> SlideContent {
    let count = count.clamp(1, MAX_SLIDES);
    let request = ChatRequest {
        temperature: Some(0.8),
        ..ChatRequest::new(content_messages(topic, count, tone, language))
    };

    let completion = match chat.complete(request).await {
        Ok(completion) => completion,
        Err(e) => {
            tracing::warn!(provider = "chat", error = %e, "Slide generation failed, using fallback deck");
            return SlideContent {
                slides: fallback_slides(topic, count),
                fallback: true,
                completion: None,
            };
        }
    };

    match parse_slides(&completion.content, count) {
        Ok(slides) => SlideContent {
            slides,
            fallback: false,
            completion: Some(completion),
        },
        Err(e) => {
            tracing::warn!(provider = "chat", error = %e, "Unusable slide reply, using fallback deck");
            SlideContent {
                slides: fallback_slides(topic, count),
                fallback: true,
                completion: Some(completion),
            }
        }
    }
}
