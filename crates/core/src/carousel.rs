//! Instagram carousel content: slide type, LLM prompt, reply parsing and
//! the deterministic fallback deck.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::assistants::ChatMessage;

/// Largest carousel Instagram accepts.
pub const MAX_SLIDES: usize = 10;

/// Slide count used when the request does not specify one.
pub const DEFAULT_SLIDES: usize = 5;

pub const MAX_TITLE_LENGTH: u64 = 120;
pub const MAX_BODY_LENGTH: u64 = 600;

/// Text content of one carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Slide {
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 600, message = "body must be at most 600 characters"))]
    pub body: String,
}

/// Visual template applied when rendering slides to HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselTemplate {
    #[default]
    Minimal,
    Bold,
    Gradient,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlideParseError {
    #[error("no JSON array found in model reply")]
    NoJson,
    #[error("model reply is not a slide list: {0}")]
    Malformed(String),
    #[error("model reply contained no usable slides")]
    Empty,
}

#[derive(Deserialize)]
struct SlideEnvelope {
    slides: Vec<Slide>,
}

/// Messages asking the model for `count` slides about `topic` as JSON.
pub fn content_messages(
    topic: &str,
    count: usize,
    tone: Option<&str>,
    language: &str,
) -> Vec<ChatMessage> {
    let tone = tone.filter(|t| !t.trim().is_empty()).unwrap_or("informative and friendly");
    vec![
        ChatMessage::system(format!(
            "You write Instagram carousel copy for a marketing agency. Reply with JSON only: \
             an array of exactly {count} objects with string fields \"title\" \
             (max {MAX_TITLE_LENGTH} characters) and \"body\" (max {MAX_BODY_LENGTH} characters). \
             Write in {language}."
        )),
        ChatMessage::user(format!("Topic: {topic}\nTone: {tone}")),
    ]
}

/// Prompt for the background image of one slide.
pub fn background_prompt(topic: &str, slide: &Slide) -> String {
    format!(
        "Abstract background for an Instagram post about \"{topic}\", evoking \"{}\". \
         Soft colours, no text, no letters, no watermarks, square composition.",
        slide.title
    )
}

/// Extract slides from a model reply.
///
/// Accepts a bare JSON array, an object with a `slides` array, either of
/// them wrapped in a Markdown code fence or surrounded by prose. Slides
/// without a title are dropped; bodies and titles are trimmed and clipped
/// to their limits; at most `max` slides are kept.
pub fn parse_slides(reply: &str, max: usize) -> Result<Vec<Slide>, SlideParseError> {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence =
        FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("static regex"));

    let text = fence
        .captures(reply)
        .and_then(|c| c.get(1))
        .map_or(reply, |m| m.as_str())
        .trim();

    let slides = if text.starts_with('{') {
        serde_json::from_str::<SlideEnvelope>(text)
            .map(|e| e.slides)
            .map_err(|e| SlideParseError::Malformed(e.to_string()))?
    } else {
        let start = text.find('[').ok_or(SlideParseError::NoJson)?;
        let end = text.rfind(']').ok_or(SlideParseError::NoJson)?;
        if end < start {
            return Err(SlideParseError::NoJson);
        }
        serde_json::from_str::<Vec<Slide>>(&text[start..=end])
            .map_err(|e| SlideParseError::Malformed(e.to_string()))?
    };

    let cleaned: Vec<Slide> = slides
        .into_iter()
        .filter_map(|s| {
            let title = clip(s.title.trim(), MAX_TITLE_LENGTH as usize);
            if title.is_empty() {
                return None;
            }
            Some(Slide {
                title,
                body: clip(s.body.trim(), MAX_BODY_LENGTH as usize),
            })
        })
        .take(max)
        .collect();

    if cleaned.is_empty() {
        Err(SlideParseError::Empty)
    } else {
        Ok(cleaned)
    }
}

/// Static deck used when slide generation fails.
///
/// Always returns exactly `count` slides (clamped to `1..=MAX_SLIDES`):
/// a cover, middle slides, and a closing call to action.
pub fn fallback_slides(topic: &str, count: usize) -> Vec<Slide> {
    let count = count.clamp(1, MAX_SLIDES);
    let topic = clip(topic.trim(), 80);

    (0..count)
        .map(|i| {
            if i == 0 {
                Slide {
                    title: topic.clone(),
                    body: "Swipe to learn more.".to_string(),
                }
            } else if i + 1 == count {
                Slide {
                    title: "Want to know more?".to_string(),
                    body: "Follow us and send us a message.".to_string(),
                }
            } else {
                Slide {
                    title: format!("{topic}: point {i}"),
                    body: String::new(),
                }
            }
        })
        .collect()
}

/// Truncate to at most `max` characters on a char boundary.
fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let reply = r#"[{"title":"One","body":"a"},{"title":"Two","body":"b"}]"#;
        let slides = parse_slides(reply, 10).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Two");
    }

    #[test]
    fn parses_fenced_reply_with_prose() {
        let reply = "Here you go:\n```json\n[{\"title\":\" Hook \",\"body\":\"x\"}]\n```\nEnjoy!";
        let slides = parse_slides(reply, 10).unwrap();
        assert_eq!(slides, vec![Slide { title: "Hook".into(), body: "x".into() }]);
    }

    #[test]
    fn parses_slides_envelope() {
        let reply = r#"{"slides":[{"title":"Only"}]}"#;
        let slides = parse_slides(reply, 10).unwrap();
        assert_eq!(slides[0].body, "");
    }

    #[test]
    fn drops_untitled_and_caps_count() {
        let reply = r#"[{"title":""},{"title":"a"},{"title":"b"},{"title":"c"}]"#;
        let slides = parse_slides(reply, 2).unwrap();
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn rejects_replies_without_slides() {
        assert_eq!(parse_slides("I cannot help with that.", 5), Err(SlideParseError::NoJson));
        assert_eq!(parse_slides("[]", 5), Err(SlideParseError::Empty));
        assert!(matches!(parse_slides("[1, 2]", 5), Err(SlideParseError::Malformed(_))));
    }

    #[test]
    fn fallback_has_requested_length() {
        let slides = fallback_slides("Marketing para padarias", 4);
        assert_eq!(slides.len(), 4);
        assert_eq!(slides[0].title, "Marketing para padarias");
        assert_eq!(slides[3].title, "Want to know more?");
    }

    #[test]
    fn fallback_clamps_count() {
        assert_eq!(fallback_slides("x", 0).len(), 1);
        assert_eq!(fallback_slides("x", 50).len(), MAX_SLIDES);
    }

    #[test]
    fn content_prompt_mentions_count_and_language() {
        let msgs = content_messages("SEO", 6, None, "pt-BR");
        assert!(msgs[0].content.contains("exactly 6"));
        assert!(msgs[0].content.contains("pt-BR"));
        assert!(msgs[1].content.contains("informative and friendly"));
    }
}
