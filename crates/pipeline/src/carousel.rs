//! Carousel orchestration.

use std::sync::Arc;

use agencia_core::carousel::{background_prompt, Slide, MAX_SLIDES};
use agencia_providers::{ChatCompletion, ChatModel, HtmlRenderer, ImageGenerator};
use serde::Serialize;

use crate::content::generate_slides;
use crate::error::PipelineError;
use crate::template::{render_request, slide_html, Theme};

/// Size requested from the image generator for slide backgrounds.
pub const BACKGROUND_SIZE: &str = "1024x1024";

/// Input to one pipeline run.
#[derive(Debug, Clone)]
pub struct CarouselRequest {
    pub topic: String,
    pub slide_count: usize,
    pub tone: Option<String>,
    pub theme: Theme,
    pub with_backgrounds: bool,
    /// Pre-written slides; skips text generation when present.
    pub slides: Option<Vec<Slide>>,
    /// Language the generated copy is written in.
    pub language: String,
}

/// One rasterised slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlide {
    /// 0-based slide index.
    pub index: usize,
    pub url: String,
}

/// Result of a pipeline run with at least one rendered slide.
#[derive(Debug, Clone, Serialize)]
pub struct CarouselOutcome {
    pub slides: Vec<Slide>,
    pub images: Vec<RenderedSlide>,
    /// Indices of slides the rasteriser could not produce.
    pub failed_slides: Vec<usize>,
    /// `true` when slide texts came from the static fallback deck.
    pub fallback_content: bool,
    /// Model reply used for the texts, for usage accounting.
    #[serde(skip)]
    pub completion: Option<ChatCompletion>,
}

/// Runs the carousel steps against a set of providers.
pub struct CarouselPipeline {
    chat: Arc<dyn ChatModel>,
    images: Arc<dyn ImageGenerator>,
    renderer: Arc<dyn HtmlRenderer>,
}

impl CarouselPipeline {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        images: Arc<dyn ImageGenerator>,
        renderer: Arc<dyn HtmlRenderer>,
    ) -> Self {
        Self {
            chat,
            images,
            renderer,
        }
    }

    /// Run every step once, sequentially.
    pub async fn run(&self, request: CarouselRequest) -> Result<CarouselOutcome, PipelineError> {
        // 1. Slide texts.
        let (slides, fallback_content, completion) = match request.slides {
            Some(mut slides) => {
                slides.truncate(MAX_SLIDES);
                (slides, false, None)
            }
            None => {
                let content = generate_slides(
                    self.chat.as_ref(),
                    &request.topic,
                    request.slide_count,
                    request.tone.as_deref(),
                    &request.language,
                )
                .await;
                (content.slides, content.fallback, content.completion)
            }
        };
        if slides.is_empty() {
            return Err(PipelineError::NoSlides);
        }

        // 2. Backgrounds. A failed slot stays empty.
        let backgrounds = if request.with_backgrounds {
            self.backgrounds(&request.topic, &slides).await
        } else {
            vec![None; slides.len()]
        };

        // 3 + 4. Template and rasterise.
        let total = slides.len();
        let mut images = Vec::with_capacity(total);
        let mut failed_slides = Vec::new();
        for (index, (slide, background)) in slides.iter().zip(&backgrounds).enumerate() {
            let html = slide_html(slide, index, total, &request.theme, background.as_deref());
            match self.renderer.render(&render_request(html)).await {
                Ok(url) => images.push(RenderedSlide { index, url }),
                Err(e) => {
                    tracing::warn!(provider = "renderer", slide = index, error = %e, "Slide render failed");
                    failed_slides.push(index);
                }
            }
        }

        if images.is_empty() {
            return Err(PipelineError::NothingRendered { attempted: total });
        }

        tracing::info!(
            slides = total,
            rendered = images.len(),
            fallback_content,
            "Carousel rendered"
        );

        Ok(CarouselOutcome {
            slides,
            images,
            failed_slides,
            fallback_content,
            completion,
        })
    }

    async fn backgrounds(&self, topic: &str, slides: &[Slide]) -> Vec<Option<String>> {
        let mut urls = Vec::with_capacity(slides.len());
        for (index, slide) in slides.iter().enumerate() {
            let prompt = background_prompt(topic, slide);
            match self.images.generate(&prompt, BACKGROUND_SIZE).await {
                Ok(url) => urls.push(Some(url)),
                Err(e) => {
                    tracing::warn!(provider = "images", slide = index, error = %e, "Background generation failed");
                    urls.push(None);
                }
            }
        }
        urls
    }
}
