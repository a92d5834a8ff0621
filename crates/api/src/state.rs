use std::sync::Arc;

use agencia_pipeline::CarouselPipeline;
use agencia_providers::{ChatModel, HtmlRenderer, ImageGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agencia_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Chat-completion model behind the assistants and slide copy.
    pub chat: Arc<dyn ChatModel>,
    /// Text-to-image model for slide backgrounds.
    pub images: Arc<dyn ImageGenerator>,
    /// HTML-to-image rasteriser for carousel slides.
    pub renderer: Arc<dyn HtmlRenderer>,
}

impl AppState {
    pub fn carousel_pipeline(&self) -> CarouselPipeline {
        CarouselPipeline::new(
            Arc::clone(&self.chat),
            Arc::clone(&self.images),
            Arc::clone(&self.renderer),
        )
    }
}
