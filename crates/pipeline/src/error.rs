/// Errors that abort the carousel pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Every slide failed to rasterise.
    #[error("none of the {attempted} slides could be rendered")]
    NothingRendered { attempted: usize },

    /// The request asked for an empty carousel.
    #[error("a carousel needs at least one slide")]
    NoSlides,
}
