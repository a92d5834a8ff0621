//! Instagram carousel pipeline.
//!
//! A linear, single-attempt flow over three hosted services:
//!
//! 1. slide texts from the chat model, or a static fallback deck;
//! 2. optional per-slide backgrounds from the image generator;
//! 3. local HTML templating;
//! 4. rasterisation of each document by the HTML-to-image service.
//!
//! Failures in steps 2 and 4 degrade individual slides instead of
//! aborting; only a carousel with no rendered slide at all is an error.

pub mod carousel;
pub mod content;
pub mod error;
pub mod template;

pub use carousel::{CarouselOutcome, CarouselPipeline, CarouselRequest, RenderedSlide};
pub use content::{generate_slides, SlideContent};
pub use error::PipelineError;
