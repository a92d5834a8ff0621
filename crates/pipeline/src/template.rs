//! HTML documents for carousel slides.
//!
//! Every document is self-contained (inline CSS, no scripts) and sized for
//! a fixed square viewport so the rasteriser output is exactly one post.

use std::fmt::Write;

use agencia_core::carousel::{CarouselTemplate, Slide};
use agencia_providers::RenderRequest;

/// Instagram square post size in pixels.
pub const SLIDE_SIZE: u32 = 1080;

/// Brand colour used when the request does not supply one.
pub const DEFAULT_BRAND_COLOR: &str = "#6C5CE7";

/// Visual settings shared by every slide of one carousel.
#[derive(Debug, Clone)]
pub struct Theme {
    pub template: CarouselTemplate,
    /// `#RRGGBB`.
    pub brand_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            template: CarouselTemplate::default(),
            brand_color: DEFAULT_BRAND_COLOR.to_string(),
        }
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encode the characters that could end a CSS `url('...')` token.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_whitespace() => {}
            other => out.push(other),
        }
    }
    out
}

/// Darken a `#RRGGBB` colour by `factor` (0.0 = black, 1.0 = unchanged).
/// Malformed input is returned unchanged.
fn shade(hex: &str, factor: f32) -> String {
    let Some(digits) = hex.strip_prefix('#').filter(|d| d.len() == 6) else {
        return hex.to_string();
    };
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |c: u8| (f32::from(c) * f).round() as u8;
            format!("#{:02X}{:02X}{:02X}", scale(r), scale(g), scale(b))
        }
        _ => hex.to_string(),
    }
}

fn theme_css(theme: &Theme) -> String {
    let brand = &theme.brand_color;
    match theme.template {
        CarouselTemplate::Minimal => format!(
            ".slide {{ background: #FFFFFF; color: #1E1E24; }}\n\
             .accent {{ background: {brand}; }}\n\
             .counter {{ color: {brand}; }}"
        ),
        CarouselTemplate::Bold => format!(
            ".slide {{ background: {brand}; color: #FFFFFF; }}\n\
             .accent {{ background: #FFFFFF; }}\n\
             h1 {{ font-size: 96px; text-transform: uppercase; }}"
        ),
        CarouselTemplate::Gradient => format!(
            ".slide {{ background: linear-gradient(135deg, {brand} 0%, {dark} 100%); color: #FFFFFF; }}\n\
             .accent {{ background: rgba(255, 255, 255, 0.7); }}",
            dark = shade(brand, 0.45)
        ),
    }
}

/// Build the HTML document for slide `index` (0-based) of `total`.
pub fn slide_html(
    slide: &Slide,
    index: usize,
    total: usize,
    theme: &Theme,
    background_url: Option<&str>,
) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>\n\
         * {{ margin: 0; padding: 0; box-sizing: border-box; }}\n\
         body {{ width: {SLIDE_SIZE}px; height: {SLIDE_SIZE}px; }}\n\
         .slide {{ position: relative; width: {SLIDE_SIZE}px; height: {SLIDE_SIZE}px; padding: 96px; \
                   display: flex; flex-direction: column; justify-content: center; \
                   font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif; \
                   background-size: cover; background-position: center; }}\n\
         .accent {{ width: 120px; height: 12px; border-radius: 6px; margin-bottom: 48px; }}\n\
         h1 {{ font-size: 80px; line-height: 1.1; font-weight: 800; }}\n\
         p {{ margin-top: 40px; font-size: 40px; line-height: 1.4; }}\n\
         .counter {{ position: absolute; right: 72px; bottom: 64px; font-size: 32px; font-weight: 600; opacity: 0.8; }}\n\
         .overlay {{ position: absolute; inset: 0; background: rgba(0, 0, 0, 0.45); }}\n\
         .content {{ position: relative; }}\n\
         {}\n\
         </style></head><body>",
        theme_css(theme)
    );

    match background_url {
        Some(url) => {
            let _ = write!(
                html,
                "<div class=\"slide\" style=\"background-image: url('{}'); color: #FFFFFF;\"><div class=\"overlay\"></div>",
                escape_html(&css_url(url))
            );
        }
        None => html.push_str("<div class=\"slide\">"),
    }

    let _ = write!(
        html,
        "<div class=\"content\"><div class=\"accent\"></div><h1>{}</h1>",
        escape_html(&slide.title)
    );
    if !slide.body.trim().is_empty() {
        let _ = write!(html, "<p>{}</p>", escape_html(&slide.body));
    }
    let _ = write!(
        html,
        "</div><div class=\"counter\">{}/{}</div></div></body></html>",
        index + 1,
        total
    );
    html
}

/// Wrap a slide document into a rasteriser request.
pub fn render_request(html: String) -> RenderRequest {
    RenderRequest {
        html,
        css: None,
        viewport_width: SLIDE_SIZE,
        viewport_height: SLIDE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(title: &str, body: &str) -> Slide {
        Slide {
            title: title.into(),
            body: body.into(),
        }
    }

    #[test]
    fn escapes_markup_in_text() {
        let html = slide_html(&slide("<script>alert(1)</script>", "A & B"), 0, 1, &Theme::default(), None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn shows_counter_and_fixed_viewport() {
        let html = slide_html(&slide("Hook", ""), 2, 5, &Theme::default(), None);
        assert!(html.contains(">3/5<"));
        assert!(html.contains("width: 1080px; height: 1080px;"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn templates_use_brand_color() {
        let bold = Theme {
            template: CarouselTemplate::Bold,
            brand_color: "#FF0000".into(),
        };
        assert!(slide_html(&slide("x", ""), 0, 1, &bold, None).contains("background: #FF0000;"));

        let gradient = Theme {
            template: CarouselTemplate::Gradient,
            brand_color: "#FF0000".into(),
        };
        assert!(slide_html(&slide("x", ""), 0, 1, &gradient, None)
            .contains("linear-gradient(135deg, #FF0000 0%, #730000 100%)"));
    }

    #[test]
    fn background_url_cannot_break_out_of_css() {
        let html = slide_html(
            &slide("x", ""),
            0,
            1,
            &Theme::default(),
            Some("https://cdn.test/a.png'); color: red; x('"),
        );
        assert!(html.contains("url('https://cdn.test/a.png%27%29;color:red;x%28%27')"));
        assert!(html.contains("class=\"overlay\""));
    }

    #[test]
    fn shade_handles_bad_input() {
        assert_eq!(shade("#FFFFFF", 0.5), "#808080");
        assert_eq!(shade("red", 0.5), "red");
        assert_eq!(shade("#GG0000", 0.5), "#GG0000");
    }

    #[test]
    fn render_request_is_square() {
        let req = render_request("<p/>".into());
        assert_eq!((req.viewport_width, req.viewport_height), (1080, 1080));
    }
}
