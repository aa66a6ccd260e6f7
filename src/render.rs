//! HTML rendering for the gallery component and the page around it.
//!
//! Rendering is a pure function of the gallery, the viewer state, and the
//! page scroll lock:
//!
//! ```text
//! Closed      →  hero tile + secondary grid + "view all" button
//! Open(i)     →  the same, plus the lightbox overlay showing image i
//! lock held   →  <body class="scroll-locked">
//! ```
//!
//! ## Links Instead of Scripts
//!
//! The built site has no JavaScript. Every viewer state is its own URL:
//! `Closed` is `/`, `Open(i)` is `/gallery/{i + 1}.html`. Grid tiles link to
//! the open states, and the lightbox's previous/next controls link to the
//! states the viewer transitions would produce, so wrap-around shows up
//! directly in the markup.
//!
//! ## Animation
//!
//! [`Transition`] carries the cosmetic timings. It only produces CSS custom
//! properties and `data-*` attributes; nothing in the viewer state depends on
//! it.

use crate::config::{AnimationConfig, SiteInfo};
use crate::gallery::{Gallery, ImageRecord, ViewerState};
use crate::scroll_lock::PageScrollLock;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// URL of the closed gallery (the site root).
pub const CLOSED_HREF: &str = "/";

/// URL of the lightbox page showing image `index` (0-based).
pub fn lightbox_href(index: usize) -> String {
    format!("/gallery/{}.html", index + 1)
}

/// Enter/exit and hover animation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub enter_ms: u32,
    pub exit_ms: u32,
    pub hover_scale: f64,
}

impl Default for Transition {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

impl From<&AnimationConfig> for Transition {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            enter_ms: config.enter_ms,
            exit_ms: config.exit_ms,
            hover_scale: config.hover_scale,
        }
    }
}

impl Transition {
    /// A transition that renders instantly.
    pub fn none() -> Self {
        Self {
            enter_ms: 0,
            exit_ms: 0,
            hover_scale: 1.0,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            r#":root {{
    --lightbox-enter: {}ms;
    --lightbox-exit: {}ms;
    --tile-hover-scale: {};
}}"#,
            self.enter_ms, self.exit_ms, self.hover_scale
        )
    }
}

// ============================================================================
// Gallery component
// ============================================================================

/// Renders one grid or hero tile linking to its lightbox state.
fn render_tile(image: &ImageRecord, index: usize, class: &str, loading: &str) -> Markup {
    html! {
        a class=(class) href=(lightbox_href(index)) data-index=(index) {
            img src=(image.url) alt=(image.title) loading=(loading);
            span.tile-caption {
                span.tile-category { (image.category) }
                span.tile-title { (image.title) }
            }
        }
    }
}

/// Renders the gallery section: hero, secondary grid, call to action, and
/// the lightbox when `state` is open.
pub fn render_gallery_section(
    gallery: &Gallery,
    state: ViewerState,
    transition: &Transition,
) -> Markup {
    html! {
        section.gallery id="gallery" {
            (render_tile(gallery.hero(), 0, "hero-tile", "eager"))
            div.secondary-grid {
                @for (offset, image) in gallery.secondary().iter().enumerate() {
                    (render_tile(image, offset + 1, "grid-tile", "lazy"))
                }
            }
            a.view-all href=(lightbox_href(0)) {
                "View all " (gallery.len()) " photos"
            }
            @if let ViewerState::Open(index) = state {
                (render_lightbox(gallery, index, transition))
            }
        }
    }
}

/// Renders the lightbox overlay for image `index`.
///
/// Renders nothing for an index outside the gallery.
pub fn render_lightbox(gallery: &Gallery, index: usize, transition: &Transition) -> Markup {
    let Some(image) = gallery.get(index) else {
        return html! {};
    };
    let state = ViewerState::Open(index);
    let prev = state.previous(gallery.len()).index().unwrap_or(index);
    let next = state.next(gallery.len()).index().unwrap_or(index);

    html! {
        div.lightbox
            role="dialog"
            aria-modal="true"
            aria-label=(image.title)
            data-enter-ms=(transition.enter_ms)
            data-exit-ms=(transition.exit_ms)
        {
            a.lightbox-backdrop href=(CLOSED_HREF) aria-label="Close gallery" {}
            a.lightbox-close href=(CLOSED_HREF) aria-label="Close gallery" { "×" }
            a.lightbox-prev href=(lightbox_href(prev)) rel="prev" aria-label="Previous image" { "‹" }
            figure.lightbox-frame {
                img src=(image.url) alt=(image.title);
                figcaption {
                    span.lightbox-title { (image.title) }
                    span.lightbox-category { (image.category) }
                }
            }
            a.lightbox-next href=(lightbox_href(next)) rel="next" aria-label="Next image" { "›" }
            p.lightbox-counter { (index + 1) " / " (gallery.len()) }
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn markdown_to_html(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

/// Renders the full page for one viewer state.
///
/// The body is marked `scroll-locked` while `lock` is held.
pub fn render_page(
    site: &SiteInfo,
    gallery: &Gallery,
    state: ViewerState,
    lock: &PageScrollLock,
    transition: &Transition,
    css: &str,
) -> Markup {
    let title = match state.index().and_then(|i| gallery.get(i)) {
        Some(image) => format!("{} - {}", image.title, site.title),
        None => site.title.clone(),
    };
    let body_class = lock.is_locked().then_some("scroll-locked");

    let content = html! {
        header.site-header {
            h1 { a href=(CLOSED_HREF) { (site.title) } }
            p.tagline { (site.tagline) }
        }
        main {
            (render_gallery_section(gallery, state, transition))
            article.description {
                (PreEscaped(markdown_to_html(&site.description)))
            }
        }
        footer.site-footer {
            a href={ "mailto:" (site.contact_email) } { (site.contact_email) }
        }
    };

    base_document(&title, css, body_class, content)
}

// ============================================================================
// Tests
// ============================================================================
