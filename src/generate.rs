//! Static site generation.
//!
//! Renders every state of the gallery viewer to its own HTML file, so the
//! published site needs no JavaScript to browse the lightbox.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # Closed: hero, grid, call to action
//! ├── gallery/
//! │   ├── 1.html          # Open(0), lightbox over the page
//! │   ├── 2.html          # Open(1)
//! │   └── ...
//! ├── backend.json        # Public client config for the managed backend
//! └── images/ ...         # Copied from site/assets/
//! ```
//!
//! The lightbox pages are produced by driving one [`GalleryViewer`] through
//! `open(0)` and `next()` until it wraps, rendering after every step. The
//! page scroll lock it holds is what marks those pages `scroll-locked`.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the
//! color and animation custom properties generated from config.

use crate::backend::{Backend, BackendError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::gallery::GalleryViewer;
use crate::render::{self, Transition};
use crate::scroll_lock::PageScrollLock;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Name of the static asset directory inside the site source.
pub const ASSETS_DIR: &str = "assets";

/// One rendered lightbox page.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxPage {
    /// 0-based gallery position.
    pub index: usize,
    pub title: String,
    /// Path relative to the output dir, e.g. `gallery/3.html`.
    pub path: String,
}

/// What a generate run wrote.
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub hero_title: String,
    pub grid_titles: Vec<String>,
    pub lightbox_pages: Vec<LightboxPage>,
    pub assets_copied: usize,
    pub backend_project: String,
}

/// Load config from `source_dir` and generate the site into `output_dir`.
pub fn build(source_dir: &Path, output_dir: &Path) -> Result<GeneratedSite, GenerateError> {
    let config = config::load_config(source_dir)?;
    generate(&config, source_dir, output_dir)
}

pub fn generate(
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GeneratedSite, GenerateError> {
    let gallery = config.gallery();
    let backend = Backend::initialize(&config.backend)?;
    let transition = Transition::from(&config.animation);

    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        transition.to_css(),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir.join("gallery"))?;

    let assets_copied = copy_assets(&source_dir.join(ASSETS_DIR), output_dir)?;
    debug!("copied {assets_copied} asset files");

    let page = PageScrollLock::new();
    let mut viewer = GalleryViewer::new(&gallery, page.clone());

    let index_html = render::render_page(
        &config.site,
        &gallery,
        viewer.state(),
        &page,
        &transition,
        &css,
    );
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    info!("Generated index.html");

    let mut lightbox_pages = Vec::with_capacity(gallery.len());
    viewer.open(0);
    for _ in 0..gallery.len() {
        let Some(index) = viewer.state().index() else {
            break;
        };
        let html = render::render_page(
            &config.site,
            &gallery,
            viewer.state(),
            &page,
            &transition,
            &css,
        );
        let path = format!("gallery/{}.html", index + 1);
        fs::write(output_dir.join(&path), html.into_string())?;
        debug!("Generated {path}");

        lightbox_pages.push(LightboxPage {
            index,
            title: viewer.current().map(|i| i.title.clone()).unwrap_or_default(),
            path,
        });
        viewer.next();
    }
    viewer.close();
    info!("Generated {} lightbox pages", lightbox_pages.len());

    let backend_json = serde_json::to_string_pretty(backend.client_config())?;
    fs::write(output_dir.join("backend.json"), backend_json)?;

    info!("Site generated at {}", output_dir.display());

    Ok(GeneratedSite {
        hero_title: gallery.hero().title.clone(),
        grid_titles: gallery.secondary().iter().map(|i| i.title.clone()).collect(),
        lightbox_pages,
        assets_copied,
        backend_project: backend.project_id().to_string(),
    })
}

/// Copy everything under `src` into `dst`, preserving layout.
///
/// A missing asset directory is not an error.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
