//! CLI output formatting.
//!
//! Output is information-centric: every image leads with its positional index
//! and title, with layout role and category as indented context lines. The
//! same numbering is used by `check` and `build`, so the inventory printed
//! before a build matches the one printed after it.
//!
//! ## Check
//!
//! ```text
//! Gallery (8 photos)
//! 001 Villa Exterior
//!     Hero · Exterior
//! 002 Living Room
//!     Grid · Interior
//! ...
//! 006 Dining Area
//!     Lightbox only · Interior
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Villa Exterior → gallery/1.html
//! 002 Living Room → gallery/2.html
//! ...
//! Backend → backend.json (villa-altona-goa)
//!
//! Generated 1 page, 8 lightbox pages, 12 assets
//! ```
//!
//! Each `format_*` function returns lines for testability; `print_*` writes
//! them to stdout.

use crate::gallery::{Gallery, SECONDARY_GRID_CELLS};
use crate::generate::GeneratedSite;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Layout role of gallery position `index` (0-based).
fn role(index: usize) -> &'static str {
    match index {
        0 => "Hero",
        i if i <= SECONDARY_GRID_CELLS => "Grid",
        _ => "Lightbox only",
    }
}

/// Format the gallery inventory shown by `check`.
pub fn format_gallery_output(gallery: &Gallery) -> Vec<String> {
    let mut lines = vec![format!("Gallery ({})", plural(gallery.len(), "photo"))];
    for (i, image) in gallery.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.title));
        lines.push(format!("    {} · {}", role(i), image.category));
    }
    lines
}

pub fn print_gallery_output(gallery: &Gallery) {
    for line in format_gallery_output(gallery) {
        println!("{}", line);
    }
}

/// Format the summary of a `build` run.
pub fn format_generate_output(site: &GeneratedSite) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    for page in &site.lightbox_pages {
        lines.push(format!(
            "{} {} → {}",
            format_index(page.index + 1),
            page.title,
            page.path
        ));
    }
    lines.push(format!("Backend → backend.json ({})", site.backend_project));
    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {}, {}",
        plural(site.lightbox_pages.len(), "lightbox page"),
        plural(site.assets_copied, "asset")
    ));
    lines
}

pub fn print_generate_output(site: &GeneratedSite) {
    for line in format_generate_output(site) {
        println!("{}", line);
    }
}
