//! Shared test utilities.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let gallery = gallery_of(3);
//! let mut lock = RecordingLock::default();
//! let mut viewer = GalleryViewer::new(&gallery, &mut lock);
//!
//! let site = setup_site(); // temp dir with config.toml + assets/
//! ```

use std::fs;
use tempfile::TempDir;

use crate::gallery::{Gallery, ImageRecord};
use crate::scroll_lock::ScrollLock;

// =========================================================================
// Galleries
// =========================================================================

/// A gallery of `n` images titled `Image 1` .. `Image n`. Panics on `n == 0`.
pub fn gallery_of(n: usize) -> Gallery {
    let images = (1..=n)
        .map(|i| ImageRecord::new(format!("/img/{i}.jpg"), format!("Image {i}"), "Test"))
        .collect();
    Gallery::new(images).expect("gallery_of needs n >= 1")
}

// =========================================================================
// Scroll lock
// =========================================================================

/// Scroll lock that counts calls instead of touching a page.
#[derive(Debug, Default)]
pub struct RecordingLock {
    pub locks: usize,
    pub unlocks: usize,
}

impl ScrollLock for RecordingLock {
    fn lock_scroll(&mut self) {
        self.locks += 1;
    }

    fn unlock_scroll(&mut self) {
        self.unlocks += 1;
    }
}

// =========================================================================
// Site fixture
// =========================================================================

/// A site source dir with a three-image gallery and a small asset tree:
///
/// ```text
/// config.toml
/// assets/favicon.ico
/// assets/images/pool.jpg
/// assets/images/rooms/bedroom.jpg
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        r##"
[site]
title = "Villa Fixture"

[[images]]
url = "/images/pool.jpg"
title = "Pool at Dusk"
category = "Amenities"

[[images]]
url = "/images/rooms/bedroom.jpg"
title = "Main Bedroom"
category = "Bedrooms"

[[images]]
url = "/images/veranda.jpg"
title = "Veranda"
category = "Exterior"
"##,
    )
    .unwrap();

    let assets = tmp.path().join("assets");
    fs::create_dir_all(assets.join("images/rooms")).unwrap();
    fs::write(assets.join("favicon.ico"), b"ico").unwrap();
    fs::write(assets.join("images/pool.jpg"), b"jpg").unwrap();
    fs::write(assets.join("images/rooms/bedroom.jpg"), b"jpg").unwrap();
    tmp
}
