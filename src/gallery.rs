//! Gallery data and the lightbox viewer state machine.
//!
//! A [`Gallery`] is a fixed, ordered, non-empty list of captioned images.
//! Order carries layout meaning:
//!
//! ```text
//! position 0      hero tile (rendered large)
//! positions 1..=4 secondary grid (fewer cells when the gallery is short)
//! every position  reachable through the lightbox
//! ```
//!
//! ## Viewer State Machine
//!
//! ```text
//!            open(i)
//! Closed ─────────────▶ Open(i)
//!   ▲                   │  │  │
//!   └────── close ──────┘  │  └─ previous ─▶ Open((i - 1 + n) mod n)
//!                          └──── next ─────▶ Open((i + 1) mod n)
//! ```
//!
//! Navigation wraps around and never errors at either end. The viewer holds
//! the page scroll lock for as long as it is open: [`GalleryViewer::open`]
//! acquires it, [`GalleryViewer::close`] always releases it, and dropping a
//! viewer that is still open releases it too.
//!
//! ## Out-of-Range Input
//!
//! The viewer never fails. `next` and `previous` while closed are no-ops, and
//! `open` clamps an index past the end to the last image.

use crate::scroll_lock::ScrollLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GalleryError {
    #[error("a gallery needs at least one image")]
    Empty,
}

/// Number of images shown in the secondary grid below the hero.
pub const SECONDARY_GRID_CELLS: usize = 4;

/// One captioned image. The URL is opaque: it is only ever handed to the
/// browser as an `src`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRecord {
    pub url: String,
    pub title: String,
    pub category: String,
}

impl ImageRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            category: category.into(),
        }
    }
}

/// Ordered, non-empty image collection.
///
/// Deserializes from a list of images, so `[[images]]` in `config.toml`
/// is rejected when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ImageRecord>", into = "Vec<ImageRecord>")]
pub struct Gallery {
    images: Vec<ImageRecord>,
}

impl Gallery {
    pub fn new(images: Vec<ImageRecord>) -> Result<Self, GalleryError> {
        if images.is_empty() {
            return Err(GalleryError::Empty);
        }
        Ok(Self { images })
    }

    /// Always at least 1.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Never true; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    pub fn hero(&self) -> &ImageRecord {
        &self.images[0]
    }

    /// Images for the secondary grid: positions `1..=4`, or fewer when the
    /// gallery is short. Empty for a one-image gallery.
    pub fn secondary(&self) -> &[ImageRecord] {
        let end = self.images.len().min(1 + SECONDARY_GRID_CELLS);
        &self.images[1..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.images.iter()
    }
}

impl TryFrom<Vec<ImageRecord>> for Gallery {
    type Error = GalleryError;

    fn try_from(images: Vec<ImageRecord>) -> Result<Self, Self::Error> {
        Self::new(images)
    }
}

impl From<Gallery> for Vec<ImageRecord> {
    fn from(gallery: Gallery) -> Self {
        gallery.images
    }
}

/// The villa's stock gallery, in display order.
pub fn sample_gallery() -> Gallery {
    let images = vec![
        ImageRecord::new("/images/villa-exterior.jpg", "Villa Exterior", "Exterior"),
        ImageRecord::new("/images/living-room.jpg", "Living Room", "Interior"),
        ImageRecord::new("/images/private-pool.jpg", "Private Pool", "Amenities"),
        ImageRecord::new("/images/master-bedroom.jpg", "Master Bedroom", "Bedrooms"),
        ImageRecord::new("/images/kitchen.jpg", "Kitchen", "Interior"),
        ImageRecord::new("/images/dining-area.jpg", "Dining Area", "Interior"),
        ImageRecord::new("/images/bathroom.jpg", "Bathroom", "Bathrooms"),
        ImageRecord::new("/images/garden-view.jpg", "Garden View", "Exterior"),
    ];
    Gallery { images }
}

/// Lightbox state: closed, or open at an index into the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(usize),
}

impl ViewerState {
    pub fn is_open(self) -> bool {
        matches!(self, ViewerState::Open(_))
    }

    pub fn index(self) -> Option<usize> {
        match self {
            ViewerState::Open(i) => Some(i),
            ViewerState::Closed => None,
        }
    }

    /// The state after a "next" action in a gallery of `len` images.
    ///
    /// An open index must be below `len`.
    pub fn next(self, len: usize) -> Self {
        match self {
            ViewerState::Open(i) => {
                debug_assert!(i < len, "index {i} out of range for {len} images");
                ViewerState::Open((i + 1) % len)
            }
            ViewerState::Closed => ViewerState::Closed,
        }
    }

    /// The state after a "previous" action in a gallery of `len` images.
    ///
    /// An open index must be below `len`.
    pub fn previous(self, len: usize) -> Self {
        match self {
            ViewerState::Open(i) => {
                debug_assert!(i < len, "index {i} out of range for {len} images");
                if i == 0 {
                    ViewerState::Open(len - 1)
                } else {
                    ViewerState::Open(i - 1)
                }
            }
            ViewerState::Closed => ViewerState::Closed,
        }
    }
}

/// A mounted gallery component: the gallery it shows, its lightbox state,
/// and the scroll lock it holds while open.
#[derive(Debug)]
pub struct GalleryViewer<'g, L: ScrollLock> {
    gallery: &'g Gallery,
    state: ViewerState,
    lock: L,
}

impl<'g, L: ScrollLock> GalleryViewer<'g, L> {
    /// Mount a viewer. Starts closed.
    pub fn new(gallery: &'g Gallery, lock: L) -> Self {
        Self {
            gallery,
            state: ViewerState::Closed,
            lock,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    /// The image currently shown in the lightbox, if open.
    pub fn current(&self) -> Option<&'g ImageRecord> {
        self.state.index().and_then(|i| self.gallery.get(i))
    }

    pub fn open(&mut self, index: usize) {
        let index = index.min(self.gallery.len() - 1);
        self.state = ViewerState::Open(index);
        self.lock.lock_scroll();
    }

    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
        self.lock.unlock_scroll();
    }

    pub fn next(&mut self) {
        self.state = self.state.next(self.gallery.len());
    }

    pub fn previous(&mut self) {
        self.state = self.state.previous(self.gallery.len());
    }
}

impl<L: ScrollLock> Drop for GalleryViewer<'_, L> {
    fn drop(&mut self) {
        if self.state.is_open() {
            self.lock.unlock_scroll();
        }
    }
}
