//! Host page scroll lock.
//!
//! While the lightbox overlay is shown, the page behind it must not scroll.
//! The page owns exactly one scroll-lock flag; every component that wants to
//! suspend scrolling talks to it through the [`ScrollLock`] trait, which is
//! injected into [`GalleryViewer`](crate::gallery::GalleryViewer) rather than
//! reached through a global.
//!
//! Semantics of the shared flag:
//!
//! - last writer wins: a lock after a lock is still one lock
//! - unlock always clears, whether or not a lock was held
//!
//! The gallery core is single-threaded, so [`PageScrollLock`] shares its flag
//! through `Rc<Cell<bool>>`. Clones are handles to the same page.

use std::cell::Cell;
use std::rc::Rc;

/// Two-method collaborator for suspending and restoring page scrolling.
pub trait ScrollLock {
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
}

impl<L: ScrollLock + ?Sized> ScrollLock for &mut L {
    fn lock_scroll(&mut self) {
        (**self).lock_scroll();
    }

    fn unlock_scroll(&mut self) {
        (**self).unlock_scroll();
    }
}

/// Handle to the page-global scroll-lock flag.
///
/// The renderer reads [`is_locked`](Self::is_locked) to decide whether the
/// document body gets the `scroll-locked` class.
#[derive(Debug, Clone, Default)]
pub struct PageScrollLock {
    locked: Rc<Cell<bool>>,
}

impl PageScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

impl ScrollLock for PageScrollLock {
    fn lock_scroll(&mut self) {
        self.locked.set(true);
    }

    fn unlock_scroll(&mut self) {
        self.locked.set(false);
    }
}
