//! # Altona Site
//!
//! The marketing site for Villa Altona Goa: a photo gallery with a lightbox,
//! a static file server for the built pages, and the client configuration
//! for the managed backend project the site shares a repository with.
//!
//! # Architecture
//!
//! ```text
//! site/config.toml ─┐
//! site/assets/     ─┼─▶ generate ─▶ dist/ ─▶ server (axum)
//! stock gallery    ─┘      │
//!                          └─ drives GalleryViewer through every state
//! ```
//!
//! The gallery viewer is a two-state machine (`Closed`, `Open(i)`) with
//! wrap-around navigation. Each state renders to its own URL, so the
//! published site browses the lightbox with plain links.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Image records, the gallery, and the lightbox viewer state machine |
//! | [`scroll_lock`] | The page scroll-lock collaborator the viewer holds while open |
//! | [`render`] | Maud templates for the gallery section, lightbox, and page |
//! | [`generate`] | Writes the site: index, one page per lightbox state, assets, backend config |
//! | [`server`] | Static file server with health check and entry-document fallback |
//! | [`backend`] | Managed backend project identity and endpoint handles |
//! | [`config`] | Layered `config.toml` loading, validation, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Scroll Lock as an Injected Resource
//!
//! The page scroll flag is global to the page, but the viewer receives it as
//! a [`scroll_lock::ScrollLock`] value rather than reaching for it. Opening
//! acquires, closing always releases, and dropping an open viewer releases.
//! Tests substitute a recording lock.
//!
//! ## Forgiving Navigation
//!
//! `next` and `previous` on a closed viewer do nothing, and `open` clamps an
//! index past the end to the last image. No viewer operation can fail.

pub mod backend;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod output;
pub mod render;
pub mod scroll_lock;
pub mod server;

#[cfg(test)]
pub(crate) mod test_helpers;
