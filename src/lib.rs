//! Atelier - image gallery viewer
//!
//! Browse generated images in a grid, enlarge them with pan and zoom, copy
//! their prompts and download them. Runs natively and in the browser.

mod album;
pub mod config;
mod constants;
pub mod gallery;
pub mod model;
pub mod snapshot;

pub use album::{Album, AlbumMessage};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use gallery::{GalleryPage, SortOrder, TypeCounts, TypeFilter};
pub use model::{GalleryEntry, GalleryError, parse_gallery};

#[cfg(not(target_arch = "wasm32"))]
pub mod local_download;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
#[cfg(target_arch = "wasm32")]
pub use web::WebGallery;
