//! Table-of-contents sidebar for generated books.
//!
//! The book pages load this crate as wasm; on start it renders the chapter
//! list into the page's sidebar host, highlights the current chapter and keeps
//! the sidebar's scroll position across page loads.

pub mod components;
pub mod config;
pub mod error;
pub mod links;
pub mod models;
pub mod mount;
pub mod state;
pub mod storage;
pub mod toc;

pub use config::{FoldConfig, SidebarConfig};
pub use error::{SidebarError, SidebarErrorKind, SidebarResult};
pub use models::{Chapter, SectionNumber, TocItem};
pub use mount::{find_host, mount};
pub use state::SidebarState;

use leptos::logging::warn;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

/// Mount the sidebar into the page's host element, if there is one.
pub fn bootstrap() {
    match find_host() {
        Ok(host) => mount(host, SidebarConfig::from_window()),
        Err(e) => warn!("sidebar: {e}"),
    }
}


// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    bootstrap();
}
