//! Body Vocab core crate.
//!
//! Shared engine behind the body-part vocabulary games: the word bank, the
//! placement board used by the drag-and-drop, label-the-body and
//! build-the-body games, the connector overlay that ties labels to the
//! illustration, and transient feedback. Game pages mount a [`web::LabelGame`]
//! per placement section and a [`web::ClickQuiz`] per quiz; everything
//! outside `web` is plain Rust and runs natively.

use wasm_bindgen::prelude::*;

pub mod anchor;
pub mod board;
pub mod drag;
pub mod feedback;
pub mod quiz;
pub mod session;
pub mod shuffle;
pub mod timers;
pub mod web;
pub mod words;

pub use board::{ConfigError, DisplayPosition, Outcome, PairConfig, PlacementBoard};
pub use words::{BODY_PARTS, BUILD_PARTS, LookupError, VocabularyEntry, WordBank};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (several modules on one page) only returns an error.
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("body-vocab: {} words loaded", BODY_PARTS.len());
}
