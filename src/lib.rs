//! # Card Carousel
//!
//! An interactive carousel of cards arranged on a horizontal ring with one
//! card centred as the focus item. Dragging rotates the ring; tapping the
//! focus card activates it.
//!
//! The crate is split into host-independent logic and a demo host:
//! - **`CarouselModel`**: ring order, layout, smoothing and one-slot shifts
//! - **`GestureController`**: tap/swipe classification of pointer sessions
//! - **`CardCarousel`**: the embeddable widget running one frame at a time
//! - **Demo**: an eframe app implementing the rendering and hit-test collaborators
//!
//! ## Embedding
//! A host implements [`CardSink`] to receive per-card transforms and
//! [`CardHitTest`] to resolve screen points to cards, then calls
//! [`CardCarousel::frame`] once per rendered frame with that frame's
//! [`PointerEvent`]s.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod carousel;
mod gesture;
mod types;
mod ui;
mod widget;

// Re-export public types and functions
pub use carousel::*;
pub use gesture::*;
pub use types::*;
pub use ui::{CarouselApp, DemoCard, DemoCards};
pub use widget::*;

/// Reads and parses a JSON configuration file.
///
/// # Errors
///
/// Returns [`CarouselError::Io`] when the file cannot be read and
/// [`CarouselError::Config`] when it is not a valid configuration document.
pub fn read_config(path: impl AsRef<std::path::Path>) -> Result<CarouselConfig> {
    let json = std::fs::read_to_string(path)?;
    CarouselConfig::from_json(&json)
}

/// Loads the demo configuration.
///
/// Reads the JSON file named by the `CARD_CAROUSEL_CONFIG` environment
/// variable when set; otherwise, or if the file cannot be used, returns the
/// defaults.
pub fn load_config() -> CarouselConfig {
    let Ok(path) = std::env::var(constants::CONFIG_ENV_VAR) else {
        return CarouselConfig::default();
    };
    match read_config(&path) {
        Ok(config) => {
            log::info!("loaded carousel config from {path}");
            config
        }
        Err(err) => {
            log::warn!("ignoring carousel config {path}: {err}");
            CarouselConfig::default()
        }
    }
}

/// Runs the carousel demo with the configuration from [`load_config`].
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use card_carousel::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> std::result::Result<(), eframe::Error> {
    let config = load_config();
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Card Carousel",
        options,
        Box::new(|_cc| Ok(Box::new(CarouselApp::new(config)))),
    )
}
