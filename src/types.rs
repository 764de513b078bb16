//! Core data types shared by the carousel model, the gesture controller and hosts.
//!
//! This module defines card identities and transforms, pointer input events,
//! the widget configuration and its error type, and the collaborator traits a
//! host implements to render cards and hit-test them.

use crate::constants::*;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a card: its index in `0..card_count`, fixed for the widget's lifetime.
pub type CardId = usize;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Errors raised while loading configuration or building a carousel.
///
/// Nothing in the per-frame path can fail.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// The carousel was asked to lay out zero cards, so there is no focus slot.
    #[error("carousel needs at least one card")]
    NoCards,
    /// A configuration value or measured bound cannot be used.
    #[error("invalid carousel configuration: {0}")]
    InvalidConfig(String),
    /// A JSON configuration document failed to parse.
    #[error("failed to parse carousel configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// A configuration file could not be read.
    #[error("failed to read carousel configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Position and uniform scale computed for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Card centre in world space
    pub position: Pos2,
    /// Uniform scale, 1.0 at the focus slot
    pub scale: f32,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            scale: 1.0,
        }
    }
}

/// Direction of a one-slot rotation of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// The last slot's card wraps around to the first slot
    Right,
    /// The first slot's card wraps around to the last slot
    Left,
}

impl ShiftDirection {
    /// Direction that follows a horizontal drag of the given signed length.
    pub fn from_drag(delta_x: f32) -> Self {
        if delta_x > 0.0 {
            ShiftDirection::Right
        } else {
            ShiftDirection::Left
        }
    }
}

/// Identifier of a pointer (mouse button or touch) reported by the host.
pub type PointerId = u64;

/// Phase of a pointer session sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Mouse button pressed or touch began
    Down,
    /// Pointer moved while pressed
    Move,
    /// Mouse button released or touch ended
    Up,
    /// The host aborted the session (touch cancelled, pointer left the window)
    Cancel,
}

/// A single pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Which pointer produced the sample
    pub pointer: PointerId,
    /// What happened
    pub kind: PointerEventKind,
    /// Screen position of the pointer at the time of the sample
    pub pos: Pos2,
}

impl PointerEvent {
    /// Creates a pointer-down sample.
    pub fn down(pointer: PointerId, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Down,
            pos,
        }
    }

    /// Creates a pointer-move sample.
    pub fn moved(pointer: PointerId, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Move,
            pos,
        }
    }

    /// Creates a pointer-up sample.
    pub fn up(pointer: PointerId, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Up,
            pos,
        }
    }

    /// Creates a cancel sample. The position is informational only.
    pub fn cancel(pointer: PointerId, pos: Pos2) -> Self {
        Self {
            pointer,
            kind: PointerEventKind::Cancel,
            pos,
        }
    }
}

/// Rendering collaborator: receives computed transforms and reports card bounds.
///
/// The sink must only apply the values it is given; card placement is owned by
/// the carousel model.
pub trait CardSink {
    /// Applies the transform computed for `card` this frame.
    fn set_card_transform(&mut self, card: CardId, transform: CardTransform);

    /// Unscaled width and height of `card`. Queried once during initialization.
    fn card_bounds(&self, card: CardId) -> Vec2;
}

/// Input collaborator: resolves a screen point to the card drawn under it.
pub trait CardHitTest {
    /// Returns the card under `screen_pos`, if any.
    fn card_at(&self, screen_pos: Pos2) -> Option<CardId>;
}

/// Widget configuration, fixed at construction.
///
/// Missing fields take their defaults when deserialized, so partial JSON
/// documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Number of cards in the ring
    pub card_count: usize,
    /// Gap between cards as a fraction of the card width, in `[0, 1]`
    pub gap_fraction: f32,
    /// Minimum scale for cards away from focus, in `[0.5, 1]`
    pub scale_occlusion: f32,
    /// Normalized drag distance that triggers a shift, in `[0.05, 0.5]`
    pub drag_threshold: f32,
    /// World y-coordinate of the resting row
    pub carousel_height: f32,
    /// Card placed in the focus slot at startup
    pub initial_focus_index: CardId,
    /// Viewport width in screen units, used to normalize drag distances
    pub screen_width: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_count: DEMO_CARD_COUNT,
            gap_fraction: DEFAULT_GAP_FRACTION,
            scale_occlusion: DEFAULT_SCALE_OCCLUSION,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            carousel_height: 0.0,
            initial_focus_index: 0,
            screen_width: 1280.0,
        }
    }
}

impl CarouselConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// The result is not validated; call [`CarouselConfig::validated`] before use.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the configuration and clamps tunables into their documented ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoCards`] when `card_count` is zero, and
    /// [`CarouselError::InvalidConfig`] when a value is not finite or the
    /// screen width is not positive.
    pub fn validated(mut self) -> Result<Self> {
        if self.card_count == 0 {
            return Err(CarouselError::NoCards);
        }
        let fields = [
            ("gap_fraction", self.gap_fraction),
            ("scale_occlusion", self.scale_occlusion),
            ("drag_threshold", self.drag_threshold),
            ("carousel_height", self.carousel_height),
            ("screen_width", self.screen_width),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CarouselError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.screen_width <= 0.0 {
            return Err(CarouselError::InvalidConfig(format!(
                "screen_width must be positive, got {}",
                self.screen_width
            )));
        }

        self.gap_fraction = clamp_logged("gap_fraction", self.gap_fraction, GAP_FRACTION_RANGE);
        self.scale_occlusion =
            clamp_logged("scale_occlusion", self.scale_occlusion, SCALE_OCCLUSION_RANGE);
        self.drag_threshold =
            clamp_logged("drag_threshold", self.drag_threshold, DRAG_THRESHOLD_RANGE);

        if self.initial_focus_index >= self.card_count {
            log::warn!(
                "initial_focus_index {} out of range for {} cards, wrapping",
                self.initial_focus_index,
                self.card_count
            );
            self.initial_focus_index %= self.card_count;
        }
        Ok(self)
    }
}

fn clamp_logged(name: &str, value: f32, (min, max): (f32, f32)) -> f32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{name} {value} outside [{min}, {max}], clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CarouselConfig::default().validated().unwrap();
        assert_eq!(config.gap_fraction, 0.2);
        assert_eq!(config.scale_occlusion, 0.8);
        assert_eq!(config.drag_threshold, 0.25);
        assert_eq!(config.initial_focus_index, 0);
    }

    #[test]
    fn test_zero_cards_rejected() {
        let config = CarouselConfig {
            card_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validated(), Err(CarouselError::NoCards)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = CarouselConfig {
            gap_fraction: 1.5,
            scale_occlusion: 0.1,
            drag_threshold: 0.9,
            initial_focus_index: 9,
            card_count: 4,
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.gap_fraction, 1.0);
        assert_eq!(config.scale_occlusion, 0.5);
        assert_eq!(config.drag_threshold, 0.5);
        assert_eq!(config.initial_focus_index, 1);
    }

    #[test]
    fn test_non_finite_and_bad_width_rejected() {
        let nan = CarouselConfig {
            scale_occlusion: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validated(), Err(CarouselError::InvalidConfig(_))));

        let narrow = CarouselConfig {
            screen_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(narrow.validated(), Err(CarouselError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CarouselConfig::from_json(r#"{ "card_count": 3, "drag_threshold": 0.3 }"#)
            .unwrap();
        assert_eq!(config.card_count, 3);
        assert_eq!(config.drag_threshold, 0.3);
        assert_eq!(config.gap_fraction, DEFAULT_GAP_FRACTION);

        assert!(matches!(
            CarouselConfig::from_json("{ not json"),
            Err(CarouselError::Config(_))
        ));
    }

    #[test]
    fn test_shift_direction_from_drag() {
        assert_eq!(ShiftDirection::from_drag(12.0), ShiftDirection::Right);
        assert_eq!(ShiftDirection::from_drag(-3.0), ShiftDirection::Left);
    }
}
