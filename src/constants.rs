//! Shared carousel constants.
//! Centralizes tweakable values used by the layout, gesture and demo code.

// Configuration defaults
/// Default gap between cards as a fraction of the card width.
pub const DEFAULT_GAP_FRACTION: f32 = 0.2;
/// Default minimum scale applied to cards away from the focus slot.
pub const DEFAULT_SCALE_OCCLUSION: f32 = 0.8;
/// Default normalized drag distance (fraction of screen width) that triggers a shift.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 0.25;

// Configuration ranges
/// Allowed range for the gap fraction.
pub const GAP_FRACTION_RANGE: (f32, f32) = (0.0, 1.0);
/// Allowed range for the occlusion scale.
pub const SCALE_OCCLUSION_RANGE: (f32, f32) = (0.5, 1.0);
/// Allowed range for the drag threshold.
pub const DRAG_THRESHOLD_RANGE: (f32, f32) = (0.05, 0.5);

// Gesture classification
/// Cumulative drag, in card pitches, below which a release counts as a tap.
pub const TAP_THRESHOLD: f32 = 0.1;

// Motion
/// Exponential catch-up rate (per second) used when easing cards toward their slots.
pub const SMOOTHING_RATE: f32 = 10.0;

// Demo rendering
/// Card width in logical pixels used by the demo host.
pub const DEMO_CARD_WIDTH: f32 = 160.0;
/// Card height in logical pixels used by the demo host.
pub const DEMO_CARD_HEIGHT: f32 = 220.0;
/// Number of cards shown by the demo host when no config is supplied.
pub const DEMO_CARD_COUNT: usize = 7;
/// Corner radius for card rectangles (in screen pixels).
pub const CARD_CORNER_RADIUS: f32 = 12.0;
/// Stroke width for the focus card outline (in screen pixels).
pub const FOCUS_STROKE_WIDTH: f32 = 2.0;
/// Environment variable naming an optional JSON config file for the demo.
pub const CONFIG_ENV_VAR: &str = "CARD_CAROUSEL_CONFIG";
