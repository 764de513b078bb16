//! Canvas coordinate mapping and pointer input translation.
//!
//! This module converts between screen and world coordinates for the demo
//! canvas and turns egui's raw pointer events into device-neutral
//! [`PointerEvent`]s for the carousel.

use super::state::{CarouselApp, DemoCards, PIXELS_PER_UNIT};
use crate::types::*;
use eframe::egui;

/// Pointer id used for the mouse (touches arrive from egui as pointer events too).
pub const PRIMARY_POINTER: PointerId = 0;

impl DemoCards {
    /// Converts screen coordinates to world coordinates.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Position in screen space (pixels)
    ///
    /// # Returns
    ///
    /// The corresponding position in world space
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        egui::Pos2::ZERO + (screen_pos - self.origin) / PIXELS_PER_UNIT
    }

    /// Converts world coordinates to screen coordinates.
    ///
    /// # Arguments
    ///
    /// * `world_pos` - Position in world space
    ///
    /// # Returns
    ///
    /// The corresponding position in screen space (pixels)
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.origin + world_pos.to_vec2() * PIXELS_PER_UNIT
    }
}

/// Translates this frame's primary-button pointer events into carousel samples.
///
/// Presses only count when they land on the canvas; moves and releases are
/// forwarded wherever they happen so a drag can leave the canvas.
pub fn collect_pointer_events(
    input: &egui::InputState,
    canvas_rect: egui::Rect,
) -> Vec<PointerEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } if canvas_rect.contains(*pos) => Some(PointerEvent::down(PRIMARY_POINTER, *pos)),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } => Some(PointerEvent::up(PRIMARY_POINTER, *pos)),
            egui::Event::PointerMoved(pos) => Some(PointerEvent::moved(PRIMARY_POINTER, *pos)),
            egui::Event::PointerGone => {
                Some(PointerEvent::cancel(PRIMARY_POINTER, canvas_rect.center()))
            }
            _ => None,
        })
        .collect()
}

impl CarouselApp {
    /// Runs one carousel frame on the canvas: input first, then geometry.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn handle_carousel_input(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) {
        self.cards.origin = canvas_rect.center();
        self.ensure_carousel(canvas_rect.width());

        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let (events, dt) = ui.input(|i| (collect_pointer_events(i, canvas_rect), i.stable_dt));
        carousel.frame(&events, dt, &mut self.cards);

        if carousel.gesture().is_dragging() || !carousel.model().is_at_rest(1e-3) {
            ui.ctx().request_repaint();
        }
    }
}
