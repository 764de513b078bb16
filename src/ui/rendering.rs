//! Card rendering for the demo canvas.
//!
//! Cards are painted back to front by scale so the focus card ends up on top.

use super::state::{CarouselApp, DemoCard};
use crate::constants::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

impl CarouselApp {
    /// Renders every card at the transform most recently applied by the carousel.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    pub fn render_cards(&self, painter: &egui::Painter) {
        let focus = self.carousel.as_ref().map(|c| c.focus_card());
        for card in self.cards.paint_order() {
            self.draw_card(painter, card, focus == Some(card.id));
        }
    }

    fn draw_card(&self, painter: &egui::Painter, card: &DemoCard, is_focus: bool) {
        let rect = self.cards.screen_rect(card);
        let scale = card.transform.scale;

        painter.rect_filled(rect, CARD_CORNER_RADIUS * scale, card.color);
        if is_focus {
            painter.rect_stroke(
                rect,
                CARD_CORNER_RADIUS * scale,
                egui::Stroke::new(FOCUS_STROKE_WIDTH, egui::Color32::WHITE),
                StrokeKind::Outside,
            );
        }

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("Card {}", card.id),
            egui::FontId::proportional(20.0 * scale),
            egui::Color32::from_gray(30),
        );
    }

    /// Draws the status line along the bottom of the canvas.
    pub fn render_status(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let text = match (&self.init_error, self.last_activated) {
            (Some(err), _) => err.clone(),
            (None, Some(card)) => format!("Activated card {card}"),
            (None, None) => "Drag to rotate, tap the centre card to activate it".to_owned(),
        };
        painter.text(
            egui::pos2(canvas_rect.center().x, canvas_rect.max.y - 12.0),
            egui::Align2::CENTER_BOTTOM,
            text,
            egui::FontId::proportional(14.0),
            egui::Color32::from_gray(200),
        );
    }
}
