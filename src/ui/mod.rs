//! Demo host for the card carousel.
//!
//! An eframe application that renders the carousel with egui's painter and
//! feeds it pointer input, standing in for a real host framework.
//!
//! # Module Organization
//!
//! - `state` - The `CarouselApp` and its host-side card records
//! - `canvas` - Screen/world mapping and pointer event translation
//! - `rendering` - Drawing cards and the status line

mod canvas;
mod rendering;
mod state;

pub use state::{CarouselApp, DemoCard, DemoCards};

use eframe::egui;

impl eframe::App for CarouselApp {
    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl CarouselApp {
    /// Allocates the canvas, runs the carousel frame and paints the result.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let canvas_rect = response.rect;

        self.handle_carousel_input(ui, canvas_rect);
        self.drain_activations();

        self.render_cards(&painter);
        self.render_status(&painter, canvas_rect);
    }
}
