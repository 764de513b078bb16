//! Demo application state.
//!
//! Holds the carousel widget, the host-side card records it renders into, and
//! the channel through which card activations reach the UI.

use crate::constants::*;
use crate::types::*;
use crate::widget::CardCarousel;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Logical pixels per world unit on the demo canvas.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// A card as the host sees it: an identity, a tint and the last applied transform.
#[derive(Debug, Clone)]
pub struct DemoCard {
    /// Card identity, also its index
    pub id: CardId,
    /// Fill colour
    pub color: egui::Color32,
    /// Transform most recently applied by the carousel
    pub transform: CardTransform,
}

/// Host-side card records plus the screen/world projection of the canvas.
///
/// Implements the rendering sink and hit test the carousel needs.
#[derive(Debug, Clone)]
pub struct DemoCards {
    /// Cards indexed by id
    pub cards: Vec<DemoCard>,
    /// Unscaled card size in world units
    pub card_size: egui::Vec2,
    /// Screen position of the world origin
    pub origin: egui::Pos2,
}

impl DemoCards {
    /// Creates `count` cards with distinct tints.
    pub fn new(count: usize) -> Self {
        Self {
            cards: (0..count)
                .map(|id| DemoCard {
                    id,
                    color: card_color(id),
                    transform: CardTransform::default(),
                })
                .collect(),
            card_size: egui::vec2(
                DEMO_CARD_WIDTH / PIXELS_PER_UNIT,
                DEMO_CARD_HEIGHT / PIXELS_PER_UNIT,
            ),
            origin: egui::Pos2::ZERO,
        }
    }

    /// Screen-space rectangle covered by `card` at its current transform.
    pub fn screen_rect(&self, card: &DemoCard) -> egui::Rect {
        let center = self.world_to_screen(card.transform.position);
        let size = self.card_size * PIXELS_PER_UNIT * card.transform.scale;
        egui::Rect::from_center_size(center, size)
    }

    /// Cards ordered back to front: smaller (farther) cards first.
    pub fn paint_order(&self) -> Vec<&DemoCard> {
        let mut ordered: Vec<&DemoCard> = self.cards.iter().collect();
        ordered.sort_by(|a, b| a.transform.scale.total_cmp(&b.transform.scale));
        ordered
    }
}

impl CardSink for DemoCards {
    fn set_card_transform(&mut self, card: CardId, transform: CardTransform) {
        if let Some(record) = self.cards.get_mut(card) {
            record.transform = transform;
        }
    }

    fn card_bounds(&self, _card: CardId) -> egui::Vec2 {
        self.card_size
    }
}

impl CardHitTest for DemoCards {
    fn card_at(&self, screen_pos: egui::Pos2) -> Option<CardId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|card| self.screen_rect(card).contains(screen_pos))
            .map(|card| card.id)
    }
}

/// Spreads hues around the colour wheel by the golden ratio so neighbours differ.
fn card_color(id: CardId) -> egui::Color32 {
    let hue = (id as f32 * 0.618_034).fract();
    let saturation = 0.45 + 0.3 * ((id * 7 % 5) as f32 / 4.0);
    egui::ecolor::Hsva::new(hue, saturation, 0.85, 1.0).into()
}

/// The demo application: one carousel filling the window.
pub struct CarouselApp {
    /// Configuration the carousel is built from on the first frame
    pub config: CarouselConfig,
    /// Built once the canvas width is known
    pub carousel: Option<CardCarousel>,
    /// Host-side card records
    pub cards: DemoCards,
    /// Most recently activated card
    pub last_activated: Option<CardId>,
    /// Set when the carousel could not be built
    pub init_error: Option<String>,
    activation_sender: Sender<CardId>,
    activation_receiver: Receiver<CardId>,
}

impl Default for CarouselApp {
    fn default() -> Self {
        Self::new(CarouselConfig::default())
    }
}

impl CarouselApp {
    /// Creates an app that builds its carousel from `config` on the first frame.
    pub fn new(config: CarouselConfig) -> Self {
        let (activation_sender, activation_receiver) = channel();
        Self {
            cards: DemoCards::new(config.card_count),
            config,
            carousel: None,
            last_activated: None,
            init_error: None,
            activation_sender,
            activation_receiver,
        }
    }

    /// Builds the carousel for a canvas of the given width, once.
    ///
    /// The screen width is measured here and then held constant.
    pub fn ensure_carousel(&mut self, canvas_width: f32) {
        if self.carousel.is_some() || self.init_error.is_some() {
            return;
        }
        let config = CarouselConfig {
            screen_width: canvas_width,
            ..self.config.clone()
        };
        let sender = self.activation_sender.clone();
        match CardCarousel::new(config, &mut self.cards) {
            Ok(carousel) => {
                self.carousel = Some(carousel.with_activation(move |card| {
                    let _ = sender.send(card);
                }));
            }
            Err(err) => {
                log::error!("failed to build carousel: {err}");
                self.init_error = Some(err.to_string());
            }
        }
    }

    /// Drains activations delivered by the carousel callback.
    pub fn drain_activations(&mut self) {
        while let Ok(card) = self.activation_receiver.try_recv() {
            log::info!("activated card {card}");
            self.last_activated = Some(card);
        }
    }
}
