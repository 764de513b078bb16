//! Embeddable carousel widget.
//!
//! [`CardCarousel`] ties the ring model and the gesture controller to a host
//! and runs one frame at a time: every pointer sample of the frame is handled
//! first, then the geometry is updated and pushed to the host.

use crate::carousel::{CarouselModel, Layout};
use crate::gesture::{GestureController, GestureOutcome};
use crate::types::*;
use std::fmt;

/// Callback fired when the focus card is tapped.
pub type ActivationCallback = Box<dyn FnMut(CardId)>;

/// A horizontal ring of cards driven by pointer gestures.
pub struct CardCarousel {
    config: CarouselConfig,
    model: CarouselModel,
    gesture: GestureController,
    on_card_activated: Option<ActivationCallback>,
}

impl fmt::Debug for CardCarousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardCarousel")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("gesture", &self.gesture)
            .field("has_activation_callback", &self.on_card_activated.is_some())
            .finish()
    }
}

impl CardCarousel {
    /// Validates `config`, measures the first card through `sink` and lays
    /// out the ring around the configured focus card.
    ///
    /// # Errors
    ///
    /// Fails on zero cards, unusable configuration values or a degenerate
    /// card measurement.
    pub fn new(config: CarouselConfig, sink: &mut dyn CardSink) -> Result<Self> {
        let config = config.validated()?;
        let layout = Layout::measure(&config, sink)?;
        let model =
            CarouselModel::initialize(config.card_count, config.initial_focus_index, layout, sink)?;
        let gesture = GestureController::new(config.screen_width, config.drag_threshold);
        Ok(Self {
            config,
            model,
            gesture,
            on_card_activated: None,
        })
    }

    /// Sets the callback fired when the focus card is tapped.
    pub fn with_activation(mut self, callback: impl FnMut(CardId) + 'static) -> Self {
        self.set_on_card_activated(callback);
        self
    }

    /// Replaces the activation callback.
    pub fn set_on_card_activated(&mut self, callback: impl FnMut(CardId) + 'static) {
        self.on_card_activated = Some(Box::new(callback));
    }

    /// Handles one pointer sample, firing the activation callback on a focus tap.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        hit_test: &dyn CardHitTest,
    ) -> Option<GestureOutcome> {
        let outcome = self.gesture.handle_event(event, &mut self.model, hit_test)?;
        if let GestureOutcome::Activated(card) = outcome {
            log::info!("card {card} activated");
            if let Some(callback) = self.on_card_activated.as_mut() {
                callback(card);
            }
        }
        Some(outcome)
    }

    /// Advances the geometry by `dt` seconds and pushes every card transform to `sink`.
    pub fn update(&mut self, dt: f32, sink: &mut dyn CardSink) {
        self.gesture.tick(&mut self.model, dt, sink);
    }

    /// Runs one frame: all `events` in order, then the geometry update.
    ///
    /// Returns the outcomes of the pointer sessions that ended this frame.
    pub fn frame<H>(
        &mut self,
        events: &[PointerEvent],
        dt: f32,
        host: &mut H,
    ) -> Vec<GestureOutcome>
    where
        H: CardSink + CardHitTest,
    {
        let outcomes = events
            .iter()
            .filter_map(|event| self.handle_event(event, &*host))
            .collect();
        self.update(dt, host);
        outcomes
    }

    /// Rebuilds the ring around `focus_index`, snapping every card to rest.
    pub fn reset_focus(&mut self, focus_index: CardId, sink: &mut dyn CardSink) {
        self.model
            .reset_focus(focus_index % self.model.card_count(), sink);
    }

    /// Card currently in the focus slot.
    pub fn focus_card(&self) -> CardId {
        self.model.focus_card()
    }

    /// The validated configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Ring order and layout.
    pub fn model(&self) -> &CarouselModel {
        &self.model
    }

    /// Pointer session state.
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }
}
