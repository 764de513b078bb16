//! Ring ordering and layout for the card carousel.
//!
//! The model maps visual slots to card identities around a circular ring and
//! derives each card's position and scale from that ordering. It never draws;
//! every computed transform is pushed to a [`CardSink`].

use crate::constants::SMOOTHING_RATE;
use crate::types::*;
use egui::{pos2, Pos2, Vec2};

/// Geometric parameters shared by every slot, fixed after the first measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Unscaled card size, measured from the first card
    pub card_size: Vec2,
    /// Horizontal gap between neighbouring cards
    pub gap: f32,
    /// Minimum scale applied to cards away from focus
    pub scale_occlusion: f32,
    /// World y-coordinate of the resting row
    pub carousel_height: f32,
}

impl Layout {
    /// Measures the first card through the sink and derives the layout from `config`.
    ///
    /// # Errors
    ///
    /// Fails when the config has no cards or the measured width is unusable.
    pub fn measure(config: &CarouselConfig, sink: &dyn CardSink) -> Result<Self> {
        if config.card_count == 0 {
            return Err(CarouselError::NoCards);
        }
        let card_size = sink.card_bounds(0);
        if !(card_size.x.is_finite() && card_size.x > 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "card width must be positive, measured {}",
                card_size.x
            )));
        }
        Ok(Self {
            card_size,
            gap: card_size.x * config.gap_fraction,
            scale_occlusion: config.scale_occlusion,
            carousel_height: config.carousel_height,
        })
    }

    /// Distance between the centres of two neighbouring slots.
    pub fn slot_pitch(&self) -> f32 {
        self.card_size.x + self.gap
    }
}

/// Slot-to-card ring plus the current transform of every card.
#[derive(Debug, Clone)]
pub struct CarouselModel {
    /// `order[slot]` is the card shown in that slot
    order: Vec<CardId>,
    /// Current transform per card, indexed by card id
    transforms: Vec<CardTransform>,
    layout: Layout,
    /// Resting x of slot 0
    start_pos_x: f32,
}

impl CarouselModel {
    /// Builds the ring so `focus_index` sits in the focus slot and reports the
    /// resting layout to `sink`.
    ///
    /// Cards keep their relative order: slot `(i + N/2) % N` receives card
    /// `(i + focus_index) % N`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoCards`] when `card_count` is zero and
    /// [`CarouselError::InvalidConfig`] when the layout's slot pitch is not a
    /// positive finite number.
    pub fn initialize(
        card_count: usize,
        focus_index: CardId,
        layout: Layout,
        sink: &mut dyn CardSink,
    ) -> Result<Self> {
        if card_count == 0 {
            return Err(CarouselError::NoCards);
        }
        let pitch = layout.slot_pitch();
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "slot pitch must be positive, got {pitch}"
            )));
        }
        let center_offset = card_count / 2;
        let mut model = Self {
            order: vec![0; card_count],
            transforms: vec![CardTransform::default(); card_count],
            layout,
            start_pos_x: -(center_offset as f32) * layout.slot_pitch(),
        };
        model.reset_focus(focus_index, sink);
        log::info!(
            "carousel initialized with {} cards, focus card {}",
            card_count,
            model.focus_card()
        );
        Ok(model)
    }

    /// Rebuilds the ring around `focus_index` (taken modulo the card count)
    /// and snaps every card to rest.
    pub fn reset_focus(&mut self, focus_index: CardId, sink: &mut dyn CardSink) {
        let n = self.order.len();
        let focus_index = focus_index % n;
        let center_offset = n / 2;
        for i in 0..n {
            self.order[(i + center_offset) % n] = (i + focus_index) % n;
        }

        for slot in 0..n {
            let card = self.order[slot];
            let position = self.resting_position(slot);
            let transform = CardTransform {
                position,
                scale: self.compute_scale(position.x),
            };
            self.transforms[card] = transform;
            sink.set_card_transform(card, transform);
        }
    }

    /// Scale of a card whose centre is at world x-coordinate `x`.
    ///
    /// Shrinks linearly with the distance from the focus slot, by
    /// `1 - scale_occlusion` per slot pitch, and never leaves
    /// `[scale_occlusion, 1.0]`.
    pub fn compute_scale(&self, x: f32) -> f32 {
        scale_at(&self.layout, x)
    }

    /// Eases every card toward its slot shifted by `offset` and reports the result.
    ///
    /// Positions move a fraction `SMOOTHING_RATE * dt` (at most 1) of the way to
    /// their target each call; scales follow the target position directly.
    pub fn displace(&mut self, offset: f32, dt: f32, sink: &mut dyn CardSink) {
        let pitch = self.layout.slot_pitch();
        let t = (SMOOTHING_RATE * dt).clamp(0.0, 1.0);

        for (slot, &card) in self.order.iter().enumerate() {
            let target_x = self.start_pos_x + slot as f32 * pitch + offset;
            let target = pos2(target_x, self.layout.carousel_height);
            let current = self.transforms[card].position;
            let transform = CardTransform {
                // Written as a delta so a card already on target stays bit-identical
                position: current + (target - current) * t,
                scale: scale_at(&self.layout, target.x),
            };
            self.transforms[card] = transform;
            sink.set_card_transform(card, transform);
        }
    }

    /// Rotates the ring by one slot.
    ///
    /// The card that wraps around is moved to where the card at the opposite
    /// end stood, so the next [`displace`](Self::displace) slides it in from
    /// the edge instead of across the whole ring.
    pub fn shift(&mut self, direction: ShiftDirection) {
        let n = self.order.len();
        if n <= 1 {
            return;
        }
        let first = self.order[0];
        let last = self.order[n - 1];
        match direction {
            ShiftDirection::Right => {
                self.transforms[last].position = self.transforms[first].position;
                self.order.rotate_right(1);
            }
            ShiftDirection::Left => {
                self.transforms[first].position = self.transforms[last].position;
                self.order.rotate_left(1);
            }
        }
        log::debug!(
            "shifted {:?}, focus card now {}",
            direction,
            self.focus_card()
        );
    }

    /// Current slot-to-card mapping.
    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    /// Number of cards in the ring.
    pub fn card_count(&self) -> usize {
        self.order.len()
    }

    /// Index of the centred slot.
    pub fn focus_slot(&self) -> usize {
        self.order.len() / 2
    }

    /// Card currently occupying the focus slot.
    pub fn focus_card(&self) -> CardId {
        self.order[self.focus_slot()]
    }

    /// Layout the model was built with.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Distance between neighbouring slot centres.
    pub fn slot_pitch(&self) -> f32 {
        self.layout.slot_pitch()
    }

    /// Resting x-coordinate of `slot` with no drag offset.
    pub fn resting_x(&self, slot: usize) -> f32 {
        self.start_pos_x + slot as f32 * self.slot_pitch()
    }

    /// Last transform computed for `card`.
    pub fn transform(&self, card: CardId) -> Option<CardTransform> {
        self.transforms.get(card).copied()
    }

    /// Last transforms of all cards, indexed by card id.
    pub fn transforms(&self) -> &[CardTransform] {
        &self.transforms
    }

    /// True when every card sits within `tolerance` of its resting slot.
    pub fn is_at_rest(&self, tolerance: f32) -> bool {
        self.order.iter().enumerate().all(|(slot, &card)| {
            (self.transforms[card].position - self.resting_position(slot)).length() <= tolerance
        })
    }

    fn resting_position(&self, slot: usize) -> Pos2 {
        pos2(self.resting_x(slot), self.layout.carousel_height)
    }
}

fn scale_at(layout: &Layout, x: f32) -> f32 {
    let occlusion = layout.scale_occlusion;
    (1.0 - x.abs() / layout.slot_pitch() * (1.0 - occlusion)).clamp(occlusion, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingSink {
        applied: HashMap<CardId, CardTransform>,
        calls: usize,
    }

    impl CardSink for RecordingSink {
        fn set_card_transform(&mut self, card: CardId, transform: CardTransform) {
            self.applied.insert(card, transform);
            self.calls += 1;
        }

        fn card_bounds(&self, _card: CardId) -> Vec2 {
            vec2(100.0, 150.0)
        }
    }

    fn layout() -> Layout {
        Layout {
            card_size: vec2(100.0, 150.0),
            gap: 20.0,
            scale_occlusion: 0.8,
            carousel_height: 5.0,
        }
    }

    fn model(n: usize, focus: CardId) -> (CarouselModel, RecordingSink) {
        let mut sink = RecordingSink::default();
        let model = CarouselModel::initialize(n, focus, layout(), &mut sink).unwrap();
        (model, sink)
    }

    fn is_permutation(order: &[CardId]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &c)| i == c)
    }

    #[test]
    fn test_initialize_places_focus_card_in_center_slot() {
        for n in 1..12 {
            for focus in 0..n {
                let (model, _) = model(n, focus);
                assert!(is_permutation(model.order()), "n={n} focus={focus}");
                assert_eq!(model.order()[n / 2], focus);
                assert_eq!(model.focus_card(), focus);
            }
        }
    }

    #[test]
    fn test_initialize_five_cards() {
        let (model, sink) = model(5, 0);
        assert_eq!(model.order(), &[3, 4, 0, 1, 2]);
        assert_eq!(sink.calls, 5);

        let focus = sink.applied[&0];
        assert_eq!(focus.position, pos2(0.0, 5.0));
        assert_eq!(focus.scale, 1.0);
        assert_eq!(sink.applied[&3].position, pos2(-240.0, 5.0));
        assert_eq!(sink.applied[&2].position, pos2(240.0, 5.0));
    }

    #[test]
    fn test_initialize_rejects_zero_cards() {
        let mut sink = RecordingSink::default();
        let result = CarouselModel::initialize(0, 0, layout(), &mut sink);
        assert!(matches!(result, Err(CarouselError::NoCards)));
    }

    #[test]
    fn test_focus_index_is_reduced_modulo_card_count() {
        let (mut model, mut sink) = model(5, usize::MAX);
        assert!(is_permutation(model.order()));
        assert_eq!(model.focus_card(), usize::MAX % 5);

        model.reset_focus(usize::MAX - 1, &mut sink);
        assert_eq!(model.focus_card(), (usize::MAX - 1) % 5);
        assert!(model.is_at_rest(0.0));

        model.reset_focus(7, &mut sink);
        assert_eq!(model.focus_card(), 2);
    }

    #[test]
    fn test_initialize_rejects_degenerate_pitch() {
        let mut sink = RecordingSink::default();
        let flat = Layout {
            card_size: vec2(0.0, 150.0),
            gap: 0.0,
            ..layout()
        };
        assert!(matches!(
            CarouselModel::initialize(3, 0, flat, &mut sink),
            Err(CarouselError::InvalidConfig(_))
        ));

        let broken = Layout {
            gap: f32::NAN,
            ..layout()
        };
        assert!(matches!(
            CarouselModel::initialize(3, 0, broken, &mut sink),
            Err(CarouselError::InvalidConfig(_))
        ));
        assert_eq!(sink.calls, 0);
    }

    #[test]
    fn test_measure_uses_first_card_bounds() {
        let sink = RecordingSink::default();
        let config = CarouselConfig::default();
        let measured = Layout::measure(&config, &sink).unwrap();
        assert_eq!(measured.card_size, vec2(100.0, 150.0));
        assert!((measured.gap - 20.0).abs() < 1e-5);
        assert!((measured.slot_pitch() - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_properties() {
        let (model, _) = model(5, 0);
        assert_eq!(model.compute_scale(0.0), 1.0);
        assert!((model.compute_scale(120.0) - 0.8).abs() < 1e-6);
        assert!((model.compute_scale(-60.0) - 0.9).abs() < 1e-6);

        let mut previous = 1.0;
        for step in 0..100 {
            let x = step as f32 * 10.0;
            let scale = model.compute_scale(x);
            assert!(scale <= previous);
            assert!(scale >= 0.8);
            assert_eq!(scale, model.compute_scale(-x));
            previous = scale;
        }
        assert_eq!(model.compute_scale(10_000.0), 0.8);
    }

    #[test]
    fn test_shift_right_then_left_restores_order() {
        for n in 2..10 {
            let (mut model, _) = model(n, 1 % n);
            let before = model.order().to_vec();
            model.shift(ShiftDirection::Right);
            assert_ne!(model.order(), before.as_slice());
            assert!(is_permutation(model.order()));
            model.shift(ShiftDirection::Left);
            assert_eq!(model.order(), before.as_slice());
        }
    }

    #[test]
    fn test_shift_right_moves_left_neighbour_into_focus() {
        let (mut model, _) = model(5, 0);
        model.shift(ShiftDirection::Right);
        assert_eq!(model.order(), &[2, 3, 4, 0, 1]);
        assert_eq!(model.focus_card(), 4);

        model.shift(ShiftDirection::Left);
        model.shift(ShiftDirection::Left);
        assert_eq!(model.order(), &[4, 0, 1, 2, 3]);
        assert_eq!(model.focus_card(), 1);
    }

    #[test]
    fn test_shift_teleports_wrapping_card_to_opposite_end() {
        let (mut model, mut sink) = model(5, 0);
        // Card 2 sits in the last slot at x=240, card 3 in the first at x=-240
        model.shift(ShiftDirection::Right);
        assert_eq!(model.transform(2).unwrap().position, pos2(-240.0, 5.0));

        // Once displaced, it settles into slot 0 without crossing the ring
        model.displace(0.0, 1.0, &mut sink);
        assert_eq!(model.transform(2).unwrap().position, pos2(-240.0, 5.0));
        assert!(model.is_at_rest(1e-4));
    }

    #[test]
    fn test_shift_single_card_is_noop() {
        let (mut model, _) = model(1, 0);
        model.shift(ShiftDirection::Right);
        model.shift(ShiftDirection::Left);
        assert_eq!(model.order(), &[0]);
        assert_eq!(model.focus_card(), 0);
    }

    #[test]
    fn test_displace_zero_at_rest_is_fixed_point() {
        let (mut model, mut sink) = model(6, 2);
        let before = model.transforms().to_vec();
        for _ in 0..20 {
            model.displace(0.0, 1.0 / 60.0, &mut sink);
        }
        assert_eq!(model.transforms(), before.as_slice());
        assert!(model.is_at_rest(0.0));
    }

    #[test]
    fn test_displace_smooths_toward_offset() {
        let (mut model, mut sink) = model(5, 0);
        model.displace(60.0, 0.05, &mut sink);

        // Half way in one step at 10/s with dt = 0.05
        let focus = model.transform(0).unwrap();
        assert!((focus.position.x - 30.0).abs() < 1e-4);
        assert!((focus.scale - 0.9).abs() < 1e-5);
        assert_eq!(sink.applied[&0], focus);

        for _ in 0..200 {
            model.displace(0.0, 1.0 / 60.0, &mut sink);
        }
        assert!(model.is_at_rest(1e-3));
    }

    #[test]
    fn test_displace_long_frame_snaps_without_overshoot() {
        let (mut model, mut sink) = model(3, 0);
        model.displace(50.0, 2.0, &mut sink);
        assert_eq!(model.transform(0).unwrap().position, pos2(50.0, 5.0));
    }

    #[test]
    fn test_reset_focus_rebuilds_ring() {
        let (mut model, mut sink) = model(5, 0);
        model.shift(ShiftDirection::Left);
        model.reset_focus(3, &mut sink);
        assert_eq!(model.focus_card(), 3);
        assert_eq!(model.order(), &[1, 2, 3, 4, 0]);
        assert!(model.is_at_rest(0.0));
    }
}
