//! Pointer gesture interpretation for the carousel.
//!
//! A single pointer session is tracked from press to release. While it is
//! held the carousel follows the drag; on release the session is classified
//! as a tap (activate the focus card), a swipe (rotate one slot) or neither.

use crate::carousel::CarouselModel;
use crate::constants::TAP_THRESHOLD;
use crate::types::*;
use egui::Pos2;

/// Coarse state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No pointer is held
    Idle,
    /// A pointer is held and the carousel follows it
    Dragging,
}

/// What a completed pointer session was interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    /// The pointer barely moved
    Tap,
    /// The net drag passed the threshold in the given direction
    Swipe(ShiftDirection),
    /// Too long for a tap, too short for a swipe
    Ignored,
}

/// Effect a completed pointer session had on the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The focus card was tapped
    Activated(CardId),
    /// The ring rotated one slot
    Swiped(ShiftDirection),
    /// Nothing happened; the carousel springs back to rest
    Ignored,
}

/// Per-session drag bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    pointer: PointerId,
    last_pos: Pos2,
    /// Signed net horizontal displacement since the press
    delta_pos: f32,
    /// Cumulative unsigned horizontal displacement since the press
    delta_pos_abs: f32,
}

impl DragSession {
    fn track(&mut self, pos: Pos2) {
        let dx = pos.x - self.last_pos.x;
        self.delta_pos += dx;
        self.delta_pos_abs += dx.abs();
        self.last_pos = pos;
    }
}

/// Turns pointer samples into carousel offsets, shifts and activations.
#[derive(Debug, Clone)]
pub struct GestureController {
    screen_width: f32,
    drag_threshold: f32,
    session: Option<DragSession>,
}

impl GestureController {
    /// Creates an idle controller.
    ///
    /// `screen_width` normalizes drag distances so sensitivity does not depend
    /// on resolution; `drag_threshold` is the fraction of it a swipe must cover.
    pub fn new(screen_width: f32, drag_threshold: f32) -> Self {
        Self {
            screen_width,
            drag_threshold,
            session: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        if self.session.is_some() {
            GestureState::Dragging
        } else {
            GestureState::Idle
        }
    }

    /// Whether a pointer session is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Signed net drag in screen units, zero when idle.
    pub fn delta_pos(&self) -> f32 {
        self.session.map_or(0.0, |s| s.delta_pos)
    }

    /// Cumulative unsigned drag in screen units, zero when idle.
    pub fn delta_pos_abs(&self) -> f32 {
        self.session.map_or(0.0, |s| s.delta_pos_abs)
    }

    /// World offset the carousel should be displaced by this frame.
    pub fn drag_offset(&self, slot_pitch: f32) -> f32 {
        self.delta_pos() / self.screen_width * slot_pitch
    }

    /// Classifies a finished drag from its net and cumulative displacement.
    pub fn classify(&self, delta_pos: f32, delta_pos_abs: f32, slot_pitch: f32) -> GestureIntent {
        if delta_pos_abs / self.screen_width * slot_pitch < TAP_THRESHOLD {
            GestureIntent::Tap
        } else if (delta_pos / self.screen_width).abs() >= self.drag_threshold {
            GestureIntent::Swipe(ShiftDirection::from_drag(delta_pos))
        } else {
            GestureIntent::Ignored
        }
    }

    /// Feeds one pointer sample.
    ///
    /// Returns the outcome when the sample ends a session. Samples that do not
    /// fit the current state (a second pointer, a release with no press) are
    /// dropped.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        model: &mut CarouselModel,
        hit_test: &dyn CardHitTest,
    ) -> Option<GestureOutcome> {
        let active = self.session.as_ref().map(|s| s.pointer);
        match (event.kind, active) {
            (PointerEventKind::Down, Some(pointer)) if pointer != event.pointer => {
                log::trace!("ignoring press from second pointer {}", event.pointer);
                None
            }
            (PointerEventKind::Down, _) => {
                self.session = Some(DragSession {
                    pointer: event.pointer,
                    last_pos: event.pos,
                    delta_pos: 0.0,
                    delta_pos_abs: 0.0,
                });
                None
            }
            (kind, None) => {
                log::trace!("ignoring {kind:?} with no pointer held");
                None
            }
            (kind, Some(pointer)) if pointer != event.pointer => {
                log::trace!(
                    "ignoring {kind:?} from pointer {} while {pointer} is held",
                    event.pointer
                );
                None
            }
            (PointerEventKind::Move, Some(_)) => {
                if let Some(session) = self.session.as_mut() {
                    session.track(event.pos);
                }
                None
            }
            (PointerEventKind::Up, Some(_)) => {
                let mut finished = self.session.take()?;
                finished.track(event.pos);
                Some(self.finish(finished, model, hit_test))
            }
            (PointerEventKind::Cancel, Some(_)) => {
                let finished = self.session.take()?;
                Some(self.finish(finished, model, hit_test))
            }
        }
    }

    /// Updates carousel geometry for one frame: follow the drag, or ease back to rest.
    pub fn tick(&self, model: &mut CarouselModel, dt: f32, sink: &mut dyn CardSink) {
        let offset = self.drag_offset(model.slot_pitch());
        model.displace(offset, dt, sink);
    }

    fn finish(
        &self,
        session: DragSession,
        model: &mut CarouselModel,
        hit_test: &dyn CardHitTest,
    ) -> GestureOutcome {
        let intent = self.classify(session.delta_pos, session.delta_pos_abs, model.slot_pitch());
        log::debug!(
            "pointer {} released: net {:.1}, travelled {:.1}, {:?}",
            session.pointer,
            session.delta_pos,
            session.delta_pos_abs,
            intent
        );
        match intent {
            GestureIntent::Tap => match hit_test.card_at(session.last_pos) {
                Some(card) if card == model.focus_card() => GestureOutcome::Activated(card),
                Some(card) => {
                    log::debug!("tap on side card {card} ignored");
                    GestureOutcome::Ignored
                }
                None => GestureOutcome::Ignored,
            },
            GestureIntent::Swipe(direction) => {
                model.shift(direction);
                GestureOutcome::Swiped(direction)
            }
            GestureIntent::Ignored => GestureOutcome::Ignored,
        }
    }
}
