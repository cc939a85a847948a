//! Pointer and wheel input translated into shared-axis transform mutations.
//!
//! The gesture machine is decoupled from any rendering backend: hosts feed
//! `InputEvent`s and apply the reported outcome. All bounds-checking lives in
//! `AxisTransform`; the machine only decides which mutation to request.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::AxisTransform;
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(u64);

impl PointerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Abstract input event contract consumed by the controller.
///
/// Positions are pixels relative to the plot area origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, pointer: PointerId },
    PointerMove { x: f64, y: f64, pointer: PointerId },
    PointerUp { pointer: PointerId },
    PointerCancel { pointer: PointerId },
    /// Wheel/scroll; `delta` follows toolkit convention (negative = up).
    Wheel { x: f64, delta: f64 },
    FocusLost,
}

/// Tuning for wheel-driven zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelZoomTuning {
    /// Zoom factor applied per full wheel notch.
    pub zoom_step: f64,
    /// Wheel delta corresponding to one notch.
    pub wheel_notch: f64,
}

impl Default for WheelZoomTuning {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            wheel_notch: 120.0,
        }
    }
}

impl WheelZoomTuning {
    fn validate(self) -> PlotResult<Self> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(PlotError::InvalidData(
                "wheel zoom step must be finite and > 1".to_owned(),
            ));
        }
        if !self.wheel_notch.is_finite() || self.wheel_notch <= 0.0 {
            return Err(PlotError::InvalidData(
                "wheel notch must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public view of the gesture machine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    PinchZooming,
}

/// What a processed event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    /// True when the shared transform was mutated; the host must re-render
    /// every graph in the view, not just the one under the pointer.
    pub transform_changed: bool,
    pub mode: InteractionMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Panning {
        pointer: PointerId,
        anchor_px: f64,
        last_px: f64,
        start_view: (f64, f64),
    },
    PinchZooming {
        first: (PointerId, f64),
        second: (PointerId, f64),
        start_distance: f64,
        start_view: (f64, f64),
    },
}

/// Translates raw input into clamped pan/zoom calls on the shared transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionController {
    state: GestureState,
    tuning: WheelZoomTuning,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            state: GestureState::Idle,
            tuning: WheelZoomTuning::default(),
        }
    }
}

impl InteractionController {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.state {
            GestureState::Idle => InteractionMode::Idle,
            GestureState::Panning { .. } => InteractionMode::Panning,
            GestureState::PinchZooming { .. } => InteractionMode::PinchZooming,
        }
    }

    #[must_use]
    pub fn tuning(&self) -> WheelZoomTuning {
        self.tuning
    }

    pub fn set_tuning(&mut self, tuning: WheelZoomTuning) -> PlotResult<()> {
        self.tuning = tuning.validate()?;
        Ok(())
    }

    /// Processes one event synchronously against the shared x transform.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        transform: &mut AxisTransform,
    ) -> EventOutcome {
        let transform_changed = match event {
            InputEvent::PointerDown { x, pointer, .. } => self.on_pointer_down(x, pointer, transform),
            InputEvent::PointerMove { x, pointer, .. } => self.on_pointer_move(x, pointer, transform),
            InputEvent::PointerUp { pointer } => self.on_pointer_up(pointer, transform),
            InputEvent::PointerCancel { .. } | InputEvent::FocusLost => {
                // Discard the in-progress gesture; the transform keeps
                // whatever was last committed.
                self.state = GestureState::Idle;
                false
            }
            InputEvent::Wheel { x, delta } => self.on_wheel(x, delta, transform),
        };
        EventOutcome {
            transform_changed,
            mode: self.mode(),
        }
    }

    fn on_pointer_down(
        &mut self,
        x: f64,
        pointer: PointerId,
        transform: &AxisTransform,
    ) -> bool {
        match self.state {
            GestureState::Idle => {
                self.state = GestureState::Panning {
                    pointer,
                    anchor_px: x,
                    last_px: x,
                    start_view: transform.view(),
                };
            }
            GestureState::Panning {
                pointer: existing,
                last_px,
                ..
            } if existing != pointer => {
                let distance = (x - last_px).abs();
                // A second pointer right on top of the first cannot seed a
                // meaningful pinch ratio; keep panning until it separates.
                if distance > f64::EPSILON {
                    self.state = GestureState::PinchZooming {
                        first: (existing, last_px),
                        second: (pointer, x),
                        start_distance: distance,
                        start_view: transform.view(),
                    };
                }
            }
            _ => {}
        }
        false
    }

    fn on_pointer_move(
        &mut self,
        x: f64,
        pointer: PointerId,
        transform: &mut AxisTransform,
    ) -> bool {
        if !x.is_finite() {
            return false;
        }
        match &mut self.state {
            GestureState::Panning {
                pointer: active,
                anchor_px,
                last_px,
                start_view,
            } if *active == pointer => {
                *last_px = x;
                // Cumulative delta from the drag-start bounds, not an
                // incremental step, so repeated rounding cannot drift.
                let delta_px = x - *anchor_px;
                let span = start_view.1 - start_view.0;
                let shift = -delta_px * span / transform.pixel_extent();
                let moved = transform.set_view(start_view.0 + shift, start_view.1 + shift);
                trace!(delta_px, moved, "drag pan");
                moved
            }
            GestureState::PinchZooming {
                first,
                second,
                start_distance,
                start_view,
            } => {
                if first.0 == pointer {
                    first.1 = x;
                } else if second.0 == pointer {
                    second.1 = x;
                } else {
                    return false;
                }
                let distance = (first.1 - second.1).abs();
                if distance <= f64::EPSILON {
                    return false;
                }
                // Factor is the ratio of current to initial pointer spread;
                // recomputed from drag-start bounds each move.
                let span0 = start_view.1 - start_view.0;
                let new_span = span0 * (*start_distance / distance);
                if new_span < transform.tuning().min_span {
                    return false;
                }
                let mid_px = (first.1 + second.1) / 2.0;
                let ratio = mid_px / transform.pixel_extent();
                let mid_value = start_view.0 + ratio * span0;
                let new_min = mid_value - ratio * new_span;
                transform.set_view(new_min, new_min + new_span)
            }
            _ => false,
        }
    }

    fn on_pointer_up(&mut self, pointer: PointerId, transform: &AxisTransform) -> bool {
        match self.state {
            GestureState::Panning {
                pointer: active, ..
            } if active == pointer => {
                self.state = GestureState::Idle;
            }
            GestureState::PinchZooming { first, second, .. } => {
                if first.0 == pointer || second.0 == pointer {
                    let (id, px) = if first.0 == pointer { second } else { first };
                    // The surviving pointer keeps panning from the committed
                    // window.
                    self.state = GestureState::Panning {
                        pointer: id,
                        anchor_px: px,
                        last_px: px,
                        start_view: transform.view(),
                    };
                }
            }
            _ => {}
        }
        false
    }

    fn on_wheel(&mut self, x: f64, delta: f64, transform: &mut AxisTransform) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        // Discrete zoom, legal while Idle or Panning; no state transition.
        if matches!(self.state, GestureState::PinchZooming { .. }) {
            return false;
        }
        let factor = self.tuning.zoom_step.powf(-delta / self.tuning.wheel_notch);
        let changed = transform.zoom(x, factor);
        debug!(factor, changed, "wheel zoom");
        if changed {
            // An active drag must continue from the post-zoom window or the
            // next cumulative move would snap the span back.
            if let GestureState::Panning {
                anchor_px,
                last_px,
                start_view,
                ..
            } = &mut self.state
            {
                *start_view = transform.view();
                *anchor_px = *last_px;
            }
        }
        changed
    }
}
