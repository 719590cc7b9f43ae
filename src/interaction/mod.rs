//! Pointer-driven viewport state machine.
//!
//! `ViewportController` owns the session's only [`CoordinateTransform`] and
//! mutates it in response to pan, rectangle-zoom and resize events.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Bounds, CoordinateTransform, ScreenPoint, ScreenRect, ScreenVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    DraggingZoom,
    /// Pan button held over the client rect; no state beyond that.
    Panning,
}

/// Rectangle being dragged by the zoom button.
///
/// `rect` keeps the press point as its origin; width and height carry the
/// drag direction and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomGesture {
    pub rect: ScreenRect,
    pub visible: bool,
}

impl ZoomGesture {
    #[must_use]
    pub fn anchor(self) -> ScreenPoint {
        self.rect.top_left()
    }
}

/// Effect of releasing a zoom drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomOutcome {
    /// Click without drag, a zero-area rect, or no gesture in progress.
    Ignored,
    /// Drag toward the origin corner: back to the full-data view.
    Reset,
    /// View now shows exactly the dragged region.
    ZoomedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    transform: CoordinateTransform,
    client_rect: ScreenRect,
    mode: InteractionMode,
    gesture: Option<ZoomGesture>,
}

impl ViewportController {
    /// Creates the controller in its initial state: fitted to `data_bounds`.
    #[must_use]
    pub fn new(client_rect: ScreenRect, data_bounds: Bounds) -> Self {
        let mut controller = Self {
            transform: CoordinateTransform::IDENTITY,
            client_rect,
            mode: InteractionMode::Idle,
            gesture: None,
        };
        controller.on_reset(data_bounds);
        controller
    }

    #[must_use]
    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    #[must_use]
    pub fn client_rect(&self) -> ScreenRect {
        self.client_rect
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn zoom_gesture(&self) -> Option<ZoomGesture> {
        self.gesture
    }

    /// Graph-space rectangle shown through the client rect.
    #[must_use]
    pub fn visible_graph_rect(&self) -> Bounds {
        self.transform.visible_graph_rect(self.client_rect)
    }

    /// Fits the view to `data_bounds`, freshly computed from all series.
    pub fn on_reset(&mut self, data_bounds: Bounds) {
        self.transform.fit_to_bounds(self.client_rect, data_bounds);
        debug!(
            x_scale = self.transform.x_scale,
            y_scale = self.transform.y_scale,
            degenerate = data_bounds.is_degenerate(),
            "viewport reset to data bounds"
        );
    }

    /// Keeps the visible graph window while the client rect changes size.
    pub fn on_resize(&mut self, new_client_rect: ScreenRect) {
        let visible = self.visible_graph_rect();
        self.client_rect = new_client_rect;
        self.transform.fit_to_bounds(new_client_rect, visible);
        debug!(
            width = new_client_rect.width,
            height = new_client_rect.height,
            "viewport resized"
        );
    }

    /// Starts a zoom drag when `press` lies inside the client rect.
    ///
    /// Returns `true` when the gesture started. A press outside the client
    /// rect, or while a drag is already active, is ignored.
    pub fn on_zoom_gesture_start(&mut self, press: ScreenPoint) -> bool {
        if self.gesture.is_some() || !self.client_rect.contains(press) {
            return false;
        }
        self.gesture = Some(ZoomGesture {
            rect: ScreenRect::anchored_at(press),
            visible: true,
        });
        self.mode = InteractionMode::DraggingZoom;
        trace!(x = press.x, y = press.y, "zoom gesture started");
        true
    }

    /// Stretches the active drag to `current`; not re-gated on the client rect.
    pub fn on_zoom_gesture_update(&mut self, current: ScreenPoint) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.rect.width = current.x - gesture.rect.x;
            gesture.rect.height = current.y - gesture.rect.y;
        }
    }

    /// Ends the active drag and applies it; `data_bounds` serves the reset case.
    pub fn on_zoom_gesture_end(&mut self, data_bounds: Bounds) -> ZoomOutcome {
        let Some(gesture) = self.gesture.take() else {
            return ZoomOutcome::Ignored;
        };
        self.mode = InteractionMode::Idle;

        let outcome = self.apply_zoom_rect(gesture.rect, data_bounds);
        debug!(
            ?outcome,
            width = gesture.rect.width,
            height = gesture.rect.height,
            "zoom gesture ended"
        );
        outcome
    }

    /// Classifies and applies a finished drag rectangle.
    ///
    /// Checked in order: no movement, reversed drag, zero area, zoom in.
    pub fn apply_zoom_rect(&mut self, rect: ScreenRect, data_bounds: Bounds) -> ZoomOutcome {
        if rect.width == 0.0 && rect.height == 0.0 {
            return ZoomOutcome::Ignored;
        }
        if rect.width < 0.0 || rect.height < 0.0 {
            self.on_reset(data_bounds);
            return ZoomOutcome::Reset;
        }
        if rect.width == 0.0 || rect.height == 0.0 || !rect.is_finite() {
            return ZoomOutcome::Ignored;
        }

        let target = self.transform.visible_graph_rect(rect.normalized());
        self.transform.fit_to_bounds(self.client_rect, target);
        ZoomOutcome::ZoomedIn
    }

    /// Pans by one frame's pointer delta while the pointer is over the client rect.
    ///
    /// Returns `true` when the delta was applied.
    pub fn on_pan(&mut self, delta: ScreenVector, pointer: ScreenPoint) -> bool {
        if !self.client_rect.contains(pointer) {
            if self.mode == InteractionMode::Panning {
                self.mode = InteractionMode::Idle;
            }
            return false;
        }
        if self.mode == InteractionMode::Idle {
            self.mode = InteractionMode::Panning;
        }
        if !delta.is_zero() {
            self.transform.pan(delta);
            trace!(dx = delta.x, dy = delta.y, "pan");
        }
        true
    }

    /// Pan button released.
    pub fn on_pan_end(&mut self) {
        if self.mode == InteractionMode::Panning {
            self.mode = InteractionMode::Idle;
        }
    }
}
