use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, ScreenVector, WindowSize};
use crate::error::{PlotError, PlotResult};

/// Edges of one button as observed during a single frame.
///
/// `pressed` and `released` fire once per transition; `down` holds for every
/// frame the button is held, including the pressed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonState {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl ButtonState {
    pub const IDLE: Self = Self {
        pressed: false,
        down: false,
        released: false,
    };
    pub const PRESSED: Self = Self {
        pressed: true,
        down: true,
        released: false,
    };
    pub const HELD: Self = Self {
        pressed: false,
        down: true,
        released: false,
    };
    pub const RELEASED: Self = Self {
        pressed: false,
        down: false,
        released: true,
    };
}

/// Input sampled once at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub pointer: ScreenPoint,
    pub pointer_delta: ScreenVector,
    /// Rectangle zoom button (left button by convention).
    pub zoom_button: ButtonState,
    /// Pan button (right button by convention).
    pub pan_button: ButtonState,
    /// New window size when the window was resized since the last frame.
    pub resized: Option<WindowSize>,
}

impl InputSnapshot {
    #[must_use]
    pub fn idle_at(pointer: ScreenPoint) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }
}

/// Host-provided input, polled by the session loop.
pub trait InputSource {
    /// Checked once per frame before sampling; `true` ends the session.
    fn should_close(&mut self) -> bool;

    fn sample(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of frames, then requests close.
///
/// Used by tests and headless replays; the builder helpers produce the
/// frame-by-frame edges a real pointer would.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
    #[serde(skip)]
    last_pointer: ScreenPoint,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_frames(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            last_pointer: ScreenPoint::default(),
        }
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let frames: Vec<InputSnapshot> = serde_json::from_str(input)
            .map_err(|e| PlotError::Config(format!("failed to parse input script json: {e}")))?;
        Ok(Self::from_frames(frames))
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self.frames)
            .map_err(|e| PlotError::Config(format!("failed to serialize input script: {e}")))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frame(mut self, frame: InputSnapshot) -> Self {
        self.last_pointer = frame.pointer;
        self.frames.push_back(frame);
        self
    }

    /// One frame with the pointer resting at `pointer`.
    #[must_use]
    pub fn idle(self, pointer: ScreenPoint) -> Self {
        let delta = self.delta_to(pointer);
        self.frame(InputSnapshot {
            pointer,
            pointer_delta: delta,
            ..InputSnapshot::default()
        })
    }

    /// Zoom-button drag: press at `from`, one held frame per intermediate
    /// step, release at `to`.
    #[must_use]
    pub fn zoom_drag(self, from: ScreenPoint, to: ScreenPoint, steps: usize) -> Self {
        self.drag(from, to, steps, |snapshot, state| snapshot.zoom_button = state)
    }

    /// Pan-button drag from `from` to `to`.
    #[must_use]
    pub fn pan_drag(self, from: ScreenPoint, to: ScreenPoint, steps: usize) -> Self {
        self.drag(from, to, steps, |snapshot, state| snapshot.pan_button = state)
    }

    #[must_use]
    pub fn resize(self, window: WindowSize) -> Self {
        let pointer = self.last_pointer;
        self.frame(InputSnapshot {
            pointer,
            resized: Some(window),
            ..InputSnapshot::default()
        })
    }

    fn drag(
        mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        steps: usize,
        assign: impl Fn(&mut InputSnapshot, ButtonState),
    ) -> Self {
        // The pointer jumps to `from` before the press; no motion on that frame.
        let mut press = InputSnapshot::idle_at(from);
        assign(&mut press, ButtonState::PRESSED);
        self = self.frame(press);

        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let pointer = ScreenPoint::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            let delta = self.delta_to(pointer);
            let mut held = InputSnapshot {
                pointer,
                pointer_delta: delta,
                ..InputSnapshot::default()
            };
            assign(&mut held, ButtonState::HELD);
            self = self.frame(held);
        }

        let mut release = InputSnapshot::idle_at(to);
        assign(&mut release, ButtonState::RELEASED);
        self.frame(release)
    }

    fn delta_to(&self, pointer: ScreenPoint) -> ScreenVector {
        ScreenVector::new(pointer.x - self.last_pointer.x, pointer.y - self.last_pointer.y)
    }
}

impl InputSource for ScriptedInput {
    fn should_close(&mut self) -> bool {
        self.frames.is_empty()
    }

    fn sample(&mut self) -> InputSnapshot {
        let snapshot = self
            .frames
            .pop_front()
            .unwrap_or_else(|| InputSnapshot::idle_at(self.last_pointer));
        self.last_pointer = snapshot.pointer;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::{ButtonState, InputSource, ScriptedInput};
    use crate::core::ScreenPoint;

    #[test]
    fn zoom_drag_emits_press_holds_and_release() {
        let mut input = ScriptedInput::new().zoom_drag(
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(30.0, 50.0),
            2,
        );
        assert_eq!(input.remaining(), 4);

        let press = input.sample();
        assert_eq!(press.zoom_button, ButtonState::PRESSED);
        let mid = input.sample();
        assert_eq!(mid.zoom_button, ButtonState::HELD);
        assert_eq!(mid.pointer, ScreenPoint::new(20.0, 30.0));
        assert_eq!(mid.pointer_delta.x, 10.0);
        let end = input.sample();
        assert_eq!(end.pointer, ScreenPoint::new(30.0, 50.0));
        let release = input.sample();
        assert_eq!(release.zoom_button, ButtonState::RELEASED);
        assert!(input.should_close());
    }

    #[test]
    fn script_round_trips_through_json() {
        let input = ScriptedInput::new()
            .idle(ScreenPoint::new(1.0, 2.0))
            .pan_drag(ScreenPoint::new(1.0, 2.0), ScreenPoint::new(5.0, 2.0), 1);
        let json = input.to_json_pretty().expect("serialize");
        let parsed = ScriptedInput::from_json_str(&json).expect("parse");
        assert_eq!(parsed.remaining(), input.remaining());
    }
}
