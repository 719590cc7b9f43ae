//! Session lifecycle and the blocking frame loop.

use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::core::{LayoutRequest, PlotLayout, WindowSize};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{ViewportController, ZoomOutcome};
use crate::render::{NullRenderer, Renderer};

use super::{InputSnapshot, InputSource, PlotData, RenderCoordinator, ScriptedInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
    /// Frame pacing hint for the platform; the session loop itself never sleeps.
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "UmPlot".to_owned(),
            resizable: true,
            target_fps: 60,
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn size(&self) -> WindowSize {
        WindowSize::new(self.width, self.height)
    }
}

/// Window-system collaborator: creates the surface and the input feed.
///
/// Window, font and surface handles live inside the returned values and are
/// released when they drop.
pub trait Platform {
    type Renderer: Renderer;
    type Input: InputSource;

    fn open(&mut self, config: &WindowConfig) -> PlotResult<(Self::Renderer, Self::Input)>;
}

/// Platform without a window: validates frames through [`NullRenderer`] and
/// replays a [`ScriptedInput`].
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    parts: Option<(NullRenderer, ScriptedInput)>,
}

impl HeadlessPlatform {
    #[must_use]
    pub fn new(input: ScriptedInput) -> Self {
        Self::with_renderer(NullRenderer::default(), input)
    }

    #[must_use]
    pub fn with_renderer(renderer: NullRenderer, input: ScriptedInput) -> Self {
        Self {
            parts: Some((renderer, input)),
        }
    }
}

impl Platform for HeadlessPlatform {
    type Renderer = NullRenderer;
    type Input = ScriptedInput;

    fn open(&mut self, config: &WindowConfig) -> PlotResult<(NullRenderer, ScriptedInput)> {
        if !config.size().is_valid() {
            return Err(PlotError::InvalidWindow {
                width: config.width,
                height: config.height,
            });
        }
        self.parts
            .take()
            .ok_or_else(|| PlotError::Backend("headless platform already opened".to_owned()))
    }
}

/// Result of the blocking entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Success,
    Failure,
}

impl SessionStatus {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Process-style code: `0` on success, `1` otherwise.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<SessionStatus> for ExitCode {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Success => ExitCode::SUCCESS,
            SessionStatus::Failure => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// The input source requested close; nothing was drawn.
    Closed,
}

/// One interactive plot session.
///
/// Owns the renderer, the input source and the viewport for its lifetime;
/// the plot is borrowed read-only.
pub struct PlotSession<'a, R: Renderer, I: InputSource> {
    plot: &'a PlotData,
    coordinator: RenderCoordinator<'a>,
    renderer: R,
    input: I,
    layout_request: LayoutRequest,
    layout: PlotLayout,
    controller: ViewportController,
    frames: u64,
}

impl<'a, R: Renderer, I: InputSource> PlotSession<'a, R, I> {
    pub fn new(plot: &'a PlotData, renderer: R, input: I, window: WindowSize) -> PlotResult<Self> {
        if !window.is_valid() {
            return Err(PlotError::InvalidWindow {
                width: window.width,
                height: window.height,
            });
        }
        if let Err(err) = plot.validate() {
            warn!(error = %err, "invalid plot entries will not be drawn");
        }

        let coordinator = RenderCoordinator::new(plot);
        let layout_request = coordinator.layout_request(&renderer);
        let layout = PlotLayout::compute(window, &layout_request);
        let controller = ViewportController::new(layout.client_rect, plot.data_bounds());

        info!(
            width = window.width,
            height = window.height,
            series = plot.series.len(),
            points = plot.point_count(),
            "plot session opened"
        );

        Ok(Self {
            plot,
            coordinator,
            renderer,
            input,
            layout_request,
            layout,
            controller,
            frames: 0,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs frames until the input source requests close.
    pub fn run(&mut self) -> PlotResult<()> {
        while self.step()? == FrameOutcome::Rendered {}
        Ok(())
    }

    /// One loop iteration: close check, one input sample, one full redraw.
    pub fn step(&mut self) -> PlotResult<FrameOutcome> {
        if self.input.should_close() {
            return Ok(FrameOutcome::Closed);
        }
        let input = self.input.sample();
        self.apply_input(&input);

        let frame = self.coordinator.build_frame(
            &self.layout,
            self.controller.transform(),
            self.controller.zoom_gesture(),
        );
        self.renderer.render(&frame)?;
        self.frames += 1;
        trace!(frame = self.frames, "frame presented");
        Ok(FrameOutcome::Rendered)
    }

    fn apply_input(&mut self, input: &InputSnapshot) {
        if let Some(window) = input.resized {
            self.apply_resize(window);
        }

        let pointer = input.pointer;
        if input.zoom_button.pressed {
            self.controller.on_zoom_gesture_start(pointer);
        }
        if input.zoom_button.down {
            self.controller.on_zoom_gesture_update(pointer);
        }
        if input.zoom_button.released && self.controller.zoom_gesture().is_some() {
            let outcome = self.controller.on_zoom_gesture_end(self.plot.data_bounds());
            if outcome == ZoomOutcome::Reset {
                debug!(frame = self.frames, "zoom-out gesture reset the view");
            }
        }

        if input.pan_button.down {
            self.controller.on_pan(input.pointer_delta, pointer);
        } else {
            self.controller.on_pan_end();
        }
    }

    fn apply_resize(&mut self, window: WindowSize) {
        if !window.is_valid() {
            debug!(
                width = window.width,
                height = window.height,
                "ignoring resize to empty window"
            );
            return;
        }
        let layout = PlotLayout::compute(window, &self.layout_request);
        self.controller.on_resize(layout.client_rect);
        self.layout = layout;
    }
}

impl<R: Renderer, I: InputSource> Drop for PlotSession<'_, R, I> {
    fn drop(&mut self) {
        info!(frames = self.frames, "plot session closed");
    }
}

/// Opens a window through `platform` and runs the plot until close.
///
/// Blocking. Collaborator failures (opening the platform, rendering) end the
/// session with [`SessionStatus::Failure`]; viewport edge cases never do.
pub fn run_interactive_session<P: Platform>(plot: &PlotData, platform: &mut P) -> SessionStatus {
    run_interactive_session_with(plot, platform, &WindowConfig::default())
}

/// [`run_interactive_session`] with an explicit window configuration.
pub fn run_interactive_session_with<P: Platform>(
    plot: &PlotData,
    platform: &mut P,
    config: &WindowConfig,
) -> SessionStatus {
    match open_and_run(plot, platform, config) {
        Ok(()) => SessionStatus::Success,
        Err(err) => {
            warn!(error = %err, "plot session failed");
            SessionStatus::Failure
        }
    }
}

fn open_and_run<P: Platform>(
    plot: &PlotData,
    platform: &mut P,
    config: &WindowConfig,
) -> PlotResult<()> {
    let (renderer, input) = platform.open(config)?;
    let mut session = PlotSession::new(plot, renderer, input, config.size())?;
    session.run()
}

#[cfg(test)]
mod tests {
    use super::{HeadlessPlatform, Platform, SessionStatus, WindowConfig, run_interactive_session};
    use crate::api::{PlotData, ScriptedInput};

    #[test]
    fn headless_platform_opens_once() {
        let mut platform = HeadlessPlatform::new(ScriptedInput::new());
        let config = WindowConfig::default();
        assert!(platform.open(&config).is_ok());
        assert!(platform.open(&config).is_err());
    }

    #[test]
    fn empty_plot_session_succeeds() {
        let plot = PlotData::default();
        let mut platform = HeadlessPlatform::new(ScriptedInput::new());
        let status = run_interactive_session(&plot, &mut platform);
        assert_eq!(status, SessionStatus::Success);
        assert_eq!(status.exit_code(), 0);
    }
}
