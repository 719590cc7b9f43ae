use crate::error::{PlotError, PlotResult};
use crate::render::{LayerKind, LayeredRenderFrame, Renderer};

/// Deterministic, backend-independent text width estimate.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    units * font_size_px
}

/// No-op renderer used by tests and headless sessions.
///
/// It still validates every frame so invalid geometry is caught without a
/// real backend, and keeps the last frame for inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_command_count: usize,
    pub last_frame: Option<LayeredRenderFrame>,
    fail_after_frames: Option<usize>,
}

impl NullRenderer {
    /// Renderer whose `render` fails once `frames` frames were accepted.
    #[must_use]
    pub fn failing_after(frames: usize) -> Self {
        Self {
            fail_after_frames: Some(frames),
            ..Self::default()
        }
    }

    /// Number of commands the last frame submitted in `kind`.
    #[must_use]
    pub fn last_layer_len(&self, kind: LayerKind) -> usize {
        self.last_frame
            .as_ref()
            .and_then(|frame| frame.layer(kind))
            .map_or(0, |layer| layer.commands.len())
    }
}

impl Renderer for NullRenderer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_text_width_px(text, font_size_px)
    }

    fn render(&mut self, frame: &LayeredRenderFrame) -> PlotResult<()> {
        if self
            .fail_after_frames
            .is_some_and(|limit| self.frames_rendered >= limit)
        {
            return Err(PlotError::Backend("null renderer frame limit reached".to_owned()));
        }
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.command_count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
