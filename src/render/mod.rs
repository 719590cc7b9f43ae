mod frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, LayerKind, LayeredRenderFrame, RenderLayer};
pub use null_renderer::{NullRenderer, estimate_text_width_px};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectOutlinePrimitive, TextHAlign, TextPrimitive,
    TextVAlign,
};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// `render` is one double-buffered pass: the backend clears to the frame's
/// clear color, draws every layer in order (honouring each layer's clip) and
/// presents. `measure_text` is consulted before a frame is built, for layout.
pub trait Renderer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64;

    fn render(&mut self, frame: &LayeredRenderFrame) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
