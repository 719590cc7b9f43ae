use std::f64::consts::{FRAC_PI_2, TAU};
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::WindowSize;
use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, DrawCommand, LayeredRenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango offscreen renderer.
///
/// Each `render` call paints a complete frame into an image surface, which
/// is swapped in only after every layer succeeded. The surface follows the
/// frame's window size.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(window: WindowSize) -> PlotResult<Self> {
        Ok(Self {
            surface: create_surface(window)?,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last presented frame as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            PlotError::Backend(format!("failed to create {}: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| PlotError::Backend(format!("failed to write png: {err}")))
    }

    fn paint_frame(surface: &ImageSurface, frame: &LayeredRenderFrame) -> PlotResult<CairoRenderStats> {
        let context = Context::new(surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;

        apply_color(&context, frame.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            if layer.is_empty() {
                continue;
            }
            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            if let Some(clip) = layer.clip {
                context.rectangle(clip.x, clip.y, clip.width, clip.height);
                context.clip();
            }
            for command in &layer.commands {
                draw_command(&context, command, &mut stats)?;
            }
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
        }
        Ok(stats)
    }
}

impl Renderer for CairoRenderer {
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        let Ok(context) = Context::new(&self.surface) else {
            return super::estimate_text_width_px(text, font_size_px);
        };
        let layout = text_layout(&context, text, font_size_px);
        let (width, _) = layout.pixel_size();
        f64::from(width)
    }

    fn render(&mut self, frame: &LayeredRenderFrame) -> PlotResult<()> {
        frame.validate()?;

        // Back buffer; replaces the presented surface only on success.
        let back = create_surface(frame.window)?;
        let stats = Self::paint_frame(&back, frame)?;
        back.flush();
        self.surface = back;
        self.last_stats = stats;
        Ok(())
    }
}

fn create_surface(window: WindowSize) -> PlotResult<ImageSurface> {
    let (Ok(width), Ok(height)) = (i32::try_from(window.width), i32::try_from(window.height))
    else {
        return Err(PlotError::InvalidWindow {
            width: window.width,
            height: window.height,
        });
    };
    if width <= 0 || height <= 0 {
        return Err(PlotError::InvalidWindow {
            width: window.width,
            height: window.height,
        });
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn draw_command(
    context: &Context,
    command: &DrawCommand,
    stats: &mut CairoRenderStats,
) -> PlotResult<()> {
    match command {
        DrawCommand::Line(line) => {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.from.x, line.from.y);
            context.line_to(line.to.x, line.to.y);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        DrawCommand::Circle(circle) => {
            apply_color(context, circle.color);
            context.new_sub_path();
            context.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }
        DrawCommand::RectOutline(outline) => {
            // Stroke inside the rect so the outline hugs the client area.
            let inset = outline.thickness * 0.5;
            apply_color(context, outline.color);
            context.set_line_width(outline.thickness);
            context.rectangle(
                outline.rect.x + inset,
                outline.rect.y + inset,
                (outline.rect.width - outline.thickness).max(0.0),
                (outline.rect.height - outline.thickness).max(0.0),
            );
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
            stats.rects_drawn += 1;
        }
        DrawCommand::Text(text) => {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }
    }
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) -> PlotResult<()> {
    let layout = text_layout(context, &text.text, text.font_size_px);
    let (width, height) = layout.pixel_size();
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(width) / 2.0,
        TextHAlign::Right => -f64::from(width),
    };
    let offset_y = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Middle => -f64::from(height) / 2.0,
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.position.x, text.position.y);
    if text.rotated {
        context.rotate(-FRAC_PI_2);
    }
    apply_color(context, text.color);
    context.move_to(offset_x, offset_y);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn text_layout(context: &Context, text: &str, font_size_px: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {font_size_px}px"));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);
    layout
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::Backend(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::CairoRenderer;
    use crate::api::{PlotData, PlotSession, ScriptedInput, Series, Style};
    use crate::core::{Point, ScreenPoint, WindowSize};
    use crate::render::{Color, Renderer};

    #[test]
    fn session_frames_paint_every_command_kind() {
        let plot = PlotData::new(vec![
            Series::new(
                "line",
                vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)],
                Style::line(Color::BLACK, 1.5),
            ),
            Series::new("dots", vec![Point::new(0.5, 1.0)], Style::scatter(Color::GRAY, 3.0)),
        ]);
        let renderer = CairoRenderer::new(WindowSize::new(320, 240)).expect("renderer");
        assert!(renderer.measure_text("1.00", 12.0) > 0.0);

        let input = ScriptedInput::new().zoom_drag(
            ScreenPoint::new(60.0, 40.0),
            ScreenPoint::new(120.0, 90.0),
            1,
        );
        let mut session =
            PlotSession::new(&plot, renderer, input, WindowSize::new(320, 240)).expect("session");
        session.step().expect("press frame");
        session.step().expect("drag frame");

        let stats = session.renderer().last_stats();
        assert!(stats.lines_drawn >= 1);
        assert_eq!(stats.circles_drawn, 2);
        assert_eq!(stats.rects_drawn, 2);
        assert!(stats.texts_drawn > 0);
        assert_eq!(session.renderer().surface().width(), 320);
    }
}
