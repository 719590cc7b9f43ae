//! Per-frame scene assembly.
//!
//! Phases are emitted into fixed layers: border, grid, series, titles,
//! legend, zoom overlay. Nothing here mutates view state.

use tracing::trace;

use crate::core::{
    CoordinateTransform, GridLayout, GridPlanner, LayoutRequest, LegendMetrics, PlotLayout,
    ScreenPoint, ScreenRect, format_tick_label, project_points,
};
use crate::interaction::ZoomGesture;
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LayerKind, LayeredRenderFrame, LinePrimitive,
    RectOutlinePrimitive, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

use super::{PlotData, Series, SeriesKind};

pub const CLEAR_COLOR: Color = Color::WHITE;
pub const BORDER_COLOR: Color = Color::BLACK;
pub const ZOOM_OVERLAY_COLOR: Color = Color::GRAY;
const GRID_LINE_WIDTH_PX: f64 = 1.0;
const BORDER_WIDTH_PX: f64 = 1.0;
const ZOOM_OVERLAY_WIDTH_PX: f64 = 1.0;

/// Builds frames for one plot; borrows the plot for the session's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct RenderCoordinator<'a> {
    plot: &'a PlotData,
}

impl<'a> RenderCoordinator<'a> {
    #[must_use]
    pub fn new(plot: &'a PlotData) -> Self {
        Self { plot }
    }

    #[must_use]
    pub fn grid_planner(&self) -> GridPlanner {
        GridPlanner::new(self.plot.grid.x_num_lines, self.plot.grid.y_num_lines)
    }

    /// Measures legend entries; `None` when the legend is hidden or empty.
    #[must_use]
    pub fn legend_metrics(&self, renderer: &impl Renderer) -> Option<LegendMetrics> {
        let legend = &self.plot.legend;
        if !legend.visible || self.plot.series.is_empty() {
            return None;
        }
        let max_label_width_px = self
            .plot
            .series
            .iter()
            .map(|series| renderer.measure_text(&series.name, legend.font_size))
            .fold(0.0, f64::max);
        Some(LegendMetrics {
            entry_count: self.plot.series.len(),
            max_label_width_px,
            font_size_px: legend.font_size,
        })
    }

    #[must_use]
    pub fn layout_request(&self, renderer: &impl Renderer) -> LayoutRequest {
        let titles = &self.plot.titles;
        LayoutRequest {
            grid_font_size_px: self.plot.grid.font_size,
            title_font_size_px: titles.font_size,
            graph_title: titles.shows_graph(),
            x_title: titles.shows_x(),
            y_title: titles.shows_y(),
            legend: self.legend_metrics(renderer),
        }
    }

    /// Assembles the full scene for the current view.
    #[must_use]
    pub fn build_frame(
        &self,
        layout: &PlotLayout,
        transform: &CoordinateTransform,
        gesture: Option<ZoomGesture>,
    ) -> LayeredRenderFrame {
        let mut frame = LayeredRenderFrame::new(layout.window, CLEAR_COLOR);
        let client_rect = layout.client_rect;

        frame.push(
            LayerKind::Border,
            DrawCommand::RectOutline(RectOutlinePrimitive::new(
                client_rect,
                BORDER_WIDTH_PX,
                BORDER_COLOR,
            )),
        );

        if let Some(grid) = self.grid_planner().layout(transform, client_rect) {
            self.push_grid(&mut frame, client_rect, &grid);
        }

        frame.set_clip(LayerKind::Series, client_rect);
        for series in &self.plot.series {
            push_series(&mut frame, series, transform);
        }

        self.push_titles(&mut frame, layout);

        if let (Some(legend_rect), Some(metrics)) = (layout.legend_rect, layout.legend) {
            self.push_legend(&mut frame, legend_rect, metrics);
        }

        if let Some(gesture) = gesture.filter(|gesture| gesture.visible) {
            frame.push(
                LayerKind::Overlay,
                DrawCommand::RectOutline(RectOutlinePrimitive::new(
                    gesture.rect.normalized(),
                    ZOOM_OVERLAY_WIDTH_PX,
                    ZOOM_OVERLAY_COLOR,
                )),
            );
        }

        trace!(commands = frame.command_count(), "frame built");
        frame
    }

    fn push_grid(&self, frame: &mut LayeredRenderFrame, client_rect: ScreenRect, grid: &GridLayout) {
        let config = &self.plot.grid;

        if let Some(x) = &grid.x {
            for tick in &x.ticks {
                if config.visible {
                    push_valid(
                        frame,
                        LayerKind::Grid,
                        DrawCommand::Line(LinePrimitive::new(
                            ScreenPoint::new(tick.pixel, client_rect.top()),
                            ScreenPoint::new(tick.pixel, client_rect.bottom()),
                            GRID_LINE_WIDTH_PX,
                            config.color,
                        )),
                    );
                }
                if config.labelled {
                    push_valid(
                        frame,
                        LayerKind::Grid,
                        DrawCommand::Text(TextPrimitive::new(
                            format_tick_label(tick.value, x.plan.step),
                            ScreenPoint::new(tick.pixel, client_rect.bottom() + config.font_size),
                            config.font_size,
                            config.color,
                            TextHAlign::Center,
                        )),
                    );
                }
            }
        }

        if let Some(y) = &grid.y {
            for tick in &y.ticks {
                if config.visible {
                    push_valid(
                        frame,
                        LayerKind::Grid,
                        DrawCommand::Line(LinePrimitive::new(
                            ScreenPoint::new(client_rect.left(), tick.pixel),
                            ScreenPoint::new(client_rect.right(), tick.pixel),
                            GRID_LINE_WIDTH_PX,
                            config.color,
                        )),
                    );
                }
                if config.labelled {
                    push_valid(
                        frame,
                        LayerKind::Grid,
                        DrawCommand::Text(
                            TextPrimitive::new(
                                format_tick_label(tick.value, y.plan.step),
                                ScreenPoint::new(client_rect.left() - config.font_size, tick.pixel),
                                config.font_size,
                                config.color,
                                TextHAlign::Right,
                            )
                            .with_v_align(TextVAlign::Middle),
                        ),
                    );
                }
            }
        }
    }

    fn push_titles(&self, frame: &mut LayeredRenderFrame, layout: &PlotLayout) {
        let titles = &self.plot.titles;
        let client_rect = layout.client_rect;
        let center = client_rect.center();

        if titles.shows_graph() {
            push_valid(
                frame,
                LayerKind::Titles,
                DrawCommand::Text(
                    TextPrimitive::new(
                        titles.graph.clone(),
                        ScreenPoint::new(center.x, client_rect.top() * 0.5),
                        titles.font_size,
                        titles.color,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle),
                ),
            );
        }
        if titles.shows_x() {
            let y = client_rect.bottom() + 2.0 * self.plot.grid.font_size + 0.5 * titles.font_size;
            push_valid(
                frame,
                LayerKind::Titles,
                DrawCommand::Text(TextPrimitive::new(
                    titles.x.clone(),
                    ScreenPoint::new(center.x, y),
                    titles.font_size,
                    titles.color,
                    TextHAlign::Center,
                )),
            );
        }
        if titles.shows_y() {
            push_valid(
                frame,
                LayerKind::Titles,
                DrawCommand::Text(
                    TextPrimitive::new(
                        titles.y.clone(),
                        ScreenPoint::new(titles.font_size, center.y),
                        titles.font_size,
                        titles.color,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle)
                    .rotated(),
                ),
            );
        }
    }

    fn push_legend(
        &self,
        frame: &mut LayeredRenderFrame,
        legend_rect: ScreenRect,
        metrics: LegendMetrics,
    ) {
        let legend = &self.plot.legend;
        let (marker_left, marker_right) = metrics.marker_span_px(legend_rect);
        let label_x = metrics.label_x_px(legend_rect);

        for (index, series) in self.plot.series.iter().enumerate() {
            let row_center = metrics.row_center_y_px(legend_rect, index);
            let extent = metrics.marker_extent_px(series.style.width);

            let marker = match series.style.kind {
                SeriesKind::Line => DrawCommand::Line(LinePrimitive::new(
                    ScreenPoint::new(marker_left, row_center),
                    ScreenPoint::new(marker_right, row_center),
                    extent,
                    series.style.color,
                )),
                SeriesKind::Scatter => DrawCommand::Circle(CirclePrimitive::new(
                    ScreenPoint::new((marker_left + marker_right) * 0.5, row_center),
                    extent,
                    series.style.color,
                )),
            };
            push_valid(frame, LayerKind::Legend, marker);

            if !series.name.is_empty() {
                push_valid(
                    frame,
                    LayerKind::Legend,
                    DrawCommand::Text(
                        TextPrimitive::new(
                            series.name.clone(),
                            ScreenPoint::new(label_x, row_center),
                            legend.font_size,
                            legend.color,
                            TextHAlign::Left,
                        )
                        .with_v_align(TextVAlign::Middle),
                    ),
                );
            }
        }
    }
}

/// Pushes `command` unless it would fail backend validation.
///
/// Invalid configuration (zero widths, bad colors) and samples that overflow
/// on projection are dropped here so they never fail a frame.
fn push_valid(frame: &mut LayeredRenderFrame, layer: LayerKind, command: DrawCommand) {
    if command.validate().is_ok() {
        frame.push(layer, command);
    }
}

fn push_series(frame: &mut LayeredRenderFrame, series: &Series, transform: &CoordinateTransform) {
    let projected = project_points(&series.points, transform);
    let style = series.style;
    match style.kind {
        SeriesKind::Line => {
            for pair in projected.windows(2) {
                let segment = LinePrimitive::new(pair[0], pair[1], style.width, style.color);
                push_valid(frame, LayerKind::Series, DrawCommand::Line(segment));
            }
        }
        SeriesKind::Scatter => {
            for center in projected {
                let marker = CirclePrimitive::new(center, style.width, style.color);
                push_valid(frame, LayerKind::Series, DrawCommand::Circle(marker));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RenderCoordinator;
    use crate::api::{PlotData, Series, Style};
    use crate::core::{CoordinateTransform, PlotLayout, Point, WindowSize};
    use crate::render::{Color, DrawCommand, LayerKind, NullRenderer};

    #[test]
    fn line_series_emits_one_segment_per_consecutive_pair() {
        let plot = PlotData::new(vec![Series::new(
            "s",
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)],
            Style::line(Color::BLACK, 1.0),
        )]);
        let coordinator = RenderCoordinator::new(&plot);
        let renderer = NullRenderer::default();
        let layout = PlotLayout::compute(
            WindowSize::new(640, 480),
            &coordinator.layout_request(&renderer),
        );
        let transform = CoordinateTransform::fitted(layout.client_rect, plot.data_bounds());
        let frame = coordinator.build_frame(&layout, &transform, None);

        let series = frame.layer(LayerKind::Series).expect("series layer");
        assert_eq!(series.commands.len(), 2);
        assert_eq!(series.clip, Some(layout.client_rect));
        assert!(
            series
                .commands
                .iter()
                .all(|command| matches!(command, DrawCommand::Line(_)))
        );
        assert!(frame.layer(LayerKind::Overlay).expect("overlay").is_empty());
    }
}
