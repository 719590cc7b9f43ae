//! Window partitioning: client rect, title margins and the legend band.

use serde::{Deserialize, Serialize};

use crate::core::ScreenRect;

/// Base margins as fractions of the window size.
pub const LEFT_MARGIN_RATIO: f64 = 0.15;
pub const TOP_MARGIN_RATIO: f64 = 0.05;
pub const RIGHT_MARGIN_RATIO: f64 = 0.05;
pub const BOTTOM_MARGIN_RATIO: f64 = 0.15;

/// Legend band never takes more than this share of the window width.
pub const LEGEND_MAX_WIDTH_RATIO: f64 = 0.5;
/// Horizontal extent of a legend marker.
pub const LEGEND_MARKER_LEN_PX: f64 = 20.0;
/// Spacing between legend elements and entries.
pub const LEGEND_MARGIN_PX: f64 = 8.0;

const MIN_CLIENT_EXTENT_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Measured legend content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendMetrics {
    pub entry_count: usize,
    pub max_label_width_px: f64,
    pub font_size_px: f64,
}

impl LegendMetrics {
    /// Band width wanted by the legend before the half-window cap.
    #[must_use]
    pub fn preferred_width_px(self) -> f64 {
        LEGEND_MARKER_LEN_PX + 3.0 * LEGEND_MARGIN_PX + self.max_label_width_px.max(0.0)
    }

    /// Vertical distance between consecutive entries.
    #[must_use]
    pub fn entry_pitch_px(self) -> f64 {
        self.font_size_px + LEGEND_MARGIN_PX
    }

    /// Horizontal start and end of the marker column inside `band`.
    #[must_use]
    pub fn marker_span_px(self, band: ScreenRect) -> (f64, f64) {
        let left = band.left() + LEGEND_MARGIN_PX;
        (left, left + LEGEND_MARKER_LEN_PX)
    }

    /// Left edge of the label column inside `band`.
    #[must_use]
    pub fn label_x_px(self, band: ScreenRect) -> f64 {
        self.marker_span_px(band).1 + LEGEND_MARGIN_PX
    }

    /// Vertical center of entry `index`.
    #[must_use]
    pub fn row_center_y_px(self, band: ScreenRect, index: usize) -> f64 {
        band.top()
            + LEGEND_MARGIN_PX
            + index as f64 * self.entry_pitch_px()
            + self.font_size_px * 0.5
    }

    /// Marker stroke width or radius for a series drawn with `style_width`.
    ///
    /// Capped at half the font size so markers stay inside their row.
    #[must_use]
    pub fn marker_extent_px(self, style_width: f64) -> f64 {
        style_width.min(self.font_size_px * 0.5)
    }
}

/// What the layout has to make room for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub grid_font_size_px: f64,
    pub title_font_size_px: f64,
    pub graph_title: bool,
    pub x_title: bool,
    pub y_title: bool,
    pub legend: Option<LegendMetrics>,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            grid_font_size_px: 12.0,
            title_font_size_px: 16.0,
            graph_title: false,
            x_title: false,
            y_title: false,
            legend: None,
        }
    }
}

/// Resolved partition of the window for one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub window: WindowSize,
    pub client_rect: ScreenRect,
    pub legend_rect: Option<ScreenRect>,
    /// Metrics the legend band was sized from; set together with `legend_rect`.
    pub legend: Option<LegendMetrics>,
}

impl PlotLayout {
    #[must_use]
    pub fn compute(window: WindowSize, request: &LayoutRequest) -> Self {
        let width = window.width_px();
        let height = window.height_px();
        let title_font = request.title_font_size_px.max(0.0);
        let grid_font = request.grid_font_size_px.max(0.0);

        let mut left = LEFT_MARGIN_RATIO * width;
        if request.y_title {
            left += 2.0 * title_font;
        }
        let mut top = TOP_MARGIN_RATIO * height;
        if request.graph_title {
            top = top.max(2.0 * title_font);
        }
        let mut bottom = BOTTOM_MARGIN_RATIO * height;
        if request.x_title {
            bottom = bottom.max(2.0 * grid_font + 2.0 * title_font);
        }
        let right = RIGHT_MARGIN_RATIO * width;

        let legend = request.legend.filter(|legend| legend.entry_count > 0);
        let legend_band =
            legend.map(|legend| legend.preferred_width_px().min(LEGEND_MAX_WIDTH_RATIO * width));

        let client_width =
            (width - left - right - legend_band.unwrap_or(0.0)).max(MIN_CLIENT_EXTENT_PX);
        let client_height = (height - top - bottom).max(MIN_CLIENT_EXTENT_PX);
        let client_rect = ScreenRect::new(left, top, client_width, client_height);

        let legend_rect = legend_band
            .map(|band| ScreenRect::new(client_rect.right(), top, band, client_height));

        Self {
            window,
            client_rect,
            legend_rect,
            legend,
        }
    }
}
