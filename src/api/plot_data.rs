use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Bounds, Point};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Consecutive points joined by segments.
    Line,
    /// One filled marker per point.
    Scatter,
}

/// Render style of one series.
///
/// `width` is the stroke width for lines and the marker radius for scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub kind: SeriesKind,
    pub color: Color,
    pub width: f64,
}

impl Style {
    #[must_use]
    pub const fn line(color: Color, width: f64) -> Self {
        Self {
            kind: SeriesKind::Line,
            color,
            width,
        }
    }

    #[must_use]
    pub const fn scatter(color: Color, radius: f64) -> Self {
        Self {
            kind: SeriesKind::Scatter,
            color,
            width: radius,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::line(Color::rgb(0.0, 0.47, 0.95), 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub style: Style,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<Point>, style: Style) -> Self {
        Self {
            name: name.into(),
            points,
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Requested vertical grid lines; `<= 0` hides the grid.
    pub x_num_lines: i64,
    /// Requested horizontal grid lines; `<= 0` hides the grid.
    pub y_num_lines: i64,
    pub color: Color,
    /// Draw grid lines. Labels are governed by `labelled` alone.
    pub visible: bool,
    pub labelled: bool,
    pub font_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_num_lines: 5,
            y_num_lines: 5,
            color: Color::LIGHT_GRAY,
            visible: true,
            labelled: true,
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlesConfig {
    pub graph: String,
    pub x: String,
    pub y: String,
    pub color: Color,
    pub visible: bool,
    pub font_size: f64,
}

impl Default for TitlesConfig {
    fn default() -> Self {
        Self {
            graph: String::new(),
            x: String::new(),
            y: String::new(),
            color: Color::BLACK,
            visible: true,
            font_size: 16.0,
        }
    }
}

impl TitlesConfig {
    #[must_use]
    pub fn shows_graph(&self) -> bool {
        self.visible && !self.graph.is_empty()
    }

    #[must_use]
    pub fn shows_x(&self) -> bool {
        self.visible && !self.x.is_empty()
    }

    #[must_use]
    pub fn shows_y(&self) -> bool {
        self.visible && !self.y.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub visible: bool,
    pub font_size: f64,
    pub color: Color,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 12.0,
            color: Color::BLACK,
        }
    }
}

/// Immutable snapshot handed to a session: series plus display configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotData {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub titles: TitlesConfig,
    #[serde(default)]
    pub legend: LegendConfig,
}

impl PlotData {
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_titles(
        mut self,
        graph: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
    ) -> Self {
        self.titles.graph = graph.into();
        self.titles.x = x.into();
        self.titles.y = y.into();
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    /// Bounding rectangle of every sample in every series.
    ///
    /// Recomputed on each call; empty data yields [`Bounds::EMPTY`].
    #[must_use]
    pub fn data_bounds(&self) -> Bounds {
        Bounds::from_point_sets(self.series.iter().map(|series| series.points.as_slice()))
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    /// Checks styles and font sizes; point values are not restricted.
    pub fn validate(&self) -> PlotResult<()> {
        for (index, series) in self.series.iter().enumerate() {
            series.style.color.validate()?;
            if !series.style.width.is_finite() || series.style.width <= 0.0 {
                return Err(PlotError::Config(format!(
                    "series {index} (`{}`) style width must be finite and > 0",
                    series.name
                )));
            }
        }
        for (field, size) in [
            ("grid.font_size", self.grid.font_size),
            ("titles.font_size", self.titles.font_size),
            ("legend.font_size", self.legend.font_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(PlotError::Config(format!("{field} must be finite and > 0")));
            }
        }
        self.grid.color.validate()?;
        self.titles.color.validate()?;
        self.legend.color.validate()
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let plot: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::Config(format!("failed to parse plot json: {e}")))?;
        plot.validate()?;
        debug!(
            series = plot.series.len(),
            points = plot.point_count(),
            "loaded plot data"
        );
        Ok(plot)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::Config(format!("failed to serialize plot json: {e}")))
    }
}
