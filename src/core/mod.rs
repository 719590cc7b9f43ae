pub mod bounds;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod projection;
pub mod transform;

pub use bounds::Bounds;
pub use geometry::{Point, ScreenPoint, ScreenRect, ScreenVector};
pub use grid::{AxisGrid, GridLayout, GridPlan, GridPlanner, Tick, format_tick_label};
pub use layout::{LayoutRequest, LegendMetrics, PlotLayout, WindowSize};
pub use projection::project_points;
pub use transform::{CoordinateTransform, DEGENERATE_AXIS_SCALE};
