//! Grid-line placement.
//!
//! Steps are powers of ten multiplied by a power of two (1, 2, 4, 8, ...),
//! not the more common 1-2-5 sequence. The doubling keeps the tick count per
//! axis within `[n, 2n]` for any zoom level, and ticks sit on multiples of the
//! step measured from zero so they stay put while the view pans.

use smallvec::SmallVec;

use crate::core::{CoordinateTransform, ScreenRect};

/// Steps at or below this use four decimals in labels.
pub const FINE_STEP_THRESHOLD: f64 = 0.01;

/// Step and first tick of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub step: f64,
    pub first_tick: f64,
}

/// One grid line: its graph value and its screen coordinate along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pixel: f64,
}

pub type TickList = SmallVec<[Tick; 16]>;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisGrid {
    pub plan: GridPlan,
    pub ticks: TickList,
}

/// Ticks for both axes of the current frame.
///
/// An axis whose visible span cannot be planned (degenerate scale, non-finite
/// extent) is `None`; the other axis is still drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub x: Option<AxisGrid>,
    pub y: Option<AxisGrid>,
}

/// Derives tick spacing from the current transform and a requested density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlanner {
    pub x_num_lines: i64,
    pub y_num_lines: i64,
}

impl GridPlanner {
    #[must_use]
    pub const fn new(x_num_lines: i64, y_num_lines: i64) -> Self {
        Self {
            x_num_lines,
            y_num_lines,
        }
    }

    /// Plans one axis.
    ///
    /// Returns `None` for a non-positive tick count, a span that is not
    /// finite and positive, or a visible minimum that is not finite.
    #[must_use]
    pub fn plan_axis(span: f64, num_lines: i64, min_visible: f64) -> Option<GridPlan> {
        if num_lines <= 0 || !span.is_finite() || span <= 0.0 || !min_visible.is_finite() {
            return None;
        }

        let n = num_lines as f64;
        let raw_step = span / n;
        let mut step = 10.0_f64.powf(raw_step.log10().floor());
        if !step.is_finite() || step <= 0.0 {
            return None;
        }

        while span / step > 2.0 * n {
            step *= 2.0;
        }

        let first_tick = (min_visible / step).ceil() * step;
        if !first_tick.is_finite() {
            return None;
        }

        Some(GridPlan { step, first_tick })
    }

    /// Plans both axes for what is visible through `client_rect`.
    ///
    /// A non-positive count on either axis suppresses the whole grid,
    /// labels included. Otherwise each axis is planned on its own.
    #[must_use]
    pub fn layout(
        &self,
        transform: &CoordinateTransform,
        client_rect: ScreenRect,
    ) -> Option<GridLayout> {
        if self.x_num_lines <= 0 || self.y_num_lines <= 0 {
            return None;
        }

        let x_span = client_rect.width / transform.x_scale;
        let y_span = -client_rect.height / transform.y_scale;
        let min_visible = transform.to_graph(client_rect.bottom_left());

        let x = Self::plan_axis(x_span, self.x_num_lines, min_visible.x).map(|plan| {
            let start = transform.x_scale * (plan.first_tick - transform.dx);
            AxisGrid {
                plan,
                ticks: collect_ticks(plan, x_span, start, transform.x_scale, |px| {
                    px < client_rect.right()
                }),
            }
        });
        let y = Self::plan_axis(y_span, self.y_num_lines, min_visible.y).map(|plan| {
            let start = transform.y_scale * (plan.first_tick - transform.dy);
            AxisGrid {
                plan,
                ticks: collect_ticks(plan, y_span, start, transform.y_scale, |py| {
                    py > client_rect.top()
                }),
            }
        });

        Some(GridLayout { x, y })
    }
}

/// Walks ticks from `start_pixel` until `in_view` fails.
///
/// The walk is bounded by the plan itself: at most `span / step + 1` ticks
/// fit in the visible span.
fn collect_ticks(
    plan: GridPlan,
    span: f64,
    start_pixel: f64,
    scale: f64,
    in_view: impl Fn(f64) -> bool,
) -> TickList {
    let pixel_step = plan.step * scale;
    let mut ticks = TickList::new();
    if !start_pixel.is_finite() || !pixel_step.is_finite() || pixel_step == 0.0 {
        return ticks;
    }

    let limit = (span / plan.step).ceil() as usize + 1;
    for index in 0..limit {
        let offset = index as f64;
        let pixel = start_pixel + offset * pixel_step;
        if !in_view(pixel) {
            break;
        }
        ticks.push(Tick {
            value: plan.first_tick + offset * plan.step,
            pixel,
        });
    }
    ticks
}

/// Formats a tick value with precision chosen by step magnitude.
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    // Avoid "-0.00" for ticks that land on zero from below.
    let value = if value == 0.0 { 0.0 } else { value };
    if step > FINE_STEP_THRESHOLD {
        format!("{value:.2}")
    } else {
        format!("{value:.4}")
    }
}
