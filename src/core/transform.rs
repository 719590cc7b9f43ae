use serde::{Deserialize, Serialize};

use crate::core::{Bounds, Point, ScreenPoint, ScreenRect, ScreenVector};

/// Scale used on an axis whose graph extent is zero (or inverted).
///
/// A single-point series, a series constant on one axis, or no data at all
/// all end up here instead of dividing by zero. The resulting view is still
/// a valid affine map; it just does not stretch the data to the rect.
pub const DEGENERATE_AXIS_SCALE: f64 = 1.0;

/// Affine mapping between graph space and screen space.
///
/// `screen = scale * (graph - offset)` per axis. `y_scale` is normally
/// negative because screen y grows downward. Both scales are non-zero at all
/// times; every mutator below preserves that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    pub dx: f64,
    pub dy: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CoordinateTransform {
    pub const IDENTITY: Self = Self {
        dx: 0.0,
        dy: 0.0,
        x_scale: 1.0,
        y_scale: 1.0,
    };

    /// Transform that shows `bounds` exactly inside `client_rect`.
    #[must_use]
    pub fn fitted(client_rect: ScreenRect, bounds: Bounds) -> Self {
        let mut transform = Self::IDENTITY;
        transform.fit_to_bounds(client_rect, bounds);
        transform
    }

    #[must_use]
    pub fn to_screen(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(
            self.x_scale * (point.x - self.dx),
            self.y_scale * (point.y - self.dy),
        )
    }

    #[must_use]
    pub fn to_graph(&self, point: ScreenPoint) -> Point {
        Point::new(
            point.x / self.x_scale + self.dx,
            point.y / self.y_scale + self.dy,
        )
    }

    /// Maps `bounds` onto `client_rect`: min x to the left edge, max y to the top edge.
    ///
    /// An axis without positive extent falls back to [`DEGENERATE_AXIS_SCALE`].
    pub fn fit_to_bounds(&mut self, client_rect: ScreenRect, bounds: Bounds) {
        self.x_scale = if bounds.max_x > bounds.min_x {
            client_rect.width / (bounds.max_x - bounds.min_x)
        } else {
            DEGENERATE_AXIS_SCALE
        };
        self.y_scale = if bounds.max_y > bounds.min_y {
            -(client_rect.height / (bounds.max_y - bounds.min_y))
        } else {
            DEGENERATE_AXIS_SCALE
        };

        // Zero-sized rects or overflowing extents would break the non-zero invariant.
        if !self.x_scale.is_finite() || self.x_scale == 0.0 {
            self.x_scale = DEGENERATE_AXIS_SCALE;
        }
        if !self.y_scale.is_finite() || self.y_scale == 0.0 {
            self.y_scale = DEGENERATE_AXIS_SCALE;
        }

        self.dx = bounds.min_x - client_rect.x / self.x_scale;
        self.dy = bounds.max_y - client_rect.y / self.y_scale;
    }

    /// Graph-space rectangle currently visible through `rect`.
    ///
    /// The bottom-left screen corner becomes the min corner and the
    /// top-right screen corner the max corner.
    #[must_use]
    pub fn visible_graph_rect(&self, rect: ScreenRect) -> Bounds {
        let rect = rect.normalized();
        Bounds::from_corners(
            self.to_graph(rect.bottom_left()),
            self.to_graph(rect.top_right()),
        )
    }

    /// Shifts the view so graph content follows a pointer moved by `delta` pixels.
    pub fn pan(&mut self, delta: ScreenVector) {
        self.dx -= delta.x / self.x_scale;
        self.dy -= delta.y / self.y_scale;
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x_scale != 0.0
            && self.y_scale != 0.0
            && self.x_scale.is_finite()
            && self.y_scale.is_finite()
            && self.dx.is_finite()
            && self.dy.is_finite()
    }
}
