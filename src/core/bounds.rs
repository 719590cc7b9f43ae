use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Axis-aligned rectangle in graph space.
///
/// Bounds are always derived (from series data or from the visible part of
/// the client rect) and never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Sentinel that any included point shrinks onto.
    ///
    /// With no points included the extents stay inverted, which the
    /// transform fit treats as degenerate on both axes.
    pub const EMPTY: Self = Self {
        min_x: f64::MAX,
        min_y: f64::MAX,
        max_x: -f64::MAX,
        max_y: -f64::MAX,
    };

    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[must_use]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Folds every point of every slice into one bounding rectangle.
    #[must_use]
    pub fn from_point_sets<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a [Point]>,
    {
        let mut bounds = Self::EMPTY;
        for points in sets {
            for point in points {
                bounds.include(*point);
            }
        }
        bounds
    }

    /// Expands to cover `point`; non-finite samples are skipped.
    pub fn include(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }
        if point.x > self.max_x {
            self.max_x = point.x;
        }
        if point.x < self.min_x {
            self.min_x = point.x;
        }
        if point.y > self.max_y {
            self.max_y = point.y;
        }
        if point.y < self.min_y {
            self.min_y = point.y;
        }
    }

    #[must_use]
    pub fn min_corner(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    #[must_use]
    pub fn max_corner(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when nothing was ever included.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// True when either axis has no positive extent.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.max_x > self.min_x && self.max_y > self.min_y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}
