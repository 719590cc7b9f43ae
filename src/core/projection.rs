#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CoordinateTransform, Point, ScreenPoint};

/// Projects a series into screen space, preserving order.
///
/// Pure and side-effect free; the render coordinator calls it once per
/// series per frame.
#[must_use]
pub fn project_points(points: &[Point], transform: &CoordinateTransform) -> Vec<ScreenPoint> {
    // Large series go through rayon when enabled; output order is unchanged.
    #[cfg(feature = "parallel-projection")]
    {
        points
            .par_iter()
            .map(|point| transform.to_screen(*point))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .map(|point| transform.to_screen(*point))
            .collect()
    }
}
