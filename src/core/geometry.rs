use serde::{Deserialize, Serialize};

/// One data sample in graph space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel position on the render surface; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel displacement, e.g. the pointer delta observed during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenVector {
    pub x: f64,
    pub y: f64,
}

impl ScreenVector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Axis-aligned pixel rectangle anchored at its top-left corner.
///
/// Width and height may be negative while a drag is in progress; the sign
/// records the drag direction. Use [`ScreenRect::normalized`] to obtain the
/// equivalent rectangle with non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-extent rectangle anchored at `point`.
    #[must_use]
    pub const fn anchored_at(point: ScreenPoint) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn top_left(self) -> ScreenPoint {
        ScreenPoint::new(self.left(), self.top())
    }

    #[must_use]
    pub fn top_right(self) -> ScreenPoint {
        ScreenPoint::new(self.right(), self.top())
    }

    #[must_use]
    pub fn bottom_left(self) -> ScreenPoint {
        ScreenPoint::new(self.left(), self.bottom())
    }

    #[must_use]
    pub fn bottom_right(self) -> ScreenPoint {
        ScreenPoint::new(self.right(), self.bottom())
    }

    #[must_use]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Flips the origin so that width and height are non-negative.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut rect = self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    /// Hit test, inclusive of the top-left edge and exclusive of the bottom-right edge.
    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        let rect = self.normalized();
        point.x >= rect.left()
            && point.x < rect.right()
            && point.y >= rect.top()
            && point.y < rect.bottom()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}
