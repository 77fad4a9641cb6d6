//! Axis-aligned damage regions.

use core::fmt;

use crate::error::{Error, Result};

/// Half-open rectangle in row-major pixel coordinates.
///
/// Rows span `row_start..row_end` and columns `col_start..col_end`. Coordinates
/// are signed so regions reaching past the top or left edge can be expressed;
/// they are clamped against the image when a mask is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub row_start: i32,
    pub row_end: i32,
    pub col_start: i32,
    pub col_end: i32,
}

/// A [`Rect`] intersected with an image, guaranteed non-empty and in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampedRect {
    pub rows: core::ops::Range<usize>,
    pub cols: core::ops::Range<usize>,
}

impl Rect {
    /// Create a rectangle, rejecting inverted ranges.
    pub fn new(row_start: i32, row_end: i32, col_start: i32, col_end: i32) -> Result<Self> {
        let rect = Self {
            row_start,
            row_end,
            col_start,
            col_end,
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Fail with [`Error::InvalidRectangle`] when a start lies past its end.
    pub fn validate(&self) -> Result<()> {
        if self.row_start > self.row_end || self.col_start > self.col_end {
            return Err(Error::InvalidRectangle(*self));
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        (self.row_end as i64 - self.row_start as i64).max(0) as usize
    }

    pub fn width(&self) -> usize {
        (self.col_end as i64 - self.col_start as i64).max(0) as usize
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.row_start <= row && row < self.row_end && self.col_start <= col && col < self.col_end
    }

    /// Intersect with `[0, height) x [0, width)`.
    ///
    /// Returns `None` when nothing of the rectangle is left inside the image.
    pub fn clamp_to(&self, shape: (usize, usize)) -> Option<ClampedRect> {
        let (height, width) = shape;
        let rows = clamp_range(self.row_start, self.row_end, height);
        let cols = clamp_range(self.col_start, self.col_end, width);
        if rows.is_empty() || cols.is_empty() {
            return None;
        }
        Some(ClampedRect { rows, cols })
    }
}

fn clamp_range(start: i32, end: i32, len: usize) -> core::ops::Range<usize> {
    let clamp = |value: i32| (value.max(0) as usize).min(len);
    clamp(start)..clamp(end)
}

impl ClampedRect {
    pub fn area(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

impl TryFrom<(i32, i32, i32, i32)> for Rect {
    type Error = Error;

    fn try_from(value: (i32, i32, i32, i32)) -> Result<Self> {
        Self::new(value.0, value.1, value.2, value.3)
    }
}

impl TryFrom<[i32; 4]> for Rect {
    type Error = Error;

    fn try_from(value: [i32; 4]) -> Result<Self> {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}, {}:{}]",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}
