/// Shared geometric primitives used by the selection, capture and app modules.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds toolkit pointer coordinates to whole pixels.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: round_to_i32(x),
            y: round_to_i32(y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Min-corner origin with non-negative extents, whichever way the corners
    /// were dragged.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub const fn exceeds(&self, min_dimension: u32) -> bool {
        self.width > min_dimension && self.height > min_dimension
    }
}

fn round_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
