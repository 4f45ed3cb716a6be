//! Frame geometry: points, sizes, rectangles.

use serde::{Deserialize, Serialize};

/// A point in frame (device) or window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, used for the rendered device content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `(px, py)` lies inside the rectangle (right and bottom edges exclusive).
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        px >= self.x && i64::from(px) < right && py >= self.y && i64::from(py) < bottom
    }
}

/// An absolute position on the device: a point plus the frame size it refers to.
///
/// A zero `screen_size` means "no absolute position" (relative pointer mode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub screen_size: Size,
    pub point: Point,
}

impl Position {
    #[must_use]
    pub const fn new(screen_size: Size, point: Point) -> Self {
        Self { screen_size, point }
    }
}

/// Mirror `point` through the center of a `size`-sized frame.
///
/// Each axis is mirrored independently: with only `invert_x` the reflection is
/// across the vertical center line, with both flags it is a point reflection
/// through the center. Applying it twice with the same flags is the identity.
#[must_use]
pub fn inverse_point(point: Point, size: Size, invert_x: bool, invert_y: bool) -> Point {
    let mut out = point;
    if invert_x {
        out.x = mirror(size.width, point.x);
    }
    if invert_y {
        out.y = mirror(size.height, point.y);
    }
    out
}

fn mirror(extent: u32, value: i32) -> i32 {
    let mirrored = i64::from(extent) - i64::from(value);
    i32::try_from(mirrored).unwrap_or(if mirrored < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_point_x_only() {
        let p = inverse_point(Point::new(100, 200), Size::new(1080, 1920), true, false);
        assert_eq!(p, Point::new(980, 200));
    }

    #[test]
    fn inverse_point_through_center() {
        let p = inverse_point(Point::new(100, 200), Size::new(1080, 1920), true, true);
        assert_eq!(p, Point::new(980, 1720));
    }

    #[test]
    fn inverse_point_no_flags_is_identity() {
        let p = Point::new(-5, 7000);
        assert_eq!(inverse_point(p, Size::new(10, 10), false, false), p);
    }

    #[test]
    fn inverse_point_is_involutive() {
        let sizes = [Size::new(0, 0), Size::new(1, 1), Size::new(1080, 2400)];
        let points = [
            Point::new(0, 0),
            Point::new(540, 1200),
            Point::new(-30, 5000),
            Point::new(1079, 1),
        ];
        for size in sizes {
            for point in points {
                for (ix, iy) in [(false, false), (true, false), (false, true), (true, true)] {
                    let once = inverse_point(point, size, ix, iy);
                    assert_eq!(inverse_point(once, size, ix, iy), point);
                }
            }
        }
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert!(r.contains(10, 20));
        assert!(r.contains(109, 69));
        assert!(!r.contains(110, 30));
        assert!(!r.contains(50, 70));
        assert!(!r.contains(9, 30));
    }
}
