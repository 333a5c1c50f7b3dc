//! Circle helpers shared by the button ring and the arc decoration.
//!
//! Angles are in degrees, 0° points along +X and angles grow clockwise on
//! screen because Y grows downward.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn shortest_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Point at `outer_radius - inner_radius` from the center along `angle_degrees`.
pub fn point_on_circle(
    center_x: f64,
    center_y: f64,
    outer_radius: f64,
    inner_radius: f64,
    angle_degrees: f64,
) -> Point {
    let angle = angle_degrees.to_radians();
    let distance = outer_radius - inner_radius;
    Point::new(
        center_x + distance * angle.cos(),
        center_y + distance * angle.sin(),
    )
}

/// Direction of the vector from `p1` to `p2`, in degrees.
pub fn angle_between(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}

pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_point_on_circle_axes() {
        let p = point_on_circle(100.0, 100.0, 50.0, 10.0, 0.0);
        assert!((p.x - 140.0).abs() < EPS);
        assert!((p.y - 100.0).abs() < EPS);

        // clockwise on screen: 90° points down
        let p = point_on_circle(100.0, 100.0, 50.0, 10.0, 90.0);
        assert!((p.x - 100.0).abs() < EPS);
        assert!((p.y - 140.0).abs() < EPS);
    }

    #[test]
    fn test_point_on_circle_degenerate_radius() {
        let p = point_on_circle(30.0, 40.0, 25.0, 25.0, 123.0);
        assert!((p.x - 30.0).abs() < EPS);
        assert!((p.y - 40.0).abs() < EPS);
    }

    #[test]
    fn test_angle_between() {
        let origin = Point::new(0.0, 0.0);
        assert!((angle_between(origin, Point::new(1.0, 0.0))).abs() < EPS);
        assert!((angle_between(origin, Point::new(0.0, 1.0)) - 90.0).abs() < EPS);
        assert!((angle_between(origin, Point::new(-1.0, 0.0)) - 180.0).abs() < EPS);
        assert!((angle_between(origin, Point::new(0.0, -1.0)) + 90.0).abs() < EPS);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(1.0, 2.0), Point::new(4.0, 6.0)) - 5.0).abs() < EPS);
        assert_eq!(distance(Point::new(3.0, 3.0), Point::new(3.0, 3.0)), 0.0);
    }

    #[test]
    fn test_rect_from_center_and_contains() {
        let r = Rect::from_center(Point::new(10.0, 10.0), 4.0, 6.0);
        assert_eq!(r, Rect::new(8.0, 7.0, 4.0, 6.0));
        assert_eq!(r.center(), Point::new(10.0, 10.0));
        assert!(r.contains(Point::new(8.0, 13.0)));
        assert!(!r.contains(Point::new(12.5, 10.0)));
    }
}
