use super::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to_segment(&self, a: Point, b: Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            return ((self.x - a.x).powi(2) + (self.y - a.y).powi(2)).sqrt();
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
        let px = a.x + t * dx;
        let py = a.y + t * dy;
        ((self.x - px).powi(2) + (self.y - py).powi(2)).sqrt()
    }
}

/// Closed axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min.x - EPSILON
            && point.x <= self.max.x + EPSILON
            && point.y >= self.min.y - EPSILON
            && point.y <= self.max.y + EPSILON
    }

    pub fn contains_point_strictly(&self, point: Point) -> bool {
        point.x > self.min.x + EPSILON
            && point.x < self.max.x - EPSILON
            && point.y > self.min.y + EPSILON
            && point.y < self.max.y - EPSILON
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x + EPSILON
            && other.min.x <= self.max.x + EPSILON
            && self.min.y <= other.max.y + EPSILON
            && other.min.y <= self.max.y + EPSILON
    }

    /// Whether the segment `a`-`b` passes through the open interior.
    /// Segments running along an edge or touching a corner do not count.
    pub fn segment_enters_interior(&self, a: Point, b: Point) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        // Liang-Barsky clipping against the closed rectangle.
        let clips = [
            (-dx, a.x - self.min.x),
            (dx, self.max.x - a.x),
            (-dy, a.y - self.min.y),
            (dy, self.max.y - a.y),
        ];
        for (p, q) in clips {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }

        if t1 <= t0 {
            return false;
        }

        // The rectangle is convex, so the clipped piece is interior somewhere
        // iff its midpoint is.
        let t = (t0 + t1) / 2.0;
        self.contains_point_strictly(Point::new(a.x + dx * t, a.y + dy * t))
    }
}

/// Axis-aligned square: one snake part or one food item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub anchor: Point,
    pub side: f64,
}

impl Square {
    pub fn new(anchor: Point, side: f64) -> Self {
        Self { anchor, side }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.anchor,
            Point::new(self.anchor.x + self.side, self.anchor.y + self.side),
        )
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            self.anchor.x + self.side / 2.0,
            self.anchor.y + self.side / 2.0,
        )
    }

    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.anchor;
        let s = self.side;
        [
            Point::new(x, y),
            Point::new(x, y + s),
            Point::new(x + s, y + s),
            Point::new(x + s, y),
        ]
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains_point(point)
    }

    pub fn contains_square(&self, other: &Square) -> bool {
        other.corners().iter().all(|corner| self.contains_point(*corner))
    }
}
