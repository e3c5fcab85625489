use crate::error::GameError;
use super::{EPSILON, Point, Rect, Square};

/// Simple polygon (single ring, no holes). The ring is implicitly closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(mut vertices: Vec<Point>) -> Result<Self, GameError> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GameError::InvalidConfiguration(format!(
                "board polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(GameError::InvalidConfiguration(
                "board polygon has non-finite coordinates".to_string(),
            ));
        }
        Ok(Self { vertices })
    }

    pub fn rectangle(rect: Rect) -> Result<Self, GameError> {
        Self::new(vec![
            rect.min,
            Point::new(rect.min.x, rect.max.y),
            rect.max,
            Point::new(rect.max.x, rect.min.y),
        ])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn bounding_box(&self) -> Rect {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Rect::new(min, max)
    }

    pub fn on_boundary(&self, point: Point) -> bool {
        self.edges()
            .any(|(a, b)| point.distance_to_segment(a, b) <= EPSILON)
    }

    /// Even-odd ray cast. Boundary points give an arbitrary answer here, so
    /// callers go through [`Polygon::intersects_point`].
    fn ray_cast(&self, point: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Point lies inside or on the boundary.
    pub fn intersects_point(&self, point: Point) -> bool {
        self.on_boundary(point) || self.ray_cast(point)
    }

    /// Square lies inside the closed polygon: every corner is inside and no
    /// edge of the polygon cuts through the square.
    pub fn contains_square(&self, square: &Square) -> bool {
        if !square
            .corners()
            .iter()
            .all(|corner| self.intersects_point(*corner))
        {
            return false;
        }
        let rect = square.rect();
        !self.edges().any(|(a, b)| rect.segment_enters_interior(a, b))
    }

    /// A point guaranteed to be on the polygon's surface. Prefers the bounding
    /// box center; otherwise the middle of the first interior span on the
    /// horizontal line through it.
    pub fn point_on_surface(&self) -> Point {
        let bbox = self.bounding_box();
        let center = bbox.center();
        if self.ray_cast(center) {
            return center;
        }

        let y = center.y;
        let mut crossings: Vec<f64> = self
            .edges()
            .filter(|(a, b)| (a.y > y) != (b.y > y))
            .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
            .collect();
        crossings.sort_by(|a, b| a.total_cmp(b));

        match crossings.as_slice() {
            [left, right, ..] => Point::new((left + right) / 2.0, y),
            _ => self.vertices[0],
        }
    }
}
