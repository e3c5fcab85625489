use std::sync::Arc;

use crate::error::GameError;
use crate::geometry::{Point, Polygon, Rect};

/// Read-only play area. Fixed for the lifetime of a session.
pub trait BoardGeometry {
    fn boundary_polygon(&self) -> &Polygon;
    fn bounding_box(&self) -> Rect;
    fn center(&self) -> Point;
}

impl<T: BoardGeometry + ?Sized> BoardGeometry for &T {
    fn boundary_polygon(&self) -> &Polygon {
        (**self).boundary_polygon()
    }

    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }

    fn center(&self) -> Point {
        (**self).center()
    }
}

impl<T: BoardGeometry + ?Sized> BoardGeometry for Arc<T> {
    fn boundary_polygon(&self) -> &Polygon {
        (**self).boundary_polygon()
    }

    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }

    fn center(&self) -> Point {
        (**self).center()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolygonBoard {
    polygon: Polygon,
    bounding_box: Rect,
    center: Point,
}

impl PolygonBoard {
    pub fn new(polygon: Polygon) -> Self {
        let center = polygon.point_on_surface();
        Self::with_center(polygon, center)
    }

    pub fn with_center(polygon: Polygon, center: Point) -> Self {
        Self {
            bounding_box: polygon.bounding_box(),
            polygon,
            center,
        }
    }

    pub fn rectangle(origin: Point, width: f64, height: f64) -> Result<Self, GameError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(GameError::InvalidConfiguration(format!(
                "board must have a positive size, got {}x{}",
                width, height
            )));
        }
        let rect = Rect::new(origin, Point::new(origin.x + width, origin.y + height));
        Ok(Self::new(Polygon::rectangle(rect)?))
    }
}

impl BoardGeometry for PolygonBoard {
    fn boundary_polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    fn center(&self) -> Point {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_board() {
        let board = PolygonBoard::rectangle(Point::new(0.0, 0.0), 500.0, 300.0).unwrap();
        assert_eq!(board.center(), Point::new(250.0, 150.0));
        assert_eq!(board.bounding_box().width(), 500.0);
        assert_eq!(board.boundary_polygon().vertices().len(), 4);
    }

    #[test]
    fn test_rectangle_board_rejects_empty_size() {
        assert!(PolygonBoard::rectangle(Point::new(0.0, 0.0), 0.0, 10.0).is_err());
        assert!(PolygonBoard::rectangle(Point::new(0.0, 0.0), 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_board_by_reference() {
        fn center_of(board: impl BoardGeometry) -> Point {
            board.center()
        }
        let board = PolygonBoard::rectangle(Point::new(10.0, 10.0), 20.0, 20.0).unwrap();
        assert_eq!(center_of(&board), Point::new(20.0, 20.0));
        assert_eq!(center_of(Arc::new(board)), Point::new(20.0, 20.0));
    }
}
