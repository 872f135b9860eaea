//! Core types for the layout engine

use serde::Serialize;

/// A 2D point in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Width and height of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A bounding box representing the spatial extent of a card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Area shared by two boxes, zero when they only touch or are apart
    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let overlap_w = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if overlap_w > 0.0 && overlap_h > 0.0 {
            overlap_w * overlap_h
        } else {
            0.0
        }
    }
}

/// Index of a card in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub usize);

/// How the layout engine treats a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    /// Author-positioned; only ever an obstacle
    Fixed,
    /// Placed by the engine on every pass
    Random,
}

impl PlacementKind {
    /// Class name marking this kind in page markup
    pub fn class_name(&self) -> &'static str {
        match self {
            PlacementKind::Fixed => "fixed",
            PlacementKind::Random => "random",
        }
    }
}

/// Bounding box of a card already placed during the current pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementRecord {
    pub card: CardId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

impl PlacementRecord {
    pub fn new(card: CardId, bounds: BoundingBox) -> Self {
        Self {
            card,
            left: bounds.x,
            top: bounds.y,
            width: bounds.width,
            height: bounds.height,
            area: bounds.area(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}

/// Final position chosen for one random card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub card: CardId,
    pub position: Point,
    pub size: Size,
    /// Rotation in degrees, clockwise positive
    pub rotation: f64,
    /// Candidates drawn before one was accepted
    pub attempts: u32,
    /// Retry budget ran out and the last candidate was kept
    pub exhausted: bool,
}

impl Placement {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_origin(self.position, self.size)
    }
}

/// Outcome of one layout pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPass {
    /// Fixed cards first, then random cards in processing order
    pub obstacles: Vec<PlacementRecord>,
    pub placements: Vec<Placement>,
}

impl LayoutPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the placement chosen for a card
    pub fn placement(&self, card: CardId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.card == card)
    }

    /// Number of placements that fell back to the last candidate
    pub fn exhausted_count(&self) -> usize {
        self.placements.iter().filter(|p| p.exhausted).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_area_overlapping() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection_area(&b), 2500.0);
        assert_eq!(b.intersection_area(&a), 2500.0);
    }

    #[test]
    fn test_intersection_area_touching_edges() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(100.0, 0.0, 100.0, 100.0);
        assert_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn test_intersection_area_contained() {
        let outer = BoundingBox::new(0.0, 0.0, 300.0, 300.0);
        let inner = BoundingBox::new(10.0, 20.0, 50.0, 40.0);
        assert_eq!(outer.intersection_area(&inner), inner.area());
    }

    #[test]
    fn test_placement_record_area() {
        let record = PlacementRecord::new(CardId(3), BoundingBox::new(10.0, 10.0, 200.0, 100.0));
        assert_eq!(record.area, 20000.0);
        assert_eq!(record.bounds().right(), 210.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(120.0, 80.0) - Point::new(20.0, 30.0);
        assert_eq!(p, Point::new(100.0, 50.0));
        assert_eq!(p + Point::new(1.0, 1.0), Point::new(101.0, 51.0));
    }
}
