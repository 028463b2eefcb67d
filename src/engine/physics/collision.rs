use glam::Vec2;
use std::ops::{BitOr, BitOrAssign};

use super::body::Body;

/// Axis-aligned rectangle in world units (+y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Zero (or negative) area rectangles never collide
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !(size.x > 0.0 && size.y > 0.0)
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Classification of which edges take part in a collision.
///
/// For a border check the bits name the body edges that crossed the
/// matching border edge. For a pair check they name the edges of the first
/// rectangle that overlap the second one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeMask(u8);

impl EdgeMask {
    pub const NONE: EdgeMask = EdgeMask(0);
    pub const LEFT: EdgeMask = EdgeMask(0b0001);
    pub const RIGHT: EdgeMask = EdgeMask(0b0010);
    pub const TOP: EdgeMask = EdgeMask(0b0100);
    pub const BOTTOM: EdgeMask = EdgeMask(0b1000);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: EdgeMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Left or right edge involved: the response acts on x
    pub const fn is_horizontal(self) -> bool {
        self.0 & (Self::LEFT.0 | Self::RIGHT.0) != 0
    }

    /// Top or bottom edge involved: the response acts on y
    pub const fn is_vertical(self) -> bool {
        self.0 & (Self::TOP.0 | Self::BOTTOM.0) != 0
    }

    /// The same contact seen from the other rectangle
    pub const fn mirrored(self) -> EdgeMask {
        let b = self.0;
        EdgeMask(((b & 0b0101) << 1) | ((b & 0b1010) >> 1))
    }
}

impl BitOr for EdgeMask {
    type Output = EdgeMask;

    fn bitor(self, rhs: EdgeMask) -> EdgeMask {
        EdgeMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for EdgeMask {
    fn bitor_assign(&mut self, rhs: EdgeMask) {
        self.0 |= rhs.0;
    }
}

/// Classify how a body rectangle sits against the arena border.
///
/// A body whose center lies outside the border reports no collision; only
/// edges of a center-inside body crossing the border count.
// TODO: revisit the center-outside rule if fast bodies visibly tunnel through the border
pub fn detect_border(body: &Rect, border: &Rect) -> EdgeMask {
    if body.is_degenerate() || !border.contains(body.center()) {
        return EdgeMask::NONE;
    }

    let mut mask = EdgeMask::NONE;
    if body.min.x < border.min.x {
        mask |= EdgeMask::LEFT;
    }
    if body.max.x > border.max.x {
        mask |= EdgeMask::RIGHT;
    }
    if body.max.y > border.max.y {
        mask |= EdgeMask::TOP;
    }
    if body.min.y < border.min.y {
        mask |= EdgeMask::BOTTOM;
    }
    mask
}

/// Classify the overlap of two rectangles.
///
/// The contact axis is the one with the shallower penetration (both on a
/// tie). On that axis the bits name the edges of `a` that overlap `b`; when
/// the centers coincide on the axis both edges are reported.
pub fn detect_pair(a: &Rect, b: &Rect) -> EdgeMask {
    if a.is_degenerate() || b.is_degenerate() || !a.intersects(b) {
        return EdgeMask::NONE;
    }

    let overlap_x = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
    let overlap_y = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
    let (ca, cb) = (a.center(), b.center());

    let mut mask = EdgeMask::NONE;
    if overlap_x <= overlap_y {
        mask |= side(ca.x, cb.x, EdgeMask::RIGHT, EdgeMask::LEFT);
    }
    if overlap_y <= overlap_x {
        mask |= side(ca.y, cb.y, EdgeMask::TOP, EdgeMask::BOTTOM);
    }
    mask
}

/// Edge of the first rectangle facing the second along one axis
fn side(a: f32, b: f32, toward_positive: EdgeMask, toward_negative: EdgeMask) -> EdgeMask {
    if a < b {
        toward_positive
    } else if a > b {
        toward_negative
    } else {
        toward_positive | toward_negative
    }
}

/// Per-frame N x N table of classification masks.
///
/// `get(i, i)` is body i against the border; `get(i, j)` is the overlap of
/// bodies i and j. Rebuilt from scratch every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMatrix {
    size: usize,
    cells: Vec<EdgeMask>,
}

impl CollisionMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![EdgeMask::NONE; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> EdgeMask {
        self.cells[i * self.size + j]
    }

    pub fn set(&mut self, i: usize, j: usize, mask: EdgeMask) {
        self.cells[i * self.size + j] = mask;
    }

    /// Number of non-empty cells
    pub fn hits(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }
}

/// Classify every body against the border and against every other body
pub fn detect(bodies: &[Body], border: &Rect) -> CollisionMatrix {
    let n = bodies.len();
    let mut matrix = CollisionMatrix::new(n);
    let rects: Vec<Rect> = bodies.iter().map(Body::rect).collect();

    for i in 0..n {
        for j in 0..n {
            let mask = if i == j {
                detect_border(&rects[i], border)
            } else {
                detect_pair(&rects[i], &rects[j])
            };
            matrix.set(i, j, mask);
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::BodyBuilder;

    fn rect(cx: f32, cy: f32, w: f32, h: f32) -> Rect {
        Rect::from_center(Vec2::new(cx, cy), Vec2::new(w, h))
    }

    fn border() -> Rect {
        rect(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_edge_mask_bits_unique() {
        let masks = [EdgeMask::LEFT, EdgeMask::RIGHT, EdgeMask::TOP, EdgeMask::BOTTOM];
        for (i, a) in masks.iter().enumerate() {
            assert_eq!(a.bits().count_ones(), 1);
            for (j, b) in masks.iter().enumerate() {
                if i != j {
                    assert_ne!(a.bits(), b.bits(), "Edges must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_edge_mask_mirror() {
        assert_eq!(EdgeMask::LEFT.mirrored(), EdgeMask::RIGHT);
        assert_eq!(EdgeMask::TOP.mirrored(), EdgeMask::BOTTOM);
        let both = EdgeMask::LEFT | EdgeMask::RIGHT;
        assert_eq!(both.mirrored(), both);
    }

    #[test]
    fn test_body_inside_border_no_collision() {
        assert_eq!(detect_border(&rect(0.0, 0.0, 10.0, 10.0), &border()), EdgeMask::NONE);
    }

    #[test]
    fn test_border_right_edge() {
        let mask = detect_border(&rect(48.0, 0.0, 10.0, 10.0), &border());
        assert_eq!(mask, EdgeMask::RIGHT);
    }

    #[test]
    fn test_border_each_edge() {
        assert_eq!(detect_border(&rect(-48.0, 0.0, 10.0, 10.0), &border()), EdgeMask::LEFT);
        assert_eq!(detect_border(&rect(0.0, 48.0, 10.0, 10.0), &border()), EdgeMask::TOP);
        assert_eq!(detect_border(&rect(0.0, -48.0, 10.0, 10.0), &border()), EdgeMask::BOTTOM);
    }

    #[test]
    fn test_border_corner_sets_two_bits() {
        let mask = detect_border(&rect(48.0, -48.0, 10.0, 10.0), &border());
        assert!(mask.contains(EdgeMask::RIGHT));
        assert!(mask.contains(EdgeMask::BOTTOM));
        assert!(!mask.contains(EdgeMask::LEFT));
    }

    #[test]
    fn test_border_center_outside_is_not_a_hit() {
        let mask = detect_border(&rect(52.0, 0.0, 10.0, 10.0), &border());
        assert_eq!(mask, EdgeMask::NONE);
    }

    #[test]
    fn test_body_larger_than_border_sets_all_bits() {
        let mask = detect_border(&rect(0.0, 0.0, 200.0, 200.0), &border());
        assert_eq!(mask.bits(), 0b1111);
    }

    #[test]
    fn test_border_detection_idempotent() {
        let body = rect(47.0, 47.0, 10.0, 10.0);
        let first = detect_border(&body, &border());
        let second = detect_border(&body, &border());
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_body_never_collides() {
        let flat = rect(50.0, 0.0, 10.0, 0.0);
        assert_eq!(detect_border(&flat, &border()), EdgeMask::NONE);
        assert_eq!(detect_pair(&flat, &rect(50.0, 0.0, 10.0, 10.0)), EdgeMask::NONE);
    }

    #[test]
    fn test_extreme_dimensions_stay_in_mask_range() {
        let huge = rect(0.0, 0.0, f32::MAX, f32::MAX);
        let tiny = rect(0.0, 0.0, f32::MIN_POSITIVE, f32::MIN_POSITIVE);
        assert!(detect_border(&huge, &border()).bits() <= 0b1111);
        assert!(detect_pair(&huge, &tiny).bits() <= 0b1111);
    }

    #[test]
    fn test_separated_rects_no_collision() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(5.0, 0.0, 2.0, 2.0);
        assert_eq!(detect_pair(&a, &b), EdgeMask::NONE);
        assert_eq!(detect_pair(&b, &a), EdgeMask::NONE);
    }

    #[test]
    fn test_touching_rects_no_collision() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 2.0, 2.0);
        assert_eq!(detect_pair(&a, &b), EdgeMask::NONE);
    }

    #[test]
    fn test_identical_rects_collide() {
        let a = rect(3.0, 3.0, 2.0, 4.0);
        let mask = detect_pair(&a, &a);
        assert!(!mask.is_empty());
        assert!(mask.contains(EdgeMask::LEFT | EdgeMask::RIGHT));
    }

    #[test]
    fn test_horizontal_overlap_classified_on_x() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.5, 0.2, 2.0, 2.0);

        assert_eq!(detect_pair(&a, &b), EdgeMask::RIGHT);
        assert_eq!(detect_pair(&b, &a), EdgeMask::LEFT);
    }

    #[test]
    fn test_vertical_overlap_classified_on_y() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(0.3, -1.8, 2.0, 2.0);

        assert_eq!(detect_pair(&a, &b), EdgeMask::BOTTOM);
        assert_eq!(detect_pair(&b, &a), EdgeMask::TOP);
    }

    #[test]
    fn test_pair_masks_are_mirrors() {
        let a = rect(0.0, 0.0, 3.0, 2.0);
        let b = rect(1.0, 1.0, 3.0, 2.0);
        assert_eq!(detect_pair(&a, &b).mirrored(), detect_pair(&b, &a));
    }

    #[test]
    fn test_detect_builds_full_matrix() {
        let bodies = [
            BodyBuilder::new(1.0).size(10.0, 10.0).position(-2.0, 0.0).build(),
            BodyBuilder::new(1.0).size(10.0, 10.0).position(2.0, 0.0).build(),
            BodyBuilder::new(1.0).size(10.0, 10.0).position(47.0, 30.0).build(),
        ];
        let matrix = detect(&bodies, &border());

        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.get(0, 1), EdgeMask::RIGHT);
        assert_eq!(matrix.get(1, 0), EdgeMask::LEFT);
        assert_eq!(matrix.get(0, 0), EdgeMask::NONE);
        assert_eq!(matrix.get(2, 2), EdgeMask::RIGHT);
        assert_eq!(matrix.get(0, 2), EdgeMask::NONE);
        assert_eq!(matrix.hits(), 3);
    }

    #[test]
    fn test_detect_empty_world() {
        let matrix = detect(&[], &border());
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.hits(), 0);
    }
}
