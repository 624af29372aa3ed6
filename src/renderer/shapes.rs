//! Shape generation for 2D primitives
//!
//! All outlines are relative to the entity centre and unrotated; the surface
//! applies rotation and translation.

use glam::Vec2;
use std::f32::consts::PI;

/// Triangular hull pointing along +x, scaled from the ship radius
///
/// A radius of 15 gives the classic (20, 0), (-10, -10), (-10, 10) hull.
pub fn ship_hull(radius: f32) -> [Vec2; 3] {
    let nose = radius * 4.0 / 3.0;
    let back = radius * 2.0 / 3.0;
    [
        Vec2::new(nose, 0.0),
        Vec2::new(-back, -back),
        Vec2::new(-back, back),
    ]
}

/// Five-point star traced by visiting every second outer point
pub fn star(radius: f32) -> Vec<Vec2> {
    (0..5)
        .map(|i| {
            let theta = i as f32 * 4.0 * PI / 5.0;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_hull_classic_proportions() {
        let hull = ship_hull(15.0);
        assert!((hull[0] - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!((hull[1] - Vec2::new(-10.0, -10.0)).length() < 1e-4);
        assert!((hull[2] - Vec2::new(-10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_star_points_on_circle() {
        let points = star(15.0);
        assert_eq!(points.len(), 5);
        for p in &points {
            assert!((p.length() - 15.0).abs() < 1e-4);
        }
    }
}
