//! Vertex layouts for the six shape kinds. Every shape is laid out in the turtle's local
//! frame inside the box spanned by the origin and `(w, h)`; the turtle transform places it.
//! `w` and `h` may be negative, which mirrors the box.

use geo_types::{coord, Coord, Line, LineString, Polygon, Rect};
use std::f64::consts::PI;

/// `cos(60°)`, used for the slanted edges of hexagons and cubes.
const COS_60: f64 = 0.5;

fn poly(points: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(LineString::from(points.to_vec()), vec![])
}

/// From the origin to the far corner of the box.
pub fn line(w: f64, h: f64) -> Line<f64> {
    Line::new(coord! {x: 0.0, y: 0.0}, coord! {x: w, y: h})
}

pub fn square(w: f64, h: f64) -> Rect<f64> {
    Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: w, y: h})
}

/// The ellipse inscribed in the box, as `(center, radii)`.
pub fn ellipse(w: f64, h: f64) -> (Coord<f64>, Coord<f64>) {
    (
        coord! {x: w / 2.0, y: h / 2.0},
        coord! {x: (w / 2.0).abs(), y: (h / 2.0).abs()},
    )
}

/// Apex at the middle of the `y = h` edge, base along `y = 0`.
pub fn triangle(w: f64, h: f64) -> Polygon<f64> {
    poly(&[(w / 2.0, h), (w, 0.0), (0.0, 0.0)])
}

/// Regular hexagon around the box center, vertices every 60 degrees, stretched to the box.
pub fn hexagon(w: f64, h: f64) -> Polygon<f64> {
    let (cx, cy) = (w / 2.0, h / 2.0);
    let points: Vec<(f64, f64)> = (0..6u32)
        .map(|i| {
            let angle = f64::from(i) * PI / 3.0;
            (cx + cx * angle.cos(), cy + cy * angle.sin())
        })
        .collect();
    poly(&points)
}

/// Three rhombus faces (top, left, right) meeting at the box center.
pub fn cube(w: f64, h: f64) -> [Polygon<f64>; 3] {
    let offset = (h / 2.0) * COS_60;
    let (cx, cy) = (w / 2.0, h / 2.0);
    [
        poly(&[(cx, 0.0), (w, offset), (cx, cy), (0.0, offset)]),
        poly(&[(cx, h), (0.0, h - offset), (0.0, offset), (cx, cy)]),
        poly(&[(w, offset), (w, h - offset), (cx, h), (cx, cy)]),
    ]
}

/// An ellipse approximated by a ring of `segments` points. `Polygon::new` closes it.
pub fn ellipse_polygon(center: Coord<f64>, radii: Coord<f64>, segments: usize) -> Polygon<f64> {
    let segments = segments.max(3);
    Polygon::new(
        LineString::new(
            (0..segments)
                .map(|i| {
                    let angle = (f64::from(i as u32) / f64::from(segments as u32)) * (2.0 * PI);
                    coord! {x: center.x + angle.cos() * radii.x, y: center.y + angle.sin() * radii.y}
                })
                .collect(),
        ),
        vec![],
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::BoundingRect;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_triangle_layout() {
        let tri = triangle(10.0, 20.0);
        let pts: Vec<Coord<f64>> = tri.exterior().coords().cloned().collect();
        assert_eq!(pts[0], coord! {x: 5.0, y: 20.0});
        assert_eq!(pts[1], coord! {x: 10.0, y: 0.0});
        assert_eq!(pts[2], coord! {x: 0.0, y: 0.0});
    }

    #[test]
    fn test_hexagon_fits_box() {
        let hex = hexagon(40.0, 20.0);
        assert_eq!(hex.exterior().coords().count(), 7);
        let bounds = hex.bounding_rect().unwrap();
        assert!(approx(bounds.min().x, 0.0));
        assert!(approx(bounds.max().x, 40.0));
        assert!(bounds.min().y >= -1e-9 && bounds.max().y <= 20.0 + 1e-9);
    }

    #[test]
    fn test_cube_faces_share_center() {
        let center = coord! {x: 15.0, y: 10.0};
        for face in cube(30.0, 20.0) {
            assert!(face.exterior().coords().any(|c| *c == center));
        }
        let top = &cube(30.0, 20.0)[0];
        assert!(top.exterior().coords().any(|c| approx(c.y, 20.0 / 2.0 * COS_60)));
    }

    #[test]
    fn test_ellipse_inscribed() {
        let (center, radii) = ellipse(-8.0, 6.0);
        assert_eq!(center, coord! {x: -4.0, y: 3.0});
        assert_eq!(radii, coord! {x: 4.0, y: 3.0});
        let ring = ellipse_polygon(center, radii, 32);
        assert_eq!(ring.exterior().0.len(), 33);
        assert!(ring.exterior().is_closed());
        let bounds = ring.bounding_rect().unwrap();
        assert!(approx(bounds.min().x, -8.0) && approx(bounds.max().x, 0.0));
    }
}
