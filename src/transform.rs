//! Value-typed 2D affine transforms. The turtle hands one of these to the surface with
//! every primitive instead of mutating a canvas-side matrix stack.

use geo::{Coord, MapCoords};
use geo_types::{coord, Geometry};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};

/// Helper to create a translation matrix
pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
}

/// Rotation in radians. Positive angles turn +x towards +y, which on a y-down canvas
/// is clockwise.
pub fn rotate_matrix(radians: f64) -> Affine2<f64> {
    let (sin, cos) = radians.sin_cos();
    Affine2::from_matrix_unchecked(Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0))
}

/// The turtle frame: rotate by `heading`, then move to `position`.
pub fn turtle_frame(position: Coord<f64>, heading: f64) -> Affine2<f64> {
    translate_matrix(position.x, position.y) * rotate_matrix(heading)
}

pub fn xform_coord(xy: Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
    let out = affine * NPoint2::new(xy.x, xy.y);
    coord!(x: out.x, y: out.y)
}

/// Rotates (and scales, if present) a vector without translating it.
pub fn xform_vector(xy: Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
    let m = affine.matrix();
    coord! {
        x: m[(0, 0)] * xy.x + m[(0, 1)] * xy.y,
        y: m[(1, 0)] * xy.x + m[(1, 1)] * xy.y,
    }
}

/// The six numbers of an SVG/canvas `matrix(a b c d e f)`.
pub fn svg_matrix(affine: &Affine2<f64>) -> [f64; 6] {
    let m = affine.matrix();
    [
        m[(0, 0)],
        m[(1, 0)],
        m[(0, 1)],
        m[(1, 1)],
        m[(0, 2)],
        m[(1, 2)],
    ]
}

pub trait TransformGeometry {
    fn transformed(&self, affine: &Affine2<f64>) -> Geometry<f64>;
}

impl TransformGeometry for Geometry<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Geometry<f64> {
        self.map_coords(|xy| xform_coord(xy, affine))
    }
}
