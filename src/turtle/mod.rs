use geo_types::{coord, Coord};
use nalgebra::Affine2;

use crate::transform::{rotate_matrix, turtle_frame, xform_vector};

pub mod color;
pub mod interpreter;

pub use color::Hsba;
pub use interpreter::{render, Interpreter, RenderReport};

/// # Turtle Module
///
/// Logo-style turtle state for walking an L-system sequence: where the pen is, which way
/// it points and what color it carries. Brackets in the sequence save and restore whole
/// copies of it.
///
/// # Example
///
/// ```
/// use geo_types::coord;
/// use structured_rs::turtle::{degrees, Hsba, TurtleState};
///
/// let mut turtle = TurtleState::new(coord! {x: 0.0, y: 0.0}, Hsba::new(0.0, 0.0, 100.0, 1.0));
/// turtle.turn(degrees(90.0));
/// turtle.scatter(10.0);
/// assert!((turtle.position.x + 10.0).abs() < 1e-9);
/// assert!((turtle.position.y - 10.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleState {
    pub position: Coord<f64>,
    /// Radians. Zero points along +x, positive turns are clockwise on a y-down canvas.
    pub heading: f64,
    pub color: Hsba,
}

/// Helper function to convert degrees to radians
pub fn degrees(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

impl TurtleState {
    pub fn new(position: Coord<f64>, color: Hsba) -> Self {
        TurtleState {
            position,
            heading: 0.0,
            color,
        }
    }

    pub fn turn(&mut self, angle: f64) {
        self.heading += angle;
    }

    /// Steps `amount` along both local axes, so the move follows the heading.
    pub fn scatter(&mut self, amount: f64) {
        if amount == 0.0 {
            return;
        }
        let step = xform_vector(coord! {x: amount, y: amount}, &rotate_matrix(self.heading));
        self.position = self.position + step;
    }

    /// The local frame primitives are drawn in.
    pub fn frame(&self) -> Affine2<f64> {
        turtle_frame(self.position, self.heading)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transform::xform_coord;

    fn turtle() -> TurtleState {
        TurtleState::new(coord! {x: 50.0, y: 50.0}, Hsba::new(0.0, 0.0, 0.0, 1.0))
    }

    #[test]
    fn test_scatter_without_heading() {
        let mut t = turtle();
        t.scatter(5.0);
        assert_eq!(t.position, coord! {x: 55.0, y: 55.0});
        t.scatter(0.0);
        assert_eq!(t.position, coord! {x: 55.0, y: 55.0});
    }

    #[test]
    fn test_scatter_follows_heading() {
        let mut t = turtle();
        t.turn(degrees(180.0));
        t.scatter(5.0);
        assert!((t.position.x - 45.0).abs() < 1e-9);
        assert!((t.position.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_places_local_origin() {
        let mut t = turtle();
        t.turn(degrees(90.0));
        let frame = t.frame();
        let origin = xform_coord(coord! {x: 0.0, y: 0.0}, &frame);
        let ahead = xform_coord(coord! {x: 10.0, y: 0.0}, &frame);
        assert_eq!(origin, coord! {x: 50.0, y: 50.0});
        assert!((ahead.x - 50.0).abs() < 1e-9 && (ahead.y - 60.0).abs() < 1e-9);
    }
}
