//! Drawing surfaces. The turtle never touches a canvas directly; it emits [`DrawCall`]s
//! made of a primitive in turtle-local coordinates, the affine transform of the turtle
//! frame, and the paint to use. A [`Surface`] turns those into whatever it draws on.
//!
//! Two surfaces ship with the crate: [`Recorder`], which keeps every call in memory, and
//! [`svg::SvgSurface`], which writes an SVG document.

use geo::BoundingRect;
use geo_types::{Coord, Geometry, GeometryCollection, Line, Polygon, Rect};
use nalgebra::Affine2;

use crate::shapes::ellipse_polygon;
use crate::transform::TransformGeometry;
pub use csscolorparser::Color as CssColor;

pub mod svg;

/// Number of segments used when an ellipse has to be turned into a polygon.
const ELLIPSE_SEGMENTS: usize = 64;

/// Which shape toggle produced a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Square,
    Circle,
    Triangle,
    Hexagon,
    Cube,
}

impl ShapeKind {
    /// Fixed emission order for one `F` repetition.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Line,
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
        ShapeKind::Cube,
    ];
}

/// A primitive in turtle-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line(Line<f64>),
    Rect(Rect<f64>),
    Ellipse { center: Coord<f64>, radii: Coord<f64> },
    Polygon(Polygon<f64>),
}

impl Primitive {
    /// The primitive as plain geometry. Ellipses are approximated by a polygon.
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            Primitive::Line(line) => Geometry::Line(*line),
            Primitive::Rect(rect) => Geometry::Polygon(rect.to_polygon()),
            Primitive::Ellipse { center, radii } => {
                Geometry::Polygon(ellipse_polygon(*center, *radii, ELLIPSE_SEGMENTS))
            }
            Primitive::Polygon(poly) => Geometry::Polygon(poly.clone()),
        }
    }
}

/// Stroke and optional fill. Colors already carry their final alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub stroke: CssColor,
    pub stroke_weight: f64,
    pub fill: Option<CssColor>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub kind: ShapeKind,
    pub primitive: Primitive,
    pub transform: Affine2<f64>,
    pub paint: Paint,
}

impl DrawCall {
    /// The primitive mapped through its transform into surface coordinates.
    pub fn absolute_geometry(&self) -> Geometry<f64> {
        self.primitive.to_geometry().transformed(&self.transform)
    }
}

/// What the turtle needs from a drawing backend. Every method receives the primitive in
/// turtle-local coordinates together with the transform that places it.
pub trait Surface {
    /// Called before the primitives of each enabled shape. Surfaces that group or tag
    /// output per shape override it.
    fn begin_shape(&mut self, _kind: ShapeKind) {}

    fn line(&mut self, line: &Line<f64>, transform: &Affine2<f64>, paint: &Paint);

    fn rect(&mut self, rect: &Rect<f64>, transform: &Affine2<f64>, paint: &Paint);

    fn ellipse(
        &mut self,
        center: Coord<f64>,
        radii: Coord<f64>,
        transform: &Affine2<f64>,
        paint: &Paint,
    );

    fn polygon(&mut self, polygon: &Polygon<f64>, transform: &Affine2<f64>, paint: &Paint);

    /// Dispatches a recorded call to the matching primitive method.
    fn draw(&mut self, call: &DrawCall) {
        match &call.primitive {
            Primitive::Line(line) => self.line(line, &call.transform, &call.paint),
            Primitive::Rect(rect) => self.rect(rect, &call.transform, &call.paint),
            Primitive::Ellipse { center, radii } => {
                self.ellipse(*center, *radii, &call.transform, &call.paint)
            }
            Primitive::Polygon(poly) => self.polygon(poly, &call.transform, &call.paint),
        }
    }
}

/// Keeps every draw call, in order. Replaying it onto another surface gives the same
/// picture as rendering there directly.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    calls: Vec<DrawCall>,
    kind: Option<ShapeKind>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for call in &self.calls {
            surface.begin_shape(call.kind);
            surface.draw(call);
        }
    }

    /// Bounds of everything drawn, in surface coordinates.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        GeometryCollection(self.calls.iter().map(|c| c.absolute_geometry()).collect())
            .bounding_rect()
    }

    fn push(&mut self, primitive: Primitive, transform: &Affine2<f64>, paint: &Paint) {
        self.calls.push(DrawCall {
            kind: self.kind.unwrap_or(ShapeKind::Line),
            primitive,
            transform: transform.clone(),
            paint: paint.clone(),
        });
    }
}

impl Surface for Recorder {
    fn begin_shape(&mut self, kind: ShapeKind) {
        self.kind = Some(kind);
    }

    fn line(&mut self, line: &Line<f64>, transform: &Affine2<f64>, paint: &Paint) {
        self.push(Primitive::Line(*line), transform, paint);
    }

    fn rect(&mut self, rect: &Rect<f64>, transform: &Affine2<f64>, paint: &Paint) {
        self.push(Primitive::Rect(*rect), transform, paint);
    }

    fn ellipse(
        &mut self,
        center: Coord<f64>,
        radii: Coord<f64>,
        transform: &Affine2<f64>,
        paint: &Paint,
    ) {
        self.push(Primitive::Ellipse { center, radii }, transform, paint);
    }

    fn polygon(&mut self, polygon: &Polygon<f64>, transform: &Affine2<f64>, paint: &Paint) {
        self.push(Primitive::Polygon(polygon.clone()), transform, paint);
    }
}
