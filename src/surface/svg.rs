use std::fmt;
use std::path::Path;

use geo_types::{Coord, Line, Polygon, Rect};
use nalgebra::Affine2;
use svg::node::element::{Ellipse, Line as SvgLine, Polygon as SvgPolygon, Rectangle};
use svg::node::Node;
use svg::Document;

use super::{CssColor, Paint, Surface};
use crate::transform::svg_matrix;

/// A surface that builds an SVG document. Each primitive keeps its local coordinates and
/// gets the turtle frame as a `transform="matrix(..)"` attribute.
///
/// # Example
///
/// ```rust
/// use structured_rs::surface::svg::SvgSurface;
/// use structured_rs::surface::CssColor;
///
/// let surface = SvgSurface::new(800.0, 600.0, &CssColor::from_rgba8(0, 0, 0, 255));
/// assert!(surface.to_string().contains("viewBox"));
/// ```
#[derive(Clone, Debug)]
pub struct SvgSurface {
    document: Document,
    width: f64,
    height: f64,
    elements: usize,
}

fn rgb(color: &CssColor) -> (String, f64) {
    let [r, g, b, a] = color.to_rgba8();
    (format!("rgb({},{},{})", r, g, b), f64::from(a) / 255.0)
}

fn matrix(transform: &Affine2<f64>) -> String {
    let [a, b, c, d, e, f] = svg_matrix(transform);
    format!("matrix({} {} {} {} {} {})", a, b, c, d, e, f)
}

fn points(polygon: &Polygon<f64>) -> String {
    let ring = polygon.exterior();
    let count = ring.0.len().saturating_sub(1).max(1);
    ring.0
        .iter()
        .take(count)
        .map(|c| format!("{},{}", c.x, c.y))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Applies stroke, fill and transform attributes shared by every element.
fn styled<N: Node>(mut node: N, transform: &Affine2<f64>, paint: &Paint) -> N {
    let (stroke, stroke_opacity) = rgb(&paint.stroke);
    node.assign("stroke", stroke);
    node.assign("stroke-opacity", stroke_opacity);
    node.assign("stroke-width", paint.stroke_weight);
    match &paint.fill {
        Some(fill) => {
            let (fill, fill_opacity) = rgb(fill);
            node.assign("fill", fill);
            node.assign("fill-opacity", fill_opacity);
        }
        None => node.assign("fill", "none"),
    }
    node.assign("transform", matrix(transform));
    node
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, background: &CssColor) -> Self {
        let (fill, opacity) = rgb(background);
        let document = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("x", 0.0)
                    .set("y", 0.0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", fill)
                    .set("fill-opacity", opacity),
            );
        SvgSurface {
            document,
            width,
            height,
            elements: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Number of primitives written so far, background excluded.
    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        svg::save(path, &self.document)
    }

    fn add<N: Node>(&mut self, node: N) {
        let document = std::mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
        self.elements += 1;
    }
}

impl fmt::Display for SvgSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

impl Surface for SvgSurface {
    fn line(&mut self, line: &Line<f64>, transform: &Affine2<f64>, paint: &Paint) {
        let node = SvgLine::new()
            .set("x1", line.start.x)
            .set("y1", line.start.y)
            .set("x2", line.end.x)
            .set("y2", line.end.y);
        // Lines are never filled.
        let paint = Paint {
            fill: None,
            ..paint.clone()
        };
        self.add(styled(node, transform, &paint));
    }

    fn rect(&mut self, rect: &Rect<f64>, transform: &Affine2<f64>, paint: &Paint) {
        let node = Rectangle::new()
            .set("x", rect.min().x)
            .set("y", rect.min().y)
            .set("width", rect.width())
            .set("height", rect.height());
        self.add(styled(node, transform, paint));
    }

    fn ellipse(
        &mut self,
        center: Coord<f64>,
        radii: Coord<f64>,
        transform: &Affine2<f64>,
        paint: &Paint,
    ) {
        let node = Ellipse::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("rx", radii.x)
            .set("ry", radii.y);
        self.add(styled(node, transform, paint));
    }

    fn polygon(&mut self, polygon: &Polygon<f64>, transform: &Affine2<f64>, paint: &Paint) {
        let node = SvgPolygon::new().set("points", points(polygon));
        self.add(styled(node, transform, paint));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;
    use crate::transform::translate_matrix;

    fn paint(fill: bool) -> Paint {
        Paint {
            stroke: CssColor::from_rgba8(255, 0, 0, 255),
            stroke_weight: 2.0,
            fill: if fill {
                Some(CssColor::from_rgba8(0, 0, 255, 51))
            } else {
                None
            },
        }
    }

    #[test]
    fn test_primitives_become_elements() {
        let mut surface = SvgSurface::new(100.0, 100.0, &CssColor::from_rgba8(0, 0, 0, 255));
        let tx = translate_matrix(50.0, 50.0);
        surface.line(&shapes::line(10.0, 10.0), &tx, &paint(false));
        surface.rect(&shapes::square(10.0, 5.0), &tx, &paint(true));
        let (center, radii) = shapes::ellipse(10.0, 5.0);
        surface.ellipse(center, radii, &tx, &paint(false));
        surface.polygon(&shapes::triangle(10.0, 5.0), &tx, &paint(true));
        assert_eq!(surface.elements(), 4);

        let text = surface.to_string();
        assert!(text.contains("<line"));
        assert!(text.contains("<rect"));
        assert!(text.contains("<ellipse"));
        assert!(text.contains("<polygon"));
        assert!(text.contains("matrix(1 0 0 1 50 50)"));
        assert!(text.contains("rgb(255,0,0)"));
        assert!(text.contains("fill-opacity=\"0.2\""));
    }

    #[test]
    fn test_polygon_points_skip_closing_point() {
        let tri = shapes::triangle(10.0, 20.0);
        assert_eq!(points(&tri), "5,20 10,0 0,0");
    }
}
