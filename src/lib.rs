//! Structured: generative drawings from randomized L-systems.
//!
//! A seed string and a parameter set drive everything. A random grammar is built with
//! [`l_system::rules::generate`], expanded for a number of generations, and the resulting
//! symbol sequence is walked by a turtle that drops lines, rectangles, ellipses, triangles,
//! hexagons and cubes onto a [`surface::Surface`] with a slowly drifting color. The same
//! parameters and seed always give the same drawing, and [`seed`] packs both into a token
//! that can be shared.
//!
//! ```rust
//! use structured_rs::prelude::*;
//!
//! let params = RenderParams::default();
//! let mut svg = SvgSurface::new(params.canvas.width, params.canvas.height, &CssColor::from_rgba8(0, 0, 0, 255));
//! let artwork = generate(&params, "k3j2h1", &mut svg).unwrap();
//! assert_eq!(artwork.report.primitives, svg.elements());
//! ```

/// Error types for parameters and seed tokens
pub mod errors;

/// L-system implementation, with expansion/recursion and random rule generation
pub mod l_system;

/// Render parameters and their config files
pub mod params;

/// Generate requests, from parameters and seed to a finished drawing
pub mod pipeline;

/// Seed tokens and seeded random streams
pub mod seed;

/// Vertex layouts for the drawable shapes
pub mod shapes;

/// Drawing surfaces: the in-memory recorder and the SVG writer
pub mod surface;

/// Affine transform helpers
pub mod transform;

/// Turtle graphics implementation, including the L-system interpreter
pub mod turtle;

/// One stop shopping: import prelude::* for the common types.
pub mod prelude {
    pub use crate::errors::{ParameterError, SeedDecodeError};
    pub use crate::l_system::{Axiom, GrammarRules, LSystem, Symbol};
    pub use crate::params::{Canvas, RenderParams, ToggleFlags};
    pub use crate::pipeline::{generate, generate_with_rng, Artwork};
    pub use crate::seed::{decode, encode, mint_seed, seeded_rng, SeedRecord};
    pub use crate::surface::svg::SvgSurface;
    pub use crate::surface::{CssColor, DrawCall, Paint, Primitive, Recorder, ShapeKind, Surface};
    pub use crate::turtle::{render, Interpreter, RenderReport};
}
