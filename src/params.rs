//! Render parameters: the knobs a caller turns to get a different drawing, their valid
//! ranges, and loading/saving them as RON config files.

use std::fs;
use std::path::Path;

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;
use crate::surface::ShapeKind;
use crate::turtle::degrees;

/// Which shapes each `F` draws, which of them are filled, and the sizing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFlags {
    pub line: bool,
    pub square: bool,
    pub circle: bool,
    pub triangle: bool,
    pub hex: bool,
    pub cube: bool,
    pub square_fill: bool,
    pub circle_fill: bool,
    pub triangle_fill: bool,
    pub hex_fill: bool,
    pub cube_fill: bool,
    /// Derive each shape's height from its width through the width/height ratios.
    #[serde(default = "default_ratio_link")]
    pub ratio_link: bool,
    /// Draw every shape at one length fixed by the generation count instead of a random size.
    #[serde(default)]
    pub fixed_length: bool,
}

fn default_ratio_link() -> bool {
    true
}

impl ToggleFlags {
    pub fn enabled(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Line => self.line,
            ShapeKind::Square => self.square,
            ShapeKind::Circle => self.circle,
            ShapeKind::Triangle => self.triangle,
            ShapeKind::Hexagon => self.hex,
            ShapeKind::Cube => self.cube,
        }
    }

    /// Lines have no fill toggle and are never filled.
    pub fn filled(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Line => false,
            ShapeKind::Square => self.square_fill,
            ShapeKind::Circle => self.circle_fill,
            ShapeKind::Triangle => self.triangle_fill,
            ShapeKind::Hexagon => self.hex_fill,
            ShapeKind::Cube => self.cube_fill,
        }
    }

    /// Only the listed shapes, none filled.
    pub fn only(kinds: &[ShapeKind]) -> Self {
        ToggleFlags {
            line: kinds.contains(&ShapeKind::Line),
            square: kinds.contains(&ShapeKind::Square),
            circle: kinds.contains(&ShapeKind::Circle),
            triangle: kinds.contains(&ShapeKind::Triangle),
            hex: kinds.contains(&ShapeKind::Hexagon),
            cube: kinds.contains(&ShapeKind::Cube),
            square_fill: false,
            circle_fill: false,
            triangle_fill: false,
            hex_fill: false,
            cube_fill: false,
            ratio_link: true,
            fixed_length: false,
        }
    }
}

impl Default for ToggleFlags {
    fn default() -> Self {
        ToggleFlags {
            line: true,
            square: false,
            circle: true,
            triangle: true,
            hex: false,
            cube: false,
            square_fill: false,
            circle_fill: true,
            triangle_fill: false,
            hex_fill: false,
            cube_fill: false,
            ratio_link: true,
            fixed_length: false,
        }
    }
}

/// Pixel size of the drawing area. The turtle starts at its center and shape sizes scale
/// with its height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

fn default_size() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParams {
    /// Number of production generations.
    pub gens: u32,
    /// Most symbols the turtle will interpret.
    pub complexity: u32,
    /// Number of `[X]++` branches in the axiom.
    pub axiom_amount: u32,
    /// Turn angle in degrees.
    pub theta_deg: f64,
    /// Diagonal step applied after each `F`.
    pub scatter: f64,
    /// Segment length for fixed-length mode.
    pub start_length: f64,
    pub min_size_multiplier: f64,
    pub max_size_multiplier: f64,
    pub width_ratio: f64,
    pub height_ratio: f64,
    /// Per-step color jitter amplitude.
    pub lerp_frequency: f64,
    /// Stroke alpha, 0-255.
    pub alpha: f64,
    /// Fill opacity, 0-255.
    pub opacity: f64,
    pub stroke_weight: f64,
    pub start_hue: f64,
    pub start_sat: f64,
    pub start_bri: f64,
    pub toggle_flags: ToggleFlags,
    /// Global scale for every shape.
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub canvas: Canvas,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            gens: 4,
            complexity: 200,
            axiom_amount: 3,
            theta_deg: 36.0,
            scatter: 0.0,
            start_length: 460.0,
            min_size_multiplier: 0.1,
            max_size_multiplier: 1.0,
            width_ratio: 1.0,
            height_ratio: 1.0,
            lerp_frequency: 5.0,
            alpha: 255.0,
            opacity: 100.0,
            stroke_weight: 1.0,
            start_hue: 200.0,
            start_sat: 50.0,
            start_bri: 50.0,
            toggle_flags: ToggleFlags::default(),
            size: default_size(),
            canvas: Canvas::default(),
        }
    }
}

impl RenderParams {
    /// Checks every parameter against its range. Nothing downstream re-validates, so
    /// callers must run this before building any render state.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::check("gens", f64::from(self.gens), 1.0, 10.0)?;
        ParameterError::check("complexity", f64::from(self.complexity), 1.0, 2000.0)?;
        ParameterError::check("axiomAmount", f64::from(self.axiom_amount), 1.0, 10.0)?;
        ParameterError::check("thetaDeg", self.theta_deg, 0.0, 360.0)?;
        ParameterError::check("scatter", self.scatter, 0.0, 100.0)?;
        ParameterError::check("startLength", self.start_length, 10.0, 1000.0)?;
        ParameterError::check("minSizeMultiplier", self.min_size_multiplier, 0.01, 5.0)?;
        ParameterError::check("maxSizeMultiplier", self.max_size_multiplier, 0.01, 5.0)?;
        ParameterError::check("widthRatio", self.width_ratio, 0.0, 5.0)?;
        ParameterError::check("heightRatio", self.height_ratio, 0.0, 5.0)?;
        ParameterError::check("lerpFrequency", self.lerp_frequency, 0.0, 20.0)?;
        ParameterError::check("alpha", self.alpha, 0.0, 255.0)?;
        ParameterError::check("opacity", self.opacity, 0.0, 255.0)?;
        ParameterError::check("strokeWeight", self.stroke_weight, 1.0, 10.0)?;
        ParameterError::check("startHue", self.start_hue, 0.0, 360.0)?;
        ParameterError::check("startSat", self.start_sat, 0.0, 100.0)?;
        ParameterError::check("startBri", self.start_bri, 0.0, 100.0)?;
        ParameterError::check("size", self.size, 0.01, 5.0)?;
        ParameterError::check("canvas.width", self.canvas.width, 1.0, 20000.0)?;
        ParameterError::check("canvas.height", self.canvas.height, 1.0, 20000.0)?;
        Ok(())
    }

    /// The turn angle in radians.
    pub fn theta(&self) -> f64 {
        degrees(self.theta_deg)
    }

    /// Parses and validates a RON config.
    pub fn from_ron_str(text: &str) -> Result<Self, ParameterError> {
        let params: RenderParams =
            ron::from_str(text).map_err(|e| ParameterError::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_ron_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            ParameterError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, ParameterError> {
        ron::ser::to_string_pretty(self, PrettyConfig::default())
            .map_err(|e| ParameterError::Config(e.to_string()))
    }
}
