use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::surface::CssColor;

pub const MAX_HUE: f64 = 360.0;
pub const MAX_SATURATION: f64 = 100.0;
pub const MAX_BRIGHTNESS: f64 = 100.0;

/// The turtle's running color in HSB space plus its own opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsba {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

fn wrap_hue(hue: f64) -> f64 {
    let hue = hue.rem_euclid(MAX_HUE);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if hue >= MAX_HUE {
        0.0
    } else {
        hue
    }
}

impl Hsba {
    /// Builds a color, wrapping the hue and clamping the other channels into range.
    pub fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Hsba {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(0.0, MAX_SATURATION),
            brightness: brightness.clamp(0.0, MAX_BRIGHTNESS),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// One step of the bounded random walk: hue, saturation and brightness each move by a
    /// uniform amount in `[-amount, amount]`, drawn in that order. Hue wraps, the others clamp.
    pub fn jitter<R: Rng + ?Sized>(&mut self, amount: f64, rng: &mut R) {
        let amount = amount.abs();
        let dh = rng.gen_range(-amount..=amount);
        let ds = rng.gen_range(-amount..=amount);
        let db = rng.gen_range(-amount..=amount);
        self.hue = wrap_hue(self.hue + dh);
        self.saturation = (self.saturation + ds).clamp(0.0, MAX_SATURATION);
        self.brightness = (self.brightness + db).clamp(0.0, MAX_BRIGHTNESS);
    }

    /// RGB channels in `0..=255`.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let h = self.hue / 60.0;
        let v = self.brightness / MAX_BRIGHTNESS;
        let c = v * (self.saturation / MAX_SATURATION);
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        [r, g, b].map(|channel| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// The color with its opacity scaled by `alpha_scale` (stroke alpha or fill opacity).
    pub fn to_rgba(&self, alpha_scale: f64) -> CssColor {
        let [r, g, b] = self.to_rgb8();
        let a = (self.alpha * alpha_scale.clamp(0.0, 1.0) * 255.0).round() as u8;
        CssColor::from_rgba8(r, g, b, a)
    }
}
