//! One full "generate" request: parameters and a seed in, a drawing on a surface out.
//!
//! ```rust
//! use structured_rs::params::RenderParams;
//! use structured_rs::pipeline::generate;
//! use structured_rs::surface::Recorder;
//!
//! let mut recorder = Recorder::new();
//! let artwork = generate(&RenderParams::default(), "k3j2h1", &mut recorder).unwrap();
//! assert_eq!(artwork.report.primitives, recorder.len());
//! ```

use log::info;
use rand::Rng;

use crate::errors::ParameterError;
use crate::l_system::{Axiom, GrammarRules, LSystem};
use crate::params::RenderParams;
use crate::seed::seeded_rng;
use crate::surface::Surface;
use crate::turtle::{render, RenderReport};

/// What a generate request produced, besides the drawing itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Artwork {
    pub axiom: Axiom,
    pub rules: GrammarRules,
    /// Length of the fully expanded sequence, before the complexity cap.
    pub sequence_len: usize,
    pub report: RenderReport,
}

impl Artwork {
    /// The W, X, Y and Z rules in character form.
    pub fn rules_as_strings(&self) -> [String; 4] {
        self.rules.to_strings()
    }
}

/// Validates `params`, then builds the grammar, expands it and renders it, all from one
/// random stream derived from `seed`. The same parameters and seed always issue the same
/// draw calls.
pub fn generate<S: Surface + ?Sized>(
    params: &RenderParams,
    seed: &str,
    surface: &mut S,
) -> Result<Artwork, ParameterError> {
    let mut rng = seeded_rng(seed);
    let artwork = generate_with_rng(params, &mut rng, surface)?;
    info!(
        "seed {}: {} symbols, {} consulted, {} primitives",
        seed, artwork.sequence_len, artwork.report.symbols_consulted, artwork.report.primitives
    );
    Ok(artwork)
}

/// Like [`generate`], for callers that own the random stream.
pub fn generate_with_rng<R, S>(
    params: &RenderParams,
    rng: &mut R,
    surface: &mut S,
) -> Result<Artwork, ParameterError>
where
    R: Rng + ?Sized,
    S: Surface + ?Sized,
{
    params.validate()?;
    let system = LSystem::random(params.axiom_amount, rng)?;
    let sequence = system.expand(params.gens);
    let report = render(&sequence, params, rng, surface);
    Ok(Artwork {
        axiom: system.axiom,
        rules: system.rules,
        sequence_len: sequence.len(),
        report,
    })
}
