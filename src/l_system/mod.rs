//! The l_system module provides the rewriting grammar behind the artwork: the symbol
//! alphabet ([`symbol`]), randomized rule construction ([`rules`]) and the
//! [`LSystem`] production engine that expands an axiom for a number of generations.
//!
//! Expansion is a plain, deterministic, context-free rewrite. All randomness lives in
//! [`rules::generate`], and there is no length cap here: the turtle decides how much of
//! a production it consults.

use log::trace;

pub mod rules;
pub mod symbol;

pub use rules::{generate, Axiom, GrammarRules};
pub use symbol::{format_sequence, parse_sequence, Symbol, Variable};

/// # LSystem
///
/// An axiom plus the four rules that rewrite W, X, Y and Z.
///
/// # Example
///
/// ```rust
/// use structured_rs::l_system::{LSystem, Axiom, GrammarRules, format_sequence, parse_sequence};
///
/// let system = LSystem {
///     axiom: Axiom::new(parse_sequence("[X]++")),
///     rules: GrammarRules::from_strings("F", "+YF", "-F", "F"),
/// };
/// assert_eq!(format_sequence(&system.expand(2)), "[+-FF]++");
/// ```
#[derive(Clone, Debug)]
pub struct LSystem {
    pub axiom: Axiom,
    pub rules: GrammarRules,
}

/// A production in progress: the current sequence and how many generations produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductionState {
    pub sequence: Vec<Symbol>,
    pub generation: u32,
}

impl ProductionState {
    /// Generation zero: the axiom itself.
    pub fn new(axiom: &Axiom) -> Self {
        ProductionState {
            sequence: axiom.to_vec(),
            generation: 0,
        }
    }

    /// Rewrites every variable once. Anything else, unknown symbols included, is copied.
    pub fn step(&mut self, rules: &GrammarRules) {
        let mut next = Vec::with_capacity(self.sequence.len() * 2);
        for &symbol in &self.sequence {
            match rules.get(symbol) {
                Some(replacement) => next.extend_from_slice(replacement),
                None => next.push(symbol),
            }
        }
        self.sequence = next;
        self.generation += 1;
        trace!(
            "generation {} has {} symbols",
            self.generation,
            self.sequence.len()
        );
    }
}

/// Yields successive productions, starting with generation zero. Never ends on its own;
/// bound it with `take`.
pub struct Productions<'a> {
    rules: &'a GrammarRules,
    state: ProductionState,
    started: bool,
}

impl<'a> Iterator for Productions<'a> {
    type Item = ProductionState;

    fn next(&mut self) -> Option<ProductionState> {
        // Step only when the next state is asked for.
        if self.started {
            self.state.step(self.rules);
        } else {
            self.started = true;
        }
        Some(self.state.clone())
    }
}

impl LSystem {
    /// Builds a system from freshly generated rules. See [`rules::generate`].
    pub fn random<R: rand::Rng + ?Sized>(
        branch_count: u32,
        rng: &mut R,
    ) -> Result<Self, crate::errors::ParameterError> {
        let (axiom, rules) = generate(branch_count, rng)?;
        Ok(LSystem { axiom, rules })
    }

    /// Expands the L-system by the requested number of generations. Generation 0 is the
    /// axiom unchanged.
    pub fn expand(&self, generations: u32) -> Vec<Symbol> {
        let mut state = ProductionState::new(&self.axiom);
        while state.generation < generations {
            state.step(&self.rules);
        }
        state.sequence
    }

    pub fn iter(&self) -> Productions<'_> {
        Productions {
            rules: &self.rules,
            state: ProductionState::new(&self.axiom),
            started: false,
        }
    }
}
