//! Randomized construction of the axiom and the four variable rules.
//!
//! Every rule mixes fixed structure (turns, brackets, the variable it hands off to) with
//! short runs drawn uniformly from [`DRAW_ALPHABET`]. The runs are drawn in a fixed order,
//! so the same branch count and the same random stream always give the same grammar.

use std::ops::Deref;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::symbol::{self, format_sequence, parse_sequence, Symbol, Variable, DRAW_ALPHABET};
use crate::errors::ParameterError;

/// Smallest and largest branch count accepted by [`generate`].
pub const BRANCH_RANGE: (u32, u32) = (1, 10);

const AXIOM_TEMPLATE: &str = "[X]++";
const RULE_Z: &str = "--YF+^+WF[+ZF++++XF]--XF";

/// The starting sequence: `branch_count` copies of `[X]++`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axiom(#[serde(with = "symbol::as_string")] Vec<Symbol>);

impl Axiom {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Axiom(symbols)
    }

    /// Builds the branching axiom without any range checks.
    pub fn branches(branch_count: u32) -> Self {
        Axiom(parse_sequence(&AXIOM_TEMPLATE.repeat(branch_count as usize)))
    }

    pub fn into_inner(self) -> Vec<Symbol> {
        self.0
    }
}

impl Deref for Axiom {
    type Target = [Symbol];

    fn deref(&self) -> &[Symbol] {
        &self.0
    }
}

/// Replacement sequences for W, X, Y and Z. Fixed once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRules {
    #[serde(with = "symbol::as_string")]
    w: Vec<Symbol>,
    #[serde(with = "symbol::as_string")]
    x: Vec<Symbol>,
    #[serde(with = "symbol::as_string")]
    y: Vec<Symbol>,
    #[serde(with = "symbol::as_string")]
    z: Vec<Symbol>,
}

impl GrammarRules {
    pub fn new(w: Vec<Symbol>, x: Vec<Symbol>, y: Vec<Symbol>, z: Vec<Symbol>) -> Self {
        GrammarRules { w, x, y, z }
    }

    /// Hand-written rules in the character form, e.g. `"+YF[X]-"`.
    pub fn from_strings(w: &str, x: &str, y: &str, z: &str) -> Self {
        GrammarRules::new(
            parse_sequence(w),
            parse_sequence(x),
            parse_sequence(y),
            parse_sequence(z),
        )
    }

    pub fn rule(&self, variable: Variable) -> &[Symbol] {
        match variable.index() {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            _ => &self.z,
        }
    }

    /// The replacement for `symbol`, or `None` when it is not a variable.
    pub fn get(&self, symbol: Symbol) -> Option<&[Symbol]> {
        symbol.variable().map(|v| self.rule(v))
    }

    /// `[W, X, Y, Z]` in character form.
    pub fn to_strings(&self) -> [String; 4] {
        Variable::ALL.map(|v| format_sequence(self.rule(v)))
    }
}

/// Draws `len` symbols uniformly, with replacement, from the draw alphabet.
fn random_run<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<Symbol> {
    let alphabet: Vec<char> = DRAW_ALPHABET.chars().collect();
    (0..len)
        .map(|_| {
            let c = alphabet[rng.gen_range(0..alphabet.len())];
            // Every draw-alphabet character is a known symbol.
            Symbol::from_char(c).unwrap_or(Symbol::Unknown(c))
        })
        .collect()
}

/// Concatenates fixed pieces (character form) and random runs, in order.
fn assemble(parts: &[Part]) -> Vec<Symbol> {
    let mut out = vec![];
    for part in parts {
        match part {
            Part::Fixed(text) => out.extend(parse_sequence(text)),
            Part::Run(run) => out.extend_from_slice(run),
        }
    }
    out
}

enum Part {
    Fixed(&'static str),
    Run(Vec<Symbol>),
}

/// Builds the axiom and the four rules for `branch_count` branches.
///
/// The random stream is consumed in exactly this order (run lengths in brackets):
/// W: a(2) a(3) b(2) b(3) c(2), X: d(4) e(2) f(2) g(4), Y: h(4) i(4) j(4).
/// Z is a constant and draws nothing.
pub fn generate<R: Rng + ?Sized>(
    branch_count: u32,
    rng: &mut R,
) -> Result<(Axiom, GrammarRules), ParameterError> {
    ParameterError::check(
        "axiomAmount",
        f64::from(branch_count),
        f64::from(BRANCH_RANGE.0),
        f64::from(BRANCH_RANGE.1),
    )?;
    let axiom = Axiom::branches(branch_count);

    let (a2, a3, b2, b3, c2) = (
        random_run(rng, 2),
        random_run(rng, 3),
        random_run(rng, 2),
        random_run(rng, 3),
        random_run(rng, 2),
    );
    let w = assemble(&[
        Part::Run(a2),
        Part::Fixed("++"),
        Part::Run(a3),
        Part::Run(b2),
        Part::Fixed("["),
        Part::Run(b3),
        Part::Run(c2),
        Part::Fixed("]++"),
    ]);

    let (d4, e2, f2, g4) = (
        random_run(rng, 4),
        random_run(rng, 2),
        random_run(rng, 2),
        random_run(rng, 4),
    );
    let x = assemble(&[
        Part::Fixed("+YF"),
        Part::Run(d4),
        Part::Fixed("["),
        Part::Run(e2),
        Part::Run(f2),
        Part::Run(g4),
        Part::Fixed("]+"),
    ]);

    let (h4, i4, j4) = (random_run(rng, 4), random_run(rng, 4), random_run(rng, 4));
    let y = assemble(&[
        Part::Fixed("-WF"),
        Part::Run(h4),
        Part::Fixed("["),
        Part::Run(i4),
        Part::Run(j4),
        Part::Fixed("]-"),
    ]);

    let rules = GrammarRules::new(w, x, y, parse_sequence(RULE_Z));
    let [w, x, y, z] = rules.to_strings();
    debug!(
        "generated grammar: axiom={} W={} X={} Y={} Z={}",
        format_sequence(&axiom),
        w,
        x,
        y,
        z
    );
    Ok((axiom, rules))
}
