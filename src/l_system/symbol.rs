//! The grammar alphabet. Symbols are held as a closed enum; the single-character form
//! (`F+-*/^$[]0-9WXYZ`) only exists for parsing, display and serialization.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Characters the rule generator draws its random runs from. Brackets are left out so
/// the random runs never unbalance the structural brackets of a rule.
pub const DRAW_ALPHABET: &str = "+-*/^$0123456789WXYZF";

/// One grammar symbol: a turtle instruction (terminal) or a rewritable variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `F`: draw the enabled shapes, then scatter forward.
    Forward,
    /// `+`
    TurnRight,
    /// `-`
    TurnLeft,
    /// `*`: turn by twice theta.
    RotateDouble,
    /// `/`: turn by half theta.
    RotateHalf,
    /// `^`: turn by theta squared.
    RotateSquared,
    /// `$`: turn by theta cubed.
    RotateCubed,
    /// `[`
    Push,
    /// `]`
    Pop,
    /// `0`-`9`: repeat count for the next instruction. Counts above 9 act, and print,
    /// as 9.
    Repeat(u8),
    W,
    X,
    Y,
    Z,
    /// A character outside the alphabet, kept so hand-edited sequences survive
    /// rewriting. Rendering skips it.
    Unknown(char),
}

/// The rewritable subset of [`Symbol`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    W,
    X,
    Y,
    Z,
}

impl Variable {
    pub const ALL: [Variable; 4] = [Variable::W, Variable::X, Variable::Y, Variable::Z];

    pub fn symbol(self) -> Symbol {
        match self {
            Variable::W => Symbol::W,
            Variable::X => Symbol::X,
            Variable::Y => Symbol::Y,
            Variable::Z => Symbol::Z,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Variable::W => 0,
            Variable::X => 1,
            Variable::Y => 2,
            Variable::Z => 3,
        }
    }
}

impl Symbol {
    /// Strict conversion from the character form. `None` for anything outside the alphabet.
    pub fn from_char(c: char) -> Option<Symbol> {
        Some(match c {
            'F' => Symbol::Forward,
            '+' => Symbol::TurnRight,
            '-' => Symbol::TurnLeft,
            '*' => Symbol::RotateDouble,
            '/' => Symbol::RotateHalf,
            '^' => Symbol::RotateSquared,
            '$' => Symbol::RotateCubed,
            '[' => Symbol::Push,
            ']' => Symbol::Pop,
            'W' => Symbol::W,
            'X' => Symbol::X,
            'Y' => Symbol::Y,
            'Z' => Symbol::Z,
            '0'..='9' => Symbol::Repeat(c as u8 - b'0'),
            _ => return None,
        })
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Forward => 'F',
            Symbol::TurnRight => '+',
            Symbol::TurnLeft => '-',
            Symbol::RotateDouble => '*',
            Symbol::RotateHalf => '/',
            Symbol::RotateSquared => '^',
            Symbol::RotateCubed => '$',
            Symbol::Push => '[',
            Symbol::Pop => ']',
            Symbol::Repeat(n) => char::from(b'0' + n.min(9)),
            Symbol::W => 'W',
            Symbol::X => 'X',
            Symbol::Y => 'Y',
            Symbol::Z => 'Z',
            Symbol::Unknown(c) => c,
        }
    }

    /// The variable this symbol rewrites as, if any.
    pub fn variable(self) -> Option<Variable> {
        match self {
            Symbol::W => Some(Variable::W),
            Symbol::X => Some(Variable::X),
            Symbol::Y => Some(Variable::Y),
            Symbol::Z => Some(Variable::Z),
            _ => None,
        }
    }

    pub fn is_variable(self) -> bool {
        self.variable().is_some()
    }

    /// True for the turtle instructions. Unknown symbols are neither terminal nor variable.
    pub fn is_terminal(self) -> bool {
        !self.is_variable() && !matches!(self, Symbol::Unknown(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.to_char())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let c = char::deserialize(deserializer)?;
        Ok(Symbol::from_char(c).unwrap_or(Symbol::Unknown(c)))
    }
}

/// Lenient parse of a character sequence. Characters outside the alphabet become
/// [`Symbol::Unknown`] so that nothing is silently dropped.
pub fn parse_sequence(text: &str) -> Vec<Symbol> {
    let mut unknown = 0usize;
    let sequence: Vec<Symbol> = text
        .chars()
        .map(|c| match Symbol::from_char(c) {
            Some(symbol) => symbol,
            None => {
                unknown += 1;
                Symbol::Unknown(c)
            }
        })
        .collect();
    if unknown > 0 {
        warn!("{} unknown symbol(s) in L-system sequence {:?}", unknown, text);
    }
    sequence
}

pub fn format_sequence(sequence: &[Symbol]) -> String {
    sequence.iter().map(|s| s.to_char()).collect()
}

/// Serde helper storing a `Vec<Symbol>` as its character string.
pub(crate) mod as_string {
    use super::{format_sequence, parse_sequence, Symbol};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(sequence: &[Symbol], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_sequence(sequence))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Symbol>, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(parse_sequence(&text))
    }
}
