/*!
A module to represent propositional formulas as trees.
*/

use std::{fmt::Display, str::FromStr};

use crate::prelude::*;

pub mod cnf;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "Connective '{}' takes {} operand(s), but {} were given",
        connective,
        expected,
        found
    ))]
    Arity {
        connective: Connective,
        expected: usize,
        found: usize,
    },
    #[snafu(display("'{}' is not a valid variable name", name))]
    InvalidVariable { name: String },
}

/// Newtype wrapper for a propositional variable name.
/// Invariant: starts with an ASCII letter, followed by ASCII alphanumerics or '_'.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(String);

impl Variable {
    /// `name` must already satisfy [`Variable::is_valid_name`].
    pub(crate) fn new(name: String) -> Self {
        debug_assert!(Variable::is_valid_name(&name));
        Variable(name)
    }

    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ensure!(
            Variable::is_valid_name(s),
            InvalidVariable { name: s.to_owned() }
        );
        Ok(Variable(s.to_owned()))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    pub fn variable(&self) -> &Variable {
        &self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Returns the literal over the same variable with the flipped polarity.
    pub fn opposite(&self) -> Literal {
        Literal {
            id: self.id.clone(),
            positive: !self.positive,
        }
    }

    pub fn is_opposite_of(&self, other: &Literal) -> bool {
        self.id == other.id && self.positive != other.positive
    }
}

impl FromStr for Literal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, id) = match s.strip_prefix('~').or_else(|| s.strip_prefix('¬')) {
            Some(rest) => (false, rest.parse()?),
            None => (true, s.parse()?),
        };

        Ok(Literal { id, positive })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

impl std::ops::Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    /// Number of operands the connective takes.
    pub fn arity(self) -> usize {
        match self {
            Connective::Not => 1,
            Connective::And | Connective::Or | Connective::Implies | Connective::Iff => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connective::Not => "¬",
            Connective::And => "∧",
            Connective::Or => "∨",
            Connective::Implies => "→",
            Connective::Iff => "↔",
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary connectives only; negation has its own variant in [`Formula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryConnective {
    And,
    Or,
    Implies,
    Iff,
}

impl From<BinaryConnective> for Connective {
    fn from(connective: BinaryConnective) -> Self {
        match connective {
            BinaryConnective::And => Connective::And,
            BinaryConnective::Or => Connective::Or,
            BinaryConnective::Implies => Connective::Implies,
            BinaryConnective::Iff => Connective::Iff,
        }
    }
}

/// A propositional formula tree. Nodes are owned top-down and never mutated;
/// every transformation builds a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atomic(Variable),
    Not(Box<Formula>),
    Binary {
        connective: BinaryConnective,
        left: Box<Formula>,
        right: Box<Formula>,
    },
}

impl Formula {
    pub fn atomic(variable: Variable) -> Self {
        Formula::Atomic(variable)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(formula: Formula) -> Self {
        Formula::Not(Box::new(formula))
    }

    pub fn binary(connective: BinaryConnective, left: Formula, right: Formula) -> Self {
        Formula::Binary {
            connective,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::binary(BinaryConnective::And, left, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::binary(BinaryConnective::Or, left, right)
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Formula::binary(BinaryConnective::Implies, left, right)
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Formula::binary(BinaryConnective::Iff, left, right)
    }

    /// Builds a compound node from a connective and its operands.
    ///
    /// Fails when the number of operands does not match the arity of `connective`.
    pub fn compound(connective: Connective, children: Vec<Formula>) -> Result<Self, Error> {
        let found = children.len();
        let mut operands = children.into_iter();

        match (connective, operands.next(), operands.next(), operands.next()) {
            (Connective::Not, Some(inner), None, None) => Ok(Formula::not(inner)),
            (Connective::And, Some(left), Some(right), None) => Ok(Formula::and(left, right)),
            (Connective::Or, Some(left), Some(right), None) => Ok(Formula::or(left, right)),
            (Connective::Implies, Some(left), Some(right), None) => {
                Ok(Formula::implies(left, right))
            }
            (Connective::Iff, Some(left), Some(right), None) => Ok(Formula::iff(left, right)),
            _ => Arity {
                connective,
                expected: connective.arity(),
                found,
            }
            .fail(),
        }
    }

    /// The top-level connective, `None` for an atomic formula.
    pub fn connective(&self) -> Option<Connective> {
        match self {
            Formula::Atomic(_) => None,
            Formula::Not(_) => Some(Connective::Not),
            Formula::Binary { connective, .. } => Some((*connective).into()),
        }
    }

    /// Returns the literal if the formula is an atom or a negated atom.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Formula::Atomic(variable) => Some(Literal::new(variable.clone(), true)),
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atomic(variable) => Some(Literal::new(variable.clone(), false)),
                _ => None,
            },
            Formula::Binary { .. } => None,
        }
    }

    /// Distinct variables of the formula in order of first occurrence.
    pub fn variables(&self) -> Vec<Variable> {
        fn collect(formula: &Formula, acc: &mut Vec<Variable>) {
            match formula {
                Formula::Atomic(variable) => {
                    if !acc.contains(variable) {
                        acc.push(variable.clone());
                    }
                }
                Formula::Not(inner) => collect(inner, acc),
                Formula::Binary { left, right, .. } => {
                    collect(left, acc);
                    collect(right, acc);
                }
            }
        }

        let mut variables = Vec::new();
        collect(self, &mut variables);
        variables
    }

    /// Evaluates the formula under `assignment`.
    pub fn evaluate<F>(&self, assignment: &F) -> bool
    where
        F: Fn(&Variable) -> bool,
    {
        match self {
            Formula::Atomic(variable) => assignment(variable),
            Formula::Not(inner) => !inner.evaluate(assignment),
            Formula::Binary {
                connective,
                left,
                right,
            } => {
                let left = left.evaluate(assignment);
                let right = right.evaluate(assignment);
                match connective {
                    BinaryConnective::And => left && right,
                    BinaryConnective::Or => left || right,
                    BinaryConnective::Implies => !left || right,
                    BinaryConnective::Iff => left == right,
                }
            }
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atomic(variable) => write!(f, "{}", variable),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::Binary {
                connective,
                left,
                right,
            } => write!(f, "({} {} {})", left, Connective::from(*connective), right),
        }
    }
}
