/*!
Conversion of formula trees into conjunctive normal form.

The conversion runs in three rewriting passes followed by a flattening pass:
implications and biconditionals are eliminated, negations are pushed down to
the atoms, and disjunctions are distributed over conjunctions. The resulting
conjunction of disjunctions is then read off as a [`ClauseSet`].
*/

use crate::clause::ClauseSet;

use super::{BinaryConnective, Formula, Literal};

impl Formula {
    /// Rewrites `a → b` as `¬a ∨ b` and `a ↔ b` as `(¬a ∨ b) ∧ (a ∨ ¬b)`.
    pub fn eliminate_implications(&self) -> Formula {
        match self {
            Formula::Atomic(_) => self.clone(),
            Formula::Not(inner) => Formula::not(inner.eliminate_implications()),
            Formula::Binary {
                connective,
                left,
                right,
            } => {
                let left = left.eliminate_implications();
                let right = right.eliminate_implications();
                match connective {
                    BinaryConnective::And => Formula::and(left, right),
                    BinaryConnective::Or => Formula::or(left, right),
                    BinaryConnective::Implies => Formula::or(Formula::not(left), right),
                    BinaryConnective::Iff => Formula::and(
                        Formula::or(Formula::not(left.clone()), right.clone()),
                        Formula::or(left, Formula::not(right)),
                    ),
                }
            }
        }
    }

    /// Negation normal form: only AND, OR and negated atoms remain.
    pub fn to_nnf(&self) -> Formula {
        push_negations(&self.eliminate_implications(), false)
    }

    /// Distributes OR over AND on a formula in negation normal form, so that
    /// no disjunction has a conjunction as an operand.
    pub fn distribute(&self) -> Formula {
        match self {
            Formula::Binary {
                connective: BinaryConnective::And,
                left,
                right,
            } => Formula::and(left.distribute(), right.distribute()),
            Formula::Binary {
                connective: BinaryConnective::Or,
                left,
                right,
            } => distribute_or(left.distribute(), right.distribute()),
            _ => self.clone(),
        }
    }

    /// Returns a clause set logically equivalent to the formula.
    pub fn to_cnf(&self) -> ClauseSet {
        let distributed = self.to_nnf().distribute();

        let mut conjuncts = Vec::new();
        collect_conjuncts(&distributed, &mut conjuncts);

        let clauses = ClauseSet::from_literals(conjuncts.into_iter().map(|conjunct| {
            let mut literals = Vec::new();
            collect_literals(conjunct, &mut literals);
            literals
        }));

        debug!("CNF of {} has {} clause(s)", self, clauses.len());
        clauses
    }
}

/// `negated` tells whether an odd number of negations sits above `formula`.
fn push_negations(formula: &Formula, negated: bool) -> Formula {
    match formula {
        Formula::Atomic(_) => {
            if negated {
                Formula::not(formula.clone())
            } else {
                formula.clone()
            }
        }
        Formula::Not(inner) => push_negations(inner, !negated),
        Formula::Binary {
            connective,
            left,
            right,
        } => {
            let left_nnf = push_negations(left, negated);
            let right_nnf = push_negations(right, negated);
            match (connective, negated) {
                (BinaryConnective::And, false) | (BinaryConnective::Or, true) => {
                    Formula::and(left_nnf, right_nnf)
                }
                (BinaryConnective::Or, false) | (BinaryConnective::And, true) => {
                    Formula::or(left_nnf, right_nnf)
                }
                (BinaryConnective::Implies, _) | (BinaryConnective::Iff, _) => {
                    push_negations(&formula.eliminate_implications(), negated)
                }
            }
        }
    }
}

fn distribute_or(left: Formula, right: Formula) -> Formula {
    match (left, right) {
        (
            Formula::Binary {
                connective: BinaryConnective::And,
                left: l1,
                right: l2,
            },
            right,
        ) => Formula::and(
            distribute_or(*l1, right.clone()),
            distribute_or(*l2, right),
        ),
        (
            left,
            Formula::Binary {
                connective: BinaryConnective::And,
                left: r1,
                right: r2,
            },
        ) => Formula::and(
            distribute_or(left.clone(), *r1),
            distribute_or(left, *r2),
        ),
        (left, right) => Formula::or(left, right),
    }
}

fn collect_conjuncts<'a>(formula: &'a Formula, acc: &mut Vec<&'a Formula>) {
    match formula {
        Formula::Binary {
            connective: BinaryConnective::And,
            left,
            right,
        } => {
            collect_conjuncts(left, acc);
            collect_conjuncts(right, acc);
        }
        _ => acc.push(formula),
    }
}

fn collect_literals(formula: &Formula, acc: &mut Vec<Literal>) {
    match formula {
        Formula::Binary {
            connective: BinaryConnective::Or,
            left,
            right,
        } => {
            collect_literals(left, acc);
            collect_literals(right, acc);
        }
        _ => match formula.as_literal() {
            Some(literal) => acc.push(literal),
            // Distribution leaves only atoms and negated atoms below a disjunction
            None => unreachable!("{} is not a literal", formula),
        },
    }
}
