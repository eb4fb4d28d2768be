/*!
Clauses and clause sets, the conjunctive normal form consumed by resolution.
*/

use std::fmt::Display;

use crate::formula::Literal;

/// Creation-ordered clause identifier. Identifiers are never reused, so a lower
/// identifier always belongs to an older clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseId(usize);

impl ClauseId {
    pub const FIRST: ClauseId = ClauseId(1);

    /// Returns the current identifier and advances `self` to the next one.
    pub(crate) fn bump(&mut self) -> ClauseId {
        let id = *self;
        self.0 += 1;
        id
    }
}

impl Display for ClauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Disjunction of literals, kept as an insertion-ordered set.
#[derive(Debug, Clone)]
pub struct Clause {
    id: ClauseId,
    literals: Vec<Literal>,
}

impl Clause {
    pub(crate) fn new(id: ClauseId, literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut clause = Clause {
            id,
            literals: Vec::new(),
        };
        for literal in literals {
            clause.insert(literal);
        }
        clause
    }

    pub fn id(&self) -> ClauseId {
        self.id
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> + '_ {
        self.literals.iter()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// Adds a literal, returns false if it was already present.
    fn insert(&mut self, literal: Literal) -> bool {
        if self.contains(&literal) {
            false
        } else {
            self.literals.push(literal);
            true
        }
    }

    /// Removes a literal, returns false if it was absent.
    fn remove(&mut self, literal: &Literal) -> bool {
        match self.literals.iter().position(|l| l == literal) {
            Some(index) => {
                self.literals.remove(index);
                true
            }
            None => false,
        }
    }

    /// The empty clause stands for the contradiction.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True if some variable occurs in both polarities.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, l1)| self.literals[i + 1..].iter().any(|l2| l1.is_opposite_of(l2)))
    }

    /// Structural equality on the literal sets, ignoring identifiers and order.
    pub fn same_literals(&self, other: &Clause) -> bool {
        self.literals.len() == other.literals.len()
            && self.literals.iter().all(|literal| other.contains(literal))
    }

    /// First literal of `self`, in stored order, whose opposite occurs in `other`.
    pub fn complementary_literal(&self, other: &Clause) -> Option<&Literal> {
        self.literals
            .iter()
            .find(|l1| other.literals.iter().any(|l2| l1.is_opposite_of(l2)))
    }

    /// Builds the resolvent of `self` and `other` on `literal`: the union of
    /// both clauses without `literal` and its opposite.
    pub fn resolve(&self, other: &Clause, literal: &Literal, id: ClauseId) -> Clause {
        let mut resolvent = Clause::new(
            id,
            self.literals.iter().chain(other.literals.iter()).cloned(),
        );
        resolvent.remove(literal);
        resolvent.remove(&literal.opposite());
        resolvent
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "□");
        }

        write!(f, "{{")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, ", {}", literal)?;
        }

        write!(f, "}}")?;

        Ok(())
    }
}

/// Conjunction of clauses in insertion order.
#[derive(Debug, Clone)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    next_id: ClauseId,
}

impl Default for ClauseSet {
    fn default() -> Self {
        ClauseSet::new()
    }
}

impl ClauseSet {
    pub fn new() -> Self {
        ClauseSet {
            clauses: Vec::new(),
            next_id: ClauseId::FIRST,
        }
    }

    /// Builds a clause set from literal lists, one clause per list.
    pub fn from_literals<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Literal>,
    {
        let mut set = ClauseSet::new();
        for literals in clauses {
            set.add_clause(literals);
        }
        set
    }

    /// Adds a new clause with a fresh identifier and returns that identifier.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Literal>) -> ClauseId {
        let id = self.next_id.bump();
        self.clauses.push(Clause::new(id, literals));
        id
    }

    /// Conjunction of `self` and `other`; clauses of `other` get fresh identifiers.
    pub fn conjoin(mut self, other: ClauseSet) -> ClauseSet {
        for clause in other.clauses {
            self.add_clause(clause.literals);
        }
        self
    }

    /// The identifier the next clause created from this set will get.
    pub fn next_id(&self) -> ClauseId {
        self.next_id
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// The empty conjunction stands for logical truth.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Drops every tautological clause and returns how many were removed.
    pub fn remove_tautologies(&mut self) -> usize {
        let before = self.clauses.len();
        self.clauses.retain(|clause| !clause.is_tautology());
        before - self.clauses.len()
    }

    /// True if some clause has exactly the literals of `clause`.
    pub fn contains_literals(&self, clause: &Clause) -> bool {
        contains_literals(self, clause)
    }
}

/// Duplicate check shared by [`ClauseSet`] and the resolution working list.
pub fn contains_literals<'a>(
    clauses: impl IntoIterator<Item = &'a Clause>,
    clause: &Clause,
) -> bool {
    clauses.into_iter().any(|c| c.same_literals(clause))
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl Display for ClauseSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        write!(f, "{{ ")?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, ", {}", clause)?;
        }

        write!(f, " }}")?;

        Ok(())
    }
}
