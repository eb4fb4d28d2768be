/*!
Refutation by resolution over a clause set.

Every call works on its own [`Saturation`] context: the working list, the
memo of already compared clause pairs, the identifier allocator and the
trace all live there, so independent calls never share state.
*/

use std::{collections::HashSet, fmt::Display};

use typed_index_collections::TiVec;

use crate::clause::{self, Clause, ClauseId, ClauseSet};
use crate::formula::Literal;
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("No clause set was given"))]
    NullInput,
    #[snafu(display("Invalid clause set: {}", reason))]
    InvalidArgument { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
}

impl Verdict {
    pub fn is_satisfiable(self) -> bool {
        self == Verdict::Satisfiable
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Satisfiable => write!(f, "SAT"),
            Verdict::Unsatisfiable => write!(f, "UNSAT"),
        }
    }
}

/// What happened to the resolvent of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Added to the working list. The final step of a refutation, which
    /// derives the empty clause, also carries this status.
    Derived,
    /// Discarded because it contains a variable in both polarities.
    Tautology,
    /// Discarded because the working list already has the same literals.
    AlreadyPresent,
}

impl Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Derived => write!(f, "derived"),
            StepStatus::Tautology => write!(f, "tautology"),
            StepStatus::AlreadyPresent => write!(f, "already present"),
        }
    }
}

/// A single application of the resolution rule.
#[derive(Debug, Clone)]
pub struct Step {
    pub left: Clause,
    pub right: Clause,
    pub resolvent: Clause,
    /// Literal of `left` whose opposite occurs in `right`.
    pub literal: Literal,
    pub status: StepStatus,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} , {} {} ⊢ {} {} [on {}]",
            self.left.id(),
            self.left,
            self.right.id(),
            self.right,
            self.resolvent.id(),
            self.resolvent,
            self.literal
        )?;

        if self.status != StepStatus::Derived {
            write!(f, " ({}, discarded)", self.status)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Tautologies dropped from the input before saturation.
    pub input_tautologies: usize,
    /// Unvisited pairs searched for a complementary literal.
    pub comparisons: usize,
    /// Resolvents built, whatever became of them.
    pub resolvents: usize,
    pub derived: usize,
    pub tautologies: usize,
    pub duplicates: usize,
}

/// Position of a clause in the working list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClauseIdx(usize);

impl From<usize> for ClauseIdx {
    fn from(index: usize) -> Self {
        ClauseIdx(index)
    }
}

impl From<ClauseIdx> for usize {
    fn from(index: ClauseIdx) -> Self {
        index.0
    }
}

/// Unordered pair key, stored as (older, newer).
fn pair_key(a: ClauseId, b: ClauseId) -> (ClauseId, ClauseId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Saturation context for a single refutation attempt.
#[derive(Debug)]
pub struct Saturation {
    clauses: TiVec<ClauseIdx, Clause>,
    visited: HashSet<(ClauseId, ClauseId)>,
    next_id: ClauseId,
    steps: Option<Vec<Step>>,
    statistics: Statistics,
    verdict: Option<Verdict>,
}

impl Saturation {
    /// Creates a context from a copy of `clauses` with the tautologies removed.
    pub fn new(clauses: &ClauseSet, trace_enabled: bool) -> Self {
        let mut clauses = clauses.clone();
        let input_tautologies = clauses.remove_tautologies();
        if input_tautologies > 0 {
            debug!("Dropped {} tautological input clause(s)", input_tautologies);
        }

        Saturation {
            next_id: clauses.next_id(),
            clauses: clauses.iter().cloned().collect(),
            visited: HashSet::new(),
            steps: if trace_enabled { Some(Vec::new()) } else { None },
            statistics: Statistics {
                input_tautologies,
                ..Default::default()
            },
            verdict: None,
        }
    }

    /// The working list: the input clauses followed by every derived clause.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses.raw
    }

    /// Recorded steps, empty unless tracing was enabled.
    pub fn steps(&self) -> &[Step] {
        self.steps.as_deref().unwrap_or(&[])
    }

    /// `None` until [`Saturation::saturate`] has run.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Runs resolution until the empty clause is derived or no unvisited pair
    /// yields a new resolvent.
    ///
    /// An empty clause already present in the input is a contradiction, so the
    /// verdict is [`Verdict::Unsatisfiable`] without comparing any pair.
    ///
    /// Calling this again after a terminal state returns the same verdict and
    /// leaves the working list unchanged.
    pub fn saturate(&mut self) -> Verdict {
        if let Some(Verdict::Unsatisfiable) = self.verdict {
            return Verdict::Unsatisfiable;
        }

        let empty = self.clauses.iter().find(|clause| clause.is_empty()).map(Clause::id);
        if let Some(id) = empty {
            debug!("Input clause {} is already empty", id);
            return self.finish(Verdict::Unsatisfiable);
        }

        // The working list grows while it is scanned; new clauses are
        // paired with everything once the outer index reaches them.
        let mut i = 0;
        while i < self.clauses.len() {
            let mut j = 0;
            while j < self.clauses.len() {
                if i != j && self.resolve_pair(i.into(), j.into()) {
                    return self.finish(Verdict::Unsatisfiable);
                }
                j += 1;
            }
            i += 1;
        }

        self.finish(Verdict::Satisfiable)
    }

    /// Resolves one ordered pair. Returns true if the empty clause was derived.
    fn resolve_pair(&mut self, i: ClauseIdx, j: ClauseIdx) -> bool {
        let left = &self.clauses[i];
        let right = &self.clauses[j];

        let key = pair_key(left.id(), right.id());
        if self.visited.contains(&key) {
            return false;
        }
        self.statistics.comparisons += 1;

        let literal = match left.complementary_literal(right) {
            Some(literal) => literal.clone(),
            None => return false,
        };
        self.visited.insert(key);

        let resolvent = left.resolve(right, &literal, self.next_id.bump());
        self.statistics.resolvents += 1;

        let status = if resolvent.is_tautology() {
            StepStatus::Tautology
        } else if clause::contains_literals(&self.clauses.raw, &resolvent) {
            StepStatus::AlreadyPresent
        } else {
            StepStatus::Derived
        };

        trace!(
            "Resolve {} with {} on {}: {} ({})",
            left.id(),
            right.id(),
            literal,
            resolvent,
            status
        );

        if let Some(steps) = self.steps.as_mut() {
            steps.push(Step {
                left: left.clone(),
                right: right.clone(),
                resolvent: resolvent.clone(),
                literal,
                status,
            });
        }

        if resolvent.is_empty() {
            return true;
        }

        match status {
            StepStatus::Tautology => self.statistics.tautologies += 1,
            StepStatus::AlreadyPresent => self.statistics.duplicates += 1,
            StepStatus::Derived => {
                self.statistics.derived += 1;
                self.clauses.push(resolvent);
            }
        }

        false
    }

    fn finish(&mut self, verdict: Verdict) -> Verdict {
        debug!(
            "Saturation finished with {} after {} resolvent(s), {} clause(s) in the working list",
            verdict,
            self.statistics.resolvents,
            self.clauses.len()
        );
        self.verdict = Some(verdict);
        verdict
    }

    /// Finishes the context, saturating first if no verdict was reached yet.
    pub fn into_refutation(mut self) -> Refutation {
        let verdict = match self.verdict {
            Some(verdict) => verdict,
            None => self.saturate(),
        };

        Refutation {
            verdict,
            steps: self.steps.unwrap_or_default(),
            clauses: self.clauses.raw,
            statistics: self.statistics,
        }
    }
}

/// Outcome of a finished refutation attempt.
#[derive(Debug, Clone)]
pub struct Refutation {
    verdict: Verdict,
    steps: Vec<Step>,
    clauses: Vec<Clause>,
    statistics: Statistics,
}

impl Refutation {
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_satisfiable(&self) -> bool {
        self.verdict.is_satisfiable()
    }

    /// Steps in derivation order, empty unless tracing was enabled.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Final working list.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }
}

/// Runs resolution on `clauses` and returns the verdict with its trace.
///
/// Fails with [`Error::NullInput`] if no clause set is given and with
/// [`Error::InvalidArgument`] if the clause set is empty. An empty set is
/// rejected before tautologies are removed, while a set made only of
/// tautologies is satisfiable.
pub fn refute<'a, C>(clauses: C, trace_enabled: bool) -> Result<Refutation, Error>
where
    C: Into<Option<&'a ClauseSet>>,
{
    let clauses: Option<&ClauseSet> = clauses.into();
    let clauses = clauses.context(NullInput)?;
    ensure!(
        !clauses.is_empty(),
        InvalidArgument {
            reason: "the clause set is empty",
        }
    );

    Ok(Saturation::new(clauses, trace_enabled).into_refutation())
}

/// Checks whether `clauses` is satisfiable. With `trace_enabled`, every
/// resolution step is logged in derivation order once a verdict is reached.
pub fn is_satisfiable<'a, C>(clauses: C, trace_enabled: bool) -> Result<bool, Error>
where
    C: Into<Option<&'a ClauseSet>>,
{
    let refutation = refute(clauses, trace_enabled)?;
    for step in refutation.steps() {
        info!("{}", step);
    }
    Ok(refutation.is_satisfiable())
}
