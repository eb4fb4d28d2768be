use crate::{
    clause::ClauseSet,
    formula::{Formula, Variable},
};

// Truth-table oracles for checking resolution verdicts in tests
fn assignment_for(assignment: u32, index: usize) -> bool {
    assignment & (1 << index) != 0
}

pub(crate) fn is_tautology_brute_force(f: &Formula) -> bool {
    let variables = f.variables();
    assert!(variables.len() <= 15); // just for safety

    (0..2u32.pow(variables.len() as u32)).all(|assignment| {
        f.evaluate(&|variable: &Variable| {
            let index = variables.iter().position(|v| v == variable).unwrap();
            assignment_for(assignment, index)
        })
    })
}

pub(crate) fn is_satisfiable_brute_force(clauses: &ClauseSet) -> bool {
    let mut variables: Vec<&Variable> = Vec::new();
    for literal in clauses.iter().flat_map(|clause| clause.iter()) {
        if !variables.contains(&literal.variable()) {
            variables.push(literal.variable());
        }
    }
    assert!(variables.len() <= 15); // just for safety

    'search: for assignment in 0..2u32.pow(variables.len() as u32) {
        'clauses: for clause in clauses {
            for literal in clause.iter() {
                let index = variables.iter().position(|&v| v == literal.variable()).unwrap();
                if assignment_for(assignment, index) == literal.positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // this clause is falsified, so this assignment is bogus
            continue 'search;
        }
        return true;
    }
    false
}
