#[macro_use]
extern crate log;

pub mod clause;
pub mod formula;
pub mod parser;
pub mod prelude;
pub mod report;
pub mod resolution;

#[cfg(test)]
mod brute_force;
