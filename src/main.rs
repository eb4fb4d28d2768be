use std::{
    env::args,
    io::{self, BufRead},
};

use log::debug;
use pretty_env_logger::formatted_builder;
use resolute::{
    formula::Formula,
    parser::{self, parse_formula},
    prelude::*,
    report::Report,
    resolution::{self, refute, Refutation},
};

fn usage_string() -> String {
    format!(
        "Usage: {} [-v] <command> [-v] [formula]

command:
    tautology - check whether the formula is a tautology by refuting its negation
    sat       - check whether the formula is satisfiable
    cnf       - print the clause set of the formula

-v prints every resolution step. The formula is read from stdin if omitted.",
        args().next().unwrap_or_else(|| "resolute".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Your formula in input is not a well-formed formula"))]
    ParserError { source: parser::Error },
    #[snafu(display("Failed to read the formula from stdin"))]
    StdinError { source: io::Error },
    #[snafu(display("Resolution failed"))]
    ResolutionError { source: resolution::Error },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

struct Options {
    command: Option<String>,
    verbose: bool,
    formula: Option<String>,
}

impl Options {
    /// `-v` may appear anywhere, before or after the command.
    fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut verbose = false;
        let mut words = Vec::new();
        for arg in args {
            if arg == "-v" {
                verbose = true;
            } else {
                words.push(arg);
            }
        }

        let mut words = words.into_iter();
        let command = words.next();
        let words: Vec<_> = words.collect();

        Options {
            command,
            verbose,
            formula: if words.is_empty() {
                None
            } else {
                Some(words.join(" "))
            },
        }
    }

    fn read_formula(&self) -> Result<Formula, Error> {
        let text = match &self.formula {
            Some(text) => text.clone(),
            None => {
                let stdin = io::stdin();
                let line = stdin.lock().lines().next().context(MissingArgument)?;
                line.context(StdinError)?
            }
        };

        parse_formula(&text).context(ParserError)
    }
}

fn print_refutation(refutation: &Refutation, verbose: bool) {
    if verbose {
        for step in refutation.steps() {
            println!("{}", step);
        }
        println!();
    }

    let statistics = refutation.statistics();
    debug!(
        "{} pair(s) compared, {} resolvent(s): {} derived, {} tautologies, {} duplicates",
        statistics.comparisons,
        statistics.resolvents,
        statistics.derived,
        statistics.tautologies,
        statistics.duplicates
    );
}

fn dispatch_command(command: &str, options: Options) -> Result<(), Error> {
    match command {
        "tautology" => {
            let formula = options.read_formula()?;
            println!("\nYour formula in input:\n{}", formula);

            let negation = Formula::not(formula).to_cnf();
            println!("\nThe corresponding clause set of the negation is:\n{}\n", negation);

            let refutation = refute(&negation, options.verbose).context(ResolutionError)?;
            print_refutation(&refutation, options.verbose);

            if refutation.is_satisfiable() {
                println!("The formula is not a tautology");
            } else {
                println!("The formula is a tautology");
            }
        }
        "sat" => {
            let formula = options.read_formula()?;
            println!("\nYour formula in input:\n{}", formula);

            let cnf = formula.to_cnf();
            println!("\nThe corresponding clause set is:\n{}\n", cnf);

            let refutation = refute(&cnf, options.verbose).context(ResolutionError)?;
            print_refutation(&refutation, options.verbose);

            if refutation.is_satisfiable() {
                println!("The formula is satisfiable");
            } else {
                println!("The formula is unsatisfiable");
            }
        }
        "cnf" => {
            let formula = options.read_formula()?;
            println!("{}", formula.to_cnf());
        }
        name => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if cfg!(debug_assertions) {
        builder.parse_filters("resolute=debug");
    } else {
        builder.parse_filters("resolute=warn");
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    // drop arg[0]
    let mut options = Options::from_args(args().skip(1));

    match options.command.take() {
        Some(command) => dispatch_command(&command, options)?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Options;

    fn options(args: &[&str]) -> Options {
        Options::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn verbose_flag_before_command() {
        let options = options(&["-v", "tautology", "a", "|", "~a"]);

        assert!(options.verbose);
        assert_eq!(options.command.as_deref(), Some("tautology"));
        assert_eq!(options.formula.as_deref(), Some("a | ~a"));
    }

    #[test]
    fn verbose_flag_after_command() {
        let options = options(&["sat", "-v"]);

        assert!(options.verbose);
        assert_eq!(options.command.as_deref(), Some("sat"));
        assert!(options.formula.is_none());
    }

    #[test]
    fn no_arguments() {
        let options = options(&[]);

        assert!(!options.verbose);
        assert!(options.command.is_none());
    }
}
