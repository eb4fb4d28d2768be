/*!
Parser for propositional formulas written as text.

Connectives, loosest first: `<->`, `->`, `|`, `&`, `~`. Implication and
biconditional associate to the right, conjunction and disjunction to the
left. Variables start with a letter, followed by letters, digits or `_`.
*/

use std::{
    fs,
    iter::Peekable,
    path::{Path, PathBuf},
    str::CharIndices,
};

use crate::formula::{BinaryConnective, Formula, Variable};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading formula file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Unexpected character '{}' at offset {}", found, offset))]
    UnexpectedCharacter { found: char, offset: usize },
    #[snafu(display("Expected {} at offset {}, found '{}'", expected, offset, found))]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },
    #[snafu(display("Expected {}, but the formula ended", expected))]
    UnexpectedEnd { expected: &'static str },
    #[snafu(display("Unexpected input after the formula at offset {}", offset))]
    TrailingInput { offset: usize },
    #[snafu(display("The formula is empty"))]
    EmptyFormula,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Variable(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    LeftParen,
    RightParen,
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Variable(name) => name.clone(),
            Token::Not => "~".to_owned(),
            Token::And => "&".to_owned(),
            Token::Or => "|".to_owned(),
            Token::Implies => "->".to_owned(),
            Token::Iff => "<->".to_owned(),
            Token::LeftParen => "(".to_owned(),
            Token::RightParen => ")".to_owned(),
        }
    }
}

/// Splits `input` into tokens paired with their byte offsets.
fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, Error> {
    fn expect(chars: &mut Peekable<CharIndices<'_>>, expected: char) -> Result<(), Error> {
        match chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((offset, found)) => UnexpectedCharacter { found, offset }.fail(),
            None => UnexpectedEnd {
                expected: "'->' or '<->'",
            }
            .fail(),
        }
    }

    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '~' | '¬' | '!' => Token::Not,
            '&' | '∧' => Token::And,
            '|' | '∨' => Token::Or,
            '→' => Token::Implies,
            '↔' => Token::Iff,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '-' => {
                expect(&mut chars, '>')?;
                Token::Implies
            }
            '<' => {
                expect(&mut chars, '-')?;
                expect(&mut chars, '>')?;
                Token::Iff
            }
            c if c.is_ascii_alphabetic() => {
                let mut name = c.to_string();
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Variable(name)
            }
            found => return UnexpectedCharacter { found, offset }.fail(),
        };
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(_, token)| token)
    }

    fn advance(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consumes the next token if it equals `token`.
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn iff(&mut self) -> Result<Formula, Error> {
        let left = self.implication()?;
        if self.eat(&Token::Iff) {
            Ok(Formula::iff(left, self.iff()?))
        } else {
            Ok(left)
        }
    }

    fn implication(&mut self) -> Result<Formula, Error> {
        let left = self.disjunction()?;
        if self.eat(&Token::Implies) {
            Ok(Formula::implies(left, self.implication()?))
        } else {
            Ok(left)
        }
    }

    fn disjunction(&mut self) -> Result<Formula, Error> {
        let mut formula = self.conjunction()?;
        while self.eat(&Token::Or) {
            formula = Formula::binary(BinaryConnective::Or, formula, self.conjunction()?);
        }
        Ok(formula)
    }

    fn conjunction(&mut self) -> Result<Formula, Error> {
        let mut formula = self.unary()?;
        while self.eat(&Token::And) {
            formula = Formula::binary(BinaryConnective::And, formula, self.unary()?);
        }
        Ok(formula)
    }

    fn unary(&mut self) -> Result<Formula, Error> {
        const EXPECTED: &str = "a variable, '~' or '('";

        match self.advance() {
            Some((_, Token::Not)) => Ok(Formula::not(self.unary()?)),
            Some((_, Token::Variable(name))) => Ok(Formula::atomic(Variable::new(name))),
            Some((_, Token::LeftParen)) => {
                let formula = self.iff()?;
                match self.advance() {
                    Some((_, Token::RightParen)) => Ok(formula),
                    Some((offset, token)) => UnexpectedToken {
                        expected: "')'",
                        found: token.text(),
                        offset,
                    }
                    .fail(),
                    None => UnexpectedEnd { expected: "')'" }.fail(),
                }
            }
            Some((offset, token)) => UnexpectedToken {
                expected: EXPECTED,
                found: token.text(),
                offset,
            }
            .fail(),
            None => UnexpectedEnd { expected: EXPECTED }.fail(),
        }
    }
}

/// Parses a formula from text.
pub fn parse_formula(input: &str) -> Result<Formula, Error> {
    let tokens = tokenize(input)?;
    ensure!(!tokens.is_empty(), EmptyFormula);

    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let formula = parser.iff()?;

    if let Some((offset, _)) = parser.advance() {
        return TrailingInput { offset }.fail();
    }

    Ok(formula)
}

/// Parses a formula from the first non-empty line of a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Formula, Error> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })?;

    let line = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    parse_formula(line)
}
