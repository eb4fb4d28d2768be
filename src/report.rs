/*!
Error printer for the command-line binary.

`main` returns `Result<(), Report>`, so any error reaching it is printed
through [`Report`]'s `Debug` implementation together with its sources.
*/

use std::error::Error as StdError;

pub struct Report(Box<dyn StdError>);

impl Report {
    /// Iterates over the wrapped error and its chain of sources.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(Some(self.0.as_ref() as &(dyn StdError + 'static)), |&e| {
            e.source()
        })
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chain = self.chain();

        if let Some(error) = chain.next() {
            writeln!(f, "{}", error)?;
        }

        let mut causes = chain.enumerate().peekable();
        if causes.peek().is_some() {
            writeln!(f, "\nCaused by:")?;
            for (i, cause) in causes {
                writeln!(f, "  {}: {}", i, cause)?;
            }
        }

        Ok(())
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(e: E) -> Self {
        Report(e.into())
    }
}
