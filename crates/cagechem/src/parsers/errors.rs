use miette::Diagnostic;
use nom::{
    IResult,
    error::{ErrorKind, ParseError},
};
use thiserror::Error;

use crate::atoms::errors::AtomicLookupError;

pub type ParseResult<'s, O> = IResult<&'s str, O, ParseFailure<'s>>;

/// Where (and why) a parser gave up; `input` is the unparsed remainder at the point of failure, and `len` is how
/// many bytes of that remainder should be highlighted
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseFailure<'s> {
    pub input: &'s str,
    pub len: usize,
    pub kind: FormulaErrorKind,
}

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum FormulaErrorKind {
    #[error(
        "expected a chemical formula (optionally followed by a '+' or '-' and a particle offset), \
        or a standalone particle offset"
    )]
    ExpectedChemicalFormula,

    #[error("expected a particle (like p or e), optionally preceded by a number")]
    ExpectedParticleOffset,

    #[diagnostic(help(
        "a 0 value doesn't make sense here, if you've mistakenly included a leading zero, like \
        NH02, try just NH2 instead"
    ))]
    #[error("counts cannot start with 0")]
    ExpectedNoLeadingZero,

    #[error("expected an ASCII digit 1-9")]
    ExpectedDigit,

    #[error("expected an ASCII uppercase letter")]
    ExpectedUppercase,

    #[error("expected an ASCII lowercase letter")]
    ExpectedLowercase,

    #[error("expected '[' to open isotope brackets")]
    ExpectedIsotopeStart,

    #[error("expected an isotopic mass number")]
    ExpectedMassNumber,

    #[diagnostic(help("you've probably forgotten to close an earlier '[' bracket"))]
    #[error("expected ']' to close isotope brackets")]
    ExpectedIsotopeEnd,

    #[diagnostic(help("check for stray punctuation or whitespace"))]
    #[error("could not interpret the full input as a chemical formula")]
    IncompleteParse,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(AtomicLookupError),

    #[error("an unknown parsing error occurred: {0:?}")]
    Nom(ErrorKind),
}

impl<'s> ParseError<&'s str> for ParseFailure<'s> {
    fn from_error_kind(input: &'s str, kind: ErrorKind) -> Self {
        Self {
            input,
            len: next_char_len(input),
            kind: FormulaErrorKind::Nom(kind),
        }
    }

    fn append(_: &'s str, _: ErrorKind, other: Self) -> Self {
        other
    }
}

// Public API ==========================================================================================================

/// Replaces the reason for a recoverable failure, leaving fatal failures (from a `cut`) untouched
pub fn expect<'s, O>(
    mut parser: impl FnMut(&'s str) -> ParseResult<'s, O>,
    kind: FormulaErrorKind,
) -> impl FnMut(&'s str) -> ParseResult<'s, O> {
    move |i| {
        parser(i).map_err(|e| match e {
            nom::Err::Error(failure) => nom::Err::Error(ParseFailure {
                kind: kind.clone(),
                ..failure
            }),
            e => e,
        })
    }
}

/// Runs a database lookup on the output of `parser`; failed lookups are fatal and highlight everything that `parser`
/// consumed
pub fn lookup<'s, O, T>(
    mut parser: impl FnMut(&'s str) -> ParseResult<'s, O>,
    mut f: impl FnMut(O) -> Result<T, AtomicLookupError>,
) -> impl FnMut(&'s str) -> ParseResult<'s, T> {
    move |i| {
        let (rest, output) = parser(i)?;
        match f(output) {
            Ok(value) => Ok((rest, value)),
            Err(error) => Err(nom::Err::Failure(ParseFailure {
                input: i,
                len: i.len() - rest.len(),
                kind: FormulaErrorKind::Lookup(error),
            })),
        }
    }
}

// Private Helper Functions ============================================================================================

fn next_char_len(input: &str) -> usize {
    input.chars().next().map_or(0, char::len_utf8)
}
