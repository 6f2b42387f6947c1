use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::parsers::errors::FormulaErrorKind;

pub type Result<T, E = Box<CageChemError>> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum CageChemError {
    #[error("failed to parse the chemical formula {input:?}")]
    Formula {
        #[source_code]
        input: String,
        #[label("{kind}")]
        span: SourceSpan,
        #[diagnostic_source]
        kind: FormulaErrorKind,
    },

    #[diagnostic(help("the subtracted formula must be contained within the formula it's removed from"))]
    #[error("cannot remove {subtrahend} from {minuend}, as that would leave a negative number of {symbol} atoms")]
    InsufficientAtoms {
        minuend: String,
        subtrahend: String,
        symbol: String,
    },
}

impl CageChemError {
    pub(crate) fn formula(input: &str, offset: usize, len: usize, kind: FormulaErrorKind) -> Self {
        let input = input.to_owned();
        let span = (offset, len).into();

        Self::Formula { input, span, kind }
    }
}
