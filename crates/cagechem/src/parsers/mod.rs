pub mod chemical_formula;
pub mod errors;
pub mod primitives;
