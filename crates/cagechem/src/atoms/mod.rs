pub mod atomic_database;
pub mod chemical_formula;
mod element;
pub mod errors;
mod offset_kind;
mod particle;
