// Standard Library Imports
use std::num::NonZeroU32;

// External Crate Imports
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{cut, map, opt, recognize},
    multi::many1,
    sequence::{delimited, pair},
};

// Local Crate Imports
use super::{
    errors::{FormulaErrorKind, ParseResult, expect, lookup},
    primitives::{count, lowercase, offset_kind, uppercase},
};
use crate::{AtomicDatabase, ChemicalFormula, Element, MassNumber, OffsetKind, Particle};

// Public API ==========================================================================================================

/// Chemical Formula
///   = { Atomic Offset }- , [ Offset Kind , Particle Offset ]
///   | Particle Offset
///   ;
pub fn chemical_formula<'a, 's>(
    db: &'a AtomicDatabase,
) -> impl FnMut(&'s str) -> ParseResult<'s, ChemicalFormula<'a>> {
    let atoms = many1(atomic_offset(db));
    let optional_particle_offset = opt(pair(offset_kind, cut(particle_offset(db))));
    let atoms_and_particles = map(
        pair(atoms, optional_particle_offset),
        |(atoms, particle_offset)| {
            let mut formula = ChemicalFormula::default();
            for (element, count) in atoms {
                formula.add_atoms(element, count.get());
            }
            if let Some((kind, (count, particle))) = particle_offset {
                formula.add_particles(particle, kind.offset(count.get()));
            }
            formula
        },
    );

    let just_particles = map(particle_offset(db), |(count, particle)| {
        let mut formula = ChemicalFormula::default();
        formula.add_particles(particle, OffsetKind::Add.offset(count.get()));
        formula
    });

    expect(
        alt((atoms_and_particles, just_particles)),
        FormulaErrorKind::ExpectedChemicalFormula,
    )
}

// Private Sub-Parsers =================================================================================================

/// Atomic Offset = ( Element | Isotope ) , [ Count ] ;
fn atomic_offset<'a, 's>(
    db: &'a AtomicDatabase,
) -> impl FnMut(&'s str) -> ParseResult<'s, (Element<'a>, NonZeroU32)> {
    let element_or_isotope = alt((element(db), isotope(db)));
    let optional_count = map(opt(count), |c| c.unwrap_or(NonZeroU32::MIN));
    pair(element_or_isotope, optional_count)
}

/// Particle Offset = [ Count ] , Particle ;
fn particle_offset<'a, 's>(
    db: &'a AtomicDatabase,
) -> impl FnMut(&'s str) -> ParseResult<'s, (NonZeroU32, Particle<'a>)> {
    let optional_count = map(opt(count), |c| c.unwrap_or(NonZeroU32::MIN));
    let parser = pair(optional_count, particle(db));
    expect(parser, FormulaErrorKind::ExpectedParticleOffset)
}

// ---------------------------------------------------------------------------------------------------------------------

/// Element = uppercase , [ lowercase ] ;
fn element<'a, 's>(db: &'a AtomicDatabase) -> impl FnMut(&'s str) -> ParseResult<'s, Element<'a>> {
    lookup(element_symbol, |symbol| Element::new(db, symbol))
}

// NOTE: These are not meant to be links, it's just EBNF
#[allow(clippy::doc_link_with_quotes)]
/// Isotope = "[" , Count , Element , "]" ;
fn isotope<'a, 's>(db: &'a AtomicDatabase) -> impl FnMut(&'s str) -> ParseResult<'s, Element<'a>> {
    lookup(isotope_expr, |(mass_number, symbol)| {
        Element::new_isotope(db, symbol, mass_number)
    })
}

/// Particle = lowercase ;
fn particle<'a, 's>(db: &'a AtomicDatabase) -> impl FnMut(&'s str) -> ParseResult<'s, Particle<'a>> {
    lookup(recognize(lowercase), |symbol| Particle::new(db, symbol))
}

// ---------------------------------------------------------------------------------------------------------------------

/// Element = uppercase , [ lowercase ] ;
fn element_symbol(i: &str) -> ParseResult<&str> {
    recognize(pair(uppercase, opt(lowercase)))(i)
}

// NOTE: These are not meant to be links, it's just EBNF
#[allow(clippy::doc_link_with_quotes)]
/// Isotope = "[" , Count , Element , "]" ;
fn isotope_expr(i: &str) -> ParseResult<(MassNumber, &str)> {
    let opening_bracket = expect(char('['), FormulaErrorKind::ExpectedIsotopeStart);
    let mass_number = map(expect(count, FormulaErrorKind::ExpectedMassNumber), |c| {
        MassNumber(c.get())
    });
    let closing_bracket = cut(expect(char(']'), FormulaErrorKind::ExpectedIsotopeEnd));
    delimited(
        opening_bracket,
        cut(pair(mass_number, element_symbol)),
        closing_bracket,
    )(i)
}

// Module Tests ========================================================================================================
