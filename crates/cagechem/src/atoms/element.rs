use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

use rust_decimal::Decimal;

use crate::{Element, Isotope, MassNumber, Massive};

use super::{
    atomic_database::{AtomicDatabase, ElementDescription},
    errors::AtomicLookupError,
};

impl<'a> Element<'a> {
    pub(crate) fn new(
        db: &'a AtomicDatabase,
        symbol: impl AsRef<str>,
    ) -> Result<Self, AtomicLookupError> {
        Self::lookup(db, symbol, None)
    }

    pub(crate) fn new_isotope(
        db: &'a AtomicDatabase,
        symbol: impl AsRef<str>,
        mass_number: impl Into<MassNumber>,
    ) -> Result<Self, AtomicLookupError> {
        Self::lookup(db, symbol, Some(mass_number.into()))
    }

    #[must_use]
    pub const fn symbol(&self) -> &'a str {
        self.symbol
    }

    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    fn lookup(
        db: &'a AtomicDatabase,
        symbol: impl AsRef<str>,
        mass_number: Option<MassNumber>,
    ) -> Result<Self, AtomicLookupError> {
        let symbol = symbol.as_ref();
        let (symbol, &ElementDescription { name, isotopes }) = db
            .elements
            .get_key_value(symbol)
            .ok_or_else(|| AtomicLookupError::element(symbol, db.elements.keys().copied()))?;

        if let Some(mass_number) = mass_number
            && !isotopes.iter().any(|i| i.mass_number == mass_number)
        {
            return Err(AtomicLookupError::isotope(name, mass_number, isotopes));
        }

        Ok(Self {
            symbol,
            name,
            mass_number,
            isotopes,
        })
    }

    fn isotope(&self) -> Option<&'a Isotope> {
        self.mass_number
            .and_then(|a| self.isotopes.iter().find(|i| i.mass_number == a))
    }
}

// NOTE: Elements are identified by their symbol and (optional) isotope, the borrowed isotope tables just come along for
// the ride
impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Element<'_> {}

impl Ord for Element<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.symbol, self.mass_number).cmp(&(other.symbol, other.mass_number))
    }
}

impl PartialOrd for Element<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Element<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol;
        if let Some(mass_number) = self.mass_number {
            write!(f, "[{mass_number}{symbol}]")
        } else {
            write!(f, "{symbol}")
        }
    }
}

impl Massive for Element<'_> {
    fn monoisotopic_mass(&self) -> Decimal {
        self.isotope().map_or_else(
            || {
                self.isotopes
                    .iter()
                    .max_by_key(|i| i.abundance)
                    .map_or(Decimal::ZERO, |i| i.relative_mass)
            },
            |i| i.relative_mass,
        )
    }

    fn average_mass(&self) -> Decimal {
        self.isotope().map_or_else(
            || {
                self.isotopes
                    .iter()
                    .map(|i| i.relative_mass * i.abundance)
                    .sum()
            },
            |i| i.relative_mass,
        )
    }
}
