use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

use rust_decimal::Decimal;

use crate::{Charge, Charged, Massive, Particle};

use super::{
    atomic_database::{AtomicDatabase, ParticleDescription},
    errors::AtomicLookupError,
};

impl<'a> Particle<'a> {
    pub(crate) fn new(
        db: &'a AtomicDatabase,
        symbol: impl AsRef<str>,
    ) -> Result<Self, AtomicLookupError> {
        let symbol = symbol.as_ref();
        let (symbol, &ParticleDescription { name, mass, charge }) = db
            .particles
            .get_key_value(symbol)
            .ok_or_else(|| AtomicLookupError::particle(symbol))?;
        Ok(Self {
            symbol,
            name,
            mass,
            charge,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

// NOTE: Particles are uniquely identified by their symbol within a database
impl PartialEq for Particle<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Particle<'_> {}

impl Ord for Particle<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol.cmp(other.symbol)
    }
}

impl PartialOrd for Particle<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Particle<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl Massive for Particle<'_> {
    fn monoisotopic_mass(&self) -> Decimal {
        self.mass
    }

    fn average_mass(&self) -> Decimal {
        self.mass
    }
}

impl Charged for Particle<'_> {
    fn charge(&self) -> Charge {
        self.charge
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use rust_decimal_macros::dec;

    use super::*;

    static DB: LazyLock<AtomicDatabase> = LazyLock::new(AtomicDatabase::default);

    #[test]
    fn new_particle() {
        let proton = Particle::new(&DB, "p").unwrap();
        assert_eq!(proton.name(), "Proton");
        assert_eq!(proton.to_string(), "p");
        assert_eq!(proton.charge(), Charge(1));
        assert_eq!(proton.monoisotopic_mass(), dec!(1.007276466621));

        let electron = Particle::new(&DB, "e").unwrap();
        assert_eq!(electron.charge(), Charge(-1));
        assert_eq!(electron.average_mass(), dec!(0.000548579909065));

        assert_eq!(
            Particle::new(&DB, "m"),
            Err(AtomicLookupError::Particle {
                symbol: "m".to_owned()
            })
        );
    }
}
