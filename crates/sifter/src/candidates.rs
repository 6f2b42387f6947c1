// External Crate Imports
use cagechem::{ADDUCTS, Adduct};
use itertools::iproduct;

// Local Crate Imports
use crate::{CandidateAssembly, Stoichiometry};

// Constants ===========================================================================================================

pub const CHARGES: [u32; 4] = [1, 2, 3, 4];

/// The `tri+di` combinations that close into a cage: [2+3], [4+6], [3+5], [6+9], and [8+12]
pub const STOICHIOMETRIES: [Stoichiometry; 5] = [
    Stoichiometry::new(2, 3),
    Stoichiometry::new(4, 6),
    Stoichiometry::new(3, 5),
    Stoichiometry::new(6, 9),
    Stoichiometry::new(8, 12),
];

// NOTE: These are literal tables and not some rule computed from adduct sizes. Singly charged ions can't carry
// adducts made of two or three cations, and doubly charged ions skip the one- and three-cation adducts. Charges 3 and
// 4 accept everything
const BANNED_AT_CHARGE_ONE: [&str; 6] = ["H2", "H3", "K2", "K3", "Na2", "Na3"];
const BANNED_AT_CHARGE_TWO: [&str; 6] = ["H", "H3", "K", "K3", "Na", "Na3"];

// Public API ==========================================================================================================

impl Stoichiometry {
    #[must_use]
    pub const fn new(tri_count: u32, di_count: u32) -> Self {
        Self {
            tri_count,
            di_count,
        }
    }
}

/// Can an ion carrying `charge` be formed with `adduct`?
#[must_use]
pub fn is_compatible(charge: u32, adduct: &Adduct) -> bool {
    let banned: &[&str] = match charge {
        1 => &BANNED_AT_CHARGE_ONE,
        2 => &BANNED_AT_CHARGE_TWO,
        _ => &[],
    };
    !banned.contains(&adduct.name())
}

/// Every candidate assembly worth searching for, adducts outermost, then charges, then stoichiometries
pub fn enumerate_candidates() -> impl Iterator<Item = CandidateAssembly> {
    iproduct!(ADDUCTS, CHARGES, STOICHIOMETRIES)
        .filter(|(adduct, charge, _)| is_compatible(*charge, adduct))
        .map(|(adduct, charge, stoichiometry)| CandidateAssembly::new(adduct, charge, stoichiometry))
}

// Module Tests ========================================================================================================
