//! Deciding which cage topologies a reaction's mass spectrum actually supports
//!
//! Some assemblies share an m/z with bigger ones at a higher charge: a singly charged [2+3] cage sits exactly where a
//! doubly charged [4+6] cage does. When the bigger cage has been seen, and the smaller one was never seen at a charge
//! of two, the smaller one is treated as an echo of the bigger cage and isn't assigned.

// External Crate Imports
use log::debug;

// Local Crate Imports
use crate::{MassSpectrumPeak, PeakId, Stoichiometry, TopologyAssignment};

// Constants ===========================================================================================================

const TWO_PLUS_THREE: Stoichiometry = Stoichiometry::new(2, 3);
const FOUR_PLUS_SIX: Stoichiometry = Stoichiometry::new(4, 6);
// NOTE: A [3+5] assembly is mass-degenerate with more common cages, so it's never assigned a topology
const THREE_PLUS_FIVE: Stoichiometry = Stoichiometry::new(3, 5);
const EIGHT_PLUS_TWELVE: Stoichiometry = Stoichiometry::new(8, 12);

// Public API ==========================================================================================================

/// Can `peak` be used as evidence for a cage topology?
#[must_use]
pub fn is_assignable(peak: &MassSpectrumPeak) -> bool {
    matches!(peak.charge, 1 | 2) && peak.stoichiometry() != THREE_PLUS_FIVE
}

/// Assigns a topology to every assignable peak, apart from those explained away as charge-state echoes
pub fn assign_topologies<'p>(
    peaks: impl IntoIterator<Item = (PeakId, &'p MassSpectrumPeak)>,
) -> Vec<TopologyAssignment> {
    let peaks: Vec<_> = peaks
        .into_iter()
        .filter(|(_, peak)| is_assignable(peak))
        .collect();
    let evidence = Evidence::gather(peaks.iter().map(|&(_, peak)| peak));

    peaks
        .into_iter()
        .filter_map(|(peak_id, peak)| {
            let topology = peak.stoichiometry();
            if evidence.suppresses(topology) {
                debug!("peak {peak_id} looks like a charge-state echo, so [{topology}] wasn't assigned");
                return None;
            }
            Some(TopologyAssignment::new(peak_id, topology.to_string()))
        })
        .collect()
}

// Private Types =======================================================================================================

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
struct Evidence {
    has_four_plus_six: bool,
    has_singly_charged_two_plus_three: bool,
    has_doubly_charged_two_plus_three: bool,
    has_eight_plus_twelve: bool,
    has_singly_charged_four_plus_six: bool,
    has_doubly_charged_four_plus_six: bool,
}

impl Evidence {
    fn gather<'p>(peaks: impl IntoIterator<Item = &'p MassSpectrumPeak>) -> Self {
        peaks.into_iter().fold(Self::default(), |mut evidence, peak| {
            let stoichiometry = peak.stoichiometry();
            let charged = |topology, charge| stoichiometry == topology && peak.charge == charge;

            evidence.has_four_plus_six |= stoichiometry == FOUR_PLUS_SIX;
            evidence.has_singly_charged_two_plus_three |= charged(TWO_PLUS_THREE, 1);
            evidence.has_doubly_charged_two_plus_three |= charged(TWO_PLUS_THREE, 2);
            evidence.has_eight_plus_twelve |= stoichiometry == EIGHT_PLUS_TWELVE;
            evidence.has_singly_charged_four_plus_six |= charged(FOUR_PLUS_SIX, 1);
            evidence.has_doubly_charged_four_plus_six |= charged(FOUR_PLUS_SIX, 2);
            evidence
        })
    }

    const fn avoid_two_plus_three(&self) -> bool {
        self.has_four_plus_six && self.has_singly_charged_two_plus_three && !self.has_doubly_charged_two_plus_three
    }

    const fn avoid_four_plus_six(&self) -> bool {
        self.has_eight_plus_twelve && self.has_singly_charged_four_plus_six && !self.has_doubly_charged_four_plus_six
    }

    fn suppresses(&self, topology: Stoichiometry) -> bool {
        (topology == TWO_PLUS_THREE && self.avoid_two_plus_three())
            || (topology == FOUR_PLUS_SIX && self.avoid_four_plus_six())
    }
}

// Module Tests ========================================================================================================
