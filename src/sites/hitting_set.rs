use crate::sites::partition::Region;
use crate::utils::Result;
use itertools::Itertools;
use std::collections::BTreeSet;

// The search below enumerates C(|P|, k) subsets per candidate k; a region
// anywhere near this many candidate sites means the input is pathological.
const MAX_REGION_POSITIONS: usize = 64;

/// Smallest number of sites that simultaneously satisfies every group
/// constraint of a region: the minimum k such that some k-subset of the
/// region's positions hits at least `required` positions of every group.
pub fn min_sites(protein: &str, region: &Region) -> Result<u32> {
    if region.positions.len() > MAX_REGION_POSITIONS {
        return Err(format!(
            "{}: region spans {} candidate sites, above the exhaustive search limit of {}",
            protein,
            region.positions.len(),
            MAX_REGION_POSITIONS
        ));
    }

    for k in 1..=region.positions.len() {
        for subset in region.positions.iter().copied().combinations(k) {
            let chosen: BTreeSet<u32> = subset.into_iter().collect();
            let satisfied = region.groups.iter().all(|group| {
                group.positions.intersection(&chosen).count() >= group.required as usize
            });
            if satisfied {
                return Ok(k as u32);
            }
        }
    }

    Err(format!(
        "{}: no subset of {} candidate sites satisfies all group constraints",
        protein,
        region.positions.len()
    ))
}
