mod constraints;
mod evidence;

pub use constraints::ConstraintsWriter;
pub use evidence::EvidenceWriter;

use crate::sites::{ProteinResolution, ResolvedRegion};

/// One output region of a protein: either a resolved ambiguity region or a
/// degenerate single-site region for a confirmed position.
#[derive(Debug)]
pub enum RegionEntry<'a> {
    Ambiguous(&'a ResolvedRegion),
    Confirmed(u32),
}

/// Assigns region IDs for one protein's output. The counter is owned by the
/// caller and increases monotonically across the whole run; both report
/// writers consume the same assignment.
pub fn number_regions<'a>(
    resolution: &'a ProteinResolution,
    next_region_id: &mut u64,
) -> Vec<(u64, RegionEntry<'a>)> {
    let mut entries = Vec::with_capacity(resolution.regions.len() + resolution.yes_sites.len());
    for resolved in &resolution.regions {
        entries.push((*next_region_id, RegionEntry::Ambiguous(resolved)));
        *next_region_id += 1;
    }
    for &position in &resolution.yes_sites {
        entries.push((*next_region_id, RegionEntry::Confirmed(position)));
        *next_region_id += 1;
    }
    entries
}
