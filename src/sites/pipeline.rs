use crate::psm::Psm;
use crate::sites::consolidate::consolidate;
use crate::sites::evidence::{ObservationTable, ProteinEvidence};
use crate::sites::hitting_set::min_sites;
use crate::sites::partition::{partition, Region};
use crate::sites::prune::prune_dominated;
use crate::utils::Result;

/// A region together with the smallest number of modified sites that
/// explains every one of its group constraints.
#[derive(Debug, Clone)]
pub struct ResolvedRegion {
    pub region: Region,
    pub min_sites: u32,
}

/// Everything the reports need for one protein: resolved ambiguity
/// regions, confirmed sites, and the best observation per site.
#[derive(Debug)]
pub struct ProteinResolution {
    pub protein: String,
    pub regions: Vec<ResolvedRegion>,
    pub yes_sites: Vec<u32>,
    pub observations: ObservationTable,
}

/// Runs the full per-protein pipeline: classify and aggregate each PSM,
/// consolidate groups against confirmed sites, prune dominated groups,
/// partition the rest into regions and solve each one.
pub fn resolve_protein(protein: &str, psms: &[Psm]) -> Result<ProteinResolution> {
    let mut evidence = ProteinEvidence::new();
    for psm in psms {
        evidence.add_psm(psm)?;
    }
    let (mut yes_positions, maybe_groups, observations) = evidence.into_parts();

    let groups = consolidate(protein, &mut yes_positions, maybe_groups)?;
    let groups = prune_dominated(groups);

    let mut regions = Vec::new();
    for region in partition(groups) {
        let min_sites = min_sites(protein, &region)?;
        regions.push(ResolvedRegion { region, min_sites });
    }
    log::debug!(
        "{}: {} ambiguous regions, {} confirmed sites",
        protein,
        regions.len(),
        yes_positions.len()
    );

    Ok(ProteinResolution {
        protein: protein.to_string(),
        regions,
        yes_sites: yes_positions.into_iter().collect(),
        observations,
    })
}
