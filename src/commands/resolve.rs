use crate::cli::ResolveArgs;
use crate::psm::{open_psm_table, Psm};
use crate::report::{number_regions, ConstraintsWriter, EvidenceWriter};
use crate::sites::resolve_protein;
use crate::utils::Result;
use std::collections::BTreeMap;

pub fn resolve(args: ResolveArgs) -> Result<()> {
    let reader = open_psm_table(&args.input_path, args.by_experiment)?;

    // Read the whole table up front; proteins are processed in
    // lexicographic order, rows within a protein in input order.
    let mut psms_by_protein: BTreeMap<String, Vec<Psm>> = BTreeMap::new();
    let mut num_psms: usize = 0;
    for psm in reader {
        let psm = psm?;
        num_psms += 1;
        psms_by_protein
            .entry(psm.protein.clone())
            .or_default()
            .push(psm);
    }
    log::info!(
        "Read {} PSMs covering {} proteins from {}",
        num_psms,
        psms_by_protein.len(),
        args.input_path.display()
    );

    let mut constraints = ConstraintsWriter::from_path(&args.constraints_path)?;
    let mut evidence = EvidenceWriter::from_path(&args.evidence_path, args.by_experiment)?;

    let mut next_region_id: u64 = 0;
    for (protein, psms) in &psms_by_protein {
        log::debug!("Working on protein {}", protein);
        let resolution = resolve_protein(protein, psms)?;
        let entries = number_regions(&resolution, &mut next_region_id);
        constraints.write_protein(&resolution, &entries)?;
        evidence.write_protein(&resolution, &entries)?;
    }
    constraints.finish()?;
    evidence.finish()?;
    log::info!(
        "Wrote {} regions for {} proteins",
        next_region_id,
        psms_by_protein.len()
    );

    Ok(())
}
