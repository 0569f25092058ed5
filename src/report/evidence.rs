//! Writer for the best-evidence table: the highest-probability supporting
//! observation for every site that belongs to an emitted region.

use crate::report::RegionEntry;
use crate::sites::ProteinResolution;
use crate::utils::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct EvidenceWriter<W: Write> {
    writer: W,
    with_experiment: bool,
}

impl EvidenceWriter<BufWriter<fs::File>> {
    pub fn from_path(path: &Path, with_experiment: bool) -> Result<Self> {
        let file =
            fs::File::create(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
        Self::new(BufWriter::new(file), with_experiment)
    }
}

impl<W: Write> EvidenceWriter<W> {
    pub fn new(mut writer: W, with_experiment: bool) -> Result<Self> {
        let experiment_column = if with_experiment { "Experiment\t" } else { "" };
        writeln!(
            writer,
            "Protein\tPosition\t{}Best Probability\tBest Raw File\tBest Scan Number\tRegion ID",
            experiment_column
        )
        .map_err(|e| format!("Error writing evidence header: {}", e))?;
        Ok(EvidenceWriter {
            writer,
            with_experiment,
        })
    }

    pub fn write_protein(
        &mut self,
        resolution: &ProteinResolution,
        entries: &[(u64, RegionEntry)],
    ) -> Result<()> {
        for (region_id, entry) in entries {
            let positions: Vec<u32> = match entry {
                RegionEntry::Ambiguous(resolved) => {
                    resolved.region.positions.iter().copied().collect()
                }
                RegionEntry::Confirmed(position) => vec![*position],
            };
            for position in positions {
                let by_experiment = resolution.observations.get(&position).ok_or(format!(
                    "{}: no observation recorded for site {}",
                    resolution.protein, position
                ))?;
                for (experiment, best) in by_experiment {
                    if self.with_experiment {
                        writeln!(
                            self.writer,
                            "{}\t{}\t{}\t{:.6}\t{}\t{}\t{}",
                            resolution.protein,
                            position,
                            experiment.as_deref().unwrap_or(""),
                            best.probability,
                            best.raw_file,
                            best.scan_number,
                            region_id
                        )
                    } else {
                        writeln!(
                            self.writer,
                            "{}\t{}\t{:.6}\t{}\t{}\t{}",
                            resolution.protein,
                            position,
                            best.probability,
                            best.raw_file,
                            best.scan_number,
                            region_id
                        )
                    }
                    .map_err(|e| format!("Error writing evidence row: {}", e))?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| format!("Error flushing evidence output: {}", e))
    }
}
