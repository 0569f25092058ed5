//! Writer for the site-constraints table: one row per region with the
//! minimum site count and the group constraints that define it.

use crate::report::RegionEntry;
use crate::sites::ProteinResolution;
use crate::utils::Result;
use itertools::Itertools;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ConstraintsWriter<W: Write> {
    writer: W,
}

impl ConstraintsWriter<BufWriter<fs::File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            fs::File::create(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> ConstraintsWriter<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "Protein\tRegion ID\tMin Sites\tSite ID Constraints")
            .map_err(|e| format!("Error writing constraints header: {}", e))?;
        Ok(ConstraintsWriter { writer })
    }

    pub fn write_protein(
        &mut self,
        resolution: &ProteinResolution,
        entries: &[(u64, RegionEntry)],
    ) -> Result<()> {
        for (region_id, entry) in entries {
            match entry {
                RegionEntry::Ambiguous(resolved) => {
                    let constraints = resolved
                        .region
                        .groups
                        .iter()
                        .map(|group| {
                            format!(
                                "({} of {})",
                                group.required,
                                group.positions.iter().join(",")
                            )
                        })
                        .join("&");
                    writeln!(
                        self.writer,
                        "{}\t{}\t{}\t{}",
                        resolution.protein, region_id, resolved.min_sites, constraints
                    )
                }
                RegionEntry::Confirmed(position) => writeln!(
                    self.writer,
                    "{}\t{}\t1\t{}",
                    resolution.protein, region_id, position
                ),
            }
            .map_err(|e| format!("Error writing constraints row: {}", e))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| format!("Error flushing constraints output: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::number_regions;
    use crate::sites::resolve_protein;
    use crate::psm::{Psm, SiteProb};

    fn psm(scan: i64, num_mods: u32, pairs: &[(u32, f64)]) -> Psm {
        Psm {
            protein: "P1".to_string(),
            raw_file: "a.raw".to_string(),
            scan_number: scan,
            experiment: None,
            num_mods,
            sites: pairs
                .iter()
                .map(|&(position, probability)| SiteProb {
                    position,
                    probability,
                })
                .collect(),
        }
    }

    fn written(psms: &[Psm]) -> String {
        let resolution = resolve_protein("P1", psms).unwrap();
        let mut next_region_id = 0;
        let entries = number_regions(&resolution, &mut next_region_id);
        let mut writer = ConstraintsWriter::new(Vec::new()).unwrap();
        writer.write_protein(&resolution, &entries).unwrap();
        String::from_utf8(writer.writer).unwrap()
    }

    #[test]
    fn header_row_matches_format() {
        let writer = ConstraintsWriter::new(Vec::new()).unwrap();
        assert_eq!(
            String::from_utf8(writer.writer).unwrap(),
            "Protein\tRegion ID\tMin Sites\tSite ID Constraints\n"
        );
    }

    #[test]
    fn ambiguous_region_renders_group_constraints() {
        let out = written(&[psm(1, 2, &[(5, 0.6), (6, 0.6), (7, 0.3)])]);
        assert!(
            out.contains("P1\t0\t2\t(2 of 5,6,7)"),
            "unexpected output: {}",
            out
        );
    }

    #[test]
    fn multiple_groups_join_with_ampersand() {
        let out = written(&[
            psm(1, 1, &[(3, 0.45), (4, 0.45)]),
            psm(2, 1, &[(4, 0.45), (5, 0.45)]),
        ]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("P1\t0\t1\t"), "unexpected row: {}", row);
        assert!(row.contains("(1 of 3,4)&(1 of 4,5)"), "unexpected row: {}", row);
    }

    #[test]
    fn confirmed_site_is_a_degenerate_region() {
        let out = written(&[psm(1, 1, &[(10, 0.95), (11, 0.05)])]);
        assert_eq!(
            out,
            "Protein\tRegion ID\tMin Sites\tSite ID Constraints\nP1\t0\t1\t10\n"
        );
    }
}
