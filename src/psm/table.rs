use crate::psm::Psm;
use crate::utils::Result;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

const EXPERIMENT_COLUMN: &str = "Experiment";

/// Field indices of the required columns within a header line.
#[derive(Debug, Clone)]
pub struct Columns {
    pub raw_file: usize,
    pub scan_number: usize,
    pub protein: usize,
    pub positions: usize,
    pub probabilities: usize,
    pub num_mods: usize,
    pub experiment: Option<usize>,
}

impl Columns {
    pub fn from_header(header: &str, with_experiment: bool) -> Result<Self> {
        let index_of: HashMap<&str, usize> = header
            .split('\t')
            .enumerate()
            .map(|(index, name)| (name.trim(), index))
            .collect();

        let lookup = |name: &str| -> Result<usize> {
            index_of
                .get(name)
                .copied()
                .ok_or(format!("Missing {} in input table", name))
        };

        let experiment = if with_experiment {
            Some(lookup(EXPERIMENT_COLUMN)?)
        } else {
            None
        };

        Ok(Columns {
            raw_file: lookup("RawFile")?,
            scan_number: lookup("ScanNumber")?,
            protein: lookup("Protein")?,
            positions: lookup("Positions")?,
            probabilities: lookup("Probabilities")?,
            num_mods: lookup("NumMods")?,
            experiment,
        })
    }
}

/// Streams PSM rows out of a tab-separated table, one `Result` per row.
pub struct PsmTableReader<R: BufRead> {
    lines: Lines<R>,
    columns: Columns,
    line_number: usize,
}

impl<R: BufRead> PsmTableReader<R> {
    pub fn new(reader: R, with_experiment: bool) -> Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line.map_err(|e| format!("Error reading header line: {}", e))?,
            None => return Err("Input table is empty".to_string()),
        };
        let columns = Columns::from_header(&header, with_experiment)?;
        Ok(PsmTableReader {
            lines,
            columns,
            line_number: 1,
        })
    }
}

impl<R: BufRead> Iterator for PsmTableReader<R> {
    type Item = Result<Psm>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(format!(
                        "Error reading line {}: {}",
                        self.line_number + 1,
                        e
                    )))
                }
            };
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(Psm::from_line(&line, &self.columns, self.line_number));
        }
    }
}

pub fn open_psm_table(
    path: &Path,
    with_experiment: bool,
) -> Result<PsmTableReader<BufReader<fs::File>>> {
    let file = fs::File::open(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
    PsmTableReader::new(BufReader::new(file), with_experiment)
}

/// Reads the whole table up front, failing on the first malformed row.
pub fn read_psms<R: BufRead>(reader: R, with_experiment: bool) -> Result<Vec<Psm>> {
    PsmTableReader::new(reader, with_experiment)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "\
RawFile\tScanNumber\tProtein\tPositions\tProbabilities\tNumMods\n\
run01.raw\t100\tP1\t10;11\t0.9;0.1\t1\n\
run01.raw\t101\tP2\t5;6;7\t0.6;0.6;0.3\t2\n";

    #[test]
    fn read_table() {
        let psms = read_psms(Cursor::new(TABLE), false).unwrap();
        assert_eq!(psms.len(), 2);
        assert_eq!(psms[0].protein, "P1");
        assert_eq!(psms[1].sites.len(), 3);
    }

    #[test]
    fn column_order_is_irrelevant() {
        let data = "\
Protein\tNumMods\tRawFile\tScanNumber\tProbabilities\tPositions\n\
P1\t1\trun01.raw\t100\t0.9\t10\n";
        let psms = read_psms(Cursor::new(data), false).unwrap();
        assert_eq!(psms[0].sites[0].position, 10);
        assert_eq!(psms[0].num_mods, 1);
    }

    #[test]
    fn missing_column_is_fatal() {
        let data = "RawFile\tScanNumber\tProtein\tPositions\tProbabilities\nr\t1\tP\t1\t0.5\n";
        let err = read_psms(Cursor::new(data), false).unwrap_err();
        assert_eq!(err, "Missing NumMods in input table");
    }

    #[test]
    fn missing_experiment_column_is_fatal_when_requested() {
        let err = read_psms(Cursor::new(TABLE), true).unwrap_err();
        assert_eq!(err, "Missing Experiment in input table");
    }

    #[test]
    fn experiment_column_parsed_when_requested() {
        let data = "\
RawFile\tScanNumber\tProtein\tPositions\tProbabilities\tNumMods\tExperiment\n\
r.raw\t100\tP1\t10\t0.9\t1\texp_B\n";
        let psms = read_psms(Cursor::new(data), true).unwrap();
        assert_eq!(psms[0].experiment.as_deref(), Some("exp_B"));
    }

    #[test]
    fn experiment_column_ignored_by_default() {
        let data = "\
RawFile\tScanNumber\tProtein\tPositions\tProbabilities\tNumMods\tExperiment\n\
r.raw\t100\tP1\t10\t0.9\t1\texp_B\n";
        let psms = read_psms(Cursor::new(data), false).unwrap();
        assert_eq!(psms[0].experiment, None);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = format!("{}\n\n", TABLE);
        let psms = read_psms(Cursor::new(data), false).unwrap();
        assert_eq!(psms.len(), 2);
    }

    #[test]
    fn row_errors_carry_line_numbers() {
        let data = "\
RawFile\tScanNumber\tProtein\tPositions\tProbabilities\tNumMods\n\
r.raw\t100\tP1\t10;11\t0.9\t1\n";
        let err = read_psms(Cursor::new(data), false).unwrap_err();
        assert!(err.contains("line 2"), "{}", err);
    }

    #[test]
    fn empty_input_is_fatal() {
        let err = read_psms(Cursor::new(""), false).unwrap_err();
        assert_eq!(err, "Input table is empty");
    }
}
