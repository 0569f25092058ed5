use crate::psm::table::Columns;
use crate::utils::Result;
use std::str::FromStr;

/// One candidate site of a PSM: a protein position and its localization probability.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProb {
    pub position: u32,
    pub probability: f64,
}

/// One row of input evidence tying a spectrum to a modified peptide.
#[derive(Debug, Clone)]
pub struct Psm {
    pub protein: String,
    pub raw_file: String,
    pub scan_number: i64,
    pub experiment: Option<String>,
    pub num_mods: u32,
    pub sites: Vec<SiteProb>,
}

impl Psm {
    pub fn from_line(line: &str, columns: &Columns, line_number: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |index: usize, name: &str| -> Result<&str> {
            fields
                .get(index)
                .copied()
                .ok_or(format!("Missing {} field at line {}", name, line_number))
        };

        let protein = field(columns.protein, "Protein")?.to_string();
        let raw_file = field(columns.raw_file, "RawFile")?.to_string();
        let scan_number: i64 = parse_field(field(columns.scan_number, "ScanNumber")?)
            .map_err(|e| format!("Invalid ScanNumber at line {}: {}", line_number, e))?;
        let num_mods: u32 = parse_field(field(columns.num_mods, "NumMods")?)
            .map_err(|e| format!("Invalid NumMods at line {}: {}", line_number, e))?;
        if num_mods == 0 {
            return Err(format!("NumMods must be positive at line {}", line_number));
        }

        let positions: Vec<u32> = parse_list(field(columns.positions, "Positions")?)
            .map_err(|e| format!("Invalid Positions at line {}: {}", line_number, e))?;
        let probabilities: Vec<f64> = parse_list(field(columns.probabilities, "Probabilities")?)
            .map_err(|e| format!("Invalid Probabilities at line {}: {}", line_number, e))?;
        if positions.len() != probabilities.len() {
            return Err(format!(
                "Number of probabilities does not equal number of positions at line {}: {} vs {}",
                line_number,
                positions.len(),
                probabilities.len()
            ));
        }
        for &prob in &probabilities {
            if !prob.is_finite() || !(0.0..=1.0).contains(&prob) {
                return Err(format!(
                    "Probability out of [0,1] at line {}: {}",
                    line_number, prob
                ));
            }
        }

        let experiment = match columns.experiment {
            Some(index) => Some(field(index, "Experiment")?.to_string()),
            None => None,
        };

        let sites = positions
            .into_iter()
            .zip(probabilities)
            .map(|(position, probability)| SiteProb {
                position,
                probability,
            })
            .collect();

        Ok(Psm {
            protein,
            raw_file,
            scan_number,
            experiment,
            num_mods,
            sites,
        })
    }
}

fn parse_field<T: FromStr>(field: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    field
        .trim()
        .parse()
        .map_err(|e: T::Err| format!("{} ({})", e, field))
}

fn parse_list<T: FromStr>(field: &str) -> Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    field.split(';').map(parse_field).collect()
}
