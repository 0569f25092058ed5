mod record;
mod table;

pub use record::{Psm, SiteProb};
pub use table::{open_psm_table, read_psms, Columns, PsmTableReader};
