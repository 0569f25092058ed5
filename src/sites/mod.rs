pub mod classify;
mod consolidate;
mod evidence;
mod hitting_set;
mod partition;
mod pipeline;
mod prune;

pub use classify::{classify_sites, min_yes_prob, SiteCategory};
pub use evidence::{BestObservation, MaybeGroup, ObservationTable, ProteinEvidence};
pub use partition::Region;
pub use pipeline::{resolve_protein, ProteinResolution, ResolvedRegion};
