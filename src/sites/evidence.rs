use crate::psm::Psm;
use crate::sites::classify::{classify_sites, SiteCategory};
use crate::utils::Result;
use std::collections::{BTreeMap, BTreeSet};

/// The highest-probability observation recorded for a site, keyed by
/// position and (optionally) experiment label.
#[derive(Debug, Clone, PartialEq)]
pub struct BestObservation {
    pub raw_file: String,
    pub scan_number: i64,
    pub probability: f64,
}

/// "At least `required` of `positions` carry the modification."
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaybeGroup {
    pub required: u32,
    pub positions: BTreeSet<u32>,
}

pub type ObservationTable = BTreeMap<u32, BTreeMap<Option<String>, BestObservation>>;

/// Accumulates one protein's evidence across its PSMs: the set of confirmed
/// positions, the best supporting observation per site, and the ambiguity
/// groups contributed by PSMs with unresolved localizations.
#[derive(Debug, Default)]
pub struct ProteinEvidence {
    yes_positions: BTreeSet<u32>,
    observations: ObservationTable,
    maybe_groups: BTreeSet<MaybeGroup>,
}

impl ProteinEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_psm(&mut self, psm: &Psm) -> Result<()> {
        let classified = classify_sites(&psm.sites, psm.num_mods);

        let mut maybe_positions = BTreeSet::new();
        let mut yes_count: u32 = 0;
        for (site, category) in &classified {
            let observation = BestObservation {
                raw_file: psm.raw_file.clone(),
                scan_number: psm.scan_number,
                probability: site.probability,
            };
            match category {
                SiteCategory::Yes => {
                    yes_count += 1;
                    let newly_confirmed = self.yes_positions.insert(site.position);
                    self.record_yes(site.position, &psm.experiment, observation, newly_confirmed);
                }
                SiteCategory::Maybe => {
                    maybe_positions.insert(site.position);
                    self.record_maybe(site.position, &psm.experiment, observation);
                }
                SiteCategory::No => {}
            }
        }

        if !maybe_positions.is_empty() {
            if yes_count > psm.num_mods {
                return Err(format!(
                    "{}: scan {} of {} has {} confirmed sites but only {} modifications",
                    psm.protein, psm.scan_number, psm.raw_file, yes_count, psm.num_mods
                ));
            }
            let required = psm.num_mods - yes_count;
            // A fully explained PSM constrains nothing.
            if required > 0 {
                self.maybe_groups.insert(MaybeGroup {
                    required,
                    positions: maybe_positions,
                });
            }
        }

        Ok(())
    }

    fn record_yes(
        &mut self,
        position: u32,
        experiment: &Option<String>,
        observation: BestObservation,
        newly_confirmed: bool,
    ) {
        let by_experiment = self.observations.entry(position).or_default();
        if newly_confirmed {
            // The confirming observation claims the record outright; any
            // earlier entry here was MAYBE-backed.
            by_experiment.insert(experiment.clone(), observation);
        } else {
            by_experiment
                .entry(experiment.clone())
                .and_modify(|best| {
                    if best.probability < observation.probability {
                        *best = observation.clone();
                    }
                })
                .or_insert(observation);
        }
    }

    fn record_maybe(
        &mut self,
        position: u32,
        experiment: &Option<String>,
        observation: BestObservation,
    ) {
        let already_confirmed = self.yes_positions.contains(&position);
        self.observations
            .entry(position)
            .or_default()
            .entry(experiment.clone())
            .and_modify(|best| {
                if !already_confirmed && best.probability < observation.probability {
                    *best = observation.clone();
                }
            })
            .or_insert(observation);
    }

    pub fn yes_positions(&self) -> &BTreeSet<u32> {
        &self.yes_positions
    }

    pub fn maybe_groups(&self) -> &BTreeSet<MaybeGroup> {
        &self.maybe_groups
    }

    pub fn into_parts(self) -> (BTreeSet<u32>, BTreeSet<MaybeGroup>, ObservationTable) {
        (self.yes_positions, self.maybe_groups, self.observations)
    }
}
