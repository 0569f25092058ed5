use crate::sites::evidence::MaybeGroup;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Drops every group that is implied by another group with an
/// equal-or-greater required count over a superset of its positions.
/// Pairwise O(g^2) scan; group counts per protein are small.
pub fn prune_dominated(groups: BTreeSet<MaybeGroup>) -> Vec<MaybeGroup> {
    let groups = groups.into_iter().collect_vec();
    let mut dominated = vec![false; groups.len()];
    for (i, a) in groups.iter().enumerate() {
        for (j, b) in groups.iter().enumerate() {
            if i != j && a.required >= b.required && a.positions.is_superset(&b.positions) {
                dominated[j] = true;
            }
        }
    }
    groups
        .into_iter()
        .zip(dominated)
        .filter_map(|(group, dominated)| (!dominated).then_some(group))
        .collect()
}
