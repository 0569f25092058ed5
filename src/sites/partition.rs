use crate::sites::evidence::MaybeGroup;
use std::collections::BTreeSet;

/// A maximal cluster of ambiguity groups connected through shared candidate
/// positions, resolved independently of all other regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub groups: Vec<MaybeGroup>,
    pub positions: BTreeSet<u32>,
}

/// Splits groups into connected components: seed a region with the first
/// unassigned group, then absorb any group overlapping the region's
/// accumulated position set until none is left, and repeat.
pub fn partition(mut groups: Vec<MaybeGroup>) -> Vec<Region> {
    let mut regions = Vec::new();
    while !groups.is_empty() {
        let seed = groups.remove(0);
        let mut positions = seed.positions.clone();
        let mut members = vec![seed];
        let mut changed = true;
        while changed {
            changed = false;
            let mut index = groups.len();
            while index > 0 {
                index -= 1;
                if !groups[index].positions.is_disjoint(&positions) {
                    let group = groups.remove(index);
                    positions.extend(group.positions.iter().copied());
                    members.push(group);
                    changed = true;
                }
            }
        }
        regions.push(Region {
            groups: members,
            positions,
        });
    }
    regions
}
