use crate::sites::evidence::MaybeGroup;
use crate::utils::Result;
use std::collections::BTreeSet;

/// Removes already-confirmed positions from ambiguity groups, decrementing
/// their required counts, and promotes groups whose remainder is exactly
/// determined. Runs to a fixed point: promotions enlarge the confirmed set,
/// which can unlock further groups.
pub fn consolidate(
    protein: &str,
    yes_positions: &mut BTreeSet<u32>,
    mut groups: BTreeSet<MaybeGroup>,
) -> Result<BTreeSet<MaybeGroup>> {
    let mut changed = true;
    while changed {
        changed = false;
        let mut next = BTreeSet::new();
        for group in &groups {
            let confirmed = group.positions.intersection(yes_positions).count() as u32;
            if confirmed == 0 {
                next.insert(group.clone());
                continue;
            }
            changed = true;
            if confirmed >= group.required {
                // Fully satisfied by confirmed sites.
                continue;
            }
            let required = group.required - confirmed;
            let remaining: BTreeSet<u32> = group
                .positions
                .difference(yes_positions)
                .copied()
                .collect();
            if required as usize > remaining.len() {
                return Err(format!(
                    "{}: group requires {} of {} remaining candidate sites after removing confirmed sites",
                    protein,
                    required,
                    remaining.len()
                ));
            }
            if required as usize == remaining.len() {
                // Every remaining candidate is now mandatory.
                log::debug!(
                    "{}: confirmed {} candidate sites by elimination",
                    protein,
                    remaining.len()
                );
                yes_positions.extend(remaining);
            } else {
                next.insert(MaybeGroup {
                    required,
                    positions: remaining,
                });
            }
        }
        groups = next;
    }
    Ok(groups)
}
