use crate::psm::SiteProb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteCategory {
    Yes,
    Maybe,
    No,
}

// Thresholds are rounded to 3 decimals, ties to even, to match how the
// upstream search engine reports site probabilities.
const ROUND_SCALE: f64 = 1000.0;

fn round3(value: f64) -> f64 {
    let scaled = value * ROUND_SCALE;
    let floor = scaled.floor();
    let rounded = if scaled - floor == 0.5 {
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / ROUND_SCALE
}

/// Minimum probability for a site to count as confidently modified:
/// `round(n / (n + 1), 3)` for a peptide carrying `n` modifications.
pub fn min_yes_prob(num_mods: u32) -> f64 {
    round3(f64::from(num_mods) / (1.0 + f64::from(num_mods)))
}

/// Partitions one PSM's candidate sites into YES / MAYBE / NO.
///
/// Sites are returned sorted by descending probability (ties by descending
/// position). A site is YES above the threshold; MAYBE if it is the top
/// candidate, ties a preceding MAYBE, or the probability mass seen so far
/// leaves part of the modification count unexplained; otherwise NO.
pub fn classify_sites(sites: &[SiteProb], num_mods: u32) -> Vec<(SiteProb, SiteCategory)> {
    let mut ordered = sites.to_vec();
    ordered.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then(b.position.cmp(&a.position))
    });

    let threshold = min_yes_prob(num_mods);
    let needed_mass = f64::from(num_mods) - threshold;

    let mut categories: Vec<SiteCategory> = Vec::with_capacity(ordered.len());
    let mut mass_before = 0.0;
    for (i, site) in ordered.iter().enumerate() {
        let category = if site.probability > threshold {
            SiteCategory::Yes
        } else if i == 0
            || (site.probability == ordered[i - 1].probability
                && categories[i - 1] == SiteCategory::Maybe)
            || mass_before < needed_mass
        {
            SiteCategory::Maybe
        } else {
            SiteCategory::No
        };
        categories.push(category);
        mass_before += site.probability;
    }

    ordered.into_iter().zip(categories).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SiteCategory::{Maybe, No, Yes};

    fn sites(pairs: &[(u32, f64)]) -> Vec<SiteProb> {
        pairs
            .iter()
            .map(|&(position, probability)| SiteProb {
                position,
                probability,
            })
            .collect()
    }

    fn categories(classified: &[(SiteProb, SiteCategory)]) -> Vec<(u32, SiteCategory)> {
        classified.iter().map(|(s, c)| (s.position, *c)).collect()
    }

    #[test]
    fn threshold_matches_reference_rounding() {
        assert_eq!(min_yes_prob(1), 0.5);
        assert_eq!(min_yes_prob(2), 0.667);
        assert_eq!(min_yes_prob(3), 0.75);
        assert_eq!(min_yes_prob(4), 0.8);
        assert_eq!(min_yes_prob(5), 0.833);
    }

    #[test]
    fn round3_ties_to_even() {
        assert_eq!(round3(0.0625), 0.062);
        assert_eq!(round3(0.0635), 0.064);
    }

    #[test]
    fn confident_site_is_yes_rest_no() {
        // NumMods=1, [10, 11] with [0.9, 0.1]: 10 clears 0.5, 11 does not
        // and the 0.9 already explains the single modification.
        let classified = classify_sites(&sites(&[(10, 0.9), (11, 0.1)]), 1);
        assert_eq!(categories(&classified), vec![(10, Yes), (11, No)]);
    }

    #[test]
    fn ambiguous_sites_are_maybe() {
        // NumMods=2, [5, 6, 7] with [0.6, 0.6, 0.3]: nothing clears 0.667;
        // 5 and 6 tie, and 0.6+0.6 < 2-0.667 keeps 7 in play as well.
        let classified = classify_sites(&sites(&[(5, 0.6), (6, 0.6), (7, 0.3)]), 2);
        assert_eq!(categories(&classified), vec![(6, Maybe), (5, Maybe), (7, Maybe)]);
    }

    #[test]
    fn cumulative_mass_rule_cuts_off_tail() {
        // NumMods=1: top site is MAYBE (fails 0.5), second explains nothing
        // once 0.45+0.35 >= 0.5 has been seen.
        let classified = classify_sites(&sites(&[(3, 0.45), (4, 0.35), (5, 0.2)]), 1);
        assert_eq!(categories(&classified), vec![(3, Maybe), (4, Maybe), (5, No)]);
    }

    #[test]
    fn tie_with_maybe_stays_maybe() {
        // The third site ties the second; a tied MAYBE stays MAYBE even
        // though the cumulative rule alone would have dropped it.
        let classified = classify_sites(&sites(&[(1, 0.4), (2, 0.3), (3, 0.3)]), 1);
        assert_eq!(categories(&classified), vec![(1, Maybe), (3, Maybe), (2, Maybe)]);
    }

    #[test]
    fn tie_with_no_stays_no() {
        // Ties only propagate MAYBE: once the cumulative rule has dropped a
        // site, an equal-probability follower is dropped as well.
        let classified = classify_sites(&sites(&[(1, 0.5), (2, 0.25), (3, 0.25)]), 1);
        assert_eq!(categories(&classified), vec![(1, Maybe), (3, No), (2, No)]);
    }

    #[test]
    fn probability_ties_sort_by_descending_position() {
        let classified = classify_sites(&sites(&[(5, 0.6), (9, 0.6), (7, 0.6)]), 2);
        let order: Vec<u32> = classified.iter().map(|(s, _)| s.position).collect();
        assert_eq!(order, vec![9, 7, 5]);
    }

    #[test]
    fn yes_count_never_exceeds_num_mods_for_consistent_input() {
        // Probabilities summing to NumMods: at most n sites can each hold
        // more than n/(n+1) of the mass.
        for (num_mods, probs) in [
            (1, vec![0.7, 0.2, 0.1]),
            (2, vec![0.9, 0.8, 0.3]),
            (3, vec![0.99, 0.95, 0.9, 0.16]),
        ] {
            let input: Vec<SiteProb> = probs
                .iter()
                .enumerate()
                .map(|(i, &p)| SiteProb {
                    position: i as u32 + 1,
                    probability: p,
                })
                .collect();
            let yes = classify_sites(&input, num_mods)
                .iter()
                .filter(|(_, c)| *c == Yes)
                .count();
            assert!(yes as u32 <= num_mods);
        }
    }
}
