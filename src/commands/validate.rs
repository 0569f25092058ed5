use crate::cli::ValidateArgs;
use crate::psm::open_psm_table;
use crate::sites::{classify_sites, SiteCategory};
use crate::utils::Result;

pub fn validate(args: ValidateArgs) -> Result<()> {
    let reader = open_psm_table(&args.input_path, args.by_experiment)?;

    let mut error_count: usize = 0;
    let mut success_count: usize = 0;
    let mut site_counts = Vec::new();
    let mut yes_total: usize = 0;
    let mut maybe_total: usize = 0;
    let mut no_total: usize = 0;

    for row in reader {
        match row {
            Ok(psm) => {
                site_counts.push(psm.sites.len());
                for (_, category) in classify_sites(&psm.sites, psm.num_mods) {
                    match category {
                        SiteCategory::Yes => yes_total += 1,
                        SiteCategory::Maybe => maybe_total += 1,
                        SiteCategory::No => no_total += 1,
                    }
                }
                success_count += 1;
            }
            Err(e) => {
                log::error!("{}", e);
                error_count += 1;
            }
        }
    }

    if success_count > 0 {
        let stats = calculate_stats(&site_counts);
        log::info!(
            "Candidate sites per PSM - Range: [{},{}], Mean: {:.2}, Median: {:.2}, StdDev: {:.2}",
            stats.min,
            stats.max,
            stats.mean,
            stats.median,
            stats.std_dev
        );
        log::info!(
            "Classified sites - YES: {}, MAYBE: {}, NO: {}",
            yes_total,
            maybe_total,
            no_total
        );
    }

    let total = success_count + error_count;
    match error_count {
        0 => {
            log::info!("Validation successful. PSMs pass={}", success_count);
            Ok(())
        }
        _ => Err(format!(
            "Validation failed. PSMs pass={} ({:.2}%), fail={} ({:.2}%)",
            success_count,
            (success_count as f64 / total as f64) * 100.0,
            error_count,
            (error_count as f64 / total as f64) * 100.0
        )),
    }
}

fn calculate_stats(data: &[usize]) -> Stats {
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let len = sorted.len();
    let median = if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0
    } else {
        sorted[len / 2] as f64
    };
    let sum: usize = sorted.iter().sum();
    let mean = sum as f64 / len as f64;
    let std_dev = (sorted
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / len as f64)
        .sqrt();
    Stats {
        min: *sorted.first().unwrap_or(&0),
        max: *sorted.last().unwrap_or(&0),
        mean,
        median,
        std_dev,
    }
}

struct Stats {
    min: usize,
    max: usize,
    mean: f64,
    median: f64,
    std_dev: f64,
}
