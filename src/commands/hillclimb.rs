//! Hill-climbing substitution command

use crate::config::HillclimbConfig;
use crate::ngrams::FrequencyModel;
use crate::solver::{HillclimbSolution, SearchControl, solve_hillclimb};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Result of a hill-climbing run
#[derive(Debug, Clone, Serialize)]
pub struct HillclimbResult {
    pub ciphertext: String,
    pub generations: usize,
    pub solutions: Vec<HillclimbSolution>,
    #[serde(skip)]
    pub duration: Duration,
}

/// Hill-climb a key for `ciphertext`, optionally drawing a progress bar
#[must_use]
pub fn run_hillclimb(
    ciphertext: &str,
    model: &FrequencyModel,
    config: &HillclimbConfig,
    control: &SearchControl,
    show_progress: bool,
) -> HillclimbResult {
    let start = Instant::now();

    let generations = u64::try_from(config.generations).unwrap_or(u64::MAX);
    let pb = if show_progress {
        ProgressBar::new(generations)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} generations | {elapsed}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );

    let solutions = solve_hillclimb(ciphertext, model, config, control, |_| pb.inc(1));
    pb.finish_and_clear();

    HillclimbResult {
        ciphertext: ciphertext.to_ascii_uppercase(),
        generations: config.generations,
        solutions,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_progress_run_returns_ranked_solutions() {
        let model = FrequencyModel::from_tsv("TH\t-1.0\nHE\t-1.2\n".as_bytes()).unwrap();
        let config = HillclimbConfig {
            generations: 2,
            regen_after: 20,
            candidate_count: 3,
            seed: Some(11),
            ..HillclimbConfig::default()
        };

        let result = run_hillclimb("wkh", &model, &config, &SearchControl::new(), false);

        assert_eq!(result.ciphertext, "WKH");
        assert_eq!(result.generations, 2);
        assert!(!result.solutions.is_empty() && result.solutions.len() <= 3);
        assert!(
            result
                .solutions
                .windows(2)
                .all(|w| w[0].fitness >= w[1].fitness)
        );
    }
}
