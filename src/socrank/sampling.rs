//! Reproducible random choices for the experiments.
//!
//! Every trial gets its own generator, seeded from the SHA-256 hash of the
//! experiment seed, the trial and a label, so two runs with the same
//! configuration make the same choices.

use rand::rngs::StdRng;
use rand::SeedableRng;

use social_ranking::Individual;

/// The seed of the generator for one trial of one setting.
pub fn trial_seed(seed: u32, trial: u32, label: &str) -> u64 {
    let h = sha256::digest(format!("{:08}{:08}{}", seed, trial, label).as_str());
    // A hex digest always has 64 characters.
    u64::from_str_radix(&h[..16], 16).unwrap_or(0)
}

pub fn trial_rng(seed: u32, trial: u32, label: &str) -> StdRng {
    StdRng::seed_from_u64(trial_seed(seed, trial, label))
}

/// Generates a permutation of the population, sorting the individuals by a hash
/// of their identifier.
pub fn permutation(population: &[Individual], seed: u32, trial: u32) -> Vec<Individual> {
    let mut data: Vec<(Individual, String)> = population
        .iter()
        .map(|i| {
            (
                *i,
                sha256::digest(format!("{:08}{:08}{}", seed, trial, i).as_str()),
            )
        })
        .collect();
    data.sort_by(|a, b| a.1.cmp(&b.1));
    data.iter().map(|p| p.0).collect()
}
