use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use social_ranking::*;

use crate::socrank::config_reader::ExperimentConfig;
use crate::socrank::sampling::*;
use crate::socrank::*;

/// The validated form of an [`ExperimentConfig`].
#[derive(PartialEq, Debug, Clone)]
pub struct ExperimentSettings {
    pub population_sizes: Vec<u32>,
    pub lifting_rules: Vec<LiftingRule>,
    pub trials: u32,
    pub seed: u32,
    pub kept_fractions: Vec<f64>,
    pub coalition_size: Option<usize>,
    pub lifting_config: LiftingConfig,
}

// Larger populations make the powerset too large to be enumerated repeatedly.
const MAX_POPULATION_SIZE: u32 = 16;

pub fn validate_config(config: &ExperimentConfig) -> SocrankResult<ExperimentSettings> {
    let population_sizes = config
        .population_sizes
        .clone()
        .unwrap_or_else(|| ExperimentConfig::DEFAULT_POPULATION_SIZES.to_vec());
    for n in population_sizes.iter() {
        if *n < 2 || *n > MAX_POPULATION_SIZE {
            whatever!(
                "Population sizes must be between 2 and {}, got {}",
                MAX_POPULATION_SIZE,
                n
            )
        }
    }
    let kept_fractions = config
        .kept_fractions
        .clone()
        .unwrap_or_else(|| ExperimentConfig::DEFAULT_KEPT_FRACTIONS.to_vec());
    for f in kept_fractions.iter() {
        if !(*f > 0.0 && *f <= 1.0) {
            whatever!("Kept fractions must be in (0, 1], got {}", f)
        }
    }
    if config.coalition_size == Some(0) {
        whatever!("The coalition size must be positive")
    }
    Ok(ExperimentSettings {
        population_sizes,
        lifting_rules: config.lifting_rules()?,
        trials: config.trials.unwrap_or(ExperimentConfig::DEFAULT_TRIALS),
        seed: config.seed.unwrap_or(0),
        kept_fractions,
        coalition_size: config.coalition_size,
        lifting_config: LiftingConfig {
            size_preference: config.size_preference()?,
        },
    })
}

/// Simulates partial information on a lifted preorder.
///
/// Two random singletons are removed, then random coalitions until at most
/// `target` coalitions are left. A coalition alone in its class takes its class
/// with it.
pub fn remove_coalitions<R: Rng>(
    coalitions: &mut Preorder<Coalition>,
    target: usize,
    population: &[Individual],
    rng: &mut R,
) {
    for _ in 0..2 {
        if let Some(i) = population.choose(rng) {
            coalitions.remove(&Coalition::singleton(*i));
        }
    }
    while coalitions.len() > target {
        let idx = rng.gen_range(0..coalitions.num_classes());
        let class = &coalitions.classes()[idx];
        if class.len() == 1 {
            coalitions.remove_class(idx);
        } else {
            let c = class[rng.gen_range(0..class.len())].clone();
            coalitions.remove(&c);
        }
    }
}

/// Keeps the coalitions of size `k`, then drops random classes.
///
/// The budget is the given fraction of the number of coalitions of size `k`,
/// and it bounds the number of classes left. Rules that never tie two
/// coalitions therefore keep that fraction of the coalitions, while rules
/// with large classes may keep all of them.
pub fn keep_sized_coalitions<R: Rng>(
    coalitions: &Preorder<Coalition>,
    k: usize,
    fraction: f64,
    rng: &mut R,
) -> Preorder<Coalition> {
    let mut res = coalitions.restrict(|c| c.len() == k);
    let target = ceil_fraction(fraction, res.len());
    while res.num_classes() > target {
        let idx = rng.gen_range(0..res.num_classes());
        res.remove_class(idx);
    }
    res
}

fn ceil_fraction(fraction: f64, total: usize) -> usize {
    (fraction * total as f64).ceil() as usize
}

/// How one ranking method did on one trial.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TrialOutcome {
    pub exact: bool,
    pub winner: bool,
    pub kendall_tau: usize,
    pub inversions: usize,
}

impl TrialOutcome {
    fn from_preorder(
        p: &Preorder<Individual>,
        order: &StrictOrder,
        population: &[Individual],
    ) -> Self {
        let truth = order.to_preorder();
        let relation = PairwiseRelation::from_preorder(p);
        TrialOutcome {
            exact: *p == truth,
            winner: winner_found(p, order),
            kendall_tau: kendall_tau(p, &truth, population),
            inversions: count_inversions(&relation, &truth),
        }
    }

    fn from_relation(
        r: &PairwiseRelation<Individual>,
        order: &StrictOrder,
        population: &[Individual],
    ) -> Self {
        let truth = order.to_preorder();
        let p = assemble_from_dominance_counts(r, population);
        TrialOutcome {
            exact: p == truth,
            winner: winner_found(&p, order),
            kendall_tau: kendall_tau_from_pairwise(r, &truth),
            inversions: count_inversions(r, &truth),
        }
    }
}

// The best individual is alone in the first class.
fn winner_found(p: &Preorder<Individual>, order: &StrictOrder) -> bool {
    match (p.classes().first(), order.best()) {
        (Some(first), Some(best)) => first.len() == 1 && first[0] == best,
        _ => false,
    }
}

/// The ranking methods compared by the experiments.
pub const METHODS: [&str; 4] = [
    "lexcel",
    "cp_majority",
    "ordinal_banzhaf",
    "cp_majority_corrected",
];

/// Ranks a partial preorder with every method, in the order of [`METHODS`].
pub fn evaluate(
    coalitions: &Preorder<Coalition>,
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<[TrialOutcome; 4]> {
    let lex = lexcel(coalitions, population)?;
    let cp = cp_majority(coalitions, population)?;
    let banzhaf = ordinal_banzhaf(coalitions, population)?;
    let corrected = correct_with_majority(&cp, &lex);
    Ok([
        TrialOutcome::from_preorder(&lex, order, population),
        TrialOutcome::from_relation(&cp, order, population),
        TrialOutcome::from_preorder(&banzhaf, order, population),
        TrialOutcome::from_relation(&corrected, order, population),
    ])
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
struct MethodStats {
    exact: u32,
    winner: u32,
    kendall_tau: usize,
    inversions: usize,
}

impl MethodStats {
    fn add(&mut self, outcome: &TrialOutcome) {
        if outcome.exact {
            self.exact += 1;
        }
        if outcome.winner {
            self.winner += 1;
        }
        self.kendall_tau += outcome.kendall_tau;
        self.inversions += outcome.inversions;
    }

    fn to_json(self, trials: u32) -> JSValue {
        let t = trials.max(1) as f64;
        json!({
            "exact": self.exact,
            "winner": self.winner,
            "kendallTau": self.kendall_tau as f64 / t,
            "inversions": self.inversions as f64 / t,
        })
    }
}

/// Runs all the trials of one setting: population size, lifting rule, kept fraction.
fn run_setting(
    settings: &ExperimentSettings,
    n: u32,
    rule: LiftingRule,
    fraction: f64,
) -> SocrankResult<JSValue> {
    let ids: Vec<u32> = (1..=n).collect();
    let pop = population(&ids);
    let label = format!("{}-{}-{}", n, rule.id(), fraction);
    let mut stats = [MethodStats::default(); 4];
    let mut kept_total: usize = 0;
    for trial in 0..settings.trials {
        let order =
            StrictOrder::new(permutation(&pop, settings.seed, trial)).context(RankingSnafu {})?;
        let lifted = lift_order_with(rule, &order, &pop, &settings.lifting_config)
            .context(RankingSnafu {})?;
        let mut rng = trial_rng(settings.seed, trial, &label);
        let partial = match settings.coalition_size {
            Some(k) => keep_sized_coalitions(&lifted, k, fraction, &mut rng),
            None if fraction >= 1.0 => lifted,
            None => {
                let target = ceil_fraction(fraction, lifted.len());
                let mut partial = lifted;
                remove_coalitions(&mut partial, target, &pop, &mut rng);
                partial
            }
        };
        kept_total += partial.len();
        let outcomes = evaluate(&partial, &order, &pop).context(RankingSnafu {})?;
        debug!(
            "run_setting: n {} rule {} fraction {} trial {}: {:?}",
            n, rule, fraction, trial, outcomes
        );
        for (s, o) in stats.iter_mut().zip(outcomes.iter()) {
            s.add(o);
        }
    }
    let mut methods = serde_json::Map::new();
    for (name, s) in METHODS.iter().zip(stats.iter()) {
        methods.insert(name.to_string(), s.to_json(settings.trials));
    }
    Ok(json!({
        "populationSize": n,
        "liftingRule": rule.name(),
        "keptFraction": fraction,
        "coalitionSize": settings.coalition_size,
        "keptCoalitions": kept_total as f64 / settings.trials.max(1) as f64,
        "trials": settings.trials,
        "methods": methods,
    }))
}

pub fn run_experiment(settings: &ExperimentSettings) -> SocrankResult<Vec<JSValue>> {
    let mut results: Vec<JSValue> = Vec::new();
    for n in settings.population_sizes.iter() {
        if let Some(k) = settings.coalition_size {
            if k > *n as usize {
                warn!("Skipping population size {}: no coalition of size {}", n, k);
                continue;
            }
        }
        for rule in settings.lifting_rules.iter() {
            info!("Running experiment: population size {}, lifting rule {}", n, rule);
            for fraction in settings.kept_fractions.iter() {
                results.push(run_setting(settings, *n, *rule, *fraction)?);
            }
        }
    }
    Ok(results)
}
