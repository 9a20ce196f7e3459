//! Order lifting: from a strict order over individuals to a preorder over coalitions.

use log::{debug, info};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::assembly::assemble_from_pairwise_beats;
use crate::coalition::*;
use crate::config::*;
use crate::preorder::*;
use crate::primitives::*;

/// Lifts an order with the default configuration.
pub fn lift_order(
    rule: LiftingRule,
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    lift_order_with(rule, order, population, &LiftingConfig::DEFAULT)
}

pub fn lift_order_with(
    rule: LiftingRule,
    order: &StrictOrder,
    population: &[Individual],
    config: &LiftingConfig,
) -> RankingResult<Preorder<Coalition>> {
    info!(
        "lift_order: rule {} over {} individuals",
        rule,
        population.len()
    );
    let res = match rule {
        LiftingRule::Minmax => minmax(order, population),
        LiftingRule::Maxmin => maxmin(order, population),
        LiftingRule::Leximin => leximin(order, population),
        LiftingRule::Leximax => leximax(order, population),
        LiftingRule::Borda => borda(order, population),
        LiftingRule::IndirectUtility => indirect_utility(order, population),
        LiftingRule::Cardinality => cardinality(order, population, config.size_preference),
        LiftingRule::IndirectUtilityThenCardinality => {
            indirect_utility_then_cardinality(order, population, config.size_preference)
        }
        LiftingRule::CardinalityThenIndirectUtility => {
            cardinality_then_indirect_utility(order, population, config.size_preference)
        }
    }?;
    debug!(
        "lift_order: rule {}: {} coalitions in {} classes",
        rule,
        res.len(),
        res.num_classes()
    );
    Ok(res)
}

/// Coalitions are judged by their worst member, then by their best member.
///
/// Individuals are processed from the worst to the best one. The coalitions
/// containing the current individual (and no worse one) are split by the best
/// individual they contain, each split being a class. The singleton of the
/// best individual comes first. The empty coalition is not ranked.
pub fn minmax(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let ranking = order.individuals();
    let mut to_extend = powerset(population, 1)?;
    // Blocks of classes, from the worst individual upwards.
    let mut blocks: Vec<Vec<Vec<Coalition>>> = Vec::new();
    for i in (1..ranking.len()).rev() {
        let (mut worst, rest): (Vec<Coalition>, Vec<Coalition>) = to_extend
            .into_iter()
            .partition(|c| c.contains(&ranking[i]));
        to_extend = rest;
        let mut block: Vec<Vec<Coalition>> = Vec::new();
        for best_i in ranking[..i].iter() {
            if worst.is_empty() {
                break;
            }
            let (best, rest): (Vec<Coalition>, Vec<Coalition>) =
                worst.into_iter().partition(|c| c.contains(best_i));
            block.push(best);
            worst = rest;
        }
        // Only the singleton of the current individual is left.
        block.push(worst);
        blocks.push(block);
    }
    let mut classes: Vec<Vec<Coalition>> = vec![to_extend];
    classes.extend(blocks.into_iter().rev().flatten());
    Ok(Preorder::new(classes))
}

/// Coalitions are judged by their best member, then by their worst member.
///
/// Individuals are processed from the best to the worst one. The singleton of
/// the current individual comes first, followed by the other coalitions it is
/// the best member of, split by their worst member. The empty coalition is not ranked.
pub fn maxmin(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let ranking = order.individuals();
    let mut to_extend = powerset(population, 1)?;
    let mut classes: Vec<Vec<Coalition>> = Vec::new();
    for i in 0..ranking.len() {
        let (mut best, rest): (Vec<Coalition>, Vec<Coalition>) = to_extend
            .into_iter()
            .partition(|c| c.contains(&ranking[i]));
        to_extend = rest;
        let mut tail: Vec<Vec<Coalition>> = Vec::new();
        for worst_i in ranking[i + 1..].iter().rev() {
            if best.is_empty() {
                break;
            }
            let (worst, rest): (Vec<Coalition>, Vec<Coalition>) =
                best.into_iter().partition(|c| c.contains(worst_i));
            tail.push(worst);
            best = rest;
        }
        classes.push(best);
        classes.extend(tail.into_iter().rev());
    }
    Ok(Preorder::new(classes))
}

/// Compares two coalitions for leximin (worst-first) or leximax (best-first).
///
/// The empty coalition is the worst one for leximin and the best one for
/// leximax. A coalition extended by a single member is settled by the
/// Gärdenfors comparison when it can decide, lexicographically otherwise.
pub fn lexi_compare(
    order: &StrictOrder,
    orientation: Orientation,
    a: &Coalition,
    b: &Coalition,
) -> Comparison {
    let empty_verdict = match orientation {
        Orientation::WorstFirst => Comparison::Worse,
        Orientation::BestFirst => Comparison::Better,
    };
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Comparison::Tied,
        (true, false) => return empty_verdict,
        (false, true) => return empty_verdict.reverse(),
        (false, false) => {}
    }
    if let Some(verdict) = gardenfors(order, a, b) {
        return verdict;
    }
    lex_compare(
        orientation,
        &order.rank_vector(a, orientation),
        &order.rank_vector(b, orientation),
    )
}

/// Leximin, computed by recursive partitioning around a pivot coalition.
pub fn leximin(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    lexi_partition(order, population, Orientation::WorstFirst)
}

/// Leximax, computed by recursive partitioning around a pivot coalition.
pub fn leximax(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    lexi_partition(order, population, Orientation::BestFirst)
}

/// Leximin, computed by comparing every pair of coalitions.
///
/// Quadratic in the size of the powerset; kept as a reference for [`leximin`].
pub fn leximin_reference(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    lexi_reference(order, population, Orientation::WorstFirst)
}

/// Leximax, computed by comparing every pair of coalitions.
pub fn leximax_reference(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    lexi_reference(order, population, Orientation::BestFirst)
}

fn lexi_reference(
    order: &StrictOrder,
    population: &[Individual],
    orientation: Orientation,
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let coalitions = powerset(population, 0)?;
    let mut beats: PairwiseRelation<Coalition> = PairwiseRelation::new();
    for (i, a) in coalitions.iter().enumerate() {
        for b in coalitions[i + 1..].iter() {
            match lexi_compare(order, orientation, a, b) {
                Comparison::Better => {
                    beats.insert(a.clone(), b.clone());
                }
                Comparison::Worse => {
                    beats.insert(b.clone(), a.clone());
                }
                // Only identical coalitions are tied.
                Comparison::Tied => {}
            }
        }
    }
    debug!("lexi_reference: {} strict preferences", beats.len());
    Ok(assemble_from_pairwise_beats(&beats, &coalitions))
}

enum PartitionTask {
    Rank(Vec<Coalition>),
    Emit(Vec<Coalition>),
}

// Quicksort-like partitioning with an explicit stack: the depth of the
// recursion can reach the size of the powerset.
fn lexi_partition(
    order: &StrictOrder,
    population: &[Individual],
    orientation: Orientation,
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let mut coalitions = powerset(population, 0)?;
    // Largest coalitions first.
    coalitions.reverse();
    let mut classes: Vec<Vec<Coalition>> = Vec::new();
    let mut stack: Vec<PartitionTask> = vec![PartitionTask::Rank(coalitions)];
    while let Some(task) = stack.pop() {
        match task {
            PartitionTask::Emit(class) => classes.push(class),
            PartitionTask::Rank(group) => {
                let mut iter = group.into_iter();
                let pivot = match iter.next() {
                    Some(p) => p,
                    None => continue,
                };
                let mut better: Vec<Coalition> = Vec::new();
                let mut worse: Vec<Coalition> = Vec::new();
                let mut class: Vec<Coalition> = Vec::new();
                for c in iter {
                    match lexi_compare(order, orientation, &c, &pivot) {
                        Comparison::Better => better.push(c),
                        Comparison::Worse => worse.push(c),
                        Comparison::Tied => class.push(c),
                    }
                }
                class.insert(0, pivot);
                // Processed in reverse order of pushing.
                stack.push(PartitionTask::Rank(worse));
                stack.push(PartitionTask::Emit(class));
                stack.push(PartitionTask::Rank(better));
            }
        }
    }
    Ok(Preorder::new(classes))
}

fn classes_by_key<K: Ord, F: Fn(&Coalition) -> K>(
    coalitions: Vec<Coalition>,
    key: F,
) -> Preorder<Coalition> {
    let mut groups: BTreeMap<K, Vec<Coalition>> = BTreeMap::new();
    for c in coalitions {
        groups.entry(key(&c)).or_default().push(c);
    }
    Preorder::new(groups.into_values().collect())
}

// Lower is better.
fn size_rank(size: usize, population_size: usize, preference: SizePreference) -> usize {
    match preference {
        SizePreference::Larger => population_size - size,
        SizePreference::Smaller => size,
    }
}

/// A coalition is worth its best member.
pub fn indirect_utility(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let coalitions = powerset(population, 1)?;
    Ok(classes_by_key(coalitions, |c| order.best_position(c)))
}

/// A coalition is worth its size. The identity of the members is ignored.
pub fn cardinality(
    order: &StrictOrder,
    population: &[Individual],
    preference: SizePreference,
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let n = population.len();
    let coalitions = powerset(population, 1)?;
    Ok(classes_by_key(coalitions, |c| size_rank(c.len(), n, preference)))
}

/// Indirect utility, ties broken by cardinality.
pub fn indirect_utility_then_cardinality(
    order: &StrictOrder,
    population: &[Individual],
    preference: SizePreference,
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let n = population.len();
    let coalitions = powerset(population, 1)?;
    Ok(classes_by_key(coalitions, |c| {
        (order.best_position(c), size_rank(c.len(), n, preference))
    }))
}

/// Cardinality, ties broken by indirect utility.
pub fn cardinality_then_indirect_utility(
    order: &StrictOrder,
    population: &[Individual],
    preference: SizePreference,
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let n = population.len();
    let coalitions = powerset(population, 1)?;
    Ok(classes_by_key(coalitions, |c| {
        (size_rank(c.len(), n, preference), order.best_position(c))
    }))
}

/// Each member at position `p` brings `n - p` points; higher totals are better.
pub fn borda(
    order: &StrictOrder,
    population: &[Individual],
) -> RankingResult<Preorder<Coalition>> {
    order.check_covers(population)?;
    let n = population.len();
    let coalitions = powerset(population, 0)?;
    Ok(classes_by_key(coalitions, |c| {
        let score: usize = c
            .members()
            .iter()
            .filter_map(|i| order.position(i))
            .map(|p| n - p)
            .sum();
        Reverse(score)
    }))
}
