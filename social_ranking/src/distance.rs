//! Distances between the rankings produced by the rules and the true order.

use log::debug;
use std::collections::HashSet;

use crate::coalition::Individual;
use crate::preorder::*;

/// The weak Kendall-Tau distance: the number of pairs of the population whose
/// relative position (before, after, tied) differs between the two preorders.
pub fn kendall_tau(
    a: &Preorder<Individual>,
    b: &Preorder<Individual>,
    population: &[Individual],
) -> usize {
    let (index_a, index_b) = (a.index(), b.index());
    let mut res = 0;
    for (idx, i) in population.iter().enumerate() {
        for j in population[idx + 1..].iter() {
            if index_a.position(i, j) != index_b.position(i, j) {
                res += 1;
            }
        }
    }
    res
}

/// The weak Kendall-Tau distance between a pairwise relation and a preorder.
///
/// A strict preference counts when the reference does not place the winner
/// strictly first. A tie (both directions asserted) counts once when the
/// reference does not tie the pair.
pub fn kendall_tau_from_pairwise(
    relation: &PairwiseRelation<Individual>,
    reference: &Preorder<Individual>,
) -> usize {
    let index = reference.index();
    let mut consumed: HashSet<(Individual, Individual)> = HashSet::new();
    let mut res = 0;
    for (x, y) in relation.iter() {
        if consumed.contains(&(*x, *y)) {
            continue;
        }
        if relation.prefers(y, x) {
            consumed.insert((*y, *x));
            if index.position(x, y) != Position::Tied {
                res += 1;
            }
        } else if index.position(x, y) != Position::Before {
            res += 1;
        }
    }
    debug!("kendall_tau_from_pairwise: {}", res);
    res
}

/// The number of strict preferences of the relation that the reference reverses.
///
/// Ties of the relation, ties of the reference and pairs the reference does
/// not rank are not counted.
pub fn count_inversions(
    relation: &PairwiseRelation<Individual>,
    reference: &Preorder<Individual>,
) -> usize {
    let index = reference.index();
    relation
        .iter()
        .filter(|(x, y)| !relation.prefers(y, x) && index.position(x, y) == Position::After)
        .count()
}
