//! Turning pairwise preferences back into preorders.

use log::debug;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::preorder::*;

/// Rebuilds a preorder from strict preferences in which ties are implicit.
///
/// The best class is made of the elements that lose against no remaining
/// element. It is removed and the procedure starts again. If at some point
/// every remaining element loses somewhere (a cycle), they all form the last class.
/// Pairs mentioning elements outside the domain are ignored.
pub fn assemble_from_pairwise_beats<T: Ord + Hash + Clone + Debug>(
    pairs: &PairwiseRelation<T>,
    domain: &[T],
) -> Preorder<T> {
    let in_domain: HashSet<&T> = domain.iter().collect();
    let mut losers_of: HashMap<&T, Vec<&T>> = HashMap::new();
    let mut losses: HashMap<&T, usize> = domain.iter().map(|x| (x, 0)).collect();
    for (winner, loser) in pairs.iter() {
        if winner == loser || !in_domain.contains(winner) || !in_domain.contains(loser) {
            continue;
        }
        losers_of.entry(winner).or_default().push(loser);
        if let Some(c) = losses.get_mut(loser) {
            *c += 1;
        }
    }

    let mut remaining: Vec<&T> = domain.iter().collect();
    let mut classes: Vec<Vec<T>> = Vec::new();
    while !remaining.is_empty() {
        let (best, rest): (Vec<&T>, Vec<&T>) = remaining
            .into_iter()
            .partition(|x| losses.get(*x) == Some(&0));
        if best.is_empty() {
            debug!(
                "assemble_from_pairwise_beats: cycle among the {} remaining elements",
                rest.len()
            );
            classes.push(rest.into_iter().cloned().collect());
            break;
        }
        for x in best.iter() {
            if let Some(losers) = losers_of.get(*x) {
                for l in losers.iter() {
                    if let Some(c) = losses.get_mut(*l) {
                        *c -= 1;
                    }
                }
            }
        }
        classes.push(best.into_iter().cloned().collect());
        remaining = rest;
    }
    Preorder::new(classes)
}

/// Rebuilds a preorder from a relation that may contain ties and cycles.
///
/// The candidates dominating the largest number of remaining candidates form
/// the next class. When every remaining candidate dominates as many others,
/// they all form the last class.
pub fn assemble_from_dominance_counts<T: Ord + Hash + Clone + Debug>(
    pairs: &PairwiseRelation<T>,
    population: &[T],
) -> Preorder<T> {
    let mut candidates: Vec<&T> = population.iter().collect();
    let mut classes: Vec<Vec<T>> = Vec::new();
    while candidates.len() > 1 {
        let counts: Vec<usize> = candidates
            .iter()
            .map(|x| {
                candidates
                    .iter()
                    .filter(|y| x != *y && pairs.prefers(x, y))
                    .count()
            })
            .collect();
        let max_count = counts.iter().max().cloned().unwrap_or(0);
        let min_count = counts.iter().min().cloned().unwrap_or(0);
        debug!(
            "assemble_from_dominance_counts: candidates: {:?} counts: {:?}",
            candidates, counts
        );
        if max_count == min_count {
            classes.push(candidates.into_iter().cloned().collect());
            return Preorder::new(classes);
        }
        let (top, rest): (Vec<(&T, usize)>, Vec<(&T, usize)>) = candidates
            .into_iter()
            .zip(counts)
            .partition(|(_, c)| *c == max_count);
        classes.push(top.into_iter().map(|(x, _)| x.clone()).collect());
        candidates = rest.into_iter().map(|(x, _)| x).collect();
    }
    if !candidates.is_empty() {
        classes.push(candidates.into_iter().cloned().collect());
    }
    Preorder::new(classes)
}

/// Breaks the ties of a majority relation with a reference ranking.
///
/// For every pair asserted in both directions, the direction contradicting a
/// strict preference of the reference is removed. Ties of the reference, and
/// pairs the reference does not rank, are left as they are.
pub fn correct_with_majority<T: Ord + Hash + Clone>(
    majority: &PairwiseRelation<T>,
    reference: &Preorder<T>,
) -> PairwiseRelation<T> {
    let mut res = majority.clone();
    for (x, y) in majority.iter() {
        if x >= y || !majority.prefers(y, x) {
            continue;
        }
        match reference.position_before(x, y) {
            Position::Before => {
                res.remove(y, x);
            }
            Position::After => {
                res.remove(x, y);
            }
            Position::Tied | Position::Absent => {}
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(pairs: &[(u32, u32)]) -> PairwiseRelation<u32> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn beats_strict_chain() {
        let p = assemble_from_pairwise_beats(&rel(&[(1, 2), (1, 3), (2, 3)]), &[3, 2, 1]);
        assert_eq!(p.into_classes(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn beats_implicit_ties() {
        let p = assemble_from_pairwise_beats(&rel(&[(1, 3), (2, 3)]), &[1, 2, 3]);
        assert_eq!(p.into_classes(), vec![vec![1, 2], vec![3]]);
        let empty = assemble_from_pairwise_beats(&rel(&[]), &[1, 2]);
        assert_eq!(empty.into_classes(), vec![vec![1, 2]]);
    }

    #[test]
    fn beats_tolerates_cycles_and_foreign_pairs() {
        let p = assemble_from_pairwise_beats(
            &rel(&[(0, 1), (1, 2), (2, 3), (3, 1), (9, 0), (0, 0)]),
            &[0, 1, 2, 3],
        );
        assert_eq!(p.into_classes(), vec![vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn dominance_strict() {
        let p = assemble_from_dominance_counts(&rel(&[(1, 2), (1, 3), (2, 3)]), &[1, 2, 3]);
        assert_eq!(p.into_classes(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn dominance_all_tied_from_the_start() {
        let all = rel(&[(1, 2), (2, 1), (1, 3), (3, 1), (2, 3), (3, 2)]);
        assert_eq!(
            assemble_from_dominance_counts(&all, &[1, 2, 3]).into_classes(),
            vec![vec![1, 2, 3]]
        );
        assert_eq!(
            assemble_from_dominance_counts(&rel(&[]), &[1, 2, 3]).into_classes(),
            vec![vec![1, 2, 3]]
        );
    }

    #[test]
    fn dominance_cycle() {
        let cycle = rel(&[(1, 2), (2, 3), (3, 1)]);
        assert_eq!(
            assemble_from_dominance_counts(&cycle, &[1, 2, 3]).into_classes(),
            vec![vec![1, 2, 3]]
        );
        // A cycle below a clear winner.
        let below = rel(&[(4, 1), (4, 2), (4, 3), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(
            assemble_from_dominance_counts(&below, &[1, 2, 3, 4]).into_classes(),
            vec![vec![4], vec![1, 2, 3]]
        );
    }

    #[test]
    fn dominance_ties() {
        let p = assemble_from_dominance_counts(&rel(&[(1, 2), (2, 1), (1, 3), (2, 3)]), &[1, 2, 3]);
        assert_eq!(p.into_classes(), vec![vec![1, 2], vec![3]]);
        assert_eq!(
            assemble_from_dominance_counts(&rel(&[]), &[5]).into_classes(),
            vec![vec![5]]
        );
        assert!(assemble_from_dominance_counts(&rel(&[]), &[]).is_empty());
    }

    #[test]
    fn correction_breaks_declared_ties() {
        let majority = rel(&[(1, 2), (2, 1)]);
        let above = Preorder::new(vec![vec![1], vec![2]]);
        assert_eq!(correct_with_majority(&majority, &above), rel(&[(1, 2)]));
        let below = Preorder::new(vec![vec![2], vec![1]]);
        assert_eq!(correct_with_majority(&majority, &below), rel(&[(2, 1)]));
        let tied = Preorder::new(vec![vec![1, 2]]);
        assert_eq!(correct_with_majority(&majority, &tied), majority);
    }

    #[test]
    fn correction_keeps_strict_pairs() {
        let majority = rel(&[(1, 2), (2, 1), (3, 1)]);
        let reference = Preorder::new(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(
            correct_with_majority(&majority, &reference),
            rel(&[(1, 2), (3, 1)])
        );
    }
}
