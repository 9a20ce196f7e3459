//! Social ranking: from a preorder over coalitions to a ranking of individuals.

use log::{debug, info};
use std::collections::HashSet;

use crate::assembly::assemble_from_dominance_counts;
use crate::coalition::*;
use crate::config::*;
use crate::preorder::*;
use crate::primitives::powerset;

/// The outcome of a social ranking rule.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SocialRanking {
    Preorder(Preorder<Individual>),
    /// Majority-style rules produce pairwise preferences that may be cyclic.
    Relation(PairwiseRelation<Individual>),
}

impl SocialRanking {
    /// Relations are turned into preorders with the dominance counts.
    pub fn into_preorder(self, population: &[Individual]) -> Preorder<Individual> {
        match self {
            SocialRanking::Preorder(p) => p,
            SocialRanking::Relation(r) => assemble_from_dominance_counts(&r, population),
        }
    }
}

pub fn social_rank(
    rule: RankingRule,
    coalitions: &Preorder<Coalition>,
    population: &[Individual],
) -> RankingResult<SocialRanking> {
    info!(
        "social_rank: rule {} over {} individuals and {} coalitions in {} classes",
        rule,
        population.len(),
        coalitions.len(),
        coalitions.num_classes()
    );
    let res = match rule {
        RankingRule::Lexcel => SocialRanking::Preorder(lexcel(coalitions, population)?),
        RankingRule::CpMajority => SocialRanking::Relation(cp_majority(coalitions, population)?),
        RankingRule::OrdinalBanzhaf => {
            SocialRanking::Preorder(ordinal_banzhaf(coalitions, population)?)
        }
    };
    Ok(res)
}

// One level of the lexcel refinement: the tie among `candidates` is broken
// by scanning the classes of the coalition preorder from the start.
struct LexcelFrame {
    candidates: Vec<Individual>,
    seen: HashSet<Individual>,
    ranked: Vec<Vec<Individual>>,
    cursor: usize,
}

impl LexcelFrame {
    fn new(candidates: Vec<Individual>) -> LexcelFrame {
        LexcelFrame {
            candidates,
            seen: HashSet::new(),
            ranked: Vec::new(),
            cursor: 0,
        }
    }

    fn remaining(&self) -> Vec<Individual> {
        self.candidates
            .iter()
            .filter(|i| !self.seen.contains(i))
            .cloned()
            .collect()
    }
}

/// The lexicographic excellence ranking.
///
/// Individuals are separated by the number of coalitions they belong to in
/// the best class, then in the next one, and so on. When a class isolates a
/// strict subset of the candidates, the tie among that subset is broken
/// separately, scanning the preorder again from its first class.
pub fn lexcel(
    coalitions: &Preorder<Coalition>,
    population: &[Individual],
) -> RankingResult<Preorder<Individual>> {
    check_population(population)?;
    let classes = coalitions.classes();
    let mut stack: Vec<LexcelFrame> = vec![LexcelFrame::new(population.to_vec())];
    loop {
        let frame = match stack.last_mut() {
            Some(f) => f,
            None => return Ok(Preorder::new(Vec::new())),
        };
        let remaining = frame.remaining();
        if frame.cursor < classes.len() && !remaining.is_empty() {
            let scores: Vec<usize> = remaining
                .iter()
                .map(|i| classes[frame.cursor].iter().filter(|c| c.contains(i)).count())
                .collect();
            let max_score = scores.iter().max().cloned().unwrap_or(0);
            let survivors: Vec<Individual> = remaining
                .iter()
                .zip(scores.iter())
                .filter(|(_, s)| **s == max_score)
                .map(|(i, _)| *i)
                .collect();
            debug!(
                "lexcel: class {}: scores {:?} for {:?}",
                frame.cursor, scores, remaining
            );
            if survivors.len() == 1 {
                // The same class may still separate the others.
                frame.seen.extend(survivors.iter().cloned());
                frame.ranked.push(survivors);
            } else if survivors.len() < frame.candidates.len() {
                debug!("lexcel: breaking the tie among {:?}", survivors);
                stack.push(LexcelFrame::new(survivors));
            } else {
                frame.cursor += 1;
            }
            continue;
        }
        // This frame is done.
        let done = stack.pop();
        if let Some(mut done) = done {
            let leftover = done.remaining();
            if !leftover.is_empty() {
                done.ranked.push(leftover);
            }
            match stack.last_mut() {
                Some(parent) => {
                    parent.seen.extend(done.candidates.iter().cloned());
                    parent.ranked.extend(done.ranked);
                    parent.cursor += 1;
                }
                None => return Ok(Preorder::new(done.ranked)),
            }
        }
    }
}

/// The ceteris paribus majority relation.
///
/// For every pair of individuals, the coalitions made of each of them plus the
/// same group of others are compared. Comparisons involving a coalition
/// missing from the preorder are skipped. The individual winning at least as
/// many comparisons as the other one is preferred, so ties appear in both directions.
pub fn cp_majority(
    coalitions: &Preorder<Coalition>,
    population: &[Individual],
) -> RankingResult<PairwiseRelation<Individual>> {
    check_population(population)?;
    let index = coalitions.index();
    let mut res: PairwiseRelation<Individual> = PairwiseRelation::new();
    for (idx, i) in population.iter().enumerate() {
        for j in population[idx + 1..].iter() {
            let others: Vec<Individual> = population
                .iter()
                .filter(|x| *x != i && *x != j)
                .cloned()
                .collect();
            let mut pro_i = 0;
            let mut pro_j = 0;
            for c in powerset(&others, 0)? {
                match index.position(&c.with(*i), &c.with(*j)) {
                    Position::Before => pro_i += 1,
                    Position::After => pro_j += 1,
                    Position::Tied | Position::Absent => {}
                }
            }
            debug!("cp_majority: {} vs {}: {} to {}", i, j, pro_i, pro_j);
            if pro_i >= pro_j {
                res.insert(*i, *j);
            }
            if pro_j >= pro_i {
                res.insert(*j, *i);
            }
        }
    }
    Ok(res)
}

/// The ordinal Banzhaf ranking.
///
/// An individual scores one point for each coalition it improves by joining
/// it and loses one for each coalition it worsens. Comparisons involving a
/// coalition missing from the preorder are skipped.
pub fn ordinal_banzhaf(
    coalitions: &Preorder<Coalition>,
    population: &[Individual],
) -> RankingResult<Preorder<Individual>> {
    check_population(population)?;
    let index = coalitions.index();
    let mut scores: Vec<i64> = Vec::with_capacity(population.len());
    for i in population.iter() {
        let others: Vec<Individual> = population.iter().filter(|x| *x != i).cloned().collect();
        let mut score: i64 = 0;
        for c in powerset(&others, 0)? {
            match index.position(&c.with(*i), &c) {
                Position::Before => score += 1,
                Position::After => score -= 1,
                Position::Tied | Position::Absent => {}
            }
        }
        scores.push(score);
    }
    debug!("ordinal_banzhaf: scores {:?} for {:?}", scores, population);
    let mut distinct: Vec<i64> = scores.clone();
    distinct.sort_by(|a, b| b.cmp(a));
    distinct.dedup();
    let classes: Vec<Vec<Individual>> = distinct
        .iter()
        .map(|s| {
            population
                .iter()
                .zip(scores.iter())
                .filter(|(_, score)| *score == s)
                .map(|(i, _)| *i)
                .collect()
        })
        .collect();
    Ok(Preorder::new(classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::lifting::lift_order;

    fn permutations(ids: &[u32]) -> Vec<Vec<u32>> {
        if ids.len() <= 1 {
            return vec![ids.to_vec()];
        }
        let mut res = Vec::new();
        for (idx, first) in ids.iter().enumerate() {
            let mut rest = ids.to_vec();
            rest.remove(idx);
            for mut p in permutations(&rest) {
                p.insert(0, *first);
                res.push(p);
            }
        }
        res
    }

    fn ids(p: &Preorder<Individual>) -> Vec<Vec<u32>> {
        p.classes()
            .iter()
            .map(|c| c.iter().map(|i| i.0).collect())
            .collect()
    }

    fn build(ids: &[u32], classes: &[&[&[u32]]]) -> Preorder<Coalition> {
        let mut b = Builder::new(ids);
        for class in classes {
            let class: Vec<Vec<u32>> = class.iter().map(|c| c.to_vec()).collect();
            b.add_class(&class).unwrap();
        }
        b.build()
    }

    fn check_round_trip(lifting: &[LiftingRule], ranking: RankingRule) {
        let _ = env_logger::builder().is_test(true).try_init();
        for n in 2..=5u32 {
            let ids: Vec<u32> = (1..=n).collect();
            let pop = population(&ids);
            for perm in permutations(&ids) {
                let order = StrictOrder::from_ids(&perm).unwrap();
                for rule in lifting {
                    let lifted = lift_order(*rule, &order, &pop).unwrap();
                    let ranked = social_rank(ranking, &lifted, &pop)
                        .unwrap()
                        .into_preorder(&pop);
                    assert_eq!(
                        ranked,
                        order.to_preorder(),
                        "{} then {} on {:?}",
                        rule,
                        ranking,
                        perm
                    );
                }
            }
        }
    }

    const IDENTITY_SENSITIVE: [LiftingRule; 8] = [
        LiftingRule::Minmax,
        LiftingRule::Maxmin,
        LiftingRule::Leximin,
        LiftingRule::Leximax,
        LiftingRule::Borda,
        LiftingRule::IndirectUtility,
        LiftingRule::IndirectUtilityThenCardinality,
        LiftingRule::CardinalityThenIndirectUtility,
    ];

    #[test]
    fn lexcel_recovers_the_order() {
        check_round_trip(&IDENTITY_SENSITIVE, RankingRule::Lexcel);
    }

    #[test]
    fn cp_majority_recovers_the_order() {
        check_round_trip(&IDENTITY_SENSITIVE, RankingRule::CpMajority);
    }

    #[test]
    fn ordinal_banzhaf_recovers_the_order() {
        check_round_trip(
            &[
                LiftingRule::Minmax,
                LiftingRule::Maxmin,
                LiftingRule::Leximin,
                LiftingRule::Leximax,
                LiftingRule::IndirectUtility,
            ],
            RankingRule::OrdinalBanzhaf,
        );
    }

    #[test]
    fn cp_majority_on_two_individuals() {
        let pop = population(&[1, 2]);
        let order = StrictOrder::from_ids(&[1, 2]).unwrap();
        let expected: PairwiseRelation<Individual> =
            vec![(Individual(1), Individual(2))].into_iter().collect();
        for rule in IDENTITY_SENSITIVE {
            let lifted = lift_order(rule, &order, &pop).unwrap();
            assert_eq!(cp_majority(&lifted, &pop).unwrap(), expected, "{}", rule);
        }
        // Cardinality cannot tell the individuals apart.
        let lifted = lift_order(LiftingRule::Cardinality, &order, &pop).unwrap();
        assert!(cp_majority(&lifted, &pop)
            .unwrap()
            .is_tied(&Individual(1), &Individual(2)));
    }

    #[test]
    fn lexcel_breaks_ties_among_subsets() {
        let p = build(
            &[1, 2, 3, 4],
            &[&[&[1, 2], &[3, 4]], &[&[1], &[3]], &[&[2]], &[&[4]]],
        );
        let res = lexcel(&p, &population(&[1, 2, 3, 4])).unwrap();
        assert_eq!(ids(&res), vec![vec![1, 3], vec![2], vec![4]]);

        let p = build(
            &[1, 2, 3, 4],
            &[&[&[1, 2, 3]], &[&[2], &[3]], &[&[3, 4]], &[&[1]]],
        );
        let res = lexcel(&p, &population(&[1, 2, 3, 4])).unwrap();
        assert_eq!(ids(&res), vec![vec![3], vec![2], vec![1], vec![4]]);
    }

    #[test]
    fn lexcel_corner_cases() {
        let pop = population(&[1, 2]);
        let empty: Preorder<Coalition> = Preorder::new(Vec::new());
        assert_eq!(ids(&lexcel(&empty, &pop).unwrap()), vec![vec![1, 2]]);
        assert!(lexcel(&empty, &[]).unwrap().is_empty());
        assert!(lexcel(&empty, &population(&[1, 1])).is_err());
    }

    #[test]
    fn cp_majority_skips_missing_coalitions() {
        let p = build(
            &[1, 2, 3],
            &[&[&[1, 2], &[3]], &[&[1, 3]], &[&[1], &[2, 3]], &[&[2]]],
        );
        let r = cp_majority(&p, &population(&[1, 2, 3])).unwrap();
        let expected: PairwiseRelation<Individual> = vec![(1, 2), (1, 3), (3, 1), (2, 3), (3, 2)]
            .into_iter()
            .map(|(a, b)| (Individual(a), Individual(b)))
            .collect();
        assert_eq!(r, expected);
        // 1 and 3 each dominate two individuals, 2 only one.
        let ranked = SocialRanking::Relation(r).into_preorder(&population(&[1, 2, 3]));
        assert_eq!(ids(&ranked), vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn cp_majority_ignores_comparisons_with_absent_singletons() {
        // {1} is missing: the comparisons of {1} against {2} and {3} do not count.
        let p = build(
            &[1, 2, 3],
            &[&[&[1, 2]], &[&[2]], &[&[1, 3]], &[&[3]], &[&[2, 3]]],
        );
        let r = cp_majority(&p, &population(&[1, 2, 3])).unwrap();
        let expected: PairwiseRelation<Individual> = vec![(1, 2), (1, 3), (2, 3)]
            .into_iter()
            .map(|(a, b)| (Individual(a), Individual(b)))
            .collect();
        assert_eq!(r, expected);

        // With nothing left to compare, the two individuals are tied.
        let p = build(&[1, 2], &[&[&[2]], &[&[1, 2]]]);
        let r = cp_majority(&p, &population(&[1, 2])).unwrap();
        assert!(r.is_tied(&Individual(1), &Individual(2)));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn ordinal_banzhaf_skips_missing_coalitions() {
        let p = build(&[1, 2], &[&[&[1]], &[&[1, 2]], &[&[2]]]);
        let res = ordinal_banzhaf(&p, &population(&[1, 2])).unwrap();
        assert_eq!(ids(&res), vec![vec![1], vec![2]]);
    }

    #[test]
    fn ordinal_banzhaf_groups_equal_scores() {
        let pop = population(&[1, 2, 3]);
        let order = StrictOrder::from_ids(&[1, 2, 3]).unwrap();
        let lifted = lift_order(LiftingRule::Cardinality, &order, &pop).unwrap();
        let res = ordinal_banzhaf(&lifted, &pop).unwrap();
        assert_eq!(ids(&res), vec![vec![1, 2, 3]]);
    }
}
