use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use snafu::ensure;

use crate::config::*;
use crate::preorder::Preorder;
use crate::primitives::Orientation;

/// A member of the studied population.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Individual(pub u32);

impl From<u32> for Individual {
    fn from(id: u32) -> Self {
        Individual(id)
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a population out of raw identifiers.
pub fn population(ids: &[u32]) -> Vec<Individual> {
    ids.iter().map(|id| Individual(*id)).collect()
}

/// Checks that a population does not mention the same individual twice.
pub fn check_population(population: &[Individual]) -> RankingResult<()> {
    let mut seen: HashSet<Individual> = HashSet::new();
    for i in population.iter() {
        ensure!(
            seen.insert(*i),
            InvalidArgumentSnafu {
                message: format!("individual {} appears twice in the population", i),
            }
        );
    }
    Ok(())
}

/// A subset of the population.
///
/// Members are stored sorted and without repetition, so two coalitions are
/// equal iff they have the same members.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct Coalition(Vec<Individual>);

impl Coalition {
    pub const EMPTY: Coalition = Coalition(Vec::new());

    pub fn new<I: IntoIterator<Item = Individual>>(members: I) -> Coalition {
        let mut v: Vec<Individual> = members.into_iter().collect();
        v.sort();
        v.dedup();
        Coalition(v)
    }

    pub fn from_ids(ids: &[u32]) -> Coalition {
        Coalition::new(ids.iter().map(|id| Individual(*id)))
    }

    pub fn singleton(i: Individual) -> Coalition {
        Coalition(vec![i])
    }

    pub fn members(&self) -> &[Individual] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, i: &Individual) -> bool {
        self.0.binary_search(i).is_ok()
    }

    /// The coalition with one more member.
    pub fn with(&self, i: Individual) -> Coalition {
        let mut v = self.0.clone();
        if let Err(pos) = v.binary_search(&i) {
            v.insert(pos, i);
        }
        Coalition(v)
    }

    /// If this coalition is `smaller` plus exactly one individual, returns that individual.
    pub fn added_to(&self, smaller: &Coalition) -> Option<Individual> {
        if self.len() != smaller.len() + 1 {
            return None;
        }
        if !smaller.0.iter().all(|i| self.contains(i)) {
            return None;
        }
        self.0.iter().find(|i| !smaller.contains(i)).cloned()
    }
}

impl Display for Coalition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

/// A total ranking of individuals, best first.
///
/// The position of an individual (0 for the best) is the only attribute the
/// procedures compare: a lower position is better.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StrictOrder {
    ranking: Vec<Individual>,
    positions: HashMap<Individual, usize>,
}

impl StrictOrder {
    pub fn new(ranking: Vec<Individual>) -> RankingResult<StrictOrder> {
        check_population(&ranking)?;
        let positions = ranking
            .iter()
            .enumerate()
            .map(|(idx, i)| (*i, idx))
            .collect();
        Ok(StrictOrder { ranking, positions })
    }

    pub fn from_ids(ids: &[u32]) -> RankingResult<StrictOrder> {
        StrictOrder::new(population(ids))
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.ranking
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    pub fn position(&self, i: &Individual) -> Option<usize> {
        self.positions.get(i).cloned()
    }

    pub fn best(&self) -> Option<Individual> {
        self.ranking.first().cloned()
    }

    /// The positions of the members of a coalition, sorted with the given orientation.
    ///
    /// Members unknown to the order are ignored; callers validate the population first.
    pub fn rank_vector(&self, coalition: &Coalition, orientation: Orientation) -> Vec<usize> {
        let mut v: Vec<usize> = coalition
            .members()
            .iter()
            .filter_map(|i| self.position(i))
            .collect();
        match orientation {
            Orientation::WorstFirst => v.sort_by(|a, b| b.cmp(a)),
            Orientation::BestFirst => v.sort(),
        }
        v
    }

    /// The position of the best member, `None` for the empty coalition.
    pub fn best_position(&self, coalition: &Coalition) -> Option<usize> {
        coalition.members().iter().filter_map(|i| self.position(i)).min()
    }

    /// The position of the worst member, `None` for the empty coalition.
    pub fn worst_position(&self, coalition: &Coalition) -> Option<usize> {
        coalition.members().iter().filter_map(|i| self.position(i)).max()
    }

    /// Checks that this order ranks exactly the individuals of the population.
    pub fn check_covers(&self, population: &[Individual]) -> RankingResult<()> {
        check_population(population)?;
        ensure!(
            population.len() == self.ranking.len()
                && population.iter().all(|i| self.positions.contains_key(i)),
            InvalidArgumentSnafu {
                message: format!(
                    "the order {:?} is not a ranking of the population {:?}",
                    self.ranking, population
                ),
            }
        );
        Ok(())
    }

    /// The order seen as a preorder with one individual per class.
    pub fn to_preorder(&self) -> Preorder<Individual> {
        Preorder::new(self.ranking.iter().map(|i| vec![*i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalitions_are_canonical() {
        let c = Coalition::from_ids(&[3, 1, 2, 1]);
        assert_eq!(c.members(), &population(&[1, 2, 3])[..]);
        assert_eq!(c, Coalition::from_ids(&[1, 2, 3]));
        assert_eq!(c.to_string(), "{1,2,3}");
        assert_eq!(Coalition::EMPTY.to_string(), "{}");
        assert!(Coalition::EMPTY.is_empty());
    }

    #[test]
    fn coalition_extension() {
        let c = Coalition::from_ids(&[1, 3]);
        assert_eq!(c.with(Individual(2)), Coalition::from_ids(&[1, 2, 3]));
        assert_eq!(c.with(Individual(3)), c);
        assert_eq!(
            Coalition::from_ids(&[1, 2, 3]).added_to(&c),
            Some(Individual(2))
        );
        assert_eq!(Coalition::from_ids(&[2, 3]).added_to(&c), None);
        assert_eq!(Coalition::from_ids(&[1, 2, 4]).added_to(&c), None);
        assert_eq!(
            Coalition::from_ids(&[4]).added_to(&Coalition::EMPTY),
            Some(Individual(4))
        );
    }

    #[test]
    fn strict_order_rejects_duplicates() {
        assert!(matches!(
            StrictOrder::from_ids(&[1, 2, 1]),
            Err(RankingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn strict_order_must_cover_population() {
        let order = StrictOrder::from_ids(&[2, 1, 3]).unwrap();
        assert!(order.check_covers(&population(&[1, 2, 3])).is_ok());
        assert!(order.check_covers(&population(&[1, 2])).is_err());
        assert!(order.check_covers(&population(&[1, 2, 4])).is_err());
        assert!(order.check_covers(&population(&[1, 2, 2])).is_err());
    }

    #[test]
    fn rank_vectors() {
        let order = StrictOrder::from_ids(&[3, 1, 4, 2]).unwrap();
        let c = Coalition::from_ids(&[1, 2, 3]);
        assert_eq!(order.rank_vector(&c, Orientation::WorstFirst), vec![3, 1, 0]);
        assert_eq!(order.rank_vector(&c, Orientation::BestFirst), vec![0, 1, 3]);
        assert_eq!(order.best_position(&c), Some(0));
        assert_eq!(order.worst_position(&c), Some(3));
        assert_eq!(order.best_position(&Coalition::EMPTY), None);
        assert_eq!(order.best(), Some(Individual(3)));
    }
}
