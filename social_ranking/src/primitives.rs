use log::debug;

use crate::coalition::*;
use crate::config::*;

/// How the positions of a rank vector are sorted before a lexicographic comparison.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Orientation {
    /// Worst member first (leximin).
    WorstFirst,
    /// Best member first (leximax).
    BestFirst,
}

/// Outcome of comparing a first value to a second one.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Comparison {
    Better,
    Worse,
    Tied,
}

impl Comparison {
    pub fn reverse(self) -> Comparison {
        match self {
            Comparison::Better => Comparison::Worse,
            Comparison::Worse => Comparison::Better,
            Comparison::Tied => Comparison::Tied,
        }
    }
}

/// All the subsets of the population with at least `min_size` members,
/// smallest first, each size in the combination order of the population.
pub fn powerset(population: &[Individual], min_size: usize) -> RankingResult<Vec<Coalition>> {
    check_population(population)?;
    let mut res: Vec<Coalition> = Vec::new();
    for size in min_size..=population.len() {
        push_combinations(population, size, &mut res);
    }
    debug!(
        "powerset: {} coalitions of size >= {} over {} individuals",
        res.len(),
        min_size,
        population.len()
    );
    Ok(res)
}

// Same enumeration order as the classic index-vector algorithm.
fn push_combinations(population: &[Individual], size: usize, res: &mut Vec<Coalition>) {
    let n = population.len();
    if size > n {
        return;
    }
    let mut idxs: Vec<usize> = (0..size).collect();
    loop {
        res.push(Coalition::new(idxs.iter().map(|&i| population[i])));
        // Find the rightmost index that can still move forward.
        let mut pos = size;
        loop {
            if pos == 0 {
                return;
            }
            pos -= 1;
            if idxs[pos] != pos + n - size {
                break;
            }
        }
        idxs[pos] += 1;
        for j in pos + 1..size {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
}

/// Lexicographic comparison of two rank vectors sorted with the given orientation.
///
/// At the first difference, the lower position wins. When one vector is a
/// strict prefix of the other, the longer one wins worst-first and the
/// shorter one wins best-first.
pub fn lex_compare(orientation: Orientation, v_a: &[usize], v_b: &[usize]) -> Comparison {
    if v_a == v_b {
        return Comparison::Tied;
    }
    for (a, b) in v_a.iter().zip(v_b.iter()) {
        if a < b {
            return Comparison::Better;
        }
        if b < a {
            return Comparison::Worse;
        }
    }
    let a_longer = v_a.len() > v_b.len();
    match (orientation, a_longer) {
        (Orientation::WorstFirst, true) | (Orientation::BestFirst, false) => Comparison::Better,
        _ => Comparison::Worse,
    }
}

pub fn lex_compare_worst_first(v_a: &[usize], v_b: &[usize]) -> Comparison {
    lex_compare(Orientation::WorstFirst, v_a, v_b)
}

pub fn lex_compare_best_first(v_a: &[usize], v_b: &[usize]) -> Comparison {
    lex_compare(Orientation::BestFirst, v_a, v_b)
}

/// Gärdenfors comparison of a coalition against the same coalition plus one member.
///
/// Returns the verdict for `a` against `b`, or `None` if the added member is
/// neither worse nor better than every member of the smaller coalition, or if
/// the coalitions are not in that configuration at all.
pub fn gardenfors(order: &StrictOrder, a: &Coalition, b: &Coalition) -> Option<Comparison> {
    if let Some(added) = a.added_to(b) {
        extension_verdict(order, added, b)
    } else if let Some(added) = b.added_to(a) {
        extension_verdict(order, added, a).map(Comparison::reverse)
    } else {
        None
    }
}

// Verdict for `smaller + added` against `smaller`.
fn extension_verdict(
    order: &StrictOrder,
    added: Individual,
    smaller: &Coalition,
) -> Option<Comparison> {
    let pos = order.position(&added)?;
    let worst = order.worst_position(smaller)?;
    let best = order.best_position(smaller)?;
    if pos > worst {
        Some(Comparison::Worse)
    } else if pos < best {
        Some(Comparison::Better)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cs: &[Coalition]) -> Vec<Vec<u32>> {
        cs.iter()
            .map(|c| c.members().iter().map(|i| i.0).collect())
            .collect()
    }

    #[test]
    fn powerset_grouped_by_size() {
        let ps = powerset(&population(&[1, 2, 3]), 0).unwrap();
        assert_eq!(
            ids(&ps),
            vec![
                vec![],
                vec![1],
                vec![2],
                vec![3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
                vec![1, 2, 3]
            ]
        );
        let ps1 = powerset(&population(&[1, 2, 3]), 1).unwrap();
        assert_eq!(ps1.len(), 7);
        assert!(!ps1.contains(&Coalition::EMPTY));
        let ps2 = powerset(&population(&[1, 2, 3]), 2).unwrap();
        assert_eq!(ps2.len(), 4);
        assert!(powerset(&population(&[1, 2]), 3).unwrap().is_empty());
    }

    #[test]
    fn powerset_sizes() {
        for n in 0..10u32 {
            let pop: Vec<Individual> = (1..=n).map(Individual).collect();
            assert_eq!(powerset(&pop, 0).unwrap().len(), 1 << n);
            assert_eq!(powerset(&pop, 1).unwrap().len(), (1 << n) - 1);
        }
    }

    #[test]
    fn powerset_of_empty_population() {
        assert_eq!(powerset(&[], 0).unwrap(), vec![Coalition::EMPTY]);
        assert!(powerset(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn powerset_canonicalizes_unsorted_population() {
        let ps = powerset(&population(&[3, 1]), 1).unwrap();
        assert_eq!(ids(&ps), vec![vec![3], vec![1], vec![1, 3]]);
    }

    #[test]
    fn powerset_rejects_duplicates() {
        assert!(matches!(
            powerset(&population(&[1, 1]), 0),
            Err(RankingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn lexicographic_comparisons() {
        assert_eq!(lex_compare_worst_first(&[2, 0], &[3]), Comparison::Better);
        assert_eq!(lex_compare_worst_first(&[2, 1], &[2, 0]), Comparison::Worse);
        assert_eq!(lex_compare_worst_first(&[2, 1], &[2, 1]), Comparison::Tied);
        // Equal prefix: the longer vector wins worst-first, the shorter best-first.
        assert_eq!(lex_compare_worst_first(&[2, 1], &[2]), Comparison::Better);
        assert_eq!(lex_compare_best_first(&[0, 1], &[0]), Comparison::Worse);
        assert_eq!(lex_compare_best_first(&[], &[0]), Comparison::Better);
        assert_eq!(lex_compare_worst_first(&[], &[4]), Comparison::Worse);
    }

    #[test]
    fn lexicographic_comparisons_are_antisymmetric() {
        let vectors: Vec<Vec<usize>> = vec![
            vec![],
            vec![0],
            vec![1],
            vec![1, 0],
            vec![0, 1],
            vec![2, 1, 0],
            vec![2, 0],
            vec![0, 2],
        ];
        for o in [Orientation::WorstFirst, Orientation::BestFirst] {
            for a in vectors.iter() {
                for b in vectors.iter() {
                    let ab = lex_compare(o, a, b);
                    let ba = lex_compare(o, b, a);
                    assert_eq!(ab, ba.reverse(), "{:?} {:?} {:?}", o, a, b);
                    assert_eq!(ab == Comparison::Tied, a == b);
                }
            }
        }
    }

    #[test]
    fn gardenfors_principle() {
        // 1 is best, 4 is worst.
        let order = StrictOrder::from_ids(&[1, 2, 3, 4]).unwrap();
        let c23 = Coalition::from_ids(&[2, 3]);
        // Adding a worse member makes the coalition worse.
        assert_eq!(
            gardenfors(&order, &Coalition::from_ids(&[2, 3, 4]), &c23),
            Some(Comparison::Worse)
        );
        // Adding a better member makes the coalition better.
        assert_eq!(
            gardenfors(&order, &Coalition::from_ids(&[1, 2, 3]), &c23),
            Some(Comparison::Better)
        );
        assert_eq!(
            gardenfors(&order, &c23, &Coalition::from_ids(&[1, 2, 3])),
            Some(Comparison::Worse)
        );
        // In between: indeterminate.
        assert_eq!(
            gardenfors(
                &order,
                &Coalition::from_ids(&[1, 2, 4]),
                &Coalition::from_ids(&[1, 4])
            ),
            None
        );
        // Not an extension by one member.
        assert_eq!(
            gardenfors(
                &order,
                &Coalition::from_ids(&[1, 2]),
                &Coalition::from_ids(&[3])
            ),
            None
        );
        assert_eq!(
            gardenfors(&order, &Coalition::from_ids(&[1]), &Coalition::EMPTY),
            None
        );
    }
}
