pub use crate::coalition::*;
pub use crate::config::*;
pub use crate::preorder::Preorder;

use snafu::ensure;
use std::collections::HashSet;

/// A builder for preorders over coalitions, typically read from a file or
/// written by hand in tests.
///
/// ```
/// use social_ranking::builder::Builder;
/// # use social_ranking::RankingError;
///
/// let mut builder = Builder::new(&[1, 2, 3]);
/// builder.add_class(&[vec![1, 2], vec![3]])?;
/// builder.add_class(&[vec![2]])?;
/// let coalitions = builder.build();
/// assert_eq!(coalitions.num_classes(), 2);
///
/// # Ok::<(), RankingError>(())
/// ```
pub struct Builder {
    pub(crate) _population: Vec<Individual>,
    pub(crate) _classes: Vec<Vec<Coalition>>,
    pub(crate) _seen: HashSet<Coalition>,
}

impl Builder {
    pub fn new(ids: &[u32]) -> Builder {
        Builder {
            _population: population(ids),
            _classes: Vec::new(),
            _seen: HashSet::new(),
        }
    }

    pub fn population(&self) -> &[Individual] {
        &self._population
    }

    /// Adds an equivalence class, below all the classes added so far.
    ///
    /// Each coalition is given as the identifiers of its members, in any
    /// order. An empty list stands for the empty coalition.
    pub fn add_class(&mut self, coalitions: &[Vec<u32>]) -> RankingResult<()> {
        let mut class: Vec<Coalition> = Vec::new();
        for ids in coalitions {
            let c = Coalition::from_ids(ids);
            for i in c.members() {
                ensure!(
                    self._population.contains(i),
                    InvalidArgumentSnafu {
                        message: format!("coalition {} mentions unknown individual {}", c, i),
                    }
                );
            }
            ensure!(
                self._seen.insert(c.clone()),
                InvalidArgumentSnafu {
                    message: format!("coalition {} appears twice", c),
                }
            );
            class.push(c);
        }
        self._classes.push(class);
        Ok(())
    }

    /// The preorder, without the empty classes.
    pub fn build(self) -> Preorder<Coalition> {
        Preorder::new(self._classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_order() {
        let mut b = Builder::new(&[1, 2]);
        b.add_class(&[vec![2, 1]]).unwrap();
        b.add_class(&[]).unwrap();
        b.add_class(&[vec![1], vec![]]).unwrap();
        let p = b.build();
        assert_eq!(
            p.into_classes(),
            vec![
                vec![Coalition::from_ids(&[1, 2])],
                vec![Coalition::from_ids(&[1]), Coalition::EMPTY]
            ]
        );
    }

    #[test]
    fn rejects_bad_coalitions() {
        let mut b = Builder::new(&[1, 2]);
        assert!(matches!(
            b.add_class(&[vec![3]]),
            Err(RankingError::InvalidArgument { .. })
        ));
        b.add_class(&[vec![1, 2]]).unwrap();
        assert!(matches!(
            b.add_class(&[vec![2, 1]]),
            Err(RankingError::InvalidArgument { .. })
        ));
    }
}
