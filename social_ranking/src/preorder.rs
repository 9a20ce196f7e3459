use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Where an element sits relative to another one in a preorder.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Position {
    Before,
    After,
    Tied,
    /// At least one of the two elements is missing from the (partial) preorder.
    Absent,
}

impl Position {
    fn from_classes(x: Option<usize>, y: Option<usize>) -> Position {
        match (x, y) {
            (Some(cx), Some(cy)) if cx < cy => Position::Before,
            (Some(cx), Some(cy)) if cx > cy => Position::After,
            (Some(_), Some(_)) => Position::Tied,
            _ => Position::Absent,
        }
    }
}

/// An ordered list of equivalence classes, most preferred first.
///
/// Classes are never empty. A preorder produced by a lifting or ranking rule
/// contains every element of its domain exactly once; a preorder edited to
/// simulate partial information may miss some of them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Preorder<T> {
    classes: Vec<Vec<T>>,
}

impl<T: Eq + Hash + Clone> Preorder<T> {
    /// Empty classes are dropped.
    pub fn new(classes: Vec<Vec<T>>) -> Preorder<T> {
        Preorder {
            classes: classes.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    pub fn classes(&self) -> &[Vec<T>] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<Vec<T>> {
        self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// The number of elements over all the classes.
    pub fn len(&self) -> usize {
        self.classes.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All the elements, from the most preferred class to the least preferred one.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.classes.iter().flat_map(|c| c.iter())
    }

    pub fn class_of(&self, x: &T) -> Option<usize> {
        self.classes.iter().position(|c| c.contains(x))
    }

    pub fn contains(&self, x: &T) -> bool {
        self.class_of(x).is_some()
    }

    /// Scans the classes in order until `x` or `y` is found.
    ///
    /// Use [`Preorder::index`] when many queries are made against the same preorder.
    pub fn position_before(&self, x: &T, y: &T) -> Position {
        for (idx, class) in self.classes.iter().enumerate() {
            let has_x = class.contains(x);
            let has_y = class.contains(y);
            match (has_x, has_y) {
                (true, true) => return Position::Tied,
                (true, false) => {
                    return Position::from_classes(Some(idx), self.class_after(idx, y));
                }
                (false, true) => {
                    return Position::from_classes(self.class_after(idx, x), Some(idx));
                }
                (false, false) => {}
            }
        }
        Position::Absent
    }

    fn class_after(&self, idx: usize, x: &T) -> Option<usize> {
        self.classes[idx + 1..]
            .iter()
            .position(|c| c.contains(x))
            .map(|p| p + idx + 1)
    }

    /// True if every element of the domain appears exactly once, and nothing else appears.
    pub fn is_partition_of(&self, domain: &[T]) -> bool {
        let expected: HashSet<&T> = domain.iter().collect();
        let mut seen: HashSet<&T> = HashSet::new();
        for x in self.iter() {
            if !expected.contains(x) || !seen.insert(x) {
                return false;
            }
        }
        seen.len() == expected.len()
    }

    /// Removes an element; a class left empty disappears.
    pub fn remove(&mut self, x: &T) -> bool {
        if let Some(idx) = self.class_of(x) {
            self.classes[idx].retain(|y| y != x);
            if self.classes[idx].is_empty() {
                self.classes.remove(idx);
            }
            true
        } else {
            false
        }
    }

    /// Removes a whole equivalence class.
    pub fn remove_class(&mut self, idx: usize) -> Option<Vec<T>> {
        if idx < self.classes.len() {
            Some(self.classes.remove(idx))
        } else {
            None
        }
    }

    /// The sub-preorder of the elements satisfying the predicate.
    pub fn restrict<F: Fn(&T) -> bool>(&self, keep: F) -> Preorder<T> {
        Preorder::new(
            self.classes
                .iter()
                .map(|c| c.iter().filter(|x| keep(x)).cloned().collect())
                .collect(),
        )
    }

    pub fn index(&self) -> PreorderIndex<'_, T> {
        let mut classes: HashMap<&T, usize> = HashMap::new();
        for (idx, class) in self.classes.iter().enumerate() {
            for x in class.iter() {
                classes.entry(x).or_insert(idx);
            }
        }
        PreorderIndex { classes }
    }
}

/// Constant-time position queries over a preorder.
pub struct PreorderIndex<'a, T> {
    classes: HashMap<&'a T, usize>,
}

impl<'a, T: Eq + Hash> PreorderIndex<'a, T> {
    pub fn class_of(&self, x: &T) -> Option<usize> {
        self.classes.get(x).cloned()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.classes.contains_key(x)
    }

    pub fn position(&self, x: &T, y: &T) -> Position {
        Position::from_classes(self.class_of(x), self.class_of(y))
    }
}

/// A set of strict preferences `(winner, loser)`.
///
/// Unlike a [`Preorder`], the relation may be incomplete or cyclic. A pair present
/// in both directions expresses a tie.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairwiseRelation<T> {
    pairs: BTreeSet<(T, T)>,
}

impl<T: Ord + Clone> PairwiseRelation<T> {
    pub fn new() -> PairwiseRelation<T> {
        PairwiseRelation {
            pairs: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, winner: T, loser: T) -> bool {
        self.pairs.insert((winner, loser))
    }

    pub fn remove(&mut self, winner: &T, loser: &T) -> bool {
        self.pairs.remove(&(winner.clone(), loser.clone()))
    }

    pub fn prefers(&self, a: &T, b: &T) -> bool {
        self.pairs.contains(&(a.clone(), b.clone()))
    }

    /// Both directions are asserted.
    pub fn is_tied(&self, a: &T, b: &T) -> bool {
        self.prefers(a, b) && self.prefers(b, a)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &(T, T)> {
        self.pairs.iter()
    }
}

impl<T: Ord + Clone + Eq + Hash> PairwiseRelation<T> {
    /// All the preferences expressed by a preorder, ties in both directions.
    pub fn from_preorder(p: &Preorder<T>) -> PairwiseRelation<T> {
        let mut res = PairwiseRelation::new();
        for (idx, class) in p.classes().iter().enumerate() {
            for x in class.iter() {
                for y in class.iter().filter(|y| *y != x) {
                    res.insert(x.clone(), y.clone());
                }
                for y in p.classes()[idx + 1..].iter().flatten() {
                    res.insert(x.clone(), y.clone());
                }
            }
        }
        res
    }
}

impl<T: Ord + Clone> Default for PairwiseRelation<T> {
    fn default() -> Self {
        PairwiseRelation::new()
    }
}

impl<T: Ord + Clone> FromIterator<(T, T)> for PairwiseRelation<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        PairwiseRelation {
            pairs: iter.into_iter().collect(),
        }
    }
}
