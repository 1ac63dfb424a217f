use std::fmt;

/// Insertion-ordered set holding at most one copy of each value.
///
/// Elements are compared structurally via `PartialEq`, never by identity.
/// Grammar symbols, productions and LR items are frequently rebuilt from
/// scratch in different places and must still be recognized as duplicates;
/// an identity-based container would silently duplicate states and blow up
/// the automaton.
///
/// Iteration order is insertion order, which makes every fixed-point loop
/// built on top of this container deterministic across runs.
#[derive(Debug, Clone)]
pub struct Set<T> {
    items: Vec<T>,
}

impl<T: PartialEq> Set<T> {
    pub fn new() -> Self {
        Set { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `item` unless an equal element is already present.
    ///
    /// Returns whether the set grew; fixed-point loops use the return value
    /// as their change flag.
    pub fn add(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Flattening union: adds every element of `other`.
    pub fn add_all(&mut self, other: &Set<T>) -> bool
    where
        T: Clone,
    {
        let mut changed = false;
        for item in other.iter() {
            if !self.items.contains(item) {
                self.items.push(item.clone());
                changed = true;
            }
        }
        changed
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Subset test: every element of `other` is contained in `self`.
    pub fn contains_all(&self, other: &Set<T>) -> bool {
        other.iter().all(|item| self.contains(item))
    }

    /// Returns the canonical stored instance equal to `item`, if any.
    pub fn find(&self, item: &T) -> Option<&T> {
        self.items.iter().find(|i| *i == item)
    }

    /// Position of the element equal to `item` in insertion order.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn delete(&mut self, item: &T) -> bool {
        match self.position(item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.items.iter()
    }
}

impl<T: PartialEq> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

/// Two sets are equal when they have the same cardinality and each contains
/// every element of the other; insertion order does not matter.
impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Set<T>) -> bool {
        self.items.len() == other.items.len() && self.contains_all(other)
    }
}

impl<T: PartialEq> Eq for Set<T> {}

impl<T: PartialEq> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: PartialEq> std::iter::FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "{{")?;
        for item in &self.items {
            writeln!(f, "    {}", item)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_deduplicates_equal_values() {
        let mut set = Set::new();
        assert!(set.add("a".to_owned()));
        assert!(set.add("b".to_owned()));
        assert!(!set.add("a".to_owned()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let mut set = Set::new();
        set.add(3);
        set.add(1);
        set.add(2);
        set.add(1);
        let order: Vec<i32> = set.iter().cloned().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: Set<i32> = vec![1, 2, 3].into_iter().collect();
        let b: Set<i32> = vec![3, 2, 1].into_iter().collect();
        let c: Set<i32> = vec![1, 2].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn add_all_unions_and_reports_growth() {
        let mut a: Set<i32> = vec![1, 2].into_iter().collect();
        let b: Set<i32> = vec![2, 3].into_iter().collect();
        assert!(a.add_all(&b));
        assert!(!a.add_all(&b));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn find_returns_the_stored_instance() {
        let mut set = Set::new();
        set.add(String::from("x"));
        let stored = set.find(&String::from("x")).unwrap();
        assert_eq!(stored, "x");
        assert!(set.find(&String::from("y")).is_none());
    }

    #[test]
    fn delete_removes_equal_element() {
        let mut set: Set<i32> = vec![1, 2, 3].into_iter().collect();
        assert!(set.delete(&2));
        assert!(!set.delete(&2));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&2));
    }
}
