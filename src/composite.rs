use std::{cmp::Ordering, fmt};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    comparator::Comparator,
    erased::{TypeErase, TypeErasedFieldComparator},
};

/// Chain of field comparators applied as tie-breakers, first entry is the
/// primary key.
///
/// Returns [`Ordering::Equal`] when every key ties, including the empty chain,
/// so a stable sort keeps tied records in input order.
pub struct CompositeComparator<T> {
    comparators: Vec<TypeErasedFieldComparator<T>>,
}

impl<T> Clone for CompositeComparator<T> {
    fn clone(&self) -> Self {
        Self {
            comparators: self.comparators.clone(),
        }
    }
}

impl<T> Default for CompositeComparator<T> {
    fn default() -> Self {
        Self {
            comparators: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for CompositeComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.comparators.iter()).finish()
    }
}

impl<T> CompositeComparator<T> {
    pub fn new(comparators: Vec<TypeErasedFieldComparator<T>>) -> Self {
        debug!(
            keys = %comparators.iter().map(|c| c.name()).join(", "),
            "build composite comparator"
        );
        Self { comparators }
    }

    /// Appends a lower precedence key.
    pub fn then<C>(mut self, comparator: C) -> Self
    where
        C: TypeErase<T>,
    {
        self.comparators.push(comparator.type_erased());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    #[inline]
    pub fn comparators(&self) -> &[TypeErasedFieldComparator<T>] {
        &self.comparators
    }

    #[inline]
    pub fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        Self::compare_with(lhs, rhs, &self.comparators)
    }

    /// Evaluates `comparators` in order and returns the first non-equal
    /// result.
    pub fn compare_with(lhs: &T, rhs: &T, comparators: &[TypeErasedFieldComparator<T>]) -> Ordering {
        for comparator in comparators {
            let ordering = comparator.compare(lhs, rhs);
            if ordering.is_ne() {
                trace!(key = comparator.name(), ?ordering, "decided by");
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable in-place sort.
    pub fn sort(&self, items: &mut [T]) {
        trace!(items = items.len(), keys = self.len(), "sort in place");
        items.sort_by(|lhs, rhs| self.compare(lhs, rhs));
    }
}

impl<T> FromIterator<TypeErasedFieldComparator<T>> for CompositeComparator<T> {
    fn from_iter<I: IntoIterator<Item = TypeErasedFieldComparator<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Comparator<T> for CompositeComparator<T> {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        CompositeComparator::compare(self, lhs, rhs)
    }

    fn name(&self) -> &str {
        "CompositeComparator"
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use itertools::Itertools;

    use crate::{
        comparator::Comparator,
        erased::{TypeErase, TypeErasedFieldComparator},
        field::FieldComparator,
    };

    use super::CompositeComparator;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        a: u8,
        b: u8,
        c: Option<char>,
        id: usize,
    }

    fn row(a: u8, b: u8, c: Option<char>, id: usize) -> Row {
        Row { a, b, c, id }
    }

    fn by_a() -> FieldComparator<Row, u8> {
        FieldComparator::new(|r: &Row| Some(r.a)).named("a")
    }

    fn by_b() -> FieldComparator<Row, u8> {
        FieldComparator::new(|r: &Row| Some(r.b)).named("b")
    }

    fn by_c() -> FieldComparator<Row, char> {
        FieldComparator::new(|r: &Row| r.c).named("c")
    }

    #[test]
    fn first_key_wins() {
        let composite = CompositeComparator::default().then(by_a()).then(by_b().descending());

        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.compare(&row(1, 0, None, 0), &row(2, 9, None, 1)),
            Ordering::Less
        );
        assert_eq!(
            composite.compare(&row(1, 0, None, 0), &row(1, 9, None, 1)),
            Ordering::Greater
        );
    }

    #[test]
    fn middle_key_decides_when_primary_ties() {
        let keys = vec![
            by_a().type_erased(),
            by_b().type_erased(),
            by_c().type_erased(),
        ];

        let lhs = row(1, 1, Some('z'), 0);
        let rhs = row(1, 2, Some('a'), 1);

        assert_eq!(
            CompositeComparator::compare_with(&lhs, &rhs, &keys),
            Ordering::Less
        );
        assert_eq!(
            CompositeComparator::compare_with(&rhs, &lhs, &keys),
            Ordering::Greater
        );
    }

    #[test]
    fn empty_and_all_tied_are_equal() {
        let empty = CompositeComparator::<Row>::default();
        let lhs = row(1, 1, None, 0);
        let rhs = row(1, 1, None, 1);

        assert!(empty.is_empty());
        assert_eq!(empty.compare(&lhs, &rhs), Ordering::Equal);

        let composite: CompositeComparator<Row> =
            [by_a().type_erased(), by_c().type_erased()].into_iter().collect();
        assert_eq!(composite.compare(&lhs, &rhs), Ordering::Equal);
        assert_eq!(composite.compare(&rhs, &lhs), Ordering::Equal);
    }

    #[test]
    fn in_place_sort_is_stable() {
        let composite = CompositeComparator::new(vec![by_c().descending().type_erased()]);
        let mut rows = vec![
            row(0, 0, None, 0),
            row(0, 0, Some('a'), 1),
            row(0, 0, None, 2),
            row(0, 0, Some('b'), 3),
            row(0, 0, Some('a'), 4),
        ];

        composite.sort(&mut rows);

        assert_eq!(rows.iter().map(|r| r.id).collect_vec(), vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn usable_as_trait_object() {
        let comparators: Vec<Box<dyn Comparator<Row>>> = vec![
            Box::new(by_a()),
            Box::new(CompositeComparator::default().then(by_b())),
        ];
        let lhs = row(2, 1, None, 0);
        let rhs = row(1, 2, None, 1);

        assert_eq!(
            comparators.iter().map(|c| c.compare(&lhs, &rhs)).collect_vec(),
            vec![Ordering::Greater, Ordering::Less]
        );
        assert_eq!(comparators[1].name(), "CompositeComparator");
    }

    #[test]
    fn accessors() {
        let keys: Vec<TypeErasedFieldComparator<Row>> =
            vec![by_a().type_erased(), by_c().descending().type_erased()];
        let composite = CompositeComparator::new(keys).clone();

        assert_eq!(
            composite
                .comparators()
                .iter()
                .map(|c| (Comparator::name(c).to_string(), c.is_ascending()))
                .collect_vec(),
            vec![("a".to_string(), true), ("c".to_string(), false)]
        );
    }
}
