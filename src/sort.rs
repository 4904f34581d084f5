use itertools::Itertools;
use tracing::trace;

use crate::{composite::CompositeComparator, erased::TypeErase};

/// Sorts a copy of `items` by `comparators`, first comparator being the
/// primary key. The sort is stable and `items` is left untouched.
///
/// A heterogeneous key list is passed as already erased comparators:
///
/// ```
/// use sortkey::{sort_by, FieldComparator, TypeErase};
///
/// #[derive(Clone)]
/// struct Item {
///     a: i32,
///     c: Option<String>,
/// }
///
/// let items = vec![
///     Item { a: 1, c: Some("2".into()) },
///     Item { a: 1, c: None },
///     Item { a: 0, c: Some("1".into()) },
/// ];
/// let sorted = sort_by(
///     &items,
///     &[
///         FieldComparator::new(|i: &Item| Some(i.a)).type_erased(),
///         FieldComparator::new(|i: &Item| i.c.clone()).descending().type_erased(),
///     ],
/// );
///
/// assert_eq!(sorted.iter().map(|i| i.a).collect::<Vec<_>>(), vec![0, 1, 1]);
/// assert_eq!(sorted[1].c.as_deref(), Some("2"));
/// ```
pub fn sort_by<T, C>(items: &[T], comparators: &[C]) -> Vec<T>
where
    T: Clone,
    C: TypeErase<T>,
{
    items.iter().cloned().sorted_by_fields(comparators)
}

pub fn sort_with<T>(items: &[T], composite: &CompositeComparator<T>) -> Vec<T>
where
    T: Clone,
{
    items.iter().cloned().sorted_with(composite)
}

pub trait SortByFields: IntoIterator + Sized {
    fn sorted_by_fields<C>(self, comparators: &[C]) -> Vec<Self::Item>
    where
        C: TypeErase<Self::Item>,
    {
        let composite = comparators
            .iter()
            .map(|comparator| comparator.type_erased())
            .collect::<CompositeComparator<_>>();
        self.sorted_with(&composite)
    }

    fn sorted_with(self, composite: &CompositeComparator<Self::Item>) -> Vec<Self::Item> {
        let sorted = self
            .into_iter()
            .sorted_by(|lhs, rhs| composite.compare(lhs, rhs))
            .collect_vec();
        trace!(items = sorted.len(), keys = composite.len(), "sorted by fields");
        sorted
    }
}

impl<I: IntoIterator> SortByFields for I {}
