use std::sync::Arc;

use crate::{
    field::FieldComparator,
    ordered_value::{OrderedValue, SortValue},
};

/// A field comparator whose value type is hidden behind [`OrderedValue`], so
/// comparators over different field types fit in one sequence.
pub type TypeErasedFieldComparator<T> = FieldComparator<T, OrderedValue>;

pub trait TypeErase<T> {
    fn type_erased(&self) -> TypeErasedFieldComparator<T>;
}

impl<T, V> TypeErase<T> for FieldComparator<T, V>
where
    T: 'static,
    V: SortValue,
{
    fn type_erased(&self) -> TypeErasedFieldComparator<T> {
        let (ascending, extractor, name) = self.parts();
        FieldComparator::from_parts(
            ascending,
            Arc::new(move |record: &T| Some(V::erase(extractor(record)))),
            name,
        )
    }
}

#[inline]
pub fn type_erase<T, V>(comparator: &FieldComparator<T, V>) -> TypeErasedFieldComparator<T>
where
    T: 'static,
    V: SortValue,
{
    comparator.type_erased()
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use itertools::Itertools;

    use crate::{comparator::Comparator, field::FieldComparator, ordered_value::OrderedValue};

    use super::{type_erase, TypeErase, TypeErasedFieldComparator};

    struct Row {
        count: i64,
        tag: Option<&'static str>,
    }

    #[test]
    fn heterogeneous_sequence() {
        let keys: Vec<TypeErasedFieldComparator<Row>> = vec![
            FieldComparator::new(|r: &Row| Some(r.count)).type_erased(),
            type_erase(&FieldComparator::new(|r: &Row| r.tag).descending()),
        ];

        let lhs = Row { count: 1, tag: None };
        let rhs = Row {
            count: 1,
            tag: Some("a"),
        };

        assert_eq!(keys[0].compare(&lhs, &rhs), Ordering::Equal);
        assert_eq!(keys[1].compare(&lhs, &rhs), Ordering::Greater);
        assert_eq!(
            keys.iter().map(|k| k.is_ascending()).collect_vec(),
            vec![true, false]
        );
    }

    #[test]
    fn erased_matches_typed() {
        let typed = FieldComparator::new(|r: &Row| r.tag).named("tag");
        let erased = typed.type_erased();
        let rows = [
            Row { count: 0, tag: None },
            Row {
                count: 0,
                tag: Some("b"),
            },
            Row {
                count: 0,
                tag: Some("a"),
            },
        ];

        for (lhs, rhs) in rows.iter().cartesian_product(rows.iter()) {
            assert_eq!(erased.compare(lhs, rhs), typed.compare(lhs, rhs));
        }
        assert_eq!(Comparator::name(&erased), "tag");
        assert!(erased.extract(&rows[0]).is_some_and(|v| v.is_absent()));
        assert_eq!(
            erased
                .extract(&rows[1])
                .and_then(|v| v.downcast_ref::<&str>().copied()),
            Some("b")
        );
    }

    #[test]
    fn erasing_twice_keeps_behaviour() {
        let once = FieldComparator::new(|r: &Row| Some(r.count)).descending().type_erased();
        let twice = once.type_erased();

        let lhs = Row { count: 1, tag: None };
        let rhs = Row { count: 2, tag: None };

        assert!(!twice.is_ascending());
        assert_eq!(twice.compare(&lhs, &rhs), Ordering::Greater);
        assert_eq!(
            twice
                .extract(&lhs)
                .and_then(|v: OrderedValue| v.downcast_ref::<i64>().copied()),
            Some(1)
        );
    }
}
