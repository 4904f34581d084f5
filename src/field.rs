use std::{any::type_name, borrow::Cow, cmp::Ordering, fmt, sync::Arc};

use ordered_float::OrderedFloat;

use crate::{comparator::Comparator, ordered_value::SortValue};

pub(crate) type Extractor<T, V> = Arc<dyn Fn(&T) -> Option<V> + Send + Sync>;

/// Orders records of type `T` by one derived field of type `V`.
///
/// The extractor must be pure: it may be called any number of times, once per
/// record per comparison. Direction changes return a new comparator sharing
/// the same extractor.
pub struct FieldComparator<T, V> {
    ascending: bool,
    extractor: Extractor<T, V>,
    name: Cow<'static, str>,
}

impl<T, V> Clone for FieldComparator<T, V> {
    fn clone(&self) -> Self {
        Self {
            ascending: self.ascending,
            extractor: Arc::clone(&self.extractor),
            name: self.name.clone(),
        }
    }
}

impl<T, V> fmt::Debug for FieldComparator<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldComparator")
            .field("name", &self.name)
            .field("ascending", &self.ascending)
            .finish_non_exhaustive()
    }
}

impl<T, V> FieldComparator<T, V> {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub(crate) fn parts(&self) -> (bool, Extractor<T, V>, Cow<'static, str>) {
        (self.ascending, Arc::clone(&self.extractor), self.name.clone())
    }
}

impl<T, V> FieldComparator<T, V>
where
    T: 'static,
    V: 'static,
{
    /// Ascending comparator over the extracted field.
    #[inline]
    pub fn new<F>(extractor: F) -> Self
    where
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
    {
        Self::with_direction(true, extractor)
    }

    pub fn with_direction<F>(ascending: bool, extractor: F) -> Self
    where
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
    {
        Self::from_parts(ascending, Arc::new(extractor), Cow::Borrowed(type_name::<V>()))
    }

    pub(crate) fn from_parts(
        ascending: bool,
        extractor: Extractor<T, V>,
        name: Cow<'static, str>,
    ) -> Self {
        Self {
            ascending,
            extractor,
            name,
        }
    }

    /// Label used in trace output, defaults to the field type name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ascending(&self) -> Self {
        Self {
            ascending: true,
            ..self.clone()
        }
    }

    pub fn descending(&self) -> Self {
        Self {
            ascending: false,
            ..self.clone()
        }
    }

    #[inline]
    pub fn extract(&self, record: &T) -> Option<V> {
        (self.extractor)(record)
    }

    /// Orders by whether the field is present (`1`) or absent (`0`), keeping
    /// this comparator's direction.
    pub fn existence(&self) -> FieldComparator<T, u8> {
        let extractor = Arc::clone(&self.extractor);
        FieldComparator::from_parts(
            self.ascending,
            Arc::new(move |record: &T| Some(u8::from(extractor(record).is_some()))),
            Cow::Owned(format!("exists({})", self.name)),
        )
    }

    /// Post-processes the extracted value. `transform` receives the result of
    /// this comparator's extractor, the extractor itself is not rebuilt.
    pub fn remap<V2, F>(&self, transform: F) -> FieldComparator<T, V2>
    where
        V2: 'static,
        F: Fn(Option<V>) -> Option<V2> + Send + Sync + 'static,
    {
        let extractor = Arc::clone(&self.extractor);
        FieldComparator::from_parts(
            self.ascending,
            Arc::new(move |record: &T| transform(extractor(record))),
            self.name.clone(),
        )
    }
}

impl<T> FieldComparator<T, u8>
where
    T: 'static,
{
    /// Presence comparator built straight from an extractor: absent records
    /// first when `ascending`, last otherwise.
    pub fn exists<V, F>(ascending: bool, extractor: F) -> Self
    where
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
    {
        Self::with_direction(ascending, move |record: &T| {
            Some(u8::from(extractor(record).is_some()))
        })
        .named(format!("exists({})", type_name::<V>()))
    }
}

impl<T> FieldComparator<T, OrderedFloat<f64>>
where
    T: 'static,
{
    /// Ascending comparator over a float field, using `OrderedFloat`'s total
    /// order (`NaN` sorts above every other value).
    pub fn by_f64<F>(extractor: F) -> Self
    where
        F: Fn(&T) -> Option<f64> + Send + Sync + 'static,
    {
        Self::new(move |record: &T| extractor(record).map(OrderedFloat))
    }
}

impl<T, V> FieldComparator<T, V>
where
    V: SortValue,
{
    pub fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        let lhs = (self.extractor)(lhs);
        let rhs = (self.extractor)(rhs);
        let ordering = V::compare_optional(lhs.as_ref(), rhs.as_ref());

        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

impl<T, V> Comparator<T> for FieldComparator<T, V>
where
    V: SortValue,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        FieldComparator::compare(self, lhs, rhs)
    }

    #[inline]
    fn name(&self) -> &str {
        FieldComparator::name(self)
    }
}
