use std::{any::Any, cmp::Ordering, fmt, sync::Arc};

use crate::error::{Error, Result};

/// Object-safe ordering over a single concrete value type.
///
/// The comparison strategy is fixed when the value is wrapped, the downcast in
/// `cmp_erased` only guards against pairing values of different types.
trait ErasedOrd: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;

    fn cmp_erased(&self, other: &dyn ErasedOrd) -> Option<Ordering>;
}

impl<V> ErasedOrd for V
where
    V: Ord + Send + Sync + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    #[inline]
    fn cmp_erased(&self, other: &dyn ErasedOrd) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<V>()
            .map(|other| self.cmp(other))
    }
}

/// Type erased wrapper around an optional, totally ordered value.
///
/// Ordering rule:
///
/// ```text
///     absent == absent
///     absent <  present(v)
///     present(a) cmp present(b) == a.cmp(&b)
/// ```
///
/// Two present values must wrap the same concrete type. Comparing values of
/// different types is a programmer error: [`OrderedValue::compare`] panics,
/// [`OrderedValue::try_compare`] reports [`Error::TypeMismatch`] and
/// `partial_cmp` returns `None`.
#[derive(Clone, Default)]
pub struct OrderedValue {
    value: Option<Arc<dyn ErasedOrd>>,
}

impl OrderedValue {
    pub fn new<V>(value: Option<V>) -> Self
    where
        V: Ord + Send + Sync + 'static,
    {
        Self {
            value: value.map(|value| Arc::new(value) as Arc<dyn ErasedOrd>),
        }
    }

    #[inline]
    pub fn present<V>(value: V) -> Self
    where
        V: Ord + Send + Sync + 'static,
    {
        Self::new(Some(value))
    }

    #[inline]
    pub fn absent() -> Self {
        Self { value: None }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the wrapped type, `None` when absent.
    pub fn type_name(&self) -> Option<&'static str> {
        self.value.as_deref().map(|value| value.type_name())
    }

    /// Borrow the wrapped value if it is present and of type `V`.
    pub fn downcast_ref<V: 'static>(&self) -> Option<&V> {
        self.value
            .as_deref()
            .and_then(|value| value.as_any().downcast_ref::<V>())
    }

    pub fn try_compare(&self, other: &Self) -> Result<Ordering> {
        match (self.value.as_deref(), other.value.as_deref()) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(lhs), Some(rhs)) => lhs.cmp_erased(rhs).ok_or_else(|| Error::TypeMismatch {
                left: lhs.type_name(),
                right: rhs.type_name(),
            }),
        }
    }

    /// # Panics
    ///
    /// If both sides are present and wrap different types.
    pub fn compare(&self, other: &Self) -> Ordering {
        match self.try_compare(other) {
            Ok(ordering) => ordering,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Debug for OrderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "OrderedValue::Present({name})"),
            None => f.write_str("OrderedValue::Absent"),
        }
    }
}

impl PartialEq for OrderedValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.try_compare(other).is_ok_and(Ordering::is_eq)
    }
}

impl PartialOrd for OrderedValue {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_compare(other).ok()
    }
}

/// Values a [`FieldComparator`](crate::FieldComparator) can order by.
///
/// Every `Ord` type qualifies. [`OrderedValue`] qualifies as well, with an
/// absent `Option<OrderedValue>` treated the same as [`OrderedValue::absent`].
pub trait SortValue: Sized + Send + Sync + 'static {
    /// Absent sorts before present, present values use their own order.
    fn compare_optional(lhs: Option<&Self>, rhs: Option<&Self>) -> Ordering;

    fn erase(value: Option<Self>) -> OrderedValue;
}

impl<V> SortValue for V
where
    V: Ord + Send + Sync + 'static,
{
    #[inline]
    fn compare_optional(lhs: Option<&Self>, rhs: Option<&Self>) -> Ordering {
        match (lhs, rhs) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(lhs), Some(rhs)) => lhs.cmp(rhs),
        }
    }

    #[inline]
    fn erase(value: Option<Self>) -> OrderedValue {
        OrderedValue::new(value)
    }
}

impl SortValue for OrderedValue {
    fn compare_optional(lhs: Option<&Self>, rhs: Option<&Self>) -> Ordering {
        let absent = OrderedValue::absent();
        lhs.unwrap_or(&absent).compare(rhs.unwrap_or(&absent))
    }

    #[inline]
    fn erase(value: Option<Self>) -> OrderedValue {
        value.unwrap_or_default()
    }
}
