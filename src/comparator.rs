use std::cmp::Ordering;

pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;

    fn name(&self) -> &str;
}
