pub mod comparator;
pub mod composite;
pub mod erased;
pub mod error;
pub mod field;
pub mod ordered_value;
pub mod sort;

pub use comparator::Comparator;
pub use composite::CompositeComparator;
pub use erased::{type_erase, TypeErase, TypeErasedFieldComparator};
pub use error::{Error, Result};
pub use field::FieldComparator;
pub use ordered_float::OrderedFloat;
pub use ordered_value::{OrderedValue, SortValue};
pub use sort::{sort_by, sort_with, SortByFields};

#[cfg(test)]
#[ctor::ctor]
fn init() {
    color_backtrace::install();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_target(true)
        .with_file(true)
        .with_level(true)
        .without_time()
        .with_thread_ids(true)
        .with_test_writer()
        .try_init();
}
