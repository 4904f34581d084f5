#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Ordered values wrap different types: {left} vs {right}")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
