#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("sector {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("sector inner radius must be non-negative, got {inner}")]
    NegativeRadius { inner: f64 },

    #[error("sector outer radius {outer} is smaller than inner radius {inner}")]
    InvertedRadii { inner: f64, outer: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
