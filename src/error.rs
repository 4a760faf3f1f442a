#[derive(Debug)]
pub enum Error {
    /// A time range was given with `min > max`
    InvalidTimeRange { min: u128, max: u128 },

    /// Batching cannot be combined with a filter that
    /// needs to see whole rows at once
    IncompatibleFilter,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidTimeRange { min, max } => {
                write!(f, "invalid time range: min {min} > max {max}")
            }
            Error::IncompatibleFilter => {
                write!(
                    f,
                    "cannot set batch on a scan using a filter that requires whole rows"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
