use serde::{Deserialize, Serialize};

/// A `[min, max)` window over cell timestamps
///
/// The default range covers all time. Note, the number of versions
/// returned per cell is capped separately (default 1), so a range
/// spanning multiple versions only returns them all if the version
/// cap is raised as well.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TimeRange {
    min: u128,
    max: u128,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: u128::MAX,
        }
    }
}

impl TimeRange {
    /// Creates a new time range, failing if `min > max`
    pub fn new(min: u128, max: u128) -> crate::Result<Self> {
        if min > max {
            return Err(crate::Error::InvalidTimeRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// Creates the window containing exactly the given timestamp
    pub fn at(timestamp: u128) -> Self {
        Self {
            min: timestamp,
            max: timestamp.saturating_add(1),
        }
    }

    /// Inclusive lower bound
    pub fn min(&self) -> u128 {
        self.min
    }

    /// Exclusive upper bound
    pub fn max(&self) -> u128 {
        self.max
    }

    /// Whether this is the default range covering all time
    pub fn is_all_time(&self) -> bool {
        self.min == 0 && self.max == u128::MAX
    }

    pub fn contains(&self, timestamp: u128) -> bool {
        timestamp >= self.min && timestamp < self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn time_range_default_is_all_time() {
        let tr = TimeRange::default();
        assert!(tr.is_all_time());
        assert!(tr.contains(0));
        assert!(tr.contains(u128::MAX - 1));
    }

    #[test]
    fn time_range_invalid() {
        assert!(matches!(
            TimeRange::new(5, 3),
            Err(crate::Error::InvalidTimeRange { min: 5, max: 3 })
        ));
    }

    #[test]
    fn time_range_at_single_timestamp() {
        let tr = TimeRange::at(42);
        assert_eq!(tr, TimeRange::new(42, 43).unwrap());
        assert!(tr.contains(42));
        assert!(!tr.contains(43));
    }

    #[test]
    fn time_range_at_max_does_not_overflow() {
        let tr = TimeRange::at(u128::MAX);
        assert_eq!(tr.min(), u128::MAX);
        assert_eq!(tr.max(), u128::MAX);
    }
}
