use serde::{Deserialize, Serialize};

/// Visibility of concurrently-written data during a scan
///
/// A scan without an explicit isolation level reads committed data only.
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum IsolationLevel {
    /// Only data from committed transactions is visible
    #[default]
    #[serde(rename = "read_committed")]
    ReadCommitted,

    /// Data from in-flight transactions is visible as well
    #[serde(rename = "read_uncommitted")]
    ReadUncommitted,
}

impl IsolationLevel {
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            IsolationLevel::ReadCommitted => vec![1],
            IsolationLevel::ReadUncommitted => vec![2],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.first() {
            Some(1) => Some(IsolationLevel::ReadCommitted),
            Some(2) => Some(IsolationLevel::ReadUncommitted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn isolation_byte_round_trip() {
        for level in [
            IsolationLevel::ReadCommitted,
            IsolationLevel::ReadUncommitted,
        ] {
            assert_eq!(IsolationLevel::from_bytes(&level.to_bytes()), Some(level));
        }
    }

    #[test]
    fn isolation_garbage_bytes() {
        assert_eq!(IsolationLevel::from_bytes(&[]), None);
        assert_eq!(IsolationLevel::from_bytes(&[99]), None);
    }
}
