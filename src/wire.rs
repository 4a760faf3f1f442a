use serde::{Deserialize, Serialize};

/// Protocol version tag a serialized scan needs at minimum
///
/// Each version implies all capabilities of the versions below it.
/// The descriptor computes the smallest tag whose feature set covers
/// the fields actually in use, so a scan that leaves newer options
/// untouched still serializes in a form older peers can parse. The
/// codec layer must serialize the fields present at that level and
/// omit higher-level fields when talking to an older peer.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireVersion {
    /// Row range, family selection, time range, versions, batch, filter
    #[serde(rename = "base")]
    Base = 1,

    /// Adds the attribute bag
    #[serde(rename = "attributes")]
    Attributes = 2,

    /// Adds the per-round-trip result size cap
    #[serde(rename = "result_size")]
    ResultSize = 3,

    /// Adds per-family cell limit and offset
    #[serde(rename = "pagination")]
    Pagination = 4,
}

impl WireVersion {
    /// The numeric tag written on the wire
    pub fn tag(self) -> u8 {
        self as u8
    }
}
