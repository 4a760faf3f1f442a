mod binary;
mod error;
mod filter;
mod isolation;
mod point_lookup;
mod scan;
mod time_range;
mod wire;

pub use {
    error::{Error, Result},
    filter::{Filter, FilterDecision},
    isolation::IsolationLevel,
    point_lookup::PointLookupSpec,
    scan::{FamilySelection, ScanSpec, METRICS_DATA_ATTR, METRICS_ENABLE_ATTR},
    time_range::TimeRange,
    wire::WireVersion,
};
