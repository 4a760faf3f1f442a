/// Verdict of a filter for a single visited cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterDecision {
    /// Keep the cell in the result
    Include,

    /// Drop the cell
    Skip,
}

/// A server-side predicate applied while scanning
///
/// The descriptor treats filters as opaque: it only needs to know
/// whether the filter can work cell-by-cell or needs to see a whole
/// row before deciding. Filters are shared by reference when a scan
/// is copied, so implementations should be cheap to share.
pub trait Filter: std::fmt::Debug + Send + Sync {
    /// Decides whether a single cell should be part of the result
    fn apply(
        &self,
        row: &[u8],
        family: &[u8],
        qualifier: &[u8],
        timestamp: u128,
        value: &[u8],
    ) -> FilterDecision;

    /// Whether this filter needs to see all columns of a row before deciding
    ///
    /// Batching splits a row's columns across iteration steps, so a scan
    /// cannot combine batching with a whole-row filter.
    fn requires_whole_row(&self) -> bool {
        false
    }
}
