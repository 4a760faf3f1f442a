use crate::scan::{install_column, install_family};
use crate::{FamilySelection, Filter, ScanSpec, TimeRange};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single-row read request
///
/// The same shape as [`ScanSpec`] restricted to one row. Lifting it
/// into a scan (`ScanSpec::from`) makes the row both start and stop
/// bound, so the result satisfies `is_point_lookup()`.
#[derive(Clone, Debug)]
pub struct PointLookupSpec {
    pub row: Vec<u8>,
    pub filter: Option<Arc<dyn Filter>>,
    pub cache_blocks: bool,
    pub max_versions: u32,
    pub per_family_limit: Option<u32>,
    pub per_family_offset: u32,
    pub time_range: TimeRange,
    pub family_selection: FamilySelection,
}

impl PointLookupSpec {
    /// Creates a lookup returning the whole row, 1 version per cell
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            filter: None,
            cache_blocks: true,
            max_versions: 1,
            per_family_limit: None,
            per_family_offset: 0,
            time_range: TimeRange::default(),
            family_selection: FamilySelection::new(),
        }
    }

    /// Selects all qualifiers of the given family, overriding previous
    /// `select_column` calls for it
    pub fn select_family(mut self, family: impl Into<Vec<u8>>) -> Self {
        install_family(&mut self.family_selection, family.into());
        self
    }

    /// Selects a single qualifier of the given family, narrowing a
    /// previous `select_family` call for it
    pub fn select_column(
        mut self,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
    ) -> Self {
        install_column(
            &mut self.family_selection,
            family.into(),
            Some(qualifier.into()),
        );
        self
    }

    pub fn with_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_versions(mut self, n: u32) -> Self {
        self.max_versions = n;
        self
    }
}

/// Lifts a point lookup into the degenerate scan over exactly its row
///
/// The family selection is moved over wholesale and the filter is
/// carried by reference; everything else is copied by value.
impl From<PointLookupSpec> for ScanSpec {
    fn from(lookup: PointLookupSpec) -> Self {
        Self {
            start_row: lookup.row.clone(),
            stop_row: lookup.row,
            max_versions: lookup.max_versions,
            batch: None,
            per_family_limit: lookup.per_family_limit,
            per_family_offset: lookup.per_family_offset,
            caching_rows: None,
            max_result_size: None,
            cache_blocks: lookup.cache_blocks,
            filter: lookup.filter,
            time_range: lookup.time_range,
            family_selection: lookup.family_selection,
            attributes: BTreeMap::new(),
        }
    }
}
