use crate::{binary::to_string_binary, Filter, IsolationLevel, TimeRange, WireVersion};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const RAW_ATTR: &str = "_raw_";
const ISOLATION_LEVEL_ATTR: &str = "_isolationlevel_";
const ID_ATTR: &str = "_operation.attributes.id";

/// Reserved attribute a client sets to ask the server to collect scan metrics
pub const METRICS_ENABLE_ATTR: &str = "scan.attributes.metrics.enable";

/// Reserved attribute under which collected scan metrics travel back
pub const METRICS_DATA_ATTR: &str = "scan.attributes.metrics.data";

/// Which qualifiers of which column families a scan should return
///
/// Keyed by family id in byte order. A `None` value means all qualifiers
/// of that family, a set means only the named qualifiers.
pub type FamilySelection = BTreeMap<Vec<u8>, Option<BTreeSet<Vec<u8>>>>;

pub(crate) fn install_family(selection: &mut FamilySelection, family: Vec<u8>) {
    selection.insert(family, None);
}

pub(crate) fn install_column(
    selection: &mut FamilySelection,
    family: Vec<u8>,
    qualifier: Option<Vec<u8>>,
) {
    let mut set = selection.remove(&family).flatten().unwrap_or_default();

    if let Some(qualifier) = qualifier {
        set.insert(qualifier);
    }

    selection.insert(family, Some(set));
}

/// Describes a range scan over a sorted, column-family key-value store
///
/// A fresh `ScanSpec` scans every row, every family, 1 version per cell,
/// across all time. Narrow it down with the fluent setters, then hand it
/// to the execution layer; it is a plain value with no I/O of its own.
///
/// Row bounds are byte-lexicographic, start inclusive, stop exclusive;
/// an empty bound means unbounded. To flip a bound's in/exclusivity,
/// append a trailing zero byte to the row key (this is a convention the
/// descriptor does not validate).
pub struct ScanSpec {
    pub(crate) start_row: Vec<u8>,
    pub(crate) stop_row: Vec<u8>,
    pub(crate) max_versions: u32,
    pub(crate) batch: Option<u32>,
    pub(crate) per_family_limit: Option<u32>,
    pub(crate) per_family_offset: u32,
    pub(crate) caching_rows: Option<u32>,
    pub(crate) max_result_size: Option<u64>,
    pub(crate) cache_blocks: bool,
    pub(crate) filter: Option<Arc<dyn Filter>>,
    pub(crate) time_range: TimeRange,
    pub(crate) family_selection: FamilySelection,
    pub(crate) attributes: BTreeMap<String, Vec<u8>>,
}

impl Default for ScanSpec {
    fn default() -> Self {
        Self {
            start_row: Vec::new(),
            stop_row: Vec::new(),
            max_versions: 1,
            batch: None,
            per_family_limit: None,
            per_family_offset: 0,
            caching_rows: None,
            max_result_size: None,
            cache_blocks: true,
            filter: None,
            time_range: TimeRange::default(),
            family_selection: FamilySelection::new(),
            attributes: BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for ScanSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScanSpec[{}..{}]",
            to_string_binary(&self.start_row),
            to_string_binary(&self.stop_row)
        )
    }
}

/// Copies a scan
///
/// Row bounds, scalar options and the time range are copied by value.
/// Family/qualifier sets and attributes are rebuilt entry by entry, so
/// the copy's selection can be mutated independently. The filter is
/// shared by reference: mutating shared filter state affects both
/// descriptors.
impl Clone for ScanSpec {
    fn clone(&self) -> Self {
        let mut copy = Self {
            start_row: self.start_row.clone(),
            stop_row: self.stop_row.clone(),
            max_versions: self.max_versions,
            batch: self.batch,
            per_family_limit: self.per_family_limit,
            per_family_offset: self.per_family_offset,
            caching_rows: self.caching_rows,
            max_result_size: self.max_result_size,
            cache_blocks: self.cache_blocks,
            filter: self.filter.clone(),
            time_range: self.time_range,
            family_selection: FamilySelection::new(),
            attributes: BTreeMap::new(),
        };

        for (family, qualifiers) in &self.family_selection {
            match qualifiers {
                Some(set) if !set.is_empty() => {
                    for qualifier in set {
                        install_column(
                            &mut copy.family_selection,
                            family.clone(),
                            Some(qualifier.clone()),
                        );
                    }
                }
                _ => install_family(&mut copy.family_selection, family.clone()),
            }
        }

        for (key, value) in &self.attributes {
            copy.attributes.insert(key.clone(), value.clone());
        }

        copy
    }
}

impl ScanSpec {
    /// Creates a scan across all rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scan starting at the given row (inclusive)
    ///
    /// If the row does not exist, the scan starts at the next closest
    /// row after it.
    pub fn starting_at(start_row: impl Into<Vec<u8>>) -> Self {
        Self {
            start_row: start_row.into(),
            ..Self::default()
        }
    }

    /// Creates a scan over `start_row <= row < stop_row`
    pub fn between(start_row: impl Into<Vec<u8>>, stop_row: impl Into<Vec<u8>>) -> Self {
        Self {
            start_row: start_row.into(),
            stop_row: stop_row.into(),
            ..Self::default()
        }
    }

    /// Creates a scan starting at the given row with a server-side filter
    pub fn filtered(start_row: impl Into<Vec<u8>>, filter: Arc<dyn Filter>) -> Self {
        Self {
            start_row: start_row.into(),
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Whether this scan addresses exactly one row
    ///
    /// True when the start row is non-empty and byte-equal to the stop
    /// row. The execution layer may serve such a scan as a direct row
    /// fetch instead of a range scan.
    pub fn is_point_lookup(&self) -> bool {
        !self.start_row.is_empty() && self.start_row == self.stop_row
    }

    // --- row range ---

    pub fn with_start_row(mut self, start_row: impl Into<Vec<u8>>) -> Self {
        self.start_row = start_row.into();
        self
    }

    pub fn with_stop_row(mut self, stop_row: impl Into<Vec<u8>>) -> Self {
        self.stop_row = stop_row.into();
        self
    }

    pub fn start_row(&self) -> &[u8] {
        &self.start_row
    }

    pub fn stop_row(&self) -> &[u8] {
        &self.stop_row
    }

    // --- family selection ---

    /// Selects all qualifiers of the given family
    ///
    /// Overrides previous `select_column` calls for this family.
    pub fn select_family(mut self, family: impl Into<Vec<u8>>) -> Self {
        install_family(&mut self.family_selection, family.into());
        self
    }

    /// Selects a single qualifier of the given family
    ///
    /// Narrows a previous `select_family` call for this family down to
    /// the named qualifiers.
    pub fn select_column<F, Q>(mut self, family: F, qualifier: Q) -> Self
    where
        F: Into<Vec<u8>>,
        Q: Into<Vec<u8>>,
    {
        install_column(
            &mut self.family_selection,
            family.into(),
            Some(qualifier.into()),
        );
        self
    }

    /// Selects several qualifiers of the given family at once
    ///
    /// An empty iterator adds nothing but still establishes the family
    /// entry, keeping whatever qualifier set existed.
    pub fn select_columns<F, I>(mut self, family: F, qualifiers: I) -> Self
    where
        F: Into<Vec<u8>>,
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        let family = family.into();
        let mut qualifiers = qualifiers.into_iter().peekable();

        if qualifiers.peek().is_none() {
            install_column(&mut self.family_selection, family, None);
            return self;
        }

        for qualifier in qualifiers {
            install_column(&mut self.family_selection, family.clone(), Some(qualifier.into()));
        }

        self
    }

    /// Replaces the whole family selection, e.g. when lifting a point lookup
    pub fn with_family_selection(mut self, selection: FamilySelection) -> Self {
        self.family_selection = selection;
        self
    }

    pub fn family_selection(&self) -> &FamilySelection {
        &self.family_selection
    }

    pub fn num_families(&self) -> usize {
        self.family_selection.len()
    }

    pub fn has_families(&self) -> bool {
        !self.family_selection.is_empty()
    }

    /// The selected family ids, or `None` when no selection is set
    /// (meaning all families)
    pub fn families(&self) -> Option<Vec<&[u8]>> {
        if self.family_selection.is_empty() {
            return None;
        }

        Some(self.family_selection.keys().map(|f| f.as_slice()).collect())
    }

    // --- time & versions ---

    /// Restricts the scan to cell versions within `[min, max)`
    ///
    /// Note, the default version cap is 1; raise it if the window spans
    /// more than one version and all of them should be returned.
    pub fn with_time_range(mut self, min: u128, max: u128) -> crate::Result<Self> {
        self.time_range = TimeRange::new(min, max)?;
        Ok(self)
    }

    /// Restricts the scan to cell versions with exactly the given timestamp
    pub fn at_timestamp(mut self, timestamp: u128) -> Self {
        self.time_range = TimeRange::at(timestamp);
        self
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    /// Returns all available versions of each cell
    pub fn with_all_versions(mut self) -> Self {
        self.max_versions = u32::MAX;
        self
    }

    /// Returns up to `n` versions of each cell
    pub fn with_versions(mut self, n: u32) -> Self {
        self.max_versions = n;
        self
    }

    pub fn max_versions(&self) -> u32 {
        self.max_versions
    }

    // --- pagination & sizing ---

    /// Caps the number of values returned per iteration step
    ///
    /// Fails if the attached filter needs whole-row visibility, because
    /// batching may split a row's columns across iteration steps.
    pub fn with_batch(mut self, n: u32) -> crate::Result<Self> {
        if let Some(filter) = &self.filter {
            if filter.requires_whole_row() {
                return Err(crate::Error::IncompatibleFilter);
            }
        }

        self.batch = Some(n);
        Ok(self)
    }

    pub fn batch(&self) -> Option<u32> {
        self.batch
    }

    /// Caps the number of matched cells returned per row per family
    pub fn with_per_family_limit(mut self, n: u32) -> Self {
        self.per_family_limit = Some(n);
        self
    }

    pub fn per_family_limit(&self) -> Option<u32> {
        self.per_family_limit
    }

    /// Skips the first `n` matched cells per row per family
    pub fn with_per_family_offset(mut self, n: u32) -> Self {
        self.per_family_offset = n;
        self
    }

    pub fn per_family_offset(&self) -> u32 {
        self.per_family_offset
    }

    /// Advises how many rows to prefetch per round-trip
    ///
    /// When unset, the host-level default applies. Higher values make
    /// scanning faster at the cost of memory.
    pub fn with_caching_rows(mut self, n: u32) -> Self {
        self.caching_rows = Some(n);
        self
    }

    pub fn caching_rows(&self) -> Option<u32> {
        self.caching_rows
    }

    /// Caps the number of result bytes per round-trip
    ///
    /// Combined with the row prefetch hint, whichever limit is hit
    /// first ends that round-trip.
    pub fn with_max_result_size(mut self, bytes: u64) -> Self {
        self.max_result_size = Some(bytes);
        self
    }

    pub fn max_result_size(&self) -> Option<u64> {
        self.max_result_size
    }

    /// Whether the storage layer should populate its block cache while
    /// serving this scan (true by default)
    pub fn with_cache_blocks(mut self, cache_blocks: bool) -> Self {
        self.cache_blocks = cache_blocks;
        self
    }

    pub fn cache_blocks(&self) -> bool {
        self.cache_blocks
    }

    // --- filter ---

    /// Attaches a server-side filter
    pub fn with_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn filter(&self) -> Option<&Arc<dyn Filter>> {
        self.filter.as_ref()
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    // --- attributes ---

    /// Sets an attribute; an empty value removes the key
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let key = key.into();
        let value = value.into();

        if value.is_empty() {
            self.attributes.remove(&key);
        } else {
            self.attributes.insert(key, value);
        }

        self
    }

    pub fn attribute(&self, key: &str) -> Option<&[u8]> {
        self.attributes.get(key).map(|v| v.as_slice())
    }

    pub fn attributes(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.attributes
    }

    /// Enables/disables raw mode
    ///
    /// A raw scan also returns delete markers and deleted rows that
    /// have not been reclaimed yet. Only meaningful against families
    /// that retain deleted data.
    pub fn with_raw(self, raw: bool) -> Self {
        self.with_attribute(RAW_ATTR, vec![raw as u8])
    }

    pub fn is_raw(&self) -> bool {
        self.attribute(RAW_ATTR)
            .is_some_and(|bytes| bytes.first() == Some(&1))
    }

    /// Sets the visibility of concurrently-written data for this scan
    pub fn with_isolation_level(self, level: IsolationLevel) -> Self {
        self.with_attribute(ISOLATION_LEVEL_ATTR, level.to_bytes())
    }

    /// The isolation level, read-committed when none was set
    pub fn isolation_level(&self) -> IsolationLevel {
        self.attribute(ISOLATION_LEVEL_ATTR)
            .and_then(IsolationLevel::from_bytes)
            .unwrap_or_default()
    }

    /// Tags this scan with a caller-supplied id, surfaced by `describe`
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute(ID_ATTR, id.into().into_bytes())
    }

    pub fn id(&self) -> Option<String> {
        self.attribute(ID_ATTR)
            .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
    }

    // --- wire version ---

    /// The most backward-compatible wire version able to carry this scan
    ///
    /// Evaluated in fixed priority order; each version implies the
    /// capabilities of the versions below it.
    pub fn wire_version(&self) -> WireVersion {
        let version = if self.per_family_limit.is_some() || self.per_family_offset != 0 {
            WireVersion::Pagination
        } else if self.max_result_size.is_some() {
            WireVersion::ResultSize
        } else if !self.attributes.is_empty() {
            WireVersion::Attributes
        } else {
            WireVersion::Base
        };

        log::trace!("{self:?} fits wire version {}", version.tag());

        version
    }

    // --- diagnostics ---

    /// Compiles the scan's schema information (which families it touches)
    /// into a small map for log aggregation by shape
    pub fn fingerprint(&self) -> Map<String, Value> {
        let mut map = Map::new();

        if self.family_selection.is_empty() {
            map.insert("families".into(), json!("ALL"));
        } else {
            let families = self
                .family_selection
                .keys()
                .map(|family| to_string_binary(family))
                .collect::<Vec<_>>();

            map.insert("families".into(), json!(families));
        }

        map
    }

    /// Compiles the full scan state into a map for debugging and admin
    /// tooling
    ///
    /// At most `max_cols` qualifiers are listed across all families
    /// combined; a family selecting all qualifiers contributes one
    /// synthetic `"ALL"` entry against that budget. `totalColumns`
    /// always reports the true count, even when the listing is
    /// truncated. Best-effort output, not stable across versions.
    pub fn describe(&self, max_cols: usize) -> Map<String, Value> {
        let mut map = self.fingerprint();

        map.insert(
            "startRow".into(),
            json!(to_string_binary(&self.start_row)),
        );
        map.insert("stopRow".into(), json!(to_string_binary(&self.stop_row)));
        map.insert("maxVersions".into(), json!(self.max_versions));
        map.insert("batch".into(), json!(self.batch));
        map.insert("caching".into(), json!(self.caching_rows));
        map.insert("maxResultSize".into(), json!(self.max_result_size));
        map.insert("cacheBlocks".into(), json!(self.cache_blocks));

        // NOTE: u128 timestamps do not fit a JSON number
        map.insert(
            "timeRange".into(),
            json!([
                self.time_range.min().to_string(),
                self.time_range.max().to_string()
            ]),
        );

        // The per-family qualifier listing replaces the fingerprint's
        // flat family list
        let mut family_columns = Map::new();
        let mut total_columns: u64 = 0;
        let mut budget = max_cols;

        for (family, qualifiers) in &self.family_selection {
            let mut columns = Vec::new();

            match qualifiers {
                None => {
                    total_columns += 1;

                    if budget > 0 {
                        columns.push("ALL".to_owned());
                        budget -= 1;
                    }
                }
                Some(set) => {
                    total_columns += set.len() as u64;

                    for qualifier in set {
                        if budget == 0 {
                            break;
                        }

                        columns.push(to_string_binary(qualifier));
                        budget -= 1;
                    }
                }
            }

            family_columns.insert(to_string_binary(family), json!(columns));
        }

        map.insert("families".into(), Value::Object(family_columns));
        map.insert("totalColumns".into(), json!(total_columns));

        if let Some(filter) = &self.filter {
            map.insert("filter".into(), json!(format!("{filter:?}")));
        }

        if let Some(id) = self.id() {
            map.insert("id".into(), json!(id));
        }

        map
    }
}
