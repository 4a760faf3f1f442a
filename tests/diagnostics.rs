use rangescan::{Filter, FilterDecision, ScanSpec};
use serde_json::{json, Value};
use std::sync::Arc;
use test_log::test;

#[derive(Debug)]
struct AcceptAll;

impl Filter for AcceptAll {
    fn apply(&self, _: &[u8], _: &[u8], _: &[u8], _: u128, _: &[u8]) -> FilterDecision {
        FilterDecision::Include
    }
}

#[test]
fn fingerprint_all_families() {
    let scan = ScanSpec::new();

    assert_eq!(
        Value::Object(scan.fingerprint()),
        json!({ "families": "ALL" })
    );
}

#[test]
fn fingerprint_lists_families_in_byte_order() {
    let scan = ScanSpec::new()
        .select_family("z")
        .select_column("a", "q")
        .select_family("m");

    assert_eq!(
        Value::Object(scan.fingerprint()),
        json!({ "families": ["a", "m", "z"] })
    );
}

#[test]
fn describe_full_scan() -> rangescan::Result<()> {
    let scan = ScanSpec::between("a", "z")
        .select_column("cf", "q")
        .with_time_range(10, 20)?
        .with_versions(2)
        .with_batch(5)?
        .with_caching_rows(100)
        .with_max_result_size(4096)
        .with_cache_blocks(false)
        .with_filter(Arc::new(AcceptAll))
        .with_id("audit-scan");

    assert_eq!(
        Value::Object(scan.describe(10)),
        json!({
            "families": { "cf": ["q"] },
            "startRow": "a",
            "stopRow": "z",
            "maxVersions": 2,
            "batch": 5,
            "caching": 100,
            "maxResultSize": 4096,
            "cacheBlocks": false,
            "timeRange": ["10", "20"],
            "totalColumns": 1,
            "filter": "AcceptAll",
            "id": "audit-scan",
        })
    );

    Ok(())
}

#[test]
fn describe_defaults() {
    let scan = ScanSpec::new();

    assert_eq!(
        Value::Object(scan.describe(10)),
        json!({
            "families": {},
            "startRow": "",
            "stopRow": "",
            "maxVersions": 1,
            "batch": null,
            "caching": null,
            "maxResultSize": null,
            "cacheBlocks": true,
            "timeRange": ["0", u128::MAX.to_string()],
            "totalColumns": 0,
        })
    );
}

#[test]
fn describe_caps_columns_globally() {
    let scan = ScanSpec::new()
        .select_family("a")
        .select_column("b", "x")
        .select_column("b", "y")
        .select_column("b", "z");

    let map = scan.describe(2);

    // The true count is always reported
    assert_eq!(map.get("totalColumns"), Some(&json!(4)));

    // One budget slot for the ALL marker, one for the first qualifier
    assert_eq!(
        map.get("families"),
        Some(&json!({ "a": ["ALL"], "b": ["x"] }))
    );
}

#[test]
fn describe_zero_budget_lists_nothing() {
    let scan = ScanSpec::new().select_family("a").select_column("b", "x");

    let map = scan.describe(0);

    assert_eq!(map.get("totalColumns"), Some(&json!(2)));
    assert_eq!(map.get("families"), Some(&json!({ "a": [], "b": [] })));
}

#[test]
fn describe_escapes_binary_keys() {
    let scan = ScanSpec::new().with_start_row(vec![0x00, 0xff]);

    let map = scan.describe(10);

    assert_eq!(map.get("startRow"), Some(&json!("\\x00\\xFF")));
}
