use rangescan::{Error, ScanSpec, TimeRange};
use test_log::test;

#[test]
fn timestamp_sugar_equals_single_range() -> rangescan::Result<()> {
    for t in [0u128, 1, 42, 1_700_000_000_000_000_000] {
        let sugar = ScanSpec::new().at_timestamp(t);
        let explicit = ScanSpec::new().with_time_range(t, t + 1)?;

        assert_eq!(sugar.time_range(), explicit.time_range());
    }

    Ok(())
}

#[test]
fn inverted_range_fails() {
    let result = ScanSpec::new().with_time_range(5, 3);

    assert!(matches!(
        result,
        Err(Error::InvalidTimeRange { min: 5, max: 3 })
    ));
}

#[test]
fn empty_range_is_allowed() -> rangescan::Result<()> {
    let scan = ScanSpec::new().with_time_range(5, 5)?;

    assert!(!scan.time_range().contains(5));

    Ok(())
}

#[test]
fn default_range_covers_all_time() {
    let scan = ScanSpec::new();

    assert!(scan.time_range().is_all_time());
    assert_eq!(scan.time_range(), &TimeRange::default());
}

#[test]
fn range_bounds_are_half_open() -> rangescan::Result<()> {
    let scan = ScanSpec::new().with_time_range(10, 20)?;

    assert!(scan.time_range().contains(10));
    assert!(scan.time_range().contains(19));
    assert!(!scan.time_range().contains(20));
    assert!(!scan.time_range().contains(9));

    Ok(())
}
