//! # Property-Based Tests
//!
//! Invariants of the classifier, the aggregation and the CSV exporter.

use condo_core::{
    ExpandedUnit, FlatUnit, Status, UnitRecord, classify, count_by_status, to_csv,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A field value that is never empty: no "", no "n/a" in any case.
fn filled() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .@()-]{1,20}".prop_filter("must not be n/a", |s| {
        !s.eq_ignore_ascii_case("n/a")
    })
}

/// A field value that may be missing, blank, "n/a" or arbitrary text.
fn any_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("N/A".to_string())),
        option::of("[^\"\n]{0,12}"),
    ]
}

fn flat_unit() -> impl Strategy<Value = FlatUnit> {
    (
        any_field(),
        any_field(),
        any_field(),
        any_field(),
        any_field(),
        any_field(),
        any_field(),
    )
        .prop_map(|(unit, block, name, tax_id, mobile, landline, email)| FlatUnit {
            unit,
            block,
            name,
            tax_id,
            mobile,
            landline,
            email,
            ..FlatUnit::new("0")
        })
}

fn flat_list() -> impl Strategy<Value = Vec<UnitRecord>> {
    vec(flat_unit(), 0..30).prop_map(|units| {
        units
            .into_iter()
            .enumerate()
            .map(|(i, mut u)| {
                u.id = (i + 1).to_string().into();
                UnitRecord::Flat(u)
            })
            .collect()
    })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Required fields present means never critical (flat).
    #[test]
    fn flat_required_present_is_never_critical(
        unit in filled(),
        name in filled(),
        tax_id in filled(),
        mobile in any_field(),
        email in any_field(),
    ) {
        let record: UnitRecord = FlatUnit {
            unit: Some(unit),
            name: Some(name),
            tax_id: Some(tax_id),
            mobile,
            email,
            ..FlatUnit::new("1")
        }
        .into();
        prop_assert_ne!(classify(&record), Status::Critical);
    }

    /// Required fields present means never critical (expanded).
    #[test]
    fn expanded_required_present_is_never_critical(
        unit in filled(),
        owner_name in filled(),
        owner_tax_id in filled(),
        owner_email in any_field(),
        owner_mobile in any_field(),
        owner_landline in any_field(),
    ) {
        let record: UnitRecord = ExpandedUnit {
            unit: Some(unit),
            owner_name: Some(owner_name),
            owner_tax_id: Some(owner_tax_id),
            owner_email,
            owner_mobile,
            owner_landline,
            ..ExpandedUnit::new("1")
        }
        .into();
        prop_assert_ne!(classify(&record), Status::Critical);
    }

    /// Exactly one owner channel present makes an expanded record complete.
    #[test]
    fn expanded_single_channel_is_complete(channel in 0usize..3, value in filled()) {
        let mut unit = ExpandedUnit {
            unit: Some("101".into()),
            owner_name: Some("Dona".into()),
            owner_tax_id: Some("1".into()),
            ..ExpandedUnit::new("1")
        };
        match channel {
            0 => unit.owner_email = Some(value),
            1 => unit.owner_mobile = Some(value),
            _ => unit.owner_landline = Some(value),
        }
        prop_assert_eq!(classify(&unit.into()), Status::Complete);
    }

    /// Counts always sum to the list length.
    #[test]
    fn counts_cover_every_record(records in flat_list()) {
        let counts = count_by_status(&records);
        prop_assert_eq!(counts.total(), records.len());
        prop_assert_eq!(
            counts.can_submit(),
            !records.is_empty() && records.iter().all(|r| classify(r) != Status::Critical)
        );
    }

    /// Export is deterministic and has one line per record plus the header.
    #[test]
    fn csv_is_idempotent_and_line_counted(records in flat_list()) {
        let first = to_csv(&records);
        let second = to_csv(&records);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.split('\n').count(), records.len() + 1);
        prop_assert!(!first.ends_with('\n'));
    }
}
