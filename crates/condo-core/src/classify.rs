//! # Row Classifier
//!
//! Decides whether a record is `critical`, `incomplete` or `complete`.
//!
//! Each schema keeps its own completeness policy:
//!
//! | Schema | Critical when empty | Incomplete when |
//! |--------|---------------------|-----------------|
//! | Flat | unit, name, tax id | mobile OR email empty |
//! | Expanded | unit, owner name, owner tax id | owner email, mobile AND landline all empty |
//!
//! Classification is pure and total: every record gets a status.

use crate::field::{all_empty, any_empty};
use crate::{ExpandedUnit, FlatUnit, Status, UnitRecord};

/// Anything that can be given a completeness status.
pub trait Classify {
    /// Classify this record.
    fn status(&self) -> Status;
}

impl Classify for FlatUnit {
    fn status(&self) -> Status {
        let required = [
            self.unit.as_deref(),
            self.name.as_deref(),
            self.tax_id.as_deref(),
        ];
        if any_empty(&required) {
            return Status::Critical;
        }

        // Both channels are required for the flat shape.
        let contact = [self.mobile.as_deref(), self.email.as_deref()];
        if any_empty(&contact) {
            return Status::Incomplete;
        }

        Status::Complete
    }
}

impl Classify for ExpandedUnit {
    fn status(&self) -> Status {
        let required = [
            self.unit.as_deref(),
            self.owner_name.as_deref(),
            self.owner_tax_id.as_deref(),
        ];
        if any_empty(&required) {
            return Status::Critical;
        }

        // One owner channel is enough for the expanded shape.
        let contact = [
            self.owner_email.as_deref(),
            self.owner_mobile.as_deref(),
            self.owner_landline.as_deref(),
        ];
        if all_empty(&contact) {
            return Status::Incomplete;
        }

        Status::Complete
    }
}

impl Classify for UnitRecord {
    fn status(&self) -> Status {
        match self {
            UnitRecord::Flat(unit) => unit.status(),
            UnitRecord::Expanded(unit) => unit.status(),
        }
    }
}

/// Classify a single record.
#[must_use]
pub fn classify(record: &UnitRecord) -> Status {
    record.status()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_flat() -> FlatUnit {
        FlatUnit {
            unit: Some("101".into()),
            block: Some("A".into()),
            name: Some("João Silva".into()),
            tax_id: Some("123.456.789-00".into()),
            mobile: Some("(11) 99999-1111".into()),
            landline: Some(String::new()),
            email: Some("joao@x.com".into()),
            ..FlatUnit::new("1")
        }
    }

    fn complete_expanded() -> ExpandedUnit {
        ExpandedUnit {
            unit: Some("201".into()),
            owner_name: Some("Ana Lima".into()),
            owner_tax_id: Some("555.666.777-88".into()),
            owner_email: Some("ana@x.com".into()),
            ..ExpandedUnit::new("2")
        }
    }

    #[test]
    fn flat_complete() {
        assert_eq!(complete_flat().status(), Status::Complete);
    }

    #[test]
    fn flat_missing_tax_id_is_critical() {
        let unit = FlatUnit {
            tax_id: Some(String::new()),
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Critical);
    }

    #[test]
    fn flat_missing_unit_is_critical_even_without_contacts() {
        let unit = FlatUnit {
            unit: None,
            mobile: None,
            email: None,
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Critical);
    }

    #[test]
    fn flat_mobile_without_email_is_incomplete() {
        let unit = FlatUnit {
            email: None,
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Incomplete);
    }

    #[test]
    fn flat_email_without_mobile_is_incomplete() {
        let unit = FlatUnit {
            mobile: Some("N/A".into()),
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Incomplete);
    }

    #[test]
    fn flat_landline_does_not_count() {
        let unit = FlatUnit {
            mobile: None,
            email: None,
            landline: Some("(11) 3333-1111".into()),
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Incomplete);
    }

    #[test]
    fn flat_name_na_is_critical() {
        let unit = FlatUnit {
            name: Some("n/a".into()),
            ..complete_flat()
        };
        assert_eq!(unit.status(), Status::Critical);
    }

    #[test]
    fn expanded_complete_with_one_channel() {
        assert_eq!(complete_expanded().status(), Status::Complete);

        let landline_only = ExpandedUnit {
            owner_email: None,
            owner_landline: Some("(11) 3333-4444".into()),
            ..complete_expanded()
        };
        assert_eq!(landline_only.status(), Status::Complete);
    }

    #[test]
    fn expanded_no_channel_is_incomplete() {
        let unit = ExpandedUnit {
            owner_email: Some("N/A".into()),
            owner_mobile: Some(String::new()),
            owner_landline: None,
            ..complete_expanded()
        };
        assert_eq!(unit.status(), Status::Incomplete);
    }

    #[test]
    fn expanded_responsible_contacts_do_not_count() {
        let unit = ExpandedUnit {
            owner_email: None,
            responsible_email: Some("resp@x.com".into()),
            responsible_mobile: Some("(11) 98888-0000".into()),
            ..complete_expanded()
        };
        assert_eq!(unit.status(), Status::Incomplete);
    }

    #[test]
    fn expanded_missing_owner_tax_id_is_critical() {
        let unit = ExpandedUnit {
            owner_tax_id: Some("n/A".into()),
            ..complete_expanded()
        };
        assert_eq!(unit.status(), Status::Critical);
    }

    #[test]
    fn classify_dispatches_by_tag() {
        assert_eq!(classify(&complete_flat().into()), Status::Complete);
        let empty: UnitRecord = ExpandedUnit::new("9").into();
        assert_eq!(classify(&empty), Status::Critical);
    }
}
