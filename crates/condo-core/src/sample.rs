//! # Sample Data
//!
//! The demonstration data set shown when the document parser cannot be
//! reached. Under the flat rules it holds two complete rows, two
//! incomplete and one critical.

use crate::{ExpandedUnit, FlatUnit, Schema, UnitRecord};

/// (unit, block, kind, name, tax id, mobile, landline, email)
type SampleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_ROWS: [SampleRow; 5] = [
    (
        "101",
        "A",
        "Apto",
        "João Silva Santos",
        "123.456.789-00",
        "(11) 99999-1111",
        "(11) 3333-1111",
        "joao.silva@email.com",
    ),
    (
        "102",
        "A",
        "Apto",
        "Maria Oliveira",
        "987.654.321-00",
        "",
        "(11) 3333-2222",
        "maria.oliveira@email.com",
    ),
    (
        "103",
        "A",
        "Apto",
        "Pedro Costa",
        "",
        "(11) 99999-3333",
        "",
        "",
    ),
    (
        "201",
        "B",
        "Apto",
        "Ana Rodrigues Lima",
        "555.666.777-88",
        "(11) 99999-4444",
        "(11) 3333-4444",
        "ana.rodrigues@email.com",
    ),
    (
        "202",
        "B",
        "Garagem",
        "Carlos Mendes",
        "111.222.333-44",
        "(11) 99999-5555",
        "",
        "",
    ),
];

const OWNER_PROFILE: &str = "Proprietário";

/// The sample data set in the requested schema.
#[must_use]
pub fn sample_units(schema: Schema) -> Vec<UnitRecord> {
    SAMPLE_ROWS
        .iter()
        .enumerate()
        .map(|(index, row)| sample_record(schema, index, row))
        .collect()
}

fn sample_record(schema: Schema, index: usize, row: &SampleRow) -> UnitRecord {
    let (unit, block, kind, name, tax_id, mobile, landline, email) = *row;
    let id = crate::RecordId::positional(index);
    match schema {
        Schema::Flat => FlatUnit {
            unit: Some(unit.into()),
            block: Some(block.into()),
            name: Some(name.into()),
            tax_id: Some(tax_id.into()),
            mobile: Some(mobile.into()),
            landline: Some(landline.into()),
            email: Some(email.into()),
            ..FlatUnit::new(id)
        }
        .into(),
        Schema::Expanded => ExpandedUnit {
            unit: Some(unit.into()),
            block: Some(block.into()),
            kind: Some(kind.into()),
            profile: Some(OWNER_PROFILE.into()),
            owner_name: Some(name.into()),
            owner_tax_id: Some(tax_id.into()),
            owner_mobile: Some(mobile.into()),
            owner_landline: Some(landline.into()),
            owner_email: Some(email.into()),
            ..ExpandedUnit::new(id)
        }
        .into(),
    }
}
