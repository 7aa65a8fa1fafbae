//! # Unit Records
//!
//! The two record shapes and the tagged variant that carries them.
//!
//! Wire names are the column names of the uploaded documents (`Unidade`,
//! `CPF/CNPJ`, `Proprietario_Email`, ...). The JSON form of [`UnitRecord`]
//! carries a `schema` tag so a record can never be read back as the other
//! shape.

use crate::primitives::{EXPANDED_HEADERS, FLAT_HEADERS};
use crate::{CondoError, RecordId, Schema};
use serde::{Deserialize, Serialize};

// =============================================================================
// FLAT UNIT
// =============================================================================

/// A unit with a single contact set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatUnit {
    pub id: RecordId,
    #[serde(rename = "Unidade", default)]
    pub unit: Option<String>,
    #[serde(rename = "Bloco", default)]
    pub block: Option<String>,
    #[serde(rename = "Nome", default)]
    pub name: Option<String>,
    #[serde(rename = "CPF/CNPJ", default)]
    pub tax_id: Option<String>,
    #[serde(rename = "Celular", default)]
    pub mobile: Option<String>,
    #[serde(rename = "Telefone", default)]
    pub landline: Option<String>,
    #[serde(rename = "E-mail", default)]
    pub email: Option<String>,
}

impl FlatUnit {
    /// Create a record with every field missing.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            unit: None,
            block: None,
            name: None,
            tax_id: None,
            mobile: None,
            landline: None,
            email: None,
        }
    }

    /// Field values in [`FLAT_HEADERS`] order.
    #[must_use]
    pub fn columns(&self) -> [Option<&str>; 7] {
        [
            self.unit.as_deref(),
            self.block.as_deref(),
            self.name.as_deref(),
            self.tax_id.as_deref(),
            self.mobile.as_deref(),
            self.landline.as_deref(),
            self.email.as_deref(),
        ]
    }

    fn slot_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            "Unidade" => Some(&mut self.unit),
            "Bloco" => Some(&mut self.block),
            "Nome" => Some(&mut self.name),
            "CPF/CNPJ" => Some(&mut self.tax_id),
            "Celular" => Some(&mut self.mobile),
            "Telefone" => Some(&mut self.landline),
            "E-mail" => Some(&mut self.email),
            _ => None,
        }
    }
}

// =============================================================================
// EXPANDED UNIT
// =============================================================================

/// A unit with owner and responsible-party contact sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedUnit {
    pub id: RecordId,
    #[serde(rename = "Unidade", default)]
    pub unit: Option<String>,
    #[serde(rename = "Bloco", default)]
    pub block: Option<String>,
    #[serde(rename = "Tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "Perfil", default)]
    pub profile: Option<String>,
    #[serde(rename = "Proprietario_Nome", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "Proprietario_CPF_CNPJ", default)]
    pub owner_tax_id: Option<String>,
    #[serde(rename = "Proprietario_Celular", default)]
    pub owner_mobile: Option<String>,
    #[serde(rename = "Proprietario_Telefone_fixo", default)]
    pub owner_landline: Option<String>,
    #[serde(rename = "Proprietario_Email", default)]
    pub owner_email: Option<String>,
    #[serde(rename = "Responsavel_Nome", default)]
    pub responsible_name: Option<String>,
    #[serde(rename = "Responsavel_CPF_CNPJ", default)]
    pub responsible_tax_id: Option<String>,
    #[serde(rename = "Responsavel_Celular", default)]
    pub responsible_mobile: Option<String>,
    #[serde(rename = "Responsavel_Telefone_fixo", default)]
    pub responsible_landline: Option<String>,
    #[serde(rename = "Responsavel_Email", default)]
    pub responsible_email: Option<String>,
}

impl ExpandedUnit {
    /// Create a record with every field missing.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            unit: None,
            block: None,
            kind: None,
            profile: None,
            owner_name: None,
            owner_tax_id: None,
            owner_mobile: None,
            owner_landline: None,
            owner_email: None,
            responsible_name: None,
            responsible_tax_id: None,
            responsible_mobile: None,
            responsible_landline: None,
            responsible_email: None,
        }
    }

    /// Field values in [`EXPANDED_HEADERS`] order.
    #[must_use]
    pub fn columns(&self) -> [Option<&str>; 14] {
        [
            self.unit.as_deref(),
            self.block.as_deref(),
            self.kind.as_deref(),
            self.profile.as_deref(),
            self.owner_name.as_deref(),
            self.owner_tax_id.as_deref(),
            self.owner_mobile.as_deref(),
            self.owner_landline.as_deref(),
            self.owner_email.as_deref(),
            self.responsible_name.as_deref(),
            self.responsible_tax_id.as_deref(),
            self.responsible_mobile.as_deref(),
            self.responsible_landline.as_deref(),
            self.responsible_email.as_deref(),
        ]
    }

    fn slot_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            "Unidade" => Some(&mut self.unit),
            "Bloco" => Some(&mut self.block),
            "Tipo" => Some(&mut self.kind),
            "Perfil" => Some(&mut self.profile),
            "Proprietario_Nome" => Some(&mut self.owner_name),
            "Proprietario_CPF_CNPJ" => Some(&mut self.owner_tax_id),
            "Proprietario_Celular" => Some(&mut self.owner_mobile),
            "Proprietario_Telefone_fixo" => Some(&mut self.owner_landline),
            "Proprietario_Email" => Some(&mut self.owner_email),
            "Responsavel_Nome" => Some(&mut self.responsible_name),
            "Responsavel_CPF_CNPJ" => Some(&mut self.responsible_tax_id),
            "Responsavel_Celular" => Some(&mut self.responsible_mobile),
            "Responsavel_Telefone_fixo" => Some(&mut self.responsible_landline),
            "Responsavel_Email" => Some(&mut self.responsible_email),
            _ => None,
        }
    }
}

// =============================================================================
// UNIT RECORD (tagged variant)
// =============================================================================

/// One row of condominium-unit data, in either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum UnitRecord {
    Flat(FlatUnit),
    Expanded(ExpandedUnit),
}

impl UnitRecord {
    /// The record's id.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        match self {
            UnitRecord::Flat(u) => &u.id,
            UnitRecord::Expanded(u) => &u.id,
        }
    }

    /// The record's shape.
    #[must_use]
    pub fn schema(&self) -> Schema {
        match self {
            UnitRecord::Flat(_) => Schema::Flat,
            UnitRecord::Expanded(_) => Schema::Expanded,
        }
    }

    /// Field values in the header order of the record's schema.
    #[must_use]
    pub fn columns(&self) -> Vec<Option<&str>> {
        match self {
            UnitRecord::Flat(u) => u.columns().to_vec(),
            UnitRecord::Expanded(u) => u.columns().to_vec(),
        }
    }

    /// Value of a column by its header name.
    ///
    /// Returns `None` both for a missing value and for a column the schema
    /// does not have.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        let position = headers(self.schema()).iter().position(|h| *h == column)?;
        self.columns().get(position).copied().flatten()
    }

    /// Set a column by its header name.
    ///
    /// The id is not a column and cannot be changed this way.
    pub fn set_field(&mut self, column: &str, value: impl Into<String>) -> Result<(), CondoError> {
        let schema = self.schema();
        let slot = match self {
            UnitRecord::Flat(u) => u.slot_mut(column),
            UnitRecord::Expanded(u) => u.slot_mut(column),
        };
        match slot {
            Some(slot) => {
                *slot = Some(value.into());
                Ok(())
            }
            None => Err(CondoError::UnknownField {
                schema,
                field: column.to_string(),
            }),
        }
    }
}

impl From<FlatUnit> for UnitRecord {
    fn from(unit: FlatUnit) -> Self {
        UnitRecord::Flat(unit)
    }
}

impl From<ExpandedUnit> for UnitRecord {
    fn from(unit: ExpandedUnit) -> Self {
        UnitRecord::Expanded(unit)
    }
}

/// Column headers of a schema, in display and export order.
#[must_use]
pub fn headers(schema: Schema) -> &'static [&'static str] {
    match schema {
        Schema::Flat => &FLAT_HEADERS,
        Schema::Expanded => &EXPANDED_HEADERS,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn joao() -> UnitRecord {
        FlatUnit {
            unit: Some("101".into()),
            block: Some("A".into()),
            name: Some("João Silva".into()),
            ..FlatUnit::new("1")
        }
        .into()
    }

    #[test]
    fn get_reads_by_header_name() {
        let record = joao();
        assert_eq!(record.get("Unidade"), Some("101"));
        assert_eq!(record.get("Nome"), Some("João Silva"));
        assert_eq!(record.get("E-mail"), None);
        assert_eq!(record.get("Proprietario_Nome"), None);
    }

    #[test]
    fn set_field_updates_known_column() {
        let mut record = joao();
        record
            .set_field("E-mail", "joao@x.com")
            .expect("known column");
        assert_eq!(record.get("E-mail"), Some("joao@x.com"));
    }

    #[test]
    fn set_field_rejects_other_schema_column() {
        let mut record = joao();
        let result = record.set_field("Proprietario_Email", "x@y.com");
        assert!(matches!(
            result,
            Err(CondoError::UnknownField {
                schema: Schema::Flat,
                ..
            })
        ));
    }

    #[test]
    fn id_is_not_a_column() {
        let mut record: UnitRecord = ExpandedUnit::new("9").into();
        assert!(record.set_field("id", "10").is_err());
        assert_eq!(record.id().as_str(), "9");
    }

    #[test]
    fn columns_match_header_count() {
        assert_eq!(joao().columns().len(), FLAT_HEADERS.len());
        let expanded: UnitRecord = ExpandedUnit::new("2").into();
        assert_eq!(expanded.columns().len(), EXPANDED_HEADERS.len());
    }

    #[test]
    fn json_carries_schema_tag_and_wire_names() {
        let json = serde_json::to_value(joao()).expect("serialize");
        assert_eq!(json["schema"], "flat");
        assert_eq!(json["Unidade"], "101");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn json_null_and_missing_are_equivalent() {
        let with_null = r#"{"schema":"flat","id":"3","Unidade":"103","Nome":null}"#;
        let record: UnitRecord = serde_json::from_str(with_null).expect("deserialize");
        assert_eq!(record.get("Nome"), None);
        assert_eq!(record.get("Bloco"), None);
    }
}
