//! Property row normalization.
//!
//! Property tables on the site use a dozen spellings for the same column
//! ("参数", "属性名", "Property", ...). Rows from tables classified as
//! properties are flattened into [`NormalizedPropertyRow`], with the original
//! cells always kept under `raw`.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::detail::RowRecord;
use crate::keywords::{PropField, REQUIRED_NO, REQUIRED_YES, contains_any};

/// One property row in canonical shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPropertyRow {
    /// The row exactly as extracted.
    pub raw: RowRecord,
    pub name: Option<String>,
    pub description: Option<String>,
    pub r#type: Option<String>,
    pub default: Option<String>,
    pub version: Option<String>,
    pub options: Option<String>,
    /// `Some` only when the cell carried a recognised yes/no token.
    pub required: Option<bool>,
    /// Columns with no canonical counterpart, label unchanged.
    pub extra: Vec<(String, String)>,
}

impl NormalizedPropertyRow {
    fn set(&mut self, label: &str, value: &str) {
        let value = value.to_string();
        match PropField::from_label(label) {
            Some(PropField::Name) => self.name = Some(value),
            Some(PropField::Description) => self.description = Some(value),
            Some(PropField::Type) => self.r#type = Some(value),
            Some(PropField::Default) => self.default = Some(value),
            Some(PropField::Version) => self.version = Some(value),
            Some(PropField::Options) => self.options = Some(value),
            Some(PropField::Required) => self.required = parse_required(&value),
            None if label == "raw" => {}
            None => match self.extra.iter_mut().find(|(key, _)| key == label) {
                Some(entry) => entry.1 = value,
                None => self.extra.push((label.to_string(), value)),
            },
        }
    }
}

impl Serialize for NormalizedPropertyRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("raw", &self.raw)?;

        let fields = [
            (PropField::Name, &self.name),
            (PropField::Description, &self.description),
            (PropField::Type, &self.r#type),
            (PropField::Default, &self.default),
            (PropField::Version, &self.version),
            (PropField::Options, &self.options),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                map.serialize_entry(field.key(), value)?;
            }
        }
        if let Some(required) = self.required {
            map.serialize_entry(PropField::Required.key(), &required)?;
        }
        for (label, value) in &self.extra {
            map.serialize_entry(label, value)?;
        }

        map.end()
    }
}

/// Reads the tri-state "required" flag from a cell.
///
/// The cell is lowercased before matching, so `True` and `FALSE` count like
/// `true` and `false`. Affirmative tokens win over negative ones; text with
/// neither yields `None` rather than `false`.
pub fn parse_required(cell: &str) -> Option<bool> {
    let cell = cell.to_lowercase();
    if contains_any(&cell, REQUIRED_YES) {
        Some(true)
    } else if contains_any(&cell, REQUIRED_NO) {
        Some(false)
    } else {
        None
    }
}

/// Normalizes one row of a properties table.
///
/// Mapping rows are walked label by label. Positional rows are zipped with the
/// header as far as both reach. After mapping, `name` keeps only its first
/// line, trimmed.
pub fn normalize_row(row: &RowRecord, header: &[String]) -> NormalizedPropertyRow {
    let mut normalized = NormalizedPropertyRow { raw: row.clone(), ..Default::default() };

    match row {
        RowRecord::Mapping(cells) => {
            for (label, value) in cells {
                normalized.set(label, value);
            }
        }
        RowRecord::Sequence(cells) => {
            for (label, value) in header.iter().zip(cells) {
                normalized.set(label, value);
            }
        }
    }

    if let Some(name) = normalized.name.as_mut()
        && !name.is_empty()
    {
        *name = name.lines().next().unwrap_or_default().trim().to_string();
    }

    normalized
}
