//! Bulk CSV interchange for users, rooms and bookings.

pub mod export;
pub mod import;

pub use export::export_csv;
pub use import::{import_csv, ImportOptions, ImportReport};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::validation::clean_field;

/// Table a CSV document is read into or written from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Users,
    Rooms,
    Bookings,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Users => "users",
            Entity::Rooms => "rooms",
            Entity::Bookings => "bookings",
        }
    }

    /// Accepted header spellings (lowercase) and the canonical field each maps to
    fn synonyms(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Entity::Users => &[
                ("name", "name"),
                ("first_name", "name"),
                ("full_name", "name"),
                ("email", "email"),
                ("e-mail", "email"),
                ("phone", "phone"),
                ("telephone", "phone"),
            ],
            Entity::Rooms => &[
                ("name", "name"),
                ("capacity", "capacity"),
                ("cap", "capacity"),
                ("price", "price"),
                ("cost", "price"),
            ],
            Entity::Bookings => &[
                ("user_id", "user_id"),
                ("room_id", "room_id"),
                ("checkin_date", "checkin_date"),
                ("nights", "nights"),
                ("total", "total"),
            ],
        }
    }

    /// Canonical fields an import cannot do without
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Entity::Users => &["name", "email"],
            Entity::Rooms => &["name", "capacity", "price"],
            Entity::Bookings => &["user_id", "room_id", "checkin_date", "nights", "total"],
        }
    }

    /// Column order used for export
    pub fn export_columns(self) -> &'static [&'static str] {
        match self {
            Entity::Users => &["id", "name", "email", "phone"],
            Entity::Rooms => &["id", "name", "capacity", "price"],
            Entity::Bookings => &["id", "user_id", "room_id", "checkin_date", "nights", "total"],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" => Ok(Entity::Users),
            "rooms" => Ok(Entity::Rooms),
            "bookings" => Ok(Entity::Bookings),
            other => Err(AppError::Validation(format!("Unknown entity: {other}"))),
        }
    }
}

/// Positions of canonical fields within a CSV header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Map a header row onto canonical fields
    ///
    /// Headers are compared after cleaning and lowercasing. When several
    /// synonyms of one field are present, the earliest in the synonym table
    /// wins. Fails when a required field has no column.
    pub fn resolve(entity: Entity, headers: &csv::StringRecord) -> Result<Self> {
        let cleaned: Vec<String> = headers
            .iter()
            .map(|h| clean_field(h).to_lowercase())
            .collect();

        let mut columns = HashMap::new();
        for (synonym, canonical) in entity.synonyms() {
            if columns.contains_key(canonical) {
                continue;
            }
            if let Some(index) = cleaned.iter().position(|h| h == synonym) {
                columns.insert(*canonical, index);
            }
        }

        let missing: Vec<&'static str> = entity
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !columns.contains_key(field))
            .collect();
        if !missing.is_empty() {
            tracing::warn!("Rejected {} import, missing columns: {:?}", entity, missing);
            return Err(AppError::MissingColumns(missing));
        }

        Ok(Self { columns })
    }

    /// Raw cell for `field`, or `None` when the column is absent
    pub fn get<'r>(&self, record: &'r csv::StringRecord, field: &str) -> Option<&'r str> {
        self.columns.get(field).map(|&i| record.get(i).unwrap_or(""))
    }

    /// Raw cell for `field`, empty when the column or the cell is absent
    pub fn cell<'r>(&self, record: &'r csv::StringRecord, field: &str) -> &'r str {
        self.get(record, field).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_entity_from_str() {
        assert_eq!("Users".parse::<Entity>().unwrap(), Entity::Users);
        assert_eq!(" bookings ".parse::<Entity>().unwrap(), Entity::Bookings);
        assert!("guests".parse::<Entity>().is_err());
    }

    #[test]
    fn test_user_synonyms_are_case_insensitive() {
        let map = ColumnMap::resolve(
            Entity::Users,
            &headers(&["\u{feff}Full_Name", " E-Mail ", "Telephone"]),
        )
        .unwrap();
        let record = csv::StringRecord::from(vec!["Ann", "ann@x.io", "123"]);
        assert_eq!(map.cell(&record, "name"), "Ann");
        assert_eq!(map.cell(&record, "email"), "ann@x.io");
        assert_eq!(map.cell(&record, "phone"), "123");
    }

    #[test]
    fn test_optional_column_may_be_absent() {
        let map = ColumnMap::resolve(Entity::Users, &headers(&["name", "email"])).unwrap();
        let record = csv::StringRecord::from(vec!["Ann", "ann@x.io"]);
        assert_eq!(map.get(&record, "phone"), None);
        assert_eq!(map.cell(&record, "phone"), "");
    }

    #[test]
    fn test_short_record_reads_as_empty() {
        let map = ColumnMap::resolve(Entity::Rooms, &headers(&["name", "cap", "cost"])).unwrap();
        let record = csv::StringRecord::from(vec!["Attic"]);
        assert_eq!(map.cell(&record, "name"), "Attic");
        assert_eq!(map.cell(&record, "capacity"), "");
    }

    #[test]
    fn test_earliest_synonym_wins() {
        let map = ColumnMap::resolve(
            Entity::Users,
            &headers(&["full_name", "email", "name"]),
        )
        .unwrap();
        let record = csv::StringRecord::from(vec!["Full", "f@x.io", "Short"]);
        assert_eq!(map.cell(&record, "name"), "Short");
    }

    #[test]
    fn test_missing_required_columns() {
        let err = ColumnMap::resolve(Entity::Rooms, &headers(&["name", "price"])).unwrap_err();
        assert!(matches!(err, AppError::MissingColumns(ref cols) if cols == &vec!["capacity"]));

        let err = ColumnMap::resolve(Entity::Bookings, &headers(&["user", "room_id"])).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingColumns(ref cols)
                if cols == &vec!["user_id", "checkin_date", "nights", "total"]
        ));
    }
}
