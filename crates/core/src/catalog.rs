use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::i18n::Language;

/// The Tripoli neighborhood shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../data/locations.json");

pub type LocationId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Home,
    Telecom,
    Retail,
    Abandoned,
    Sport,
    Coffeeshop,
    Health,
    Company,
}

impl Category {
    /// Legend and filter order.
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Telecom,
        Self::Retail,
        Self::Abandoned,
        Self::Sport,
        Self::Coffeeshop,
        Self::Health,
        Self::Company,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Telecom => "telecom",
            Self::Retail => "retail",
            Self::Abandoned => "abandoned",
            Self::Sport => "sport",
            Self::Coffeeshop => "coffeeshop",
            Self::Health => "health",
            Self::Company => "company",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "home" => Some(Self::Home),
            "telecom" => Some(Self::Telecom),
            "retail" => Some(Self::Retail),
            "abandoned" => Some(Self::Abandoned),
            "sport" => Some(Self::Sport),
            "coffeeshop" => Some(Self::Coffeeshop),
            "health" => Some(Self::Health),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// A value held once per supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized<T> {
    en: T,
    ar: T,
}

impl<T> Localized<T> {
    pub const fn new(en: T, ar: T) -> Self {
        Self { en, ar }
    }

    pub const fn get(&self, language: Language) -> &T {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub label: String,
    /// May carry inline markup such as hyperlinks.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: Localized<String>,
    pub description: Localized<String>,
    pub category: Category,
    pub coordinates: Coordinates,
    pub image: String,
    pub details: Localized<Vec<DetailEntry>>,
}

impl LocationRecord {
    pub fn name(&self, language: Language) -> &str {
        self.name.get(language)
    }

    pub fn description(&self, language: Language) -> &str {
        self.description.get(language)
    }

    pub fn details(&self, language: Language) -> &[DetailEntry] {
        self.details.get(language)
    }

    /// First sentence of the description, as shown in the sidebar.
    pub fn summary(&self, language: Language) -> String {
        let first = self
            .description(language)
            .split('.')
            .next()
            .unwrap_or_default();
        format!("{first}.")
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("location {id}: missing `{field}` text for language `{language}`")]
    MissingTranslation {
        id: LocationId,
        field: &'static str,
        language: &'static str,
    },
    #[error("location {id}: unknown category `{category}`")]
    UnknownCategory { id: LocationId, category: String },
    #[error("location {id}: detail `{label}` for language `{language}` is not text")]
    InvalidDetail {
        id: LocationId,
        language: &'static str,
        label: String,
    },
    #[error("location {id}: coordinates ({lat}, {lon}) are out of range")]
    InvalidCoordinates { id: LocationId, lat: f64, lon: f64 },
    #[error("duplicate location id {0}")]
    DuplicateId(LocationId),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: LocationId,
    #[serde(default)]
    name: HashMap<String, String>,
    #[serde(default)]
    description: HashMap<String, String>,
    #[serde(alias = "type")]
    category: String,
    coordinates: Coordinates,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    details: HashMap<String, Map<String, Value>>,
}

impl RawRecord {
    fn into_record(mut self) -> Result<LocationRecord, CatalogError> {
        let id = self.id;
        let category = Category::parse(&self.category).ok_or_else(|| {
            CatalogError::UnknownCategory {
                id,
                category: self.category.clone(),
            }
        })?;

        if !self.coordinates.is_valid() {
            return Err(CatalogError::InvalidCoordinates {
                id,
                lat: self.coordinates.lat,
                lon: self.coordinates.lon,
            });
        }

        let name = localized_text(id, "name", &mut self.name)?;
        let description = localized_text(id, "description", &mut self.description)?;
        let details = Localized::new(
            detail_entries(id, Language::En, &mut self.details)?,
            detail_entries(id, Language::Ar, &mut self.details)?,
        );

        Ok(LocationRecord {
            id,
            name,
            description,
            category,
            coordinates: self.coordinates,
            image: self.image.unwrap_or_default(),
            details,
        })
    }
}

fn localized_text(
    id: LocationId,
    field: &'static str,
    values: &mut HashMap<String, String>,
) -> Result<Localized<String>, CatalogError> {
    let mut take = |language: Language| {
        values
            .remove(language.code())
            .filter(|text| !text.trim().is_empty())
            .ok_or(CatalogError::MissingTranslation {
                id,
                field,
                language: language.code(),
            })
    };

    Ok(Localized::new(take(Language::En)?, take(Language::Ar)?))
}

fn detail_entries(
    id: LocationId,
    language: Language,
    details: &mut HashMap<String, Map<String, Value>>,
) -> Result<Vec<DetailEntry>, CatalogError> {
    let entries = details
        .remove(language.code())
        .ok_or(CatalogError::MissingTranslation {
            id,
            field: "details",
            language: language.code(),
        })?;

    entries
        .into_iter()
        .map(|(label, value)| match value {
            Value::String(value) => Ok(DetailEntry { label, value }),
            Value::Number(number) => Ok(DetailEntry {
                label,
                value: number.to_string(),
            }),
            _ => Err(CatalogError::InvalidDetail {
                id,
                language: language.code(),
                label,
            }),
        })
        .collect()
}

/// The validated, immutable set of locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<LocationRecord>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let raw: Vec<RawRecord> = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Builds a catalog from already-typed records, still rejecting duplicate
    /// ids and impossible coordinates.
    pub fn from_records(records: Vec<LocationRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            if !record.coordinates.is_valid() {
                return Err(CatalogError::InvalidCoordinates {
                    id: record.id,
                    lat: record.coordinates.lat,
                    lon: record.coordinates.lon,
                });
            }
        }

        tracing::debug!(locations = records.len(), "catalog loaded");
        Ok(Self { records })
    }

    fn from_raw(raw: Vec<RawRecord>) -> Result<Self, CatalogError> {
        let records = raw
            .into_iter()
            .map(RawRecord::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: LocationId) -> Option<&LocationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
