//! Typed records and the decode boundary.
//!
//! The admin layer stores every location and event as one row of an `items`
//! table: a numeric id, a JSON blob, and two timestamps. Exports of that
//! table are the input to this tool: a JSON array of [`Item`] values.
//!
//! Each item's blob is resolved into a typed [`Record`] exactly once, here.
//! The blob's `type` key picks the [`RecordKind`]; anything else is rejected
//! with [`RecordError::UnknownType`] before any downstream code runs, so the
//! projector never has to inspect loosely-typed data and can never produce
//! output for a record it does not understand.
//!
//! Blob keys are the admin frontend's camelCase names (`websiteURL`,
//! `coverImageURL`, `imageURLs`, `openingHours`). Missing keys default to
//! empty values; the admin tool has always been lenient about sparse
//! records.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown record type {0:?}")]
    UnknownType(String),
}

/// One exported row of the admin database's `items` table.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: i64,
    /// The record payload, still untyped. Resolved by [`Record::from_item`].
    pub data: serde_json::Value,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// The two publishable record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Location,
    Event,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Location => "location",
            RecordKind::Event => "event",
        }
    }

    /// Directory name under `content/` (the plural form Zola sections use).
    pub fn content_dir(self) -> &'static str {
        match self {
            RecordKind::Location => "locations",
            RecordKind::Event => "events",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved record, ready for projection.
///
/// Image fields hold either a plain reference into the asset store or an
/// inline `data:` payload; the asset store sorts that out at publish time.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub kind: RecordKind,
    pub title: String,
    pub description: String,
    pub address: String,
    pub coordinates: Vec<f64>,
    pub phone: String,
    pub website_url: String,
    pub cover_image: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    /// Raw weekly opening-hours text, newline-separated Monday first.
    /// Locations only; never present on events.
    pub opening_hours: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Blob shape shared by both record types.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    coordinates: Vec<f64>,
    #[serde(default)]
    phone: String,
    #[serde(default, rename = "websiteURL")]
    website_url: String,
    #[serde(default, rename = "coverImageURL")]
    cover_image: String,
    #[serde(default, rename = "imageURLs")]
    images: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    opening_hours: Option<String>,
}

impl Record {
    /// Resolve an exported item into a typed record.
    pub fn from_item(item: &Item) -> Result<Record, RecordError> {
        let fields: RecordFields = serde_json::from_value(item.data.clone())?;

        let kind = match fields.kind.as_str() {
            "location" => RecordKind::Location,
            "event" => RecordKind::Event,
            other => return Err(RecordError::UnknownType(other.to_string())),
        };

        // Opening hours belong to locations; drop a stray value on an event
        // rather than publishing a schedule for something that has none.
        let opening_hours = match kind {
            RecordKind::Location => fields.opening_hours,
            RecordKind::Event => None,
        };

        Ok(Record {
            id: item.id,
            kind,
            title: fields.title,
            description: fields.description,
            address: fields.address,
            coordinates: fields.coordinates,
            phone: fields.phone,
            website_url: fields.website_url,
            cover_image: fields.cover_image,
            images: fields.images,
            tags: fields.tags,
            opening_hours,
            created_at: item.created_at.clone(),
            updated_at: item.updated_at.clone(),
        })
    }
}

/// Read an export file (a JSON array of items) and resolve every record.
///
/// The first undecodable or unknown-typed item fails the whole load: the
/// caller gets either a complete batch or nothing, so a bad export can never
/// be half-published.
pub fn load_records(path: &Path) -> Result<Vec<Record>, RecordError> {
    let content = std::fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&content)?;
    items.iter().map(Record::from_item).collect()
}
