//! Shared test utilities for the guidepress test suite.
//!
//! Provides canned items/records (one location, one event, both with inline
//! image payloads) and a projector wired to a temp directory. Tests that
//! need variations mutate the returned value.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use tempfile::TempDir;

use crate::assets::AssetStore;
use crate::project::Projector;
use crate::record::{Item, Record};

/// An inline image payload carrying the given bytes.
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

/// A full week of `7.30-15.30,19.30-28.00`, Monday through Sunday.
pub fn week_text() -> String {
    vec!["7.30-15.30,19.30-28.00"; 7].join("\n")
}

/// An exported location item with every field populated.
pub fn location_item(id: i64) -> Item {
    Item {
        id,
        data: json!({
            "type": "location",
            "title": "Corner Cafe",
            "description": "A cafe on the corner.",
            "address": "1 Canal Street",
            "coordinates": [52.37, 4.89],
            "phone": "+31 20 555 0101",
            "websiteURL": "https://cafe.example",
            "coverImageURL": data_uri(b"cover bytes"),
            "imageURLs": [data_uri(b"first shot"), data_uri(b"second shot")],
            "tags": ["coffee", "breakfast"],
            "openingHours": week_text(),
        }),
        created_at: Some("2023-04-01T09:00:00Z".to_string()),
        updated_at: Some("2023-04-02T10:00:00Z".to_string()),
    }
}

/// An exported event item with every field populated.
pub fn event_item(id: i64) -> Item {
    Item {
        id,
        data: json!({
            "type": "event",
            "title": "Canal Festival",
            "description": "Boats and music.",
            "address": "Prinsengracht",
            "coordinates": [52.36, 4.88],
            "phone": "",
            "websiteURL": "https://festival.example",
            "coverImageURL": data_uri(b"event cover"),
            "imageURLs": [data_uri(b"event shot")],
            "tags": ["music"],
        }),
        created_at: Some("2023-06-01T12:00:00Z".to_string()),
        updated_at: None,
    }
}

/// [`location_item`], resolved.
pub fn location_record(id: i64) -> Record {
    Record::from_item(&location_item(id)).unwrap()
}

/// [`event_item`], resolved.
pub fn event_record(id: i64) -> Record {
    Record::from_item(&event_item(id)).unwrap()
}

/// A projector writing to `<tmp>/zola` with its store at `<tmp>/files`.
pub fn site(tmp: &TempDir) -> Projector {
    Projector::new(
        tmp.path().join("zola"),
        AssetStore::new(tmp.path().join("files")),
    )
}
