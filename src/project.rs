//! Record-to-site projection.
//!
//! Takes a resolved [`Record`] and produces Zola source: one markdown
//! document with TOML front matter, plus the record's images copied out of
//! the asset store into the site's `static/` tree.
//!
//! ## Output Structure
//!
//! ```text
//! zola/
//! ├── content/
//! │   ├── locations/7.md               # Front matter + description body
//! │   └── events/3.md
//! └── static/img/
//!     ├── cover/location/<ref>.jpg     # Cover images, one flat dir per kind
//!     └── location/7/<ref>.jpg         # List images, one dir per record
//! ```
//!
//! ## Document Format
//!
//! Zola's TOML front matter between `+++` delimiter lines, then the record's
//! description verbatim as the page body:
//!
//! ```text
//! +++
//! id = 7
//! title = "Corner Cafe"
//! ...
//! [extra]
//! cover_image_url = "/img/cover/location/<ref>.jpg"
//! ...
//! +++
//! A cafe on the corner.
//! ```
//!
//! Image URLs in the front matter and the files copied under `static/` are
//! produced from the same stored-ref list, index for index, so the paths a
//! template renders always point at files that were just copied.
//!
//! ## Failure Behavior
//!
//! [`Projector::project`] is pure: it builds a [`Document`] without touching
//! the filesystem, so a record that fails (bad opening hours, serialization)
//! leaves nothing behind. [`Projector::publish`] materializes: the document is
//! written via temp-file-and-rename so readers never see a half-written page,
//! and a referenced image missing from the asset store is a fatal error for
//! that record. Batch publishing stops at the first failing record.

use crate::assets::{AssetError, AssetStore, ImageRef, StoredImages};
use crate::hours::{self, HoursError, WeeklySchedule};
use crate::record::{Record, RecordKind};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("front matter error: {0}")]
    FrontMatter(#[from] toml::ser::Error),
    #[error("opening hours error: {0}")]
    Hours(#[from] HoursError),
    #[error("asset store error: {0}")]
    Assets(#[from] AssetError),
    #[error("missing source asset: {0}")]
    MissingSourceAsset(PathBuf),
    #[error("record {id} ({title}): {source}")]
    Record {
        id: i64,
        title: String,
        #[source]
        source: Box<ProjectError>,
    },
}

/// Front matter of a published document.
///
/// Field order matters: TOML requires plain values before tables, and serde
/// emits fields in declaration order.
#[derive(Debug, Serialize)]
pub struct FrontMatter {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub taxonomies: Taxonomies,
    pub extra: Extra,
}

#[derive(Debug, Serialize)]
pub struct Taxonomies {
    pub tags: Vec<String>,
}

/// The `[extra]` table: everything templates read that Zola itself does not.
#[derive(Debug, Serialize)]
pub struct Extra {
    /// Set for events only; locations are implied by their section.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub address: String,
    pub phone: String,
    pub website_url: String,
    pub cover_image_url: String,
    pub coordinates: Vec<f64>,
    pub image_urls: Vec<String>,
    // A table, so it must stay the last field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<WeeklySchedule>,
}

/// A projected document, not yet on disk.
#[derive(Debug)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl Document {
    /// Render to the on-disk page format: `+++`-delimited front matter
    /// followed by the body.
    pub fn render(&self) -> Result<String, toml::ser::Error> {
        let front_matter = toml::to_string(&self.front_matter)?;
        Ok(format!("+++\n{front_matter}+++\n{}", self.body))
    }
}

/// Paths written for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub document: PathBuf,
    pub assets: Vec<PathBuf>,
}

/// Projects records into a site tree.
pub struct Projector {
    site_root: PathBuf,
    assets: AssetStore,
}

impl Projector {
    pub fn new(site_root: impl Into<PathBuf>, assets: AssetStore) -> Self {
        Self {
            site_root: site_root.into(),
            assets,
        }
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Build a record's document from its stored image refs. Pure; no
    /// filesystem access.
    pub fn project(&self, record: &Record, stored: &StoredImages) -> Result<Document, ProjectError> {
        let opening_hours = record
            .opening_hours
            .as_deref()
            .map(hours::parse_week)
            .transpose()?;

        let cover_image_url = format!(
            "/img/cover/{}/{}.jpg",
            record.kind.as_str(),
            stored.cover
        );
        let image_urls = stored
            .images
            .iter()
            .map(|image| format!("/img/{}/{}/{}.jpg", record.kind.as_str(), record.id, image))
            .collect();

        let kind = match record.kind {
            RecordKind::Event => Some(record.kind.as_str()),
            RecordKind::Location => None,
        };

        Ok(Document {
            front_matter: FrontMatter {
                id: record.id,
                title: record.title.clone(),
                date: record.created_at.clone(),
                updated_at: record.updated_at.clone(),
                taxonomies: Taxonomies {
                    tags: record.tags.clone(),
                },
                extra: Extra {
                    kind,
                    address: record.address.clone(),
                    phone: record.phone.clone(),
                    website_url: record.website_url.clone(),
                    cover_image_url,
                    coordinates: record.coordinates.clone(),
                    image_urls,
                    opening_hours,
                },
            },
            body: record.description.clone(),
        })
    }

    /// Store a record's images, then materialize its document and copy the
    /// referenced images into the site tree.
    pub fn publish(&self, record: &Record) -> Result<Published, ProjectError> {
        let stored = self.assets.store_all(&record.cover_image, &record.images)?;
        let document = self.project(record, &stored)?;
        // Render before touching the site tree so a serialization failure
        // leaves no partial output.
        let rendered = document.render()?;

        let content_dir = self.site_root.join("content").join(record.kind.content_dir());
        fs::create_dir_all(&content_dir)?;
        let document_path = content_dir.join(format!("{}.md", record.id));
        write_atomic(&document_path, rendered.as_bytes())?;

        let mut assets = Vec::with_capacity(1 + stored.images.len());

        let cover_dir = self
            .site_root
            .join("static/img/cover")
            .join(record.kind.as_str());
        fs::create_dir_all(&cover_dir)?;
        let cover_dest = cover_dir.join(format!("{}.jpg", stored.cover));
        self.copy_asset(&stored.cover, &cover_dest)?;
        assets.push(cover_dest);

        let images_dir = self
            .site_root
            .join("static/img")
            .join(record.kind.as_str())
            .join(record.id.to_string());
        fs::create_dir_all(&images_dir)?;
        for image in &stored.images {
            let dest = images_dir.join(format!("{image}.jpg"));
            self.copy_asset(image, &dest)?;
            assets.push(dest);
        }

        Ok(Published {
            document: document_path,
            assets,
        })
    }

    /// Publish records in caller order, stopping at the first failure.
    ///
    /// Records already published stay on disk; the error names the record
    /// that failed.
    pub fn publish_all(&self, records: &[Record]) -> Result<Vec<Published>, ProjectError> {
        records
            .iter()
            .map(|record| {
                self.publish(record).map_err(|source| ProjectError::Record {
                    id: record.id,
                    title: record.title.clone(),
                    source: Box::new(source),
                })
            })
            .collect()
    }

    fn copy_asset(&self, image: &ImageRef, dest: &Path) -> Result<(), ProjectError> {
        let source = self.assets.path_of(image);
        if !source.is_file() {
            return Err(ProjectError::MissingSourceAsset(source));
        }
        fs::copy(&source, dest)?;
        Ok(())
    }
}

/// Write a file via a temp sibling and rename, so a crash mid-write can
/// never leave a truncated page for Zola to pick up.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("md.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{data_uri, event_record, location_record, site};
    use tempfile::TempDir;

    fn stored_for(projector: &Projector, record: &Record) -> StoredImages {
        projector
            .assets
            .store_all(&record.cover_image, &record.images)
            .unwrap()
    }

    // =========================================================================
    // project: front matter shape
    // =========================================================================

    #[test]
    fn location_front_matter_carries_scalars_and_tags() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let stored = stored_for(&projector, &record);
        let doc = projector.project(&record, &stored).unwrap();

        assert_eq!(doc.front_matter.id, 7);
        assert_eq!(doc.front_matter.title, "Corner Cafe");
        assert_eq!(doc.front_matter.taxonomies.tags, vec!["coffee", "breakfast"]);
        assert_eq!(doc.front_matter.extra.address, "1 Canal Street");
        assert_eq!(doc.front_matter.extra.coordinates, vec![52.37, 4.89]);
        assert_eq!(doc.body, "A cafe on the corner.");
    }

    #[test]
    fn description_never_lands_in_front_matter() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let stored = stored_for(&projector, &record);
        let doc = projector.project(&record, &stored).unwrap();
        let rendered = doc.render().unwrap();

        let closing = rendered.rfind("+++").unwrap();
        assert!(!rendered[..closing].contains("A cafe on the corner."));
        assert!(rendered[closing..].contains("A cafe on the corner."));
    }

    #[test]
    fn cover_and_list_urls_follow_the_site_layout() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let stored = stored_for(&projector, &record);
        let doc = projector.project(&record, &stored).unwrap();

        assert_eq!(
            doc.front_matter.extra.cover_image_url,
            format!("/img/cover/location/{}.jpg", stored.cover)
        );
        assert_eq!(doc.front_matter.extra.image_urls.len(), stored.images.len());
        for (url, image) in doc.front_matter.extra.image_urls.iter().zip(&stored.images) {
            assert_eq!(url, &format!("/img/location/7/{image}.jpg"));
        }
    }

    #[test]
    fn location_embeds_parsed_opening_hours() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let stored = stored_for(&projector, &record);
        let doc = projector.project(&record, &stored).unwrap();

        let week = doc.front_matter.extra.opening_hours.unwrap();
        assert_eq!(week.monday[0].start.hour, 7);
        assert_eq!(week.monday[0].start.minute, 30);
        assert_eq!(week.monday[1].end.hour, 28);
    }

    #[test]
    fn event_gets_type_and_no_opening_hours() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = event_record(3);

        let stored = stored_for(&projector, &record);
        let doc = projector.project(&record, &stored).unwrap();

        assert_eq!(doc.front_matter.extra.kind, Some("event"));
        assert!(doc.front_matter.extra.opening_hours.is_none());
    }

    #[test]
    fn bad_opening_hours_fail_the_projection_with_day_context() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let mut record = location_record(7);
        record.opening_hours = Some("7-15\n7-15\nbad\n7-15\n7-15\n7-15\n7-15".into());

        let stored = stored_for(&projector, &record);
        let err = projector.project(&record, &stored).unwrap_err();
        assert!(err.to_string().contains("Wednesday"));
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn rendered_document_is_delimited_front_matter_then_body() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let stored = stored_for(&projector, &record);
        let rendered = projector.project(&record, &stored).unwrap().render().unwrap();

        assert!(rendered.starts_with("+++\n"));
        assert!(rendered.ends_with("+++\nA cafe on the corner."));
        assert!(rendered.contains("title = \"Corner Cafe\""));
        assert!(rendered.contains("[taxonomies]"));
        assert!(rendered.contains("[extra]"));
        assert!(rendered.contains("[[extra.opening_hours.Monday]]"));
        assert!(rendered.contains("start = [7, 30]"));
    }

    // =========================================================================
    // publish: materialization
    // =========================================================================

    #[test]
    fn publish_writes_document_and_copies_images() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let record = location_record(7);

        let published = projector.publish(&record).unwrap();

        assert_eq!(
            published.document,
            projector.site_root().join("content/locations/7.md")
        );
        let page = fs::read_to_string(&published.document).unwrap();
        assert!(page.starts_with("+++\n"));

        // Cover plus two list images.
        assert_eq!(published.assets.len(), 3);
        for asset in &published.assets {
            assert!(asset.is_file(), "missing {}", asset.display());
        }
        // No temp file left behind.
        assert!(!projector
            .site_root()
            .join("content/locations/7.md.tmp")
            .exists());
    }

    #[test]
    fn published_images_are_byte_identical_to_the_store() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let mut record = event_record(3);
        record.cover_image = data_uri(b"cover bytes");
        record.images = vec![data_uri(b"gallery bytes")];

        let published = projector.publish(&record).unwrap();

        assert_eq!(fs::read(&published.assets[0]).unwrap(), b"cover bytes");
        assert_eq!(fs::read(&published.assets[1]).unwrap(), b"gallery bytes");
    }

    #[test]
    fn duplicate_list_images_publish_once() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let mut record = location_record(7);
        let dup = data_uri(b"same shot");
        record.images = vec![dup.clone(), dup];

        let published = projector.publish(&record).unwrap();
        let page = fs::read_to_string(&published.document).unwrap();

        // One cover asset + one deduplicated list asset.
        assert_eq!(published.assets.len(), 2);
        assert_eq!(page.matches("/img/location/7/").count(), 1);
    }

    #[test]
    fn missing_source_asset_is_fatal_for_the_record() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let mut record = event_record(3);
        record.cover_image = "never-stored".into();

        let err = projector.publish(&record).unwrap_err();
        assert!(matches!(err, ProjectError::MissingSourceAsset(_)));
    }

    #[test]
    fn publish_all_stops_at_first_failure() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let good = location_record(1);
        let mut bad = location_record(2);
        bad.cover_image = "never-stored".into();
        let unreached = location_record(3);

        let err = projector
            .publish_all(&[good, bad, unreached])
            .unwrap_err();

        match err {
            ProjectError::Record { id, source, .. } => {
                assert_eq!(id, 2);
                assert!(matches!(*source, ProjectError::MissingSourceAsset(_)));
            }
            other => panic!("expected record-context error, got {other:?}"),
        }
        // The first record made it out; the third was never attempted.
        assert!(projector.site_root().join("content/locations/1.md").exists());
        assert!(!projector.site_root().join("content/locations/3.md").exists());
    }

    #[test]
    fn republish_overwrites_the_document_in_place() {
        let tmp = TempDir::new().unwrap();
        let projector = site(&tmp);
        let mut record = location_record(7);

        projector.publish(&record).unwrap();
        record.title = "Renamed Cafe".into();
        let published = projector.publish(&record).unwrap();

        let page = fs::read_to_string(&published.document).unwrap();
        assert!(page.contains("title = \"Renamed Cafe\""));
        assert!(!page.contains("Corner Cafe"));
    }
}
