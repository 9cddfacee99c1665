//! # Guidepress
//!
//! Republishes guide records (locations and events maintained by an external
//! admin tool) as [Zola](https://www.getzola.org) static-site source. The
//! admin database is the data source: each record becomes one markdown page
//! with TOML front matter, and its images land in the site's `static/` tree.
//!
//! # Architecture: Project, Don't Serve
//!
//! The admin layer owns HTTP, storage, and editing. Guidepress only handles
//! the projection from an exported record to filesystem artifacts:
//!
//! ```text
//! items.json  →  record   (typed Record, resolved once)
//!             →  assets   (inline payloads → content-addressed files)
//!             →  project  (front matter + body → content/, images → static/)
//! ```
//!
//! Each record flows through independently; a failing record aborts the batch
//! at that point and reports which record and field was at fault.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`hours`] | Opening-hours grammar: `7.30-15.30,19.30-28` day lines, seven-line weeks, overnight hours 24–48 |
//! | [`assets`] | Content-addressed image store — inline payloads persisted once under a digest-derived name |
//! | [`record`] | Typed `Record`/`RecordKind`, decoding of exported items, unknown-type rejection |
//! | [`project`] | Front-matter assembly and site-tree materialization |
//! | [`config`] | `config.toml` loading and the stock config printer |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//!
//! # Design Decisions
//!
//! ## Overnight Hours as 24–48
//!
//! A shift ending at 2 AM is encoded as hour 26 on the same day instead of
//! spilling into the next day's schedule. Range validity stays a single
//! comparison and the week stays seven independent lines; templates interpret
//! hours ≥ 24 as "next day".
//!
//! ## Content-Addressed Images
//!
//! Stored images are named by a digest of their payload, so re-publishing
//! never duplicates a file and "has this been stored?" is a filename check.
//! No manifest and no database; the directory listing is the index.
//!
//! ## Typed Records at the Boundary
//!
//! Exported item blobs are resolved into a typed [`record::Record`] exactly
//! once. Everything downstream matches on [`record::RecordKind`]; an
//! unrecognized type is rejected before any output exists for it.

pub mod assets;
pub mod config;
pub mod hours;
pub mod output;
pub mod project;
pub mod record;

#[cfg(test)]
pub(crate) mod test_helpers;
