//! CLI output formatting for the publish and check commands.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every record is its semantic identity (positional index, title, kind),
//! with filesystem paths shown as secondary context via indented lines.
//!
//! ```text
//! 001 Corner Cafe (location)
//!     Document: zola/content/locations/7.md
//!     Images: 3 copied
//! 002 Canal Festival (event)
//!     Document: zola/content/events/3.md
//!     Images: 2 copied
//!
//! Published 1 location, 1 event, 5 images
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::project::Published;
use crate::record::{Record, RecordKind};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Record header line: positional index + title + kind.
///
/// Untitled records fall back to their numeric id, which is the identity
/// the output files are named by anyway.
fn record_header(index: usize, record: &Record) -> String {
    if record.title.is_empty() {
        format!("{} #{} ({})", format_index(index), record.id, record.kind)
    } else {
        format!("{} {} ({})", format_index(index), record.title, record.kind)
    }
}

/// Pluralize a count: `1 location`, `2 locations`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn kind_counts(records: &[Record]) -> (usize, usize) {
    let locations = records
        .iter()
        .filter(|r| r.kind == RecordKind::Location)
        .count();
    (locations, records.len() - locations)
}

// ============================================================================
// Publish
// ============================================================================

pub fn format_publish_output(records: &[Record], published: &[Published]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, (record, result)) in records.iter().zip(published).enumerate() {
        lines.push(record_header(i + 1, record));
        lines.push(format!(
            "{}Document: {}",
            indent(1),
            result.document.display()
        ));
        lines.push(format!(
            "{}Images: {} copied",
            indent(1),
            result.assets.len()
        ));
    }

    let (locations, events) = kind_counts(records);
    let images: usize = published.iter().map(|p| p.assets.len()).sum();
    lines.push(String::new());
    lines.push(format!(
        "Published {}, {}, {}",
        count(locations, "location"),
        count(events, "event"),
        count(images, "image")
    ));

    lines
}

pub fn print_publish_output(records: &[Record], published: &[Published]) {
    for line in format_publish_output(records, published) {
        println!("{line}");
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(records: &[Record]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, record) in records.iter().enumerate() {
        lines.push(record_header(i + 1, record));
        if record.opening_hours.is_some() {
            lines.push(format!("{}Opening hours: ok", indent(1)));
        }
        lines.push(format!(
            "{}Images: {}",
            indent(1),
            count(record.images.len() + 1, "slot")
        ));
    }

    let (locations, events) = kind_counts(records);
    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {}",
        count(locations, "location"),
        count(events, "event")
    ));

    lines
}

pub fn print_check_output(records: &[Record]) {
    for line in format_check_output(records) {
        println!("{line}");
    }
}
