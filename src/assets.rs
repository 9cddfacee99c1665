//! Content-addressed image store.
//!
//! Records arrive from the admin layer with image fields holding either a
//! plain reference (the name of an already-stored file) or an inline payload
//! (`data:image/jpeg;base64,...`). This module persists inline payloads once
//! and turns both forms into a stable [`ImageRef`].
//!
//! # Content addressing
//!
//! The filename is derived from the payload itself: a SHA-256 digest of the
//! base64 text, rendered as base64 with `/` swapped for `_` so it is safe as
//! a filename. Identical payloads therefore always map to the same file, and
//! a store of already-present content skips the write entirely. That is the
//! whole dedup story; no index needed.
//!
//! The digest input is the *encoded* text rather than the decoded bytes,
//! matching the identifiers of previously stored files. The same image
//! re-encoded with different base64 line wrapping would get a new identifier;
//! see DESIGN.md.
//!
//! # Corner case
//!
//! A payload with the `data:` prefix but no `;base64,` marker is treated as
//! "nothing to store": [`AssetStore::store`] returns the empty ref and writes
//! nothing. This mirrors the legacy admin tool and is pinned by a test.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("invalid base64 image payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifier of a stored image: the content digest the file is named after,
/// or the reference that was passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The "nothing was stored" ref produced for malformed inline payloads.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(s.to_string())
    }
}

/// A record's stored image identifiers: the cover slot plus the image list.
///
/// The two slots are independent: the cover is never deduplicated against
/// the list. Within the list, an identifier is emitted at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImages {
    pub cover: ImageRef,
    pub images: Vec<ImageRef>,
}

/// Filesystem area holding the content-addressed originals.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the originals live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of a stored image.
    pub fn path_of(&self, image: &ImageRef) -> PathBuf {
        self.root.join(image.as_str())
    }

    /// Store one image field value.
    ///
    /// Plain references come back unchanged; inline `data:*;base64,` payloads
    /// are decoded, persisted under their content digest, and the digest is
    /// returned. Storing the same payload twice writes the file once.
    pub fn store(&self, payload: &str) -> Result<ImageRef, AssetError> {
        if !payload.starts_with(DATA_URI_PREFIX) {
            return Ok(ImageRef::from(payload));
        }

        let Some(marker) = payload.find(BASE64_MARKER) else {
            // Inline marker missing or mangled: nothing to store.
            return Ok(ImageRef::from(""));
        };
        let encoded = &payload[marker + BASE64_MARKER.len()..];

        let bytes = STANDARD.decode(encoded)?;
        let digest = Sha256::digest(encoded.as_bytes());
        let name = STANDARD.encode(digest).replace('/', "_");

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(&name);
        if !path.exists() {
            fs::write(&path, &bytes)?;
        }

        Ok(ImageRef(name))
    }

    /// Store a record's cover and image-list fields.
    ///
    /// List identifiers keep their original relative order but repeats are
    /// dropped. The first failing store aborts the whole batch.
    pub fn store_all(&self, cover: &str, images: &[String]) -> Result<StoredImages, AssetError> {
        let cover = self.store(cover)?;

        let mut seen = HashSet::new();
        let mut stored = Vec::new();
        for payload in images {
            let image = self.store(payload)?;
            if seen.insert(image.clone()) {
                stored.push(image);
            }
        }

        Ok(StoredImages {
            cover,
            images: stored,
        })
    }
}
