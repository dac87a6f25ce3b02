//! Tree snapshots with fingerprint support.
//!
//! Building a tree from a large definition list is cheap but not free; a
//! snapshot lets agents start resolving immediately. Two workflows:
//!
//! 1. **Build once, ship the snapshot**: a build step writes the cache and
//!    resolvers load it without verification (no definition files needed).
//!
//! 2. **Definitions on disk**: fingerprint the definition file, use the
//!    cache when the fingerprint matches, rebuild and rewrite it otherwise
//!    ([`load_definitions_cached`]).
//!
//! # File Format
//!
//! Cache files use the `.omib` extension by convention:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header (9 or 41 bytes)                 │
//! │   magic: [u8; 4]        "OMIB"         │
//! │   version: u32 LE       Schema version │
//! │   has_fingerprint: u8   0 or 1         │
//! │   fingerprint: [u8; 32] (if present)   │
//! ├────────────────────────────────────────┤
//! │ Payload (postcard-encoded TreeParts)   │
//! └────────────────────────────────────────┘
//! ```

use std::fs;
use std::io;
use std::path::Path;

use oidname_core::mib::{MibTree, TreeError, TreeParts};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::defs::{build_tree, DefinitionsError};

/// Current schema version. Bump on any breaking change to serialized format.
pub const SCHEMA_VERSION: u32 = 1;

/// Magic bytes identifying a cache file.
const MAGIC: [u8; 4] = *b"OMIB";

/// Header length without / with an embedded fingerprint.
const HEADER_LEN: usize = 9;
const HEADER_LEN_FP: usize = HEADER_LEN + 32;

/// Cache error.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// File does not start with expected magic bytes.
    #[error("invalid magic bytes (expected OMIB)")]
    InvalidMagic,
    /// Schema version mismatch.
    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version.
        expected: u32,
        /// Found version.
        found: u32,
    },
    /// Fingerprint does not match expected value.
    #[error("fingerprint mismatch")]
    FingerprintMismatch,
    /// Header is truncated.
    #[error("truncated header")]
    TruncatedHeader,
    /// Postcard serialization failed.
    #[error("postcard serialization failed: {0}")]
    Serialization(#[source] postcard::Error),
    /// Postcard deserialization failed.
    #[error("postcard deserialization failed: {0}")]
    Deserialization(#[source] postcard::Error),
    /// The decoded tree is not well formed.
    #[error("invalid tree in cache: {0}")]
    Tree(#[from] TreeError),
    /// Rebuilding from definitions failed.
    #[error(transparent)]
    Definitions(#[from] DefinitionsError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Compute a fingerprint from definition file contents.
///
/// The fingerprint includes the schema version so a format change
/// invalidates old caches. Files are sorted by name for determinism, and
/// each name and content is length-prefixed so pairs cannot run together.
///
/// # Arguments
///
/// * `files` - Pairs of `(filename, content)`
pub fn compute_fingerprint<S: AsRef<str>>(files: &[(S, &[u8])]) -> [u8; 32] {
    let mut sorted: Vec<_> = files.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    let mut hasher = Sha256::new();
    hasher.update(SCHEMA_VERSION.to_le_bytes());
    for (name, content) in sorted {
        let name = name.as_ref().as_bytes();
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name);
        hasher.update((content.len() as u64).to_le_bytes());
        hasher.update(content);
    }

    hasher.finalize().into()
}

/// Serialize a tree to cache bytes, optionally embedding a fingerprint.
///
/// # Errors
///
/// Returns [`CacheError::Serialization`] if postcard encoding fails.
pub fn serialize_tree(tree: &MibTree, fingerprint: Option<[u8; 32]>) -> Result<Vec<u8>, CacheError> {
    let parts = tree.clone().into_parts();
    let payload = postcard::to_allocvec(&parts).map_err(CacheError::Serialization)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN_FP + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    match fingerprint {
        Some(fp) => {
            bytes.push(1);
            bytes.extend_from_slice(&fp);
        }
        None => bytes.push(0),
    }
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Validate the header and return `(fingerprint, payload offset)`.
fn read_header(bytes: &[u8]) -> Result<(Option<[u8; 32]>, usize), CacheError> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::TruncatedHeader);
    }

    if bytes[0..4] != MAGIC {
        return Err(CacheError::InvalidMagic);
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SCHEMA_VERSION {
        return Err(CacheError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    if bytes[8] == 0 {
        return Ok((None, HEADER_LEN));
    }
    let fp: [u8; 32] = bytes
        .get(HEADER_LEN..HEADER_LEN_FP)
        .and_then(|s| s.try_into().ok())
        .ok_or(CacheError::TruncatedHeader)?;
    Ok((Some(fp), HEADER_LEN_FP))
}

/// Deserialize a tree from cache bytes.
///
/// * `expected_fingerprint` - If `Some`, the stored fingerprint must match;
///   if `None`, verification is skipped.
///
/// # Errors
///
/// Returns an error if the header is invalid, the fingerprint does not
/// match (when verification is requested), the payload does not decode, or
/// the decoded tree fails validation ([`CacheError::Tree`]).
pub fn deserialize_tree(
    bytes: &[u8],
    expected_fingerprint: Option<&[u8; 32]>,
) -> Result<MibTree, CacheError> {
    let (stored, payload_start) = read_header(bytes)?;

    if let Some(expected) = expected_fingerprint {
        if stored.as_ref() != Some(expected) {
            return Err(CacheError::FingerprintMismatch);
        }
    }

    let parts: TreeParts =
        postcard::from_bytes(&bytes[payload_start..]).map_err(CacheError::Deserialization)?;
    Ok(MibTree::from_parts(parts)?)
}

/// Get the fingerprint from cache bytes without decoding the payload.
///
/// Returns `None` if the cache has no embedded fingerprint.
///
/// # Errors
///
/// Returns an error if the header is invalid.
pub fn get_fingerprint(bytes: &[u8]) -> Result<Option<[u8; 32]>, CacheError> {
    read_header(bytes).map(|(fp, _)| fp)
}

// === File-based convenience API ===

/// Save a tree to a cache file.
///
/// # Errors
///
/// Returns an error if the tree cannot be encoded or the file written.
pub fn save_cache<P: AsRef<Path>>(
    tree: &MibTree,
    path: P,
    fingerprint: Option<[u8; 32]>,
) -> Result<(), CacheError> {
    let bytes = serialize_tree(tree, fingerprint)?;
    fs::write(path.as_ref(), &bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote cache");
    Ok(())
}

/// Load a tree from a cache file without fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the cache is invalid.
pub fn load_cache<P: AsRef<Path>>(path: P) -> Result<MibTree, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_tree(&bytes, None)
}

/// Load a tree from a cache file with fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the cache is invalid,
/// or the fingerprint doesn't match.
pub fn load_cache_verified<P: AsRef<Path>>(
    path: P,
    expected_fingerprint: &[u8; 32],
) -> Result<MibTree, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_tree(&bytes, Some(expected_fingerprint))
}

/// Check if a cache file exists and has a matching fingerprint.
pub fn is_cache_valid<P: AsRef<Path>>(path: P, expected_fingerprint: &[u8; 32]) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };

    matches!(get_fingerprint(&bytes), Ok(Some(fp)) if fp == *expected_fingerprint)
}

/// Load a definition list through a cache.
///
/// Uses the cache when its fingerprint matches the definition file;
/// otherwise builds the tree from the definitions and rewrites the cache.
/// A cache that cannot be written is logged and otherwise ignored.
///
/// # Errors
///
/// Returns an error if the definition file cannot be read or is invalid.
pub fn load_definitions_cached<P: AsRef<Path>, Q: AsRef<Path>>(
    defs_path: P,
    cache_path: Q,
) -> Result<MibTree, CacheError> {
    let defs_path = defs_path.as_ref();
    let cache_path = cache_path.as_ref();

    let content = fs::read(defs_path)?;
    let name = defs_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let fingerprint = compute_fingerprint(&[(name, content.as_slice())]);

    match load_cache_verified(cache_path, &fingerprint) {
        Ok(tree) => {
            info!(cache = %cache_path.display(), nodes = tree.node_count(), "cache hit");
            return Ok(tree);
        }
        Err(e) => {
            info!(cache = %cache_path.display(), reason = %e, "cache miss, rebuilding");
        }
    }

    let tree = build_tree(&content)?;
    if let Err(e) = save_cache(&tree, cache_path, Some(fingerprint)) {
        warn!(cache = %cache_path.display(), error = %e, "failed to write cache");
    }
    Ok(tree)
}
