//! Reads an IG pack (`.tgz`, `.tbz2`, `.txz` or plain `.tar`) into memory.
//!
//! Only regular files named `package/<name>.json` are kept; everything else in
//! the archive (nested folders, `package/other/*.json`, examples, openapi
//! bundles) is skipped without comment. The archive is read completely and
//! released before this module returns, so nothing downstream holds a file
//! handle.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use regex::Regex;
use tracing::{debug, info};
use xz2::read::XzDecoder;

use crate::error::ExtractError;

static PACKAGE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package/[^/]+\.json$").unwrap());

/// One JSON payload pulled out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Path inside the archive, e.g. `package/CodeSystem-foo.json`.
    pub name: String,
    /// The member's bytes decoded as UTF-8, untouched otherwise.
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Gzip,
    Bzip2,
    Xz,
    None,
}

/// Anything without a known compression magic is handed to the tar reader as-is,
/// so old v7 archives without a `ustar` header still load.
fn detect_compression(data: &[u8]) -> Compression {
    match data {
        [0x1F, 0x8B, ..] => Compression::Gzip,
        [b'B', b'Z', b'h', ..] => Compression::Bzip2,
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Compression::Xz,
        _ => Compression::None,
    }
}

/// True when `name` is a flat `package/*.json` member.
pub fn is_package_member(name: &str) -> bool {
    PACKAGE_MEMBER.is_match(name)
}

/// Extract every `package/*.json` member of the archive at `path`, in archive order.
pub fn extract(path: &Path) -> Result<Vec<ArchiveMember>, ExtractError> {
    info!(igpack = %path.display(), "[EXTRACT] Reading IG pack");

    let data = fs::read(path).map_err(|e| ExtractError::InvalidArchive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if data.is_empty() {
        return Err(ExtractError::InvalidArchive {
            path: path.to_path_buf(),
            reason: "empty file".to_string(),
        });
    }

    let members = match detect_compression(&data) {
        Compression::Gzip => read_members(path, GzDecoder::new(data.as_slice()))?,
        Compression::Bzip2 => read_members(path, BzDecoder::new(data.as_slice()))?,
        Compression::Xz => read_members(path, XzDecoder::new(data.as_slice()))?,
        Compression::None => read_members(path, data.as_slice())?,
    };

    if members.is_empty() {
        return Err(ExtractError::EmptyArchive {
            path: path.to_path_buf(),
        });
    }

    info!(
        igpack = %path.display(),
        members = members.len(),
        "[EXTRACT] Loaded package members"
    );
    Ok(members)
}

fn read_members<R: Read>(path: &Path, reader: R) -> Result<Vec<ArchiveMember>, ExtractError> {
    let invalid = |reason: String| ExtractError::InvalidArchive {
        path: path.to_path_buf(),
        reason,
    };
    let unreadable = |reason: String| ExtractError::ArchiveRead {
        path: path.to_path_buf(),
        reason,
    };

    let mut archive = tar::Archive::new(reader);
    let entries = archive.entries().map_err(|e| invalid(e.to_string()))?;

    let mut members = Vec::new();
    for (index, entry) in entries.enumerate() {
        // A broken first header means this was never a tar stream.
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(e) if index == 0 => return Err(invalid(e.to_string())),
            Err(e) => return Err(unreadable(e.to_string())),
        };

        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if !is_package_member(&name) {
            debug!(member = %name, "[EXTRACT] Skipping non-package member");
            continue;
        }

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| unreadable(format!("reading '{name}': {e}")))?;
        let raw_text = String::from_utf8(bytes)
            .map_err(|e| unreadable(format!("member '{name}' is not valid UTF-8: {e}")))?;

        debug!(member = %name, bytes = raw_text.len(), "[EXTRACT] Read package member");
        members.push(ArchiveMember { name, raw_text });
    }
    Ok(members)
}
