use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

const RUN_STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Filesystem-safe stamp used in run ids and manifest names.
pub fn run_stamp(ts: DateTime<Utc>) -> String {
    ts.format(RUN_STAMP_FORMAT).to_string()
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))
}

/// Hex SHA-256 of a source document, recorded as extraction provenance.
pub fn sha256_document(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {} for hashing", path.display()))?;

    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher)
        .with_context(|| format!("failed to hash {}", path.display()))?;

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("failed to serialize json into {}", path.display()))?;
    writeln!(writer).with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

/// First `max_chars` characters of `text` on a single line, for log fields.
pub fn text_preview(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }

    let mut preview = flattened.chars().take(max_chars).collect::<String>();
    preview.push('…');
    preview
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("qamoos-util-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn sha256_document_hashes_file_contents() {
        let path = scratch_path("hash.htm");
        ensure_directory(path.parent().expect("scratch path has a parent"))
            .expect("scratch dir should exist");
        fs::write(&path, "abc").expect("document should write");

        assert_eq!(
            sha256_document(&path).expect("hash should succeed"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(sha256_document(&scratch_path("missing.htm")).is_err());
    }

    #[test]
    fn write_json_pretty_creates_parent_directories() {
        let path = scratch_path("manifests/run.json");
        write_json_pretty(&path, &serde_json::json!({ "entries": 3 }))
            .expect("json should write");

        let written = fs::read_to_string(&path).expect("json should read back");
        assert!(written.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&written).expect("json should parse");
        assert_eq!(value["entries"], 3);
    }

    #[test]
    fn run_stamp_is_compact_utc() {
        let ts = Utc
            .with_ymd_and_hms(2026, 3, 9, 14, 5, 7)
            .single()
            .expect("timestamp should be valid");
        assert_eq!(run_stamp(ts), "20260309T140507Z");
    }

    #[test]
    fn text_preview_flattens_and_truncates() {
        assert_eq!(text_preview("قصير\nجدا", 20), "قصير جدا");
        assert_eq!(text_preview("abcdef", 3), "abc…");
    }
}
