// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! COCO JSON writer and output naming.

use super::types::CocoDataset;
use crate::Error;
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Indentation used for pretty-printed output.
const INDENT: &[u8] = b"    ";

/// Options for COCO writing.
#[derive(Debug, Clone, Default)]
pub struct CocoWriteOptions {
    /// Pretty-print JSON with a 4-space indent.
    pub pretty: bool,
}

/// COCO writer for generating JSON files.
///
/// # Example
///
/// ```rust,no_run
/// use oidv6_coco::coco::{CocoDataset, CocoWriter};
///
/// let writer = CocoWriter::new();
/// let dataset = CocoDataset::default();
/// writer.write_json(&dataset, "annotations/instances_train.json")?;
/// # Ok::<(), oidv6_coco::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CocoWriter {
    options: CocoWriteOptions,
}

impl CocoWriter {
    /// Create a new COCO writer with default (compact) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new COCO writer with custom options.
    pub fn with_options(options: CocoWriteOptions) -> Self {
        Self { options }
    }

    /// Serialize a dataset into any writer.
    pub fn write<W: Write>(&self, dataset: &CocoDataset, mut writer: W) -> Result<(), Error> {
        if self.options.pretty {
            let formatter = PrettyFormatter::with_indent(INDENT);
            let mut ser = Serializer::with_formatter(&mut writer, formatter);
            dataset.serialize(&mut ser)?;
        } else {
            serde_json::to_writer(&mut writer, dataset)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize a dataset to a JSON string.
    pub fn to_string(&self, dataset: &CocoDataset) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.write(dataset, &mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidDataset(e.to_string()))
    }

    /// Write a dataset to a JSON file, replacing any existing file.
    ///
    /// The parent directory must already exist, see [`ensure_directory`].
    pub fn write_json<P: AsRef<Path>>(&self, dataset: &CocoDataset, path: P) -> Result<(), Error> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::with_capacity(64 * 1024, file);
        self.write(dataset, writer)
    }
}

/// Create `path` and its parents if missing.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_directory(path: &Path) -> Result<bool, Error> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path).map_err(|e| Error::CreateDirectory(path.to_path_buf(), e))?;
    info!("Created directory {}", path.display());
    Ok(true)
}

/// Default output file name for a split directory.
pub fn default_filename(split: &str) -> String {
    format!("instances_{}.json", split)
}

/// Output file names for the given splits, in split order.
///
/// Custom names are used positionally only when there is exactly one per
/// split. Otherwise every split gets [`default_filename`], and a warning is
/// logged if custom names were supplied at all.
pub fn output_filenames(custom: &[String], splits: &[String]) -> Vec<String> {
    if !custom.is_empty() && custom.len() == splits.len() {
        return custom.to_vec();
    }
    if !custom.is_empty() {
        warn!(
            "Provided custom_filenames and dataset_directory_names argument amounts do not \
             match. Using default names"
        );
    }
    splits.iter().map(|s| default_filename(s)).collect()
}

/// Absolute path of the save directory, resolved against the working
/// directory.
pub fn save_directory_path(save_directory: &Path) -> Result<PathBuf, Error> {
    Ok(std::env::current_dir()?.join(save_directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coco::types::{CocoInfo, CocoLicense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn dataset() -> CocoDataset {
        CocoDataset {
            info: CocoInfo::for_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()),
            licenses: CocoLicense::base(),
            ..Default::default()
        }
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compact_output() {
        let json = CocoWriter::new().to_string(&dataset()).unwrap();
        assert!(!json.contains('\n'));
        assert!(!json.contains(": "));
        assert!(json.starts_with(r#"{"info":{"description":"""#));
    }

    #[test]
    fn test_pretty_output_uses_four_spaces() {
        let writer = CocoWriter::with_options(CocoWriteOptions { pretty: true });
        let json = writer.to_string(&dataset()).unwrap();
        let mut lines = json.lines();
        assert_eq!(lines.next(), Some("{"));
        assert_eq!(lines.next(), Some(r#"    "info": {"#));
        assert_eq!(lines.next(), Some(r#"        "description": "","#));
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale content that is longer than nothing").unwrap();

        CocoWriter::new().write_json(&dataset(), &path).unwrap();

        let restored: CocoDataset =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored, dataset());
    }

    #[test]
    fn test_ensure_directory_creates_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        assert!(ensure_directory(&nested).unwrap());
        assert!(nested.is_dir());
        assert!(!ensure_directory(&nested).unwrap());
    }

    #[test]
    fn test_ensure_directory_fails_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let err = ensure_directory(&file.join("sub")).unwrap_err();
        assert!(matches!(err, Error::CreateDirectory(..)));
    }

    #[test]
    fn test_output_filenames_custom_when_counts_match() {
        let custom = names(&["a.json", "b.json"]);
        let splits = names(&["train", "test"]);
        assert_eq!(output_filenames(&custom, &splits), custom);
    }

    #[test]
    fn test_output_filenames_default_on_mismatch() {
        let splits = names(&["train", "test"]);
        let expected = names(&["instances_train.json", "instances_test.json"]);
        assert_eq!(output_filenames(&names(&["a.json"]), &splits), expected);
        assert_eq!(output_filenames(&[], &splits), expected);
    }

    #[test]
    fn test_save_directory_path() {
        let dir = TempDir::new().unwrap();
        assert_eq!(save_directory_path(dir.path()).unwrap(), dir.path());

        let relative = save_directory_path(Path::new("annotations")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("annotations"));
    }
}
