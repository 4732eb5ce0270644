// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use std::path::PathBuf;

/// Error type for dataset conversion.
///
/// Every variant raised while reading a dataset carries the path of the
/// offending file so the message identifies what must be fixed. Label errors
/// additionally carry the 1-based line number.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred during file operations.
    IoError(std::io::Error),
    /// JSON serialization error.
    JsonError(serde_json::Error),
    /// Listing a split directory failed.
    WalkDirError(walkdir::Error),
    /// The image header could not be read.
    ImageError(PathBuf, imagesize::ImageError),
    /// The label file for an image is missing or unreadable.
    LabelFile(PathBuf, std::io::Error),
    /// A label line does not have exactly five whitespace-separated tokens.
    MalformedLabel(PathBuf, usize, String),
    /// A label coordinate is not a number, or it or the box size derived
    /// from it does not fit in an `i64`.
    InvalidCoordinate(PathBuf, usize, String),
    /// A label references a class name that is not in the class list.
    UnknownClass(PathBuf, usize, String),
    /// The output directory could not be created.
    CreateDirectory(PathBuf, std::io::Error),
    /// A built dataset violates the id or reference invariants.
    InvalidDataset(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "I/O error: {}", e),
            Error::JsonError(e) => write!(f, "JSON error: {}", e),
            Error::WalkDirError(e) => write!(f, "Directory listing error: {}", e),
            Error::ImageError(path, e) => {
                write!(f, "Failed to read image {}: {}", path.display(), e)
            }
            Error::LabelFile(path, e) => {
                write!(f, "Failed to read label file {}: {}", path.display(), e)
            }
            Error::MalformedLabel(path, line, content) => write!(
                f,
                "{}:{}: expected `<class> <xmin> <ymin> <xmax> <ymax>`, found {:?}",
                path.display(),
                line,
                content
            ),
            Error::InvalidCoordinate(path, line, token) => write!(
                f,
                "{}:{}: invalid coordinate {:?}",
                path.display(),
                line,
                token
            ),
            Error::UnknownClass(path, line, name) => write!(
                f,
                "{}:{}: class {:?} is not in the class list",
                path.display(),
                line,
                name
            ),
            Error::CreateDirectory(path, e) => {
                write!(f, "Failed to create directory {}: {}", path.display(), e)
            }
            Error::InvalidDataset(s) => write!(f, "Invalid dataset: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            Error::WalkDirError(e) => Some(e),
            Error::ImageError(_, e) => Some(e),
            Error::LabelFile(_, e) => Some(e),
            Error::CreateDirectory(_, e) => Some(e),
            _ => None,
        }
    }
}
