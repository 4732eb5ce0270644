// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Image header and EXIF metadata reading.

use crate::Error;
use exif::{In, Reader, Tag, Value};
use log::debug;
use std::{fs::File, io::BufReader, path::Path};

/// Capture-time tags in lookup order: DateTimeOriginal (36867),
/// DateTimeDigitized (36868), DateTime (306).
const CAPTURE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Metadata read from one image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Pixel size as `(width, height)`.
    pub size: (u32, u32),
    /// Raw EXIF capture time, e.g. `2021:03:04 05:06:07`.
    pub date_captured: Option<String>,
}

/// Read the pixel size and capture time of an image.
///
/// Only the header is parsed, pixel data is never decoded. A missing or
/// unreadable EXIF block yields `date_captured: None`.
pub fn read_image_metadata(path: &Path) -> Result<ImageMetadata, Error> {
    let size = imagesize::size(path).map_err(|e| Error::ImageError(path.to_path_buf(), e))?;
    let date_captured = read_date_captured(path)?;

    Ok(ImageMetadata {
        size: (size.width as u32, size.height as u32),
        date_captured,
    })
}

fn read_date_captured(path: &Path) -> Result<Option<String>, Error> {
    let file = File::open(path)
        .map_err(|e| Error::ImageError(path.to_path_buf(), imagesize::ImageError::IoError(e)))?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("No EXIF metadata in {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    Ok(CAPTURE_TAGS.iter().find_map(|&tag| {
        let field = exif.get_field(tag, In::PRIMARY)?;
        ascii_value(&field.value)
    }))
}

/// First ASCII component of an EXIF value that is non-empty once NUL
/// padding is removed. Whitespace counts as content.
fn ascii_value(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    parts
        .iter()
        .map(|part| String::from_utf8_lossy(part).trim_end_matches('\0').to_string())
        .find(|s| !s.is_empty())
}
