// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! OIDv6 label file parsing.
//!
//! Each non-blank line of a label file describes one box:
//!
//! ```text
//! <class_name> <xmin> <ymin> <xmax> <ymax>
//! ```
//!
//! Coordinates are pixel values that may carry a fractional part; they are
//! truncated toward zero before the box size is computed. Truncated values
//! and box sizes must fit in an `i64`.

use crate::Error;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

/// One parsed label line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// 1-based line number in the label file.
    pub line: usize,
    /// Class name as written in the file.
    pub class_name: String,
    /// Bounding box: `[xmin, ymin, width, height]`.
    pub bbox: [i64; 4],
}

/// Path of the label file for an image: the image's base name (last
/// extension stripped) with `.txt`, inside `labels_dir`.
pub fn label_path(labels_dir: &Path, image_file_name: &str) -> PathBuf {
    let stem = image_file_name
        .rsplit_once('.')
        .map_or(image_file_name, |(stem, _)| stem);
    labels_dir.join(format!("{}.txt", stem))
}

/// Parse a single label line. `line_no` is the 1-based line number.
pub fn parse_label_line(path: &Path, line_no: usize, line: &str) -> Result<Label, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [class_name, xmin_tok, ymin_tok, xmax_tok, ymax_tok] = tokens[..] else {
        return Err(Error::MalformedLabel(
            path.to_path_buf(),
            line_no,
            line.to_string(),
        ));
    };

    let invalid =
        |token: &str| Error::InvalidCoordinate(path.to_path_buf(), line_no, token.to_string());

    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let coord = |token: &str| -> Result<i64, Error> {
        match token.parse::<f64>().map(f64::trunc) {
            Ok(value) if (i64::MIN as f64..i64::MAX as f64).contains(&value) => Ok(value as i64),
            _ => Err(invalid(token)),
        }
    };
    let extent = |min: i64, max: i64, token: &str| -> Result<i64, Error> {
        max.checked_sub(min).ok_or_else(|| invalid(token))
    };

    let xmin = coord(xmin_tok)?;
    let ymin = coord(ymin_tok)?;
    let xmax = coord(xmax_tok)?;
    let ymax = coord(ymax_tok)?;

    Ok(Label {
        line: line_no,
        class_name: class_name.to_string(),
        bbox: [
            xmin,
            ymin,
            extent(xmin, xmax, xmax_tok)?,
            extent(ymin, ymax, ymax_tok)?,
        ],
    })
}

/// Read every label of a label file in line order, skipping blank lines.
pub fn read_labels(path: &Path) -> Result<Vec<Label>, Error> {
    let file = File::open(path).map_err(|e| Error::LabelFile(path.to_path_buf(), e))?;
    let reader = BufReader::new(file);

    let mut labels = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::LabelFile(path.to_path_buf(), e))?;
        if line.trim().is_empty() {
            continue;
        }
        labels.push(parse_label_line(path, idx + 1, &line)?);
    }

    Ok(labels)
}
