// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! COCO JSON data structures for serde serialization.
//!
//! Field declaration order is the key order of the written JSON.

use crate::Error;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supercategory written for every category.
pub const SUPERCATEGORY: &str = "None";

/// License ID referenced by every image.
pub const LICENSE_ID: u32 = 1;

/// Top-level COCO dataset structure, one per split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoDataset {
    /// Dataset metadata.
    pub info: CocoInfo,
    /// License information for the images.
    pub licenses: Vec<CocoLicense>,
    /// List of object categories/classes.
    pub categories: Vec<CocoCategory>,
    /// List of images in the split.
    pub images: Vec<CocoImage>,
    /// List of annotations (one per label line).
    pub annotations: Vec<CocoAnnotation>,
}

impl CocoDataset {
    /// Check the id invariants of a converted split.
    ///
    /// Image and annotation ids must each be the dense sequence `0..len`,
    /// every annotation must reference an image of this dataset and use a
    /// declared category.
    pub fn validate(&self) -> Result<(), Error> {
        for (expected, image) in self.images.iter().enumerate() {
            if image.id != expected as u64 {
                return Err(Error::InvalidDataset(format!(
                    "image {} has id {}, expected {}",
                    image.file_name, image.id, expected
                )));
            }
        }

        let categories: HashSet<u32> = self.categories.iter().map(|c| c.id).collect();
        let image_count = self.images.len() as u64;

        for (expected, ann) in self.annotations.iter().enumerate() {
            if ann.id != expected as u64 {
                return Err(Error::InvalidDataset(format!(
                    "annotation has id {}, expected {}",
                    ann.id, expected
                )));
            }
            if ann.image_id >= image_count {
                return Err(Error::InvalidDataset(format!(
                    "annotation {} references missing image {}",
                    ann.id, ann.image_id
                )));
            }
            if !categories.contains(&ann.category_id) {
                return Err(Error::InvalidDataset(format!(
                    "annotation {} references missing category {}",
                    ann.id, ann.category_id
                )));
            }
        }

        Ok(())
    }
}

/// Dataset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoInfo {
    pub description: String,
    pub url: String,
    pub version: String,
    /// Year the file was generated.
    pub year: i32,
    pub contributor: String,
    /// Date the file was generated, `YYYY-MM-DD`. Serialized under the key
    /// `data_created` for compatibility with existing annotation files.
    #[serde(rename = "data_created")]
    pub date_created: String,
}

impl CocoInfo {
    /// Info block stamped with the current local date.
    pub fn now() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Info block stamped with the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            description: String::new(),
            url: String::new(),
            version: String::new(),
            year: date.year(),
            contributor: String::new(),
            date_created: date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Default for CocoInfo {
    fn default() -> Self {
        Self::now()
    }
}

/// License information.
///
/// The converter has no license data, so `name` and `url` are written as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoLicense {
    /// Unique license ID.
    pub id: u32,
    /// License name.
    pub name: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

impl CocoLicense {
    /// The single license block written to every file.
    pub fn base() -> Vec<CocoLicense> {
        vec![CocoLicense {
            id: LICENSE_ID,
            name: None,
            url: None,
        }]
    }
}

/// Category definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoCategory {
    /// 1-based position of the class in the class list.
    pub id: u32,
    /// Class name (e.g., "Cat", "Car").
    pub name: String,
    /// Always [`SUPERCATEGORY`].
    pub supercategory: String,
}

/// Image metadata.
///
/// **Axis order:** `width` holds the image's pixel *height* and `height`
/// holds its pixel *width*. Files produced by earlier releases of this tool
/// carry this layout and downstream datasets depend on it, so it is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoImage {
    /// Image ID, dense per split starting at 0.
    pub id: u64,
    /// Filename inside the split directory.
    pub file_name: String,
    /// Second component of the image size (pixel height).
    pub width: u32,
    /// First component of the image size (pixel width).
    pub height: u32,
    /// EXIF capture time, if the image has one.
    pub date_captured: Option<String>,
    /// License ID (references `CocoLicense.id`).
    pub licence: u32,
    pub coco_url: String,
    pub flickr_url: String,
}

impl CocoImage {
    /// Build an image record from the `(width, height)` pixel size as read
    /// from the image header.
    pub fn new(
        id: u64,
        file_name: impl Into<String>,
        size: (u32, u32),
        date_captured: Option<String>,
    ) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            width: size.1,
            height: size.0,
            date_captured,
            licence: LICENSE_ID,
            coco_url: String::new(),
            flickr_url: String::new(),
        }
    }
}

/// Annotation for one bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoAnnotation {
    /// Annotation ID, dense per split starting at 0.
    pub id: u64,
    /// ID of the image containing this object.
    pub image_id: u64,
    /// Category ID of this object.
    pub category_id: u32,
    /// Always 0, crowd regions are not produced.
    pub iscrowd: u8,
    /// Bounding box: `[x, y, width, height]` in whole pixels.
    pub bbox: [i64; 4],
    /// Always empty, polygons are not produced.
    pub segmentation: Vec<Vec<f64>>,
}
