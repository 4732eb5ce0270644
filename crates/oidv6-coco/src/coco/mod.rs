// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # COCO Conversion
//!
//! Converts OIDv6-style dataset splits into COCO detection JSON.
//!
//! ## Input Layout
//!
//! ```text
//! datasets_directory/
//! ├── train/
//! │   ├── 000a1249af2bc5f0.jpg
//! │   └── labels/
//! │       └── 000a1249af2bc5f0.txt
//! └── test/
//!     ├── ...
//!     └── labels/
//! ```
//!
//! Each label line is `<class_name> <xmin> <ymin> <xmax> <ymax>` in pixels.
//!
//! ## Output
//!
//! One COCO file per split (`instances_<split>.json` unless custom names are
//! given) containing `info`, `licenses`, `categories`, `images` and
//! `annotations`. Category ids follow the order of the class list starting
//! at 1; image and annotation ids restart at 0 for every split.
//!
//! ## Example
//!
//! ```rust,no_run
//! use oidv6_coco::coco::{CocoWriter, build_dataset, scan_split};
//! use std::path::Path;
//!
//! let classes = vec!["Apple".to_string(), "Orange".to_string()];
//! let data = scan_split(Path::new("OID/Dataset/train"), "labels", &classes, |_| {})?;
//! let dataset = build_dataset(&classes, data);
//! CocoWriter::new().write_json(&dataset, "instances_train.json")?;
//! # Ok::<(), oidv6_coco::Error>(())
//! ```

mod convert;
mod images;
mod labels;
mod types;
mod writer;

// Re-export types
pub use types::{
    CocoAnnotation, CocoCategory, CocoDataset, CocoImage, CocoInfo, CocoLicense, LICENSE_ID,
    SUPERCATEGORY,
};

// Re-export readers/writers
pub use images::{ImageMetadata, read_image_metadata};
pub use labels::{Label, label_path, parse_label_line, read_labels};
pub use writer::{
    CocoWriteOptions, CocoWriter, default_filename, ensure_directory, output_filenames,
    save_directory_path,
};

// Re-export conversion functions
pub use convert::{
    ConvertOptions, IMAGE_EXTENSION, Progress, SplitData, build_dataset, categories, convert,
    list_images, scan_split,
};
