// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! OIDv6 split directory → COCO dataset conversion.

use super::{
    images::read_image_metadata,
    labels::{label_path, read_labels},
    types::{
        CocoAnnotation, CocoCategory, CocoDataset, CocoImage, CocoInfo, CocoLicense, SUPERCATEGORY,
    },
    writer::{
        CocoWriteOptions, CocoWriter, ensure_directory, output_filenames, save_directory_path,
    },
};
use crate::Error;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Only files with this exact (case-sensitive) suffix are treated as images.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Progress of the split currently being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Split directory name.
    pub split: String,
    /// Number of images processed so far.
    pub current: usize,
    /// Number of images in the split.
    pub total: usize,
}

/// Images and annotations collected from one split directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitData {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
}

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Ordered class names, defines category ids.
    pub classes: Vec<String>,
    /// Root containing the split directories.
    pub datasets_directory: PathBuf,
    /// Split directory names, processed in this order.
    pub dataset_directory_names: Vec<String>,
    /// Output file names, used only with one name per split.
    pub custom_filenames: Vec<String>,
    /// Label subdirectory inside each split directory.
    pub labels_directory_name: String,
    /// Output directory, relative to the working directory.
    pub save_directory: PathBuf,
    /// Pretty-print JSON with a 4-space indent.
    pub indent: bool,
}

impl ConvertOptions {
    pub fn new(
        classes: Vec<String>,
        datasets_directory: impl Into<PathBuf>,
        dataset_directory_names: Vec<String>,
    ) -> Self {
        Self {
            classes,
            datasets_directory: datasets_directory.into(),
            dataset_directory_names,
            custom_filenames: Vec::new(),
            labels_directory_name: "labels".to_string(),
            save_directory: PathBuf::from("annotations"),
            indent: false,
        }
    }

    pub fn with_custom_filenames(mut self, custom_filenames: Vec<String>) -> Self {
        self.custom_filenames = custom_filenames;
        self
    }

    pub fn with_labels_directory_name(mut self, name: impl Into<String>) -> Self {
        self.labels_directory_name = name.into();
        self
    }

    pub fn with_save_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_directory = path.into();
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }
}

/// Category records for a class list: id is the 1-based position.
pub fn categories(classes: &[String]) -> Vec<CocoCategory> {
    classes
        .iter()
        .enumerate()
        .map(|(idx, name)| CocoCategory {
            id: (idx + 1) as u32,
            name: name.clone(),
            supercategory: SUPERCATEGORY.to_string(),
        })
        .collect()
}

/// List the `.jpg` files directly inside `dir`, sorted by file name.
///
/// Symbolic links are followed, so a link to an image counts as an image.
/// Names that are not valid UTF-8 cannot be recorded in the JSON output and
/// are skipped with a warning.
pub fn list_images(dir: &Path) -> Result<Vec<String>, Error> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            if entry.file_name().to_string_lossy().ends_with(IMAGE_EXTENSION) {
                warn!("Skipping image with non UTF-8 name {}", entry.path().display());
            }
            continue;
        };
        if name.ends_with(IMAGE_EXTENSION) {
            images.push(name.to_string());
        }
    }
    Ok(images)
}

/// Scan one split directory into images and annotations.
///
/// Image ids and annotation ids both start at 0 and increase by one per
/// record, in file-name order. The first missing label file, malformed label
/// line or unknown class aborts the scan.
pub fn scan_split(
    images_dir: &Path,
    labels_dir_name: &str,
    classes: &[String],
    mut progress: impl FnMut(Progress),
) -> Result<SplitData, Error> {
    let split = images_dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let labels_dir = images_dir.join(labels_dir_name);
    let files = list_images(images_dir)?;
    let total = files.len();

    let mut data = SplitData::default();
    let mut annotation_id = 0u64;

    for (image_id, file_name) in files.into_iter().enumerate() {
        let image_id = image_id as u64;
        let image_path = images_dir.join(&file_name);
        let metadata = read_image_metadata(&image_path)?;
        debug!(
            "{}: {}x{} captured {:?}",
            file_name, metadata.size.0, metadata.size.1, metadata.date_captured
        );

        let labels_path = label_path(&labels_dir, &file_name);
        data.images.push(CocoImage::new(
            image_id,
            file_name,
            metadata.size,
            metadata.date_captured,
        ));

        for label in read_labels(&labels_path)? {
            let category_idx = classes
                .iter()
                .position(|c| *c == label.class_name)
                .ok_or_else(|| {
                    Error::UnknownClass(labels_path.clone(), label.line, label.class_name.clone())
                })?;

            data.annotations.push(CocoAnnotation {
                id: annotation_id,
                image_id,
                category_id: (category_idx + 1) as u32,
                iscrowd: 0,
                bbox: label.bbox,
                segmentation: Vec::new(),
            });
            annotation_id += 1;
        }

        progress(Progress {
            split: split.clone(),
            current: image_id as usize + 1,
            total,
        });
    }

    Ok(data)
}

/// Assemble the COCO dataset of one split with freshly built info, license
/// and category blocks.
pub fn build_dataset(classes: &[String], data: SplitData) -> CocoDataset {
    CocoDataset {
        info: CocoInfo::now(),
        licenses: CocoLicense::base(),
        categories: categories(classes),
        images: data.images,
        annotations: data.annotations,
    }
}

/// Convert every requested split and write one JSON file per split.
///
/// Splits are processed in the given order. The first error aborts the run;
/// files written for earlier splits are left in place and nothing is written
/// for the failing split. Returns the absolute paths written.
///
/// # Example
///
/// ```rust,no_run
/// use oidv6_coco::coco::{ConvertOptions, convert};
///
/// let options = ConvertOptions::new(
///     vec!["Cat".to_string(), "Dog".to_string()],
///     "OID/Dataset",
///     vec!["train".to_string(), "test".to_string()],
/// )
/// .with_indent(true);
/// let written = convert(&options, |_| {})?;
/// println!("Wrote {} files", written.len());
/// # Ok::<(), oidv6_coco::Error>(())
/// ```
pub fn convert(
    options: &ConvertOptions,
    mut progress: impl FnMut(Progress),
) -> Result<Vec<PathBuf>, Error> {
    let filenames = output_filenames(&options.custom_filenames, &options.dataset_directory_names);
    let writer = CocoWriter::with_options(CocoWriteOptions {
        pretty: options.indent,
    });

    let mut written = Vec::with_capacity(filenames.len());
    for (split, filename) in options.dataset_directory_names.iter().zip(&filenames) {
        let images_dir = options.datasets_directory.join(split);
        let data = scan_split(
            &images_dir,
            &options.labels_directory_name,
            &options.classes,
            &mut progress,
        )?;
        let dataset = build_dataset(&options.classes, data);
        dataset.validate()?;

        let save_dir = save_directory_path(&options.save_directory)?;
        ensure_directory(&save_dir)?;
        let path = save_dir.join(filename);
        writer.write_json(&dataset, &path)?;
        info!(
            "{}: {} images, {} annotations",
            split,
            dataset.images.len(),
            dataset.annotations.len()
        );
        info!("Created file {}", path.display());

        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_categories_ids_follow_input_order() {
        let cats = categories(&names(&["Dog", "Cat", "Bird"]));
        assert_eq!(cats.len(), 3);
        for (idx, cat) in cats.iter().enumerate() {
            assert_eq!(cat.id, idx as u32 + 1);
            assert_eq!(cat.supercategory, "None");
        }
        assert_eq!(cats[0].name, "Dog");
        assert_eq!(cats[2].name, "Bird");
    }

    #[test]
    fn test_categories_empty() {
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_options_defaults() {
        let options = ConvertOptions::new(names(&["Cat"]), "data", names(&["train"]));
        assert_eq!(options.labels_directory_name, "labels");
        assert_eq!(options.save_directory, PathBuf::from("annotations"));
        assert!(options.custom_filenames.is_empty());
        assert!(!options.indent);
    }

    #[test]
    fn test_build_dataset_fresh_blocks() {
        let classes = names(&["Cat", "Dog"]);
        let dataset = build_dataset(&classes, SplitData::default());
        assert_eq!(dataset.categories, categories(&classes));
        assert_eq!(dataset.licenses, CocoLicense::base());
        assert!(dataset.images.is_empty());
        assert!(dataset.annotations.is_empty());
    }
}
