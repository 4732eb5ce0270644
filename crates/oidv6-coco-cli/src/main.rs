// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use oidv6_coco::coco::{ConvertOptions, Progress, convert};
use std::{path::PathBuf, process::ExitCode};

/// OIDv6 output to COCO JSON converter.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence of class names separated by space, defines category ids
    #[arg(long, num_args = 1.., required = true)]
    classes: Vec<String>,

    /// Path to datasets directory
    #[arg(long = "datasets_directory")]
    datasets_directory: PathBuf,

    /// Sequence of dataset directory names inside --datasets_directory
    /// separated by space, e.g. train test
    #[arg(long = "dataset_directory_names", num_args = 1.., required = true)]
    dataset_directory_names: Vec<String>,

    /// Sequence of filenames separated by space, in the same order as
    /// --dataset_directory_names. Default naming is
    /// instances_<dataset-directory-name>.json
    #[arg(long = "custom_filenames", num_args = 1..)]
    custom_filenames: Vec<String>,

    /// Labels directory name inside each dataset directory
    #[arg(long = "labels_directory_name", default_value = "labels")]
    labels_directory_name: String,

    /// Directory where JSON files will be saved
    #[arg(long = "save_directory", default_value = "annotations")]
    save_directory: PathBuf,

    /// Indent JSON (4 spaces)
    #[arg(long)]
    indent: bool,
}

impl From<Args> for ConvertOptions {
    fn from(args: Args) -> Self {
        ConvertOptions::new(
            args.classes,
            args.datasets_directory,
            args.dataset_directory_names,
        )
        .with_custom_filenames(args.custom_filenames)
        .with_labels_directory_name(args.labels_directory_name)
        .with_save_directory(args.save_directory)
        .with_indent(args.indent)
    }
}

/// Progress bars for each split, created when a split reports its first
/// image.
struct SplitProgress {
    bar: Option<ProgressBar>,
}

impl SplitProgress {
    fn new() -> Self {
        Self { bar: None }
    }

    fn update(&mut self, progress: Progress) {
        if progress.current == 1 {
            if let Some(bar) = self.bar.take() {
                bar.finish();
            }
            let bar = ProgressBar::new(progress.total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(&format!(
                        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] \
                         {{pos}}/{{len}} ({{eta}})",
                        progress.split
                    ))
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            self.bar = Some(bar);
        }

        if let Some(bar) = &self.bar {
            bar.set_position(progress.current as u64);
            if progress.current == progress.total {
                bar.finish();
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = ConvertOptions::from(args);

    let mut progress = SplitProgress::new();
    match convert(&options, |p| progress.update(p)) {
        Ok(written) => {
            debug!("Wrote {} files", written.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
