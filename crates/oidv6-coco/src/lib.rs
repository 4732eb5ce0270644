// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # OIDv6 to COCO Conversion Library
//!
//! Converts directory-based object detection datasets, as produced by the
//! OIDv6 downloader, into COCO JSON annotation files.
//!
//! A dataset root holds one directory per split (`train`, `validation`,
//! `test`, ...). Each split directory contains `.jpg` images and a labels
//! subdirectory with one text file per image. Every split becomes one COCO
//! file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oidv6_coco::{Error, coco::{ConvertOptions, convert}};
//!
//! fn main() -> Result<(), Error> {
//!     let options = ConvertOptions::new(
//!         vec!["Cat".to_string(), "Dog".to_string()],
//!         "OID/Dataset",
//!         vec!["train".to_string(), "validation".to_string()],
//!     );
//!
//!     for path in convert(&options, |_| {})? {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod coco;
mod error;

pub use crate::error::Error;
