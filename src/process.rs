//! Batch rendering of image files.
//!
//! Takes files and directories from the command line, renders the variants
//! each image needs for the configured `sizes`, and records the result in a
//! manifest.
//!
//! ## Output Structure
//!
//! ```text
//! variants/
//! ├── manifest.json          # Sources, variants and srcset per image
//! ├── dawn-2400w.jpg
//! ├── dawn-1939w.jpg
//! ├── dawn-1449w.jpg
//! ├── dawn-900w.jpg
//! └── ...
//! ```
//!
//! ## Parallel Processing
//!
//! Images are processed in parallel using [rayon](https://docs.rs/rayon).
//! Variants of a single image are rendered in order on one worker, since
//! the largest one decides how many smaller ones follow. Progress is
//! reported through an optional channel so the caller can print while
//! workers run.

use crate::config::ToolConfig;
use crate::imaging::{
    BackendError, FileImage, ImageSource, OutputSettings, get_variants, is_supported_image,
    source_stem,
};
use crate::srcset::srcset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

/// Name of the manifest written next to the variants.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Progress events emitted while rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Discovery finished; `image_count` images will be rendered.
    Started { image_count: usize },
    /// All variants of one image were written.
    ImageProcessed {
        /// 1-based position in discovery order.
        index: usize,
        source_path: String,
        source_width: u32,
        variants: Vec<VariantInfo>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantInfo {
    pub width: u32,
    pub filesize: u64,
}

/// Result of a render run, also written to `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub sizes: String,
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub variants: Vec<VariantRecord>,
    /// Ready-to-use `srcset` attribute value.
    pub srcset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub width: u32,
    pub height: u32,
    pub filesize: u64,
    /// Public path used in `srcset`.
    pub path: String,
}

/// Expand `paths` into the image files to render.
///
/// Files are taken as given. Directories are walked recursively for files
/// with a decodable extension, skipping the `exclude` directory so that a
/// second run does not pick up its own output. `exclude` is compared by
/// canonical path, so `./variants` and `/abs/path/variants` are the same
/// directory. The result is sorted and free of duplicates.
pub fn discover_images(paths: &[PathBuf], exclude: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let exclude = exclude
        .canonicalize()
        .unwrap_or_else(|_| exclude.to_path_buf());
    let mut images = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(ProcessError::SourceNotFound(path.clone()));
        }
        if path.is_file() {
            images.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, &exclude));
        for entry in walker {
            let entry = entry.map_err(|e| ProcessError::Io(e.into()))?;
            if entry.file_type().is_file() && is_supported_image(entry.path()) {
                images.push(entry.into_path());
            }
        }
    }
    images.sort();
    images.dedup();
    Ok(images)
}

fn is_excluded(entry: &walkdir::DirEntry, exclude: &Path) -> bool {
    entry.file_type().is_dir()
        && (entry.path() == exclude
            || entry
                .path()
                .canonicalize()
                .is_ok_and(|path| path == exclude))
}

/// Variant stem for each of `images`, unique ignoring ASCII case.
///
/// All variants share one output directory, so two sources with the same
/// file stem (`a/hero.jpg`, `b/hero.jpg`, `hero.png`) must not share a stem.
/// The first keeps its own; later ones get `-2`, `-3` and so on, skipping
/// stems that are already taken.
pub fn unique_stems(images: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    images
        .iter()
        .map(|path| {
            let stem = source_stem(path);
            let unique = std::iter::once(stem.to_string())
                .chain((2..).map(|n| format!("{stem}-{n}")))
                .find(|candidate| !taken.contains(&candidate.to_ascii_lowercase()))
                .unwrap_or_else(|| stem.to_string());
            taken.insert(unique.to_ascii_lowercase());
            unique
        })
        .collect()
}

/// Render variants for every image under `paths` and write the manifest.
pub fn process(
    paths: &[PathBuf],
    config: &ToolConfig,
    output: &OutputSettings,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<Manifest, ProcessError> {
    let images = discover_images(paths, &output.dir)?;
    if let Some(tx) = &progress {
        tx.send(ProcessEvent::Started {
            image_count: images.len(),
        })
        .ok();
    }

    std::fs::create_dir_all(&output.dir)?;
    let stems = unique_stems(&images);

    let records = images
        .par_iter()
        .zip(&stems)
        .enumerate()
        .map(|(i, (path, stem))| {
            let record = process_image(path, stem, config, output)?;
            if let Some(tx) = &progress {
                tx.send(ProcessEvent::ImageProcessed {
                    index: i + 1,
                    source_path: record.source.clone(),
                    source_width: record.width,
                    variants: record
                        .variants
                        .iter()
                        .map(|v| VariantInfo {
                            width: v.width,
                            filesize: v.filesize,
                        })
                        .collect(),
                })
                .ok();
            }
            Ok(record)
        })
        .collect::<Result<Vec<_>, ProcessError>>()?;

    let manifest = Manifest {
        sizes: config.render.sizes().to_string(),
        images: records,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(output.dir.join(MANIFEST_FILE_NAME), json)?;
    Ok(manifest)
}

fn process_image(
    path: &Path,
    stem: &str,
    config: &ToolConfig,
    output: &OutputSettings,
) -> Result<ImageRecord, ProcessError> {
    let source = FileImage::open_as(path, stem, output.clone())?;
    let variants = get_variants(&source, &config.render, &config.viewport)?;
    log::debug!("{}: {} variants", path.display(), variants.len());

    Ok(ImageRecord {
        source: path.display().to_string(),
        width: source.width(),
        height: source.height(),
        srcset: srcset(&variants),
        variants: variants
            .iter()
            .map(|v| VariantRecord {
                width: v.width(),
                height: v.height(),
                filesize: v.filesize(),
                path: v.public_path().to_string(),
            })
            .collect(),
    })
}
