//! File-backed images using the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` + `std::fs::metadata` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! A [`FileImage`] decodes its source at most once, on the first resize, and
//! every variant produced from it resizes from those source pixels, never
//! from another variant.

use super::backend::{BackendError, ImageSource};
use super::params::{OutputSettings, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, OnceLock};

/// Extensions whose decoders are compiled in and known to work.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` has one of the [`supported_input_extensions`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// File stem of `path` used for its variant names; `"image"` when it has none.
pub fn source_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
}

/// Shared state of one source file and everything rendered from it.
#[derive(Debug)]
struct SourceImage {
    path: PathBuf,
    stem: String,
    width: u32,
    height: u32,
    output: OutputSettings,
    pixels: OnceLock<DynamicImage>,
}

impl SourceImage {
    fn pixels(&self) -> Result<&DynamicImage, BackendError> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels);
        }
        let decoded = load_image(&self.path)?;
        Ok(self.pixels.get_or_init(|| decoded))
    }
}

/// An image file on disk: either a source opened with [`FileImage::open`] or
/// a variant written by [`ImageSource::resize`].
#[derive(Debug, Clone)]
pub struct FileImage {
    source: Arc<SourceImage>,
    path: PathBuf,
    public_path: String,
    width: u32,
    height: u32,
    filesize: u64,
}

impl FileImage {
    /// Read dimensions and size of `path` without decoding pixels.
    ///
    /// Variants are written to `output.dir` as `{stem}-{width}w.jpg`, where
    /// `stem` is [`source_stem`] of `path`. The source itself has an empty
    /// public path, so it never appears in a `srcset`.
    pub fn open(path: &Path, output: OutputSettings) -> Result<Self, BackendError> {
        Self::open_as(path, source_stem(path), output)
    }

    /// Like [`FileImage::open`], with an explicit stem for variant names.
    pub fn open_as(path: &Path, stem: &str, output: OutputSettings) -> Result<Self, BackendError> {
        let filesize = std::fs::metadata(path)?.len();
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            source: Arc::new(SourceImage {
                path: path.to_path_buf(),
                stem: stem.to_string(),
                width,
                height,
                output,
                pixels: OnceLock::new(),
            }),
            path: path.to_path_buf(),
            public_path: String::new(),
            width,
            height,
            filesize,
        })
    }

    /// Location of this image on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height of a variant `width` pixels wide, keeping the source's aspect
    /// ratio.
    fn scaled_height(&self, width: u32) -> u32 {
        let source = &self.source;
        let height = f64::from(source.height) * f64::from(width) / f64::from(source.width);
        (height.round() as u32).max(1)
    }
}

impl ImageSource for FileImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn filesize(&self) -> u64 {
        self.filesize
    }

    fn public_path(&self) -> &str {
        &self.public_path
    }

    fn resize(&self, width: u32) -> Result<Self, BackendError> {
        if width == 0 {
            return Err(BackendError::ProcessingFailed(
                "cannot resize to zero width".into(),
            ));
        }
        let source = &self.source;
        let params = ResizeParams {
            output: source.output.variant_path(&source.stem, width),
            width,
            height: self.scaled_height(width),
            quality: source.output.quality,
        };
        write_variant(source.pixels()?, &params)?;

        let filesize = std::fs::metadata(&params.output)?.len();
        let file_name = params
            .output
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Ok(Self {
            source: Arc::clone(source),
            public_path: source.output.public_path(file_name),
            path: params.output,
            width: params.width,
            height: params.height,
            filesize,
        })
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Resize `img` and write it as JPEG according to `params`.
fn write_variant(img: &DynamicImage, params: &ResizeParams) -> Result<(), BackendError> {
    if let Some(dir) = params.output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
    save_jpeg(&resized, &params.output, params.quality.value())
}

fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let rgb = img.to_rgb8();
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let quality = u8::try_from(quality.clamp(1, 100)).unwrap_or(100);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}
