//! Planning without pixels.
//!
//! [`EstimatedImage`] answers the variant computation's questions from a
//! model: encoded size grows with the square of the width. That is an
//! overestimate for real JPEGs, which compress large images better, but it
//! is the same shape the step distribution is tuned against, so a plan made
//! here is a good preview of what `render` will produce.

use super::backend::{BackendError, ImageSource};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedImage {
    width: u32,
    filesize: u64,
    name: Arc<str>,
    public_path: String,
}

impl EstimatedImage {
    /// A source of `width` pixels and `filesize` bytes. `name` is used to
    /// build public paths (`{name}-{width}w.jpg`).
    pub fn new(name: &str, width: u32, filesize: u64) -> Self {
        let name: Arc<str> = Arc::from(name);
        Self {
            width,
            filesize,
            public_path: format!("{name}.jpg"),
            name,
        }
    }
}

/// Filesize of a `source_width`-wide image of `source_filesize` bytes when
/// scaled to `width`.
pub fn estimate_filesize(source_width: u32, source_filesize: u64, width: u32) -> u64 {
    if source_width == 0 {
        return 0;
    }
    let ratio = f64::from(width) / f64::from(source_width);
    (source_filesize as f64 * ratio * ratio).round() as u64
}

impl ImageSource for EstimatedImage {
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
        Ok(Self {
            width,
            filesize: estimate_filesize(self.width, self.filesize, width),
            public_path: format!("{}-{width}w.jpg", self.name),
            name: Arc::clone(&self.name),
        })
    }
}
