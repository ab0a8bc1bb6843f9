//! The image contract the variant computation is written against.
//!
//! The core never touches pixels. It only needs to know an image's width and
//! encoded size, and to ask for a resized copy. [`ImageSource`] is that
//! contract; implementations decide what "resize" means:
//!
//! | Implementation | Resize |
//! |---|---|
//! | [`FileImage`](super::rust_backend::FileImage) | decode, Lanczos3, encode JPEG to disk |
//! | [`EstimatedImage`](super::estimate::EstimatedImage) | filesize model only, no pixels |

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// An image the variant computation can measure and resize.
///
/// `resize` never modifies `self`; it returns a new value describing the
/// resized result and may be called any number of times with different
/// widths on the same source.
pub trait ImageSource: Sized {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Encoded size in bytes.
    fn filesize(&self) -> u64;

    /// Public path or URL of the image. Informational; may be empty.
    fn public_path(&self) -> &str {
        ""
    }

    /// Produce a copy of this image at `width` pixels wide.
    fn resize(&self, width: u32) -> Result<Self, BackendError>;
}
