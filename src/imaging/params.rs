//! Parameter types for writing variants.
//!
//! These structs describe *what* to write, not *how*. The
//! [`rust_backend`](super::rust_backend) turns them into pixels on disk;
//! everything here is plain data and naming rules.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1-100, default 85). Clamped on construction.
//! - [`OutputSettings`]: output directory, public path prefix and quality shared by every variant of a run.
//! - [`ResizeParams`]: output path, target dimensions and quality for a single resize.

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Where variants go and how they are addressed publicly.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub public_prefix: String,
    pub quality: Quality,
}

impl OutputSettings {
    /// Settings from the `[output]` config section, with a relative `dir`
    /// resolved against `base`.
    pub fn from_config(config: &OutputConfig, base: &Path) -> Self {
        Self {
            dir: base.join(&config.dir),
            public_prefix: config.public_prefix.clone(),
            quality: Quality::new(config.quality),
        }
    }

    /// Output file for the `width` variant of `stem`.
    pub fn variant_path(&self, stem: &str, width: u32) -> PathBuf {
        self.dir.join(variant_file_name(stem, width))
    }

    /// Public path for a file written to the output directory.
    pub fn public_path(&self, file_name: &str) -> String {
        join_public_path(&self.public_prefix, file_name)
    }
}

/// File name for the `width` variant of `stem`: `{stem}-{width}w.jpg`.
pub fn variant_file_name(stem: &str, width: u32) -> String {
    format!("{stem}-{width}w.jpg")
}

/// Join a public prefix and a file name with exactly one `/` between them.
///
/// An empty prefix yields the bare file name.
pub fn join_public_path(prefix: &str, file_name: &str) -> String {
    if prefix.is_empty() {
        return file_name.to_string();
    }
    format!("{}/{}", prefix.trim_end_matches('/'), file_name)
}

/// Parameters for writing one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn variant_names_carry_width() {
        assert_eq!(variant_file_name("hero", 1939), "hero-1939w.jpg");
    }

    #[test]
    fn public_path_without_prefix_is_file_name() {
        assert_eq!(join_public_path("", "hero-900w.jpg"), "hero-900w.jpg");
    }

    #[test]
    fn public_path_joins_with_single_slash() {
        assert_eq!(
            join_public_path("/media/", "hero-900w.jpg"),
            "/media/hero-900w.jpg"
        );
        assert_eq!(
            join_public_path("https://cdn.example.com/img", "a-1w.jpg"),
            "https://cdn.example.com/img/a-1w.jpg"
        );
    }

    #[test]
    fn settings_from_config_resolve_dir() {
        let config = OutputConfig {
            dir: "out".into(),
            public_prefix: "/img".into(),
            quality: 200,
        };
        let settings = OutputSettings::from_config(&config, Path::new("/site"));
        assert_eq!(settings.dir, PathBuf::from("/site/out"));
        assert_eq!(settings.quality.value(), 100);
        assert_eq!(
            settings.variant_path("cat", 400),
            PathBuf::from("/site/out/cat-400w.jpg")
        );
        assert_eq!(settings.public_path("cat-400w.jpg"), "/img/cat-400w.jpg");
    }
}
