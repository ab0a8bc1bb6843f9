//! Configuration: viewport assumptions, render settings and TOML loading.
//!
//! The two values the core computation reads are [`ViewportContext`] and
//! [`RenderConfig`]. Both are immutable and always valid: construction clamps
//! or rejects out-of-range input, and every `with_*` method returns a new,
//! re-validated value instead of mutating in place.
//!
//! ## Config File
//!
//! `srcset-widths.toml` in the working directory (or any file passed with
//! `--config`) is merged over the stock defaults:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [viewport]
//! min_width = 320           # Smallest viewport to produce images for
//! max_width = 2400          # Largest viewport to produce images for
//! rem_size = 16             # Root font size for rem/em
//!
//! [render]
//! sizes = "100vw"           # img sizes attribute
//! max_steps = 10            # Max variants per density level (0-10, 0 = unlimited)
//! size_diff = 50000         # Target filesize difference between variants (bytes)
//! high_res = 1              # Pixel density levels (1-3)
//! render_sizes = []         # Fixed widths; disables automatic distribution
//!
//! [output]
//! dir = "variants"          # Where rendered variants are written
//! public_prefix = ""        # URL prefix used in srcset
//! quality = 85              # JPEG quality (1-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = "srcset-widths.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

// =============================================================================
// Viewport
// =============================================================================

/// Viewport bounds and root font size that size expressions resolve against.
///
/// Invariant: `0 < min_width <= max_width` and `rem_size > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ViewportSettings")]
pub struct ViewportContext {
    min_width: u32,
    max_width: u32,
    rem_size: u32,
}

impl ViewportContext {
    pub fn new(min_width: u32, max_width: u32, rem_size: u32) -> Result<Self, ConfigError> {
        if min_width == 0 || max_width == 0 {
            return Err(ConfigError::Validation(
                "viewport widths must be non-zero".into(),
            ));
        }
        if min_width > max_width {
            return Err(ConfigError::Validation(format!(
                "viewport.min_width ({min_width}) must not exceed viewport.max_width ({max_width})"
            )));
        }
        if rem_size == 0 {
            return Err(ConfigError::Validation(
                "viewport.rem_size must be non-zero".into(),
            ));
        }
        Ok(Self {
            min_width,
            max_width,
            rem_size,
        })
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn rem_size(&self) -> u32 {
        self.rem_size
    }

    pub fn with_min_width(self, min_width: u32) -> Result<Self, ConfigError> {
        Self::new(min_width, self.max_width, self.rem_size)
    }

    pub fn with_max_width(self, max_width: u32) -> Result<Self, ConfigError> {
        Self::new(self.min_width, max_width, self.rem_size)
    }

    pub fn with_rem_size(self, rem_size: u32) -> Result<Self, ConfigError> {
        Self::new(self.min_width, self.max_width, rem_size)
    }
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self {
            min_width: 320,
            max_width: 2400,
            rem_size: 16,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ViewportSettings {
    min_width: u32,
    max_width: u32,
    rem_size: u32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        let defaults = ViewportContext::default();
        Self {
            min_width: defaults.min_width,
            max_width: defaults.max_width,
            rem_size: defaults.rem_size,
        }
    }
}

impl TryFrom<ViewportSettings> for ViewportContext {
    type Error = ConfigError;

    fn try_from(raw: ViewportSettings) -> Result<Self, Self::Error> {
        Self::new(raw.min_width, raw.max_width, raw.rem_size)
    }
}

// =============================================================================
// Render settings
// =============================================================================

/// Parameters for one variant computation.
///
/// - `sizes`: the `img` `sizes` attribute, e.g. `"(max-width: 1000px) 100vw, 1000px"`
/// - `max_steps`: maximum variants per density level, clamped to 0–10 (0 = no cap)
/// - `size_diff`: rough filesize gap between variants in bytes; at least
///   5000, or 20000 when `max_steps` is 0
/// - `high_res`: pixel density levels, clamped to 1–3
/// - `render_sizes`: fixed widths, sorted descending; when non-empty the
///   automatic distribution is skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RenderSettings")]
pub struct RenderConfig {
    sizes: String,
    max_steps: u32,
    size_diff: u64,
    high_res: u32,
    render_sizes: Vec<u32>,
}

impl RenderConfig {
    pub const DEFAULT_MAX_STEPS: i64 = 10;
    pub const DEFAULT_SIZE_DIFF: i64 = 50_000;

    pub fn new(sizes: impl Into<String>) -> Self {
        Self::from_raw(
            sizes.into(),
            Self::DEFAULT_MAX_STEPS,
            Self::DEFAULT_SIZE_DIFF,
            1,
            Vec::new(),
        )
    }

    fn from_raw(
        sizes: String,
        max_steps: i64,
        size_diff: i64,
        high_res: i64,
        render_sizes: Vec<u32>,
    ) -> Self {
        let max_steps = max_steps.clamp(0, 10);
        let size_diff_floor = if max_steps > 0 { 5_000 } else { 20_000 };
        let mut render_sizes = render_sizes;
        render_sizes.sort_unstable_by(|a, b| b.cmp(a));
        Self {
            sizes,
            max_steps: max_steps as u32,
            size_diff: size_diff.max(size_diff_floor) as u64,
            high_res: high_res.clamp(1, 3) as u32,
            render_sizes,
        }
    }

    pub fn sizes(&self) -> &str {
        &self.sizes
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn size_diff(&self) -> u64 {
        self.size_diff
    }

    pub fn high_res(&self) -> u32 {
        self.high_res
    }

    pub fn render_sizes(&self) -> &[u32] {
        &self.render_sizes
    }

    pub fn with_sizes(self, sizes: impl Into<String>) -> Self {
        Self {
            sizes: sizes.into(),
            ..self
        }
    }

    pub fn with_max_steps(self, max_steps: i64) -> Self {
        Self::from_raw(
            self.sizes,
            max_steps,
            self.size_diff as i64,
            self.high_res as i64,
            self.render_sizes,
        )
    }

    pub fn with_size_diff(self, size_diff: i64) -> Self {
        Self::from_raw(
            self.sizes,
            self.max_steps as i64,
            size_diff,
            self.high_res as i64,
            self.render_sizes,
        )
    }

    pub fn with_high_res(self, high_res: i64) -> Self {
        Self::from_raw(
            self.sizes,
            self.max_steps as i64,
            self.size_diff as i64,
            high_res,
            self.render_sizes,
        )
    }

    pub fn with_render_sizes(self, render_sizes: Vec<u32>) -> Self {
        Self::from_raw(
            self.sizes,
            self.max_steps as i64,
            self.size_diff as i64,
            self.high_res as i64,
            render_sizes,
        )
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new("100vw")
    }
}

/// Unvalidated `[render]` table as written by the user.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RenderSettings {
    sizes: String,
    max_steps: i64,
    size_diff: i64,
    high_res: i64,
    render_sizes: Vec<RenderSize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sizes: "100vw".to_string(),
            max_steps: RenderConfig::DEFAULT_MAX_STEPS,
            size_diff: RenderConfig::DEFAULT_SIZE_DIFF,
            high_res: 1,
            render_sizes: Vec::new(),
        }
    }
}

/// One `render_sizes` entry: numbers and numeric strings are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RenderSize {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RenderSize {
    fn width(&self) -> Option<u32> {
        let from_float = |value: f64| {
            (value.is_finite() && value >= 0.0 && value <= u32::MAX as f64)
                .then(|| value.round() as u32)
        };
        match self {
            RenderSize::Integer(n) => u32::try_from(*n).ok(),
            RenderSize::Float(f) => from_float(*f),
            RenderSize::Text(s) => s.trim().parse::<f64>().ok().and_then(from_float),
            RenderSize::Other(_) => None,
        }
    }
}

impl From<RenderSettings> for RenderConfig {
    fn from(raw: RenderSettings) -> Self {
        // A single non-numeric entry invalidates the whole list.
        let render_sizes = raw
            .render_sizes
            .iter()
            .map(RenderSize::width)
            .collect::<Option<Vec<u32>>>()
            .unwrap_or_else(|| {
                log::warn!("render_sizes contains a non-numeric entry; ignoring the list");
                Vec::new()
            });
        Self::from_raw(
            raw.sizes,
            raw.max_steps,
            raw.size_diff,
            raw.high_res,
            render_sizes,
        )
    }
}

// =============================================================================
// Output and processing
// =============================================================================

/// Where and how rendered variants are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory for variant files and the manifest.
    pub dir: String,
    /// Prefix for public paths in srcset (e.g. `"/media/"`).
    pub public_prefix: String,
    /// JPEG encoding quality (1 = worst, 100 = best). Out-of-range values
    /// are clamped.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "variants".to_string(),
            public_prefix: String::new(),
            quality: 85,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Root config, loading and merging
// =============================================================================

/// Complete tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub viewport: ViewportContext,
    pub render: RenderConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
}

impl ToolConfig {
    /// Validate values that are not already enforced by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(file: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(file)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load [`CONFIG_FILE_NAME`] from `dir`, falling back to stock defaults when
/// the file does not exist.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let overlay = if path.exists() {
        Some(load_raw_config(&path)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_config_file(file: &Path) -> Result<ToolConfig, ConfigError> {
    resolve_config(stock_defaults_value(), Some(load_raw_config(file)?))
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# srcset-widths configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Viewport assumptions
# ---------------------------------------------------------------------------
[viewport]
# Smallest and largest viewport widths (px) images are produced for.
min_width = 320
max_width = 2400

# Root font size (px) used to resolve rem and em.
rem_size = 16

# ---------------------------------------------------------------------------
# Variant computation
# ---------------------------------------------------------------------------
[render]
# The img sizes attribute. Supported: min-width/max-width and
# width <, <=, >, >= conditions; px, rem, em, vw, vh; calc() with + - * /.
sizes = "100vw"

# Maximum number of variants per density level (0-10, 0 = no cap).
max_steps = 10

# Approximate filesize difference (bytes) between neighbouring variants.
# At least 5000, or 20000 when max_steps is 0.
size_diff = 50000

# Pixel density levels to produce (1-3). 2 adds variants for 2x screens.
high_res = 1

# Fixed widths to render instead of the automatic distribution.
# Any non-numeric entry disables the list.
render_sizes = []

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Directory for rendered variants and manifest.json.
dir = "variants"

# Prefix for paths written into srcset, e.g. "/media/".
public_prefix = ""

# JPEG encoding quality (1 = worst, 100 = best).
quality = 85

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers. Omit for auto (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::OutputSettings;
    use tempfile::TempDir;

    // =========================================================================
    // ViewportContext
    // =========================================================================

    #[test]
    fn default_viewport() {
        let vp = ViewportContext::default();
        assert_eq!((vp.min_width(), vp.max_width(), vp.rem_size()), (320, 2400, 16));
    }

    #[test]
    fn viewport_rejects_inverted_bounds() {
        assert!(matches!(
            ViewportContext::new(800, 400, 16),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn viewport_rejects_zero_values() {
        assert!(ViewportContext::new(0, 400, 16).is_err());
        assert!(ViewportContext::new(100, 400, 0).is_err());
    }

    #[test]
    fn viewport_with_returns_new_value() {
        let vp = ViewportContext::default();
        let wider = vp.with_max_width(3000).unwrap();
        assert_eq!(wider.max_width(), 3000);
        assert_eq!(vp.max_width(), 2400);
        assert!(vp.with_min_width(5000).is_err());
    }

    // =========================================================================
    // RenderConfig clamping
    // =========================================================================

    #[test]
    fn render_config_defaults() {
        let config = RenderConfig::new("80vw");
        assert_eq!(config.sizes(), "80vw");
        assert_eq!(config.max_steps(), 10);
        assert_eq!(config.size_diff(), 50_000);
        assert_eq!(config.high_res(), 1);
        assert!(config.render_sizes().is_empty());
    }

    #[test]
    fn max_steps_clamped_to_range() {
        assert_eq!(RenderConfig::new("").with_max_steps(25).max_steps(), 10);
        assert_eq!(RenderConfig::new("").with_max_steps(-3).max_steps(), 0);
    }

    #[test]
    fn size_diff_floor_depends_on_max_steps() {
        let config = RenderConfig::new("").with_size_diff(100);
        assert_eq!(config.size_diff(), 5_000);

        let unlimited = config.with_max_steps(0);
        assert_eq!(unlimited.size_diff(), 20_000);
    }

    #[test]
    fn high_res_clamped_to_range() {
        assert_eq!(RenderConfig::new("").with_high_res(0).high_res(), 1);
        assert_eq!(RenderConfig::new("").with_high_res(7).high_res(), 3);
        assert_eq!(RenderConfig::new("").with_high_res(2).high_res(), 2);
    }

    #[test]
    fn render_sizes_sorted_descending() {
        let config = RenderConfig::new("").with_render_sizes(vec![400, 1200, 800]);
        assert_eq!(config.render_sizes(), &[1200, 800, 400]);
    }

    #[test]
    fn with_sizes_keeps_other_fields() {
        let config = RenderConfig::new("100vw")
            .with_max_steps(4)
            .with_sizes("50vw");
        assert_eq!(config.sizes(), "50vw");
        assert_eq!(config.max_steps(), 4);
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[render]
sizes = "(max-width: 800px) 100vw, 800px"
"##;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.render.sizes(), "(max-width: 800px) 100vw, 800px");
        assert_eq!(config.render.max_steps(), 10);
        assert_eq!(config.viewport, ViewportContext::default());
    }

    #[test]
    fn parse_clamps_render_values() {
        let toml = r##"
[render]
max_steps = 40
size_diff = 10
high_res = 5
"##;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.render.max_steps(), 10);
        assert_eq!(config.render.size_diff(), 5_000);
        assert_eq!(config.render.high_res(), 3);
    }

    #[test]
    fn parse_render_sizes_accepts_numeric_strings() {
        let toml = r##"
[render]
render_sizes = [400, "1200", 800]
"##;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.render.render_sizes(), &[1200, 800, 400]);
    }

    #[test]
    fn parse_render_sizes_cleared_on_non_numeric_entry() {
        let toml = r##"
[render]
render_sizes = [400, "large", 800]
"##;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert!(config.render.render_sizes().is_empty());
    }

    #[test]
    fn parse_invalid_viewport_is_error() {
        let toml = r##"
[viewport]
min_width = 3000
"##;
        let result: Result<ToolConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[render]
steps = 4
"#;
        let result: Result<ToolConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str("[thumbnails]\nsize = 1\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Merging and loading
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table_preserves_base_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[viewport]\nmax_width = 1600").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["viewport"]["max_width"].as_integer(), Some(1600));
        assert_eq!(merged["viewport"]["min_width"].as_integer(), Some(320));
        assert_eq!(merged["render"]["sizes"].as_str(), Some("100vw"));
    }

    #[test]
    fn stock_defaults_round_trip() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.viewport, ViewportContext::default());
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.output.quality, 85);
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: ToolConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.viewport, ViewportContext::default());
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.output.dir, "variants");
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r##"
[viewport]
max_width = 1600

[render]
sizes = "80vw"
high_res = 2
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.viewport.max_width(), 1600);
        assert_eq!(config.viewport.min_width(), 320);
        assert_eq!(config.render.sizes(), "80vw");
        assert_eq!(config.render.high_res(), 2);
    }

    #[test]
    fn load_config_file_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config_file(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[render\nsizes = ").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_quality_is_clamped_not_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("q.toml");
        fs::write(&path, "[output]\nquality = 0\n").unwrap();
        let config = load_config_file(&path).unwrap();
        let settings = OutputSettings::from_config(&config.output, tmp.path());
        assert_eq!(settings.quality.value(), 1);

        fs::write(&path, "[output]\nquality = 250\n").unwrap();
        let config = load_config_file(&path).unwrap();
        let settings = OutputSettings::from_config(&config.output, tmp.path());
        assert_eq!(settings.quality.value(), 100);
    }

    #[test]
    fn validate_zero_processes() {
        let mut config = ToolConfig::default();
        config.processing.max_processes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_auto_uses_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }
}
