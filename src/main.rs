use clap::{Parser, Subcommand};
use srcset_widths::breakpoints::aggregate;
use srcset_widths::config::{self, ConfigError, ToolConfig, ViewportContext};
use srcset_widths::imaging::{EstimatedImage, OutputSettings, get_variants, target_range};
use srcset_widths::{output, process};
use std::path::{Path, PathBuf};

/// Settings that override the config file for a single run.
#[derive(clap::Args, Clone)]
struct Overrides {
    /// Image sizes attribute, e.g. "(max-width: 800px) 100vw, 50vw"
    #[arg(long, global = true)]
    sizes: Option<String>,

    /// Max variants per density level (0-10, 0 = unlimited)
    #[arg(long, global = true)]
    max_steps: Option<i64>,

    /// Target filesize difference between variants, in bytes
    #[arg(long, global = true)]
    size_diff: Option<i64>,

    /// Pixel density levels to render (1-3)
    #[arg(long, global = true)]
    high_res: Option<i64>,

    /// Fixed widths to render instead of distributing automatically
    #[arg(long, global = true, value_delimiter = ',')]
    render_sizes: Option<Vec<u32>>,

    /// Smallest viewport width in px
    #[arg(long, global = true)]
    min_viewport: Option<u32>,

    /// Largest viewport width in px
    #[arg(long, global = true)]
    max_viewport: Option<u32>,

    /// Root font size in px for rem/em
    #[arg(long, global = true)]
    rem_size: Option<u32>,
}

impl Overrides {
    fn apply(self, config: ToolConfig) -> Result<ToolConfig, ConfigError> {
        let viewport = ViewportContext::new(
            self.min_viewport.unwrap_or(config.viewport.min_width()),
            self.max_viewport.unwrap_or(config.viewport.max_width()),
            self.rem_size.unwrap_or(config.viewport.rem_size()),
        )?;

        let mut render = config.render;
        if let Some(sizes) = self.sizes {
            render = render.with_sizes(sizes);
        }
        if let Some(max_steps) = self.max_steps {
            render = render.with_max_steps(max_steps);
        }
        if let Some(size_diff) = self.size_diff {
            render = render.with_size_diff(size_diff);
        }
        if let Some(high_res) = self.high_res {
            render = render.with_high_res(high_res);
        }
        if let Some(render_sizes) = self.render_sizes {
            render = render.with_render_sizes(render_sizes);
        }

        Ok(ToolConfig {
            viewport,
            render,
            ..config
        })
    }
}

#[derive(Parser)]
#[command(name = "srcset-widths")]
#[command(about = "Compute and render responsive image widths from a sizes attribute")]
#[command(long_about = "\
Compute and render responsive image widths from a sizes attribute

Reads an img sizes attribute such as

  (max-width: 800px) 100vw, (max-width: 1600px) 50vw, 800px

works out which image widths browsers will ask for between the smallest and
largest configured viewport, and spreads variants over that range so that
neighbouring files differ by roughly the same number of bytes.

Supported syntax:
  Conditions:  min-width:, max-width:, width <, width <=, width >, width >=
  Units:       px, rem, em, vw, vh
  Math:        calc() with + - * / and parentheses

Settings are read from srcset-widths.toml in the working directory when
present. Run 'srcset-widths gen-config' to generate a documented one.")]
#[command(version)]
struct Cli {
    /// Config file [default: ./srcset-widths.toml when present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the viewport → image width breakpoints of a sizes attribute
    Breakpoints {
        /// Sizes attribute [default: render.sizes from config]
        sizes: Option<String>,
    },
    /// Plan variants for an image of the given size without rendering
    Plan {
        /// Source image width in px
        #[arg(long)]
        width: u32,
        /// Source image filesize in bytes
        #[arg(long)]
        filesize: u64,
        /// Name used for planned file names
        #[arg(long, default_value = "image")]
        name: String,
    },
    /// Render JPEG variants and a manifest for image files or directories
    Render {
        /// Image files or directories to search for images
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output directory [default: output.dir from config]
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock srcset-widths.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config: config_file,
        verbose,
        overrides,
        command,
    } = Cli::parse();
    if verbose {
        init_logging();
    }

    match command {
        Command::Breakpoints { sizes } => {
            let config = load_config(config_file.as_deref(), overrides)?;
            let sizes = sizes.unwrap_or_else(|| config.render.sizes().to_string());
            let map = aggregate(&sizes, &config.viewport);
            output::print_breakpoints(&sizes, &map);
        }
        Command::Plan {
            width,
            filesize,
            name,
        } => {
            let config = load_config(config_file.as_deref(), overrides)?;
            let source = EstimatedImage::new(&name, width, filesize);
            let range = target_range(&config.render, &config.viewport, width);
            let variants = get_variants(&source, &config.render, &config.viewport)?;
            output::print_plan(width, filesize, range, &variants);
        }
        Command::Render {
            paths,
            output: output_dir,
        } => {
            let config = load_config(config_file.as_deref(), overrides)?;
            init_thread_pool(&config.processing);
            let mut settings = OutputSettings::from_config(&config.output, Path::new("."));
            if let Some(dir) = output_dir {
                settings.dir = dir;
            }

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(&paths, &config, &settings, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            let manifest = result?;
            output::print_render_summary(
                &manifest,
                &settings.dir.join(process::MANIFEST_FILE_NAME),
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Config from `--config` or the working directory, with flag overrides applied.
fn load_config(file: Option<&Path>, overrides: Overrides) -> Result<ToolConfig, ConfigError> {
    let base = match file {
        Some(file) => config::load_config_file(file)?,
        None => config::load_config(Path::new("."))?,
    };
    overrides.apply(base)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Writes `log` records to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
